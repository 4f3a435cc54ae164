use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use weather_stats::{City, Function, Request, SimpleLogger, StatsConfig, process_request};

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Weather function to compute
    #[arg(long, value_enum)]
    function: Function,

    /// City of interest
    #[arg(long, value_enum)]
    city: City,

    /// Year to evaluate, 2010-2019 inclusive (max-temp-delta only)
    #[arg(long, value_parser = clap::value_parser!(i32).range(2010..=2019))]
    year: Option<i32>,

    /// Month to evaluate, 1-12 (max-temp-delta only, requires --year)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Historical weather CSV
    #[arg(long, default_value = weather_stats::structs::DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Directory the JSON result is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level for output
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    debug!(
        "Function: {:?} | City: {:?} | Year: {:?} | Month: {:?}",
        args.function, args.city, args.year, args.month
    );
    let request = Request {
        function: args.function,
        city: args.city,
        year: args.year,
        month: args.month,
    };
    let config = StatsConfig {
        data_path: args.data,
        output_dir: args.output_dir,
    };

    match process_request(&request, &config) {
        Ok(report) => {
            println!("\n{}\n", report.summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
