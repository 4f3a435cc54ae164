use chrono::{Datelike, NaiveDate};
use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Dataset location relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "noaa_historical_weather_10yr.csv";

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// One daily observation for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: String,
    /// `DATE` exactly as it appears in the file.
    pub raw_date: String,
    /// `None` when `raw_date` is not a `YYYY-MM-DD` date.
    pub date: Option<NaiveDate>,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub prcp: Option<f64>,
    pub snow: Option<f64>,
}

impl Observation {
    /// True when rain or snow was recorded; a day with both still counts once.
    pub fn has_precip(&self) -> bool {
        let nonzero = |v: Option<f64>| v.is_some_and(|x| x != 0.0);
        nonzero(self.prcp) || nonzero(self.snow)
    }

    /// `TMAX - TMIN`, signed. `None` when either reading is missing.
    pub fn temp_delta(&self) -> Option<f64> {
        Some(self.tmax? - self.tmin?)
    }
}

/// Supported cities and their station names in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum City {
    Bos,
    Mia,
    Jnu,
}

impl City {
    pub const ALL: [City; 3] = [City::Bos, City::Mia, City::Jnu];

    pub fn code(self) -> &'static str {
        match self {
            City::Bos => "bos",
            City::Mia => "mia",
            City::Jnu => "jnu",
        }
    }

    pub fn station_name(self) -> &'static str {
        match self {
            City::Bos => "BOSTON, MA US",
            City::Mia => "MIAMI INTERNATIONAL AIRPORT, FL US",
            City::Jnu => "JUNEAU AIRPORT, AK US",
        }
    }
}

/// Statistic to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Function {
    DaysOfPrecip,
    MaxTempDelta,
}

/// Period of the record considered by the temperature statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    All,
    Year(i32),
    Month { year: i32, month: u32 },
}

impl Window {
    /// Builds a window from optional CLI values.
    ///
    /// A month without a year is rejected rather than matched across all years.
    pub fn resolve(year: Option<i32>, month: Option<u32>) -> crate::Result<Self> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(crate::WeatherError::Validation(format!(
                    "month must be between 1 and 12, got {month}"
                )));
            }
        }
        match (year, month) {
            (None, None) => Ok(Window::All),
            (Some(year), None) => Ok(Window::Year(year)),
            (Some(year), Some(month)) => Ok(Window::Month { year, month }),
            (None, Some(month)) => Err(crate::WeatherError::AmbiguousWindow { month }),
        }
    }

    /// Undated rows belong to the full record only.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        match (*self, date) {
            (Window::All, _) => true,
            (Window::Year(year), Some(date)) => date.year() == year,
            (Window::Month { year, month }, Some(date)) => {
                date.year() == year && date.month() == month
            }
            (_, None) => false,
        }
    }

    /// Appended to the city code in output file names, e.g. `2015` or `201506`.
    pub fn file_suffix(&self) -> String {
        match *self {
            Window::All => String::new(),
            Window::Year(year) => year.to_string(),
            Window::Month { year, month } => format!("{year}{month:02}"),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Window::All => write!(f, "the full record"),
            Window::Year(year) => write!(f, "year {year}"),
            Window::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// Average yearly precipitation days, as written to `<city>_ppt.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationResult {
    pub city: String,
    pub days_of_precip: f64,
    /// Raw count over the whole record; reported on the console only.
    #[serde(skip)]
    pub precip_days: usize,
}

/// Day with the largest temperature swing, as written to `<city>[year[month]]_temp.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureDeltaResult {
    pub city: String,
    pub date: String,
    pub temp_change: f64,
}

/// A single invocation: which statistic, for which city and period.
#[derive(Debug, Clone)]
pub struct Request {
    pub function: Function,
    pub city: City,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Where to read the dataset and where to write results
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Outcome of a processed request.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: String,
    pub output_path: PathBuf,
}
