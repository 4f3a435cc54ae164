use crate::error::{Result, WeatherError};
use crate::load::{output_path, write_json};
use crate::structs::{
    City, Function, Observation, PrecipitationResult, Report, Request, StatsConfig,
    TemperatureDeltaResult, Window,
};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use std::{fs::File, path::Path};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years covered by the dataset. The yearly average divides by this, not by the
/// span of dates actually present.
pub const YEARS_IN_RECORD: f64 = 10.0;

/// Raw CSV row; columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct ObservationRow {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "TMAX")]
    tmax: Option<f64>,
    #[serde(rename = "TMIN")]
    tmin: Option<f64>,
    #[serde(rename = "PRCP")]
    prcp: Option<f64>,
    #[serde(rename = "SNOW")]
    snow: Option<f64>,
}

/// Reads every observation from the dataset CSV, in file order.
///
/// Dates are parsed once here. Rows whose `DATE` is not a plain `YYYY-MM-DD`
/// value are kept undated with a warning; they only fall in [`Window::All`].
///
/// # Errors
///
/// Returns `WeatherError::Io` if the file cannot be opened and
/// `WeatherError::Csv` if a row is malformed or a required column is missing.
pub fn read_observations(file_path: &Path) -> Result<Vec<Observation>> {
    debug!("Reading CSV file: {}", file_path.display());
    let file = File::open(file_path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut observations = Vec::new();
    let mut undated = 0;
    for (index, row) in reader.deserialize::<ObservationRow>().enumerate() {
        let row = row?;
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).ok();
        if date.is_none() {
            // Header is line 1
            warn!("Line {}: unparseable date '{}'", index + 2, row.date);
            undated += 1;
        }
        observations.push(Observation {
            station: row.name,
            raw_date: row.date,
            date,
            tmax: row.tmax,
            tmin: row.tmin,
            prcp: row.prcp,
            snow: row.snow,
        });
    }

    debug!(
        "Read {} observations, {} without a valid date",
        observations.len(),
        undated
    );
    Ok(observations)
}

/// Keeps the observations whose station name is exactly the city's station, in order.
pub fn filter_station(observations: &[Observation], city: City) -> Vec<Observation> {
    let station = city.station_name();
    observations
        .iter()
        .filter(|obs| obs.station == station)
        .cloned()
        .collect()
}

/// Loads the dataset and keeps only the given city's rows.
///
/// # Errors
///
/// Fails with `WeatherError::EmptyResult` when the station has no rows at all,
/// in addition to the errors of [`read_observations`].
pub fn load_city_observations(file_path: &Path, city: City) -> Result<Vec<Observation>> {
    let all = read_observations(file_path)?;
    let city_rows = filter_station(&all, city);
    debug!(
        "{} of {} rows belong to {}",
        city_rows.len(),
        all.len(),
        city.station_name()
    );
    if city_rows.is_empty() {
        return Err(WeatherError::EmptyResult {
            station: city.station_name().to_string(),
        });
    }
    Ok(city_rows)
}

pub fn count_precip_days(observations: &[Observation]) -> usize {
    observations.iter().filter(|obs| obs.has_precip()).count()
}

/// Average number of precipitation days per year over the whole record.
pub fn days_of_precip(observations: &[Observation], city: City) -> PrecipitationResult {
    let precip_days = count_precip_days(observations);
    PrecipitationResult {
        city: city.station_name().to_string(),
        days_of_precip: round_to_tenth(precip_days as f64 / YEARS_IN_RECORD),
        precip_days,
    }
}

/// Finds the day with the largest `TMAX - TMIN` inside `window`.
///
/// Only a strictly greater delta replaces the current best, so ties resolve to the
/// earliest row. Rows missing either temperature are skipped.
///
/// # Errors
///
/// Returns `WeatherError::EmptyWindow` if no row in the window has both readings.
pub fn max_temp_delta(
    observations: &[Observation],
    city: City,
    window: Window,
) -> Result<TemperatureDeltaResult> {
    let mut best: Option<(&Observation, f64)> = None;
    let mut in_window = 0;
    for obs in observations.iter().filter(|obs| window.contains(obs.date)) {
        in_window += 1;
        let Some(delta) = obs.temp_delta().filter(|d| d.is_finite()) else {
            continue;
        };
        if best.is_none_or(|(_, max)| delta > max) {
            best = Some((obs, delta));
        }
    }
    debug!("{} rows in {}", in_window, window);

    let (obs, delta) = best.ok_or_else(|| WeatherError::EmptyWindow {
        station: city.station_name().to_string(),
        window,
    })?;
    Ok(TemperatureDeltaResult {
        city: city.station_name().to_string(),
        date: obs.raw_date.clone(),
        temp_change: round_to_tenth(delta),
    })
}

/// Runs one request end to end: load, compute, write the JSON result.
///
/// The result file is written before the summary is handed back, so a failed run
/// produces neither.
pub fn process_request(request: &Request, config: &StatsConfig) -> Result<Report> {
    let city = request.city;
    match request.function {
        Function::DaysOfPrecip => {
            if request.year.is_some() || request.month.is_some() {
                warn!("--year and --month are ignored for days-of-precip");
            }
            let observations = load_city_observations(&config.data_path, city)?;
            let result = days_of_precip(&observations, city);
            let path = output_path(&config.output_dir, request.function, city, Window::All);
            write_json(&result, &path)?;
            debug!("Wrote {}", path.display());
            Ok(Report {
                summary: format!(
                    "10 year count of ppt days for {} = {}.",
                    city.code(),
                    result.precip_days
                ),
                output_path: path,
            })
        }
        Function::MaxTempDelta => {
            let window = Window::resolve(request.year, request.month)?;
            let observations = load_city_observations(&config.data_path, city)?;
            let result = max_temp_delta(&observations, city, window)?;
            let path = output_path(&config.output_dir, request.function, city, window);
            write_json(&result, &path)?;
            debug!("Wrote {}", path.display());
            Ok(Report {
                summary: format!(
                    "Maximum temperature change for {} during period specified is {:.1}C.",
                    city.code(),
                    result.temp_change
                ),
                output_path: path,
            })
        }
    }
}

/// Rounds to one decimal from the exact binary value, so `0.15` becomes `0.1`.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
