pub mod error;
pub mod load;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{Result, WeatherError};
pub use load::{output_path, write_json};
pub use structs::{
    City, Function, Observation, PrecipitationResult, Report, Request, SimpleLogger, StatsConfig,
    TemperatureDeltaResult, Window,
};
pub use transform::{
    count_precip_days, days_of_precip, filter_station, load_city_observations, max_temp_delta,
    process_request, read_observations,
};
