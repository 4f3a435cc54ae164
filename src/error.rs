use crate::structs::Window;

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation Error: {0}")]
    Validation(String),
    #[error("No observations found for station '{station}'")]
    EmptyResult { station: String },
    #[error("No temperature observations for station '{station}' in {window}")]
    EmptyWindow { station: String, window: Window },
    #[error("Month {month} was given without a year; pass --year as well")]
    AmbiguousWindow { month: u32 },
}

impl WeatherError {
    /// Process exit code for this error: 2 for bad input, 3 for file access, 4 for empty data.
    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::Validation(_) | WeatherError::AmbiguousWindow { .. } => 2,
            WeatherError::Io(_) | WeatherError::Csv(_) | WeatherError::Json(_) => 3,
            WeatherError::EmptyResult { .. } | WeatherError::EmptyWindow { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
