use crate::error::Result;
use crate::structs::{City, Function, Window};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Builds the result file path for a statistic.
///
/// Precipitation results go to `<city>_ppt.json`. Temperature results go to
/// `<city><year><month>_temp.json`, where the year and zero-padded month are only
/// present when the window names them (e.g. `bos201506_temp.json`).
pub fn output_path(output_dir: &Path, function: Function, city: City, window: Window) -> PathBuf {
    let file_name = match function {
        Function::DaysOfPrecip => format!("{}_ppt.json", city.code()),
        Function::MaxTempDelta => format!("{}{}_temp.json", city.code(), window.file_suffix()),
    };
    output_dir.join(file_name)
}

/// Writes a single result record as a JSON object.
///
/// The file is truncated and rewritten in place, so concurrent runs targeting the
/// same path can interleave.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json<T: Serialize>(result: &T, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::{PrecipitationResult, TemperatureDeltaResult};
    use tempfile::TempDir;

    #[test]
    fn output_names_follow_window() {
        let dir = Path::new("out");
        assert_eq!(
            output_path(dir, Function::DaysOfPrecip, City::Bos, Window::All),
            dir.join("bos_ppt.json")
        );
        assert_eq!(
            output_path(dir, Function::MaxTempDelta, City::Mia, Window::All),
            dir.join("mia_temp.json")
        );
        assert_eq!(
            output_path(dir, Function::MaxTempDelta, City::Bos, Window::Year(2015)),
            dir.join("bos2015_temp.json")
        );
        assert_eq!(
            output_path(
                dir,
                Function::MaxTempDelta,
                City::Jnu,
                Window::Month { year: 2015, month: 6 }
            ),
            dir.join("jnu201506_temp.json")
        );
    }

    #[test]
    fn precip_json_omits_raw_count() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bos_ppt.json");
        let result = PrecipitationResult {
            city: "BOSTON, MA US".to_string(),
            days_of_precip: 70.0,
            precip_days: 700,
        };
        write_json(&result, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"city": "BOSTON, MA US", "days_of_precip": 70.0})
        );
    }

    #[test]
    fn rewriting_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bos201506_temp.json");
        let result = TemperatureDeltaResult {
            city: "BOSTON, MA US".to_string(),
            date: "2015-06-01".to_string(),
            temp_change: 20.0,
        };

        write_json(&result, &path).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_json(&result, &path).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}
