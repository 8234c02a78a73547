//! # Settings Module
//!
//! ## Purpose
//! Run configuration of a rate-constant evaluation: the temperature and pressure grids, the
//! reference temperature of the modified Arrhenius form, the log level and an optional path
//! for a JSON dump of the results.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "t_ref": 1.0,
//!   "temperatures": [500.0, 1000.0, 1500.0, 2000.0],
//!   "pressures": [1.0, 5.0, 10.0],
//!   "log_level": "info",
//!   "output_json": "rates.json"
//! }
//! ```
//! Every field is optional; missing fields take the values shown above (no JSON output by
//! default). A missing settings file gives the defaults, a malformed one is an error.
//!
//! ## Usage
//! ```rust
//! use KiRates::settings::RateSettings;
//!
//! let settings = RateSettings::load("no_such_settings.json").unwrap();
//! assert_eq!(settings.pressures, vec![1.0, 5.0, 10.0]);
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of one evaluation run.
///
/// # Fields
/// * `t_ref` - reference temperature of (T/Tref)^n, K
/// * `temperatures` - temperature grid, K
/// * `pressures` - pressure grid, atm
/// * `log_level` - "off", "error", "warn", "info", "debug" or "trace"
/// * `output_json` - where to write the JSON results, if anywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSettings {
    pub t_ref: f64,
    pub temperatures: Vec<f64>,
    pub pressures: Vec<f64>,
    pub log_level: String,
    pub output_json: Option<String>,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            t_ref: 1.0,
            temperatures: vec![500.0, 1000.0, 1500.0, 2000.0],
            pressures: vec![1.0, 5.0, 10.0],
            log_level: "info".to_string(),
            output_json: None,
        }
    }
}

impl RateSettings {
    /// Loads settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(RateSettings)` - parsed settings, or the defaults when the file does not exist
    /// * `Err(Box<dyn std::error::Error>)` - on read errors or malformed JSON
    pub fn load(config_file: &str) -> Result<RateSettings, Box<dyn std::error::Error>> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let settings: RateSettings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(RateSettings::default())
        }
    }

    /// Writes the settings as pretty JSON.
    pub fn save(&self, config_file: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    /// Log level for the terminal logger; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// `None` when the pressure grid is empty, so pressure-dependent reactions report a
    /// configuration error instead of producing empty tables
    pub fn pressure_grid(&self) -> Option<&[f64]> {
        if self.pressures.is_empty() {
            None
        } else {
            Some(&self.pressures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = RateSettings::load("definitely_missing_settings_file.json").unwrap();
        assert_eq!(settings, RateSettings::default());
        assert_eq!(settings.t_ref, 1.0);
        assert_eq!(settings.temperatures, vec![500.0, 1000.0, 1500.0, 2000.0]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"pressures": [0.1, 1.0], "log_level": "debug"}}"#).unwrap();
        let settings = RateSettings::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.pressures, vec![0.1, 1.0]);
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
        assert_eq!(settings.temperatures, RateSettings::default().temperatures);
        assert_eq!(settings.output_json, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ t_ref: ").unwrap();
        assert!(RateSettings::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let settings = RateSettings {
            output_json: Some("out.json".to_string()),
            ..RateSettings::default()
        };
        settings.save(path).unwrap();
        assert_eq!(RateSettings::load(path).unwrap(), settings);
    }

    #[test]
    fn test_empty_pressure_grid() {
        let settings = RateSettings {
            pressures: vec![],
            log_level: "verbose".to_string(),
            ..RateSettings::default()
        };
        assert!(settings.pressure_grid().is_none());
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }
}
