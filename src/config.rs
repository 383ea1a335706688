//! # Configuration Module
//!
//! Handles loading and validating operator configuration from TOML files.
//!
//! The configuration covers everything the operator can adjust: the data
//! source (simulated or serial feed), the acquisition refresh rate, the
//! display time window, the serial connection parameters, the nominal panel
//! electrical ratings, and the event-log bound.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::source::SourceKind;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub sampling: SamplingConfig,

    #[serde(default)]
    pub panel: PanelConfig,

    #[serde(default)]
    pub events: EventsConfig,
}

/// Data source selection
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_source_kind")]
    pub kind: SourceKind,

    /// Initial shading-toggle state (simulated source only)
    #[serde(default)]
    pub shading: bool,
}

/// Serial feed configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Acquisition tick and display window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: f64,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

/// Nominal panel electrical ratings used for curve synthesis
#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    #[serde(default = "default_voc_nominal")]
    pub voc_nominal: f64,

    #[serde(default = "default_isc_nominal")]
    pub isc_nominal: f64,
}

/// Operator event log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EventsConfig {
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

// Default value functions
fn default_source_kind() -> SourceKind { SourceKind::Simulated }

fn default_serial_port() -> String { "/dev/ttyUSB0".to_string() }
fn default_baud_rate() -> u32 { 9600 }
fn default_timeout_ms() -> u64 { 500 }

fn default_refresh_secs() -> f64 { 1.0 }
fn default_window_secs() -> u64 { 60 }

fn default_voc_nominal() -> f64 { 38.0 }
fn default_isc_nominal() -> f64 { 9.2 }

fn default_event_capacity() -> usize { 256 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            shading: false,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            window_secs: default_window_secs(),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            voc_nominal: default_voc_nominal(),
            isc_nominal: default_isc_nominal(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            serial: SerialConfig::default(),
            sampling: SamplingConfig::default(),
            panel: PanelConfig::default(),
            events: EventsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use solar_sense::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Validate serial feed configuration
        if self.serial.port.is_empty() {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("serial port cannot be empty")
            ));
        }

        if self.serial.baud_rate == 0 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0")
            ));
        }

        if self.serial.timeout_ms == 0 || self.serial.timeout_ms > 5000 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("timeout_ms must be between 1 and 5000")
            ));
        }

        // Validate sampling configuration
        if !(0.5..=5.0).contains(&self.sampling.refresh_secs) {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("refresh_secs must be between 0.5 and 5.0")
            ));
        }

        if !(10..=300).contains(&self.sampling.window_secs) {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("window_secs must be between 10 and 300")
            ));
        }

        // A stalled device may not eat more than one acquisition tick
        if self.serial.timeout_ms as f64 > self.sampling.refresh_secs * 1000.0 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("timeout_ms must not exceed the refresh interval")
            ));
        }

        // Validate panel ratings
        if self.panel.voc_nominal <= 0.0 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("voc_nominal must be greater than 0")
            ));
        }

        if self.panel.isc_nominal <= 0.0 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("isc_nominal must be greater than 0")
            ));
        }

        // Validate event log bound
        if self.events.capacity == 0 {
            return Err(crate::error::SolarSenseError::Config(
                toml::de::Error::custom("events capacity must be greater than 0")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_default_config() {
        let config = create_valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_source_kind(), SourceKind::Simulated);
        assert_eq!(default_serial_port(), "/dev/ttyUSB0");
        assert_eq!(default_baud_rate(), 9600);
        assert_eq!(default_timeout_ms(), 500);
        assert_eq!(default_refresh_secs(), 1.0);
        assert_eq!(default_window_secs(), 60);
        assert_eq!(default_voc_nominal(), 38.0);
        assert_eq!(default_isc_nominal(), 9.2);
        assert_eq!(default_event_capacity(), 256);
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[source]
kind = "serial"

[serial]
port = "/dev/ttyACM0"
baud_rate = 115200

[sampling]
refresh_secs = 2.0
window_secs = 120

[panel]

[events]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.source.kind, SourceKind::Serial);
        assert_eq!(config.serial.port, "/dev/ttyACM0");
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.sampling.refresh_secs, 2.0);
        assert_eq!(config.sampling.window_secs, 120);
        // Untouched sections fall back to defaults
        assert_eq!(config.panel.voc_nominal, 38.0);
        assert_eq!(config.events.capacity, 256);
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.source.kind, SourceKind::Simulated);
        assert!(!config.source.shading);
    }

    #[test]
    fn test_empty_serial_port() {
        let mut config = create_valid_config();
        config.serial.port = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_baud_rate_zero() {
        let mut config = create_valid_config();
        config.serial.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_ms_zero() {
        let mut config = create_valid_config();
        config.serial.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_ms_too_high() {
        let mut config = create_valid_config();
        config.serial.timeout_ms = 5001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_exceeding_refresh_interval() {
        let mut config = create_valid_config();
        config.sampling.refresh_secs = 0.5;
        config.serial.timeout_ms = 600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_secs_too_low() {
        let mut config = create_valid_config();
        config.sampling.refresh_secs = 0.4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_secs_too_high() {
        let mut config = create_valid_config();
        config.sampling.refresh_secs = 5.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_secs_too_low() {
        let mut config = create_valid_config();
        config.sampling.window_secs = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_secs_too_high() {
        let mut config = create_valid_config();
        config.sampling.window_secs = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_secs_bounds_are_inclusive() {
        for window in [10, 300] {
            let mut config = create_valid_config();
            config.sampling.window_secs = window;
            assert!(config.validate().is_ok(), "window_secs {} should be valid", window);
        }
    }

    #[test]
    fn test_voc_nominal_not_positive() {
        let mut config = create_valid_config();
        config.panel.voc_nominal = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_isc_nominal_not_positive() {
        let mut config = create_valid_config();
        config.panel.isc_nominal = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_event_capacity_zero() {
        let mut config = create_valid_config();
        config.events.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_source_kind_fails_to_parse() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
[source]
kind = "bluetooth"
"#,
        );
        assert!(result.is_err());
    }
}
