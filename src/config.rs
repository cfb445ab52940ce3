//! Configuration management for gridwind.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GridwindError, Result};
use crate::target::TargetPosition;

/// Command-line arguments for gridwind
#[derive(Parser, Debug)]
#[command(name = "gridwind")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the NetCDF file to read
    pub netcdf_file: PathBuf,

    /// Latitude of the target point in degrees north
    #[arg(long, env = "GRIDWIND_LATITUDE", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude of the target point in degrees east
    #[arg(long, env = "GRIDWIND_LONGITUDE", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Altitude of the target point above sea level, in meters
    #[arg(long, env = "GRIDWIND_ALTITUDE", allow_hyphen_values = true)]
    pub altitude: Option<f64>,

    /// Name of the target, used in log output
    #[arg(long, env = "GRIDWIND_TARGET_NAME")]
    pub name: Option<String>,

    /// Offset in degrees added to every longitude read from the file
    #[arg(long, env = "GRIDWIND_LONGITUDE_OFFSET", allow_hyphen_values = true)]
    pub longitude_offset: Option<f64>,

    /// Report file to write (stdout when omitted)
    #[arg(short, long, env = "GRIDWIND_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Report format (text, json)
    #[arg(short, long, env = "GRIDWIND_FORMAT")]
    pub format: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "GRIDWIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GRIDWIND_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// The point to extract a time series for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Human readable name, e.g. a volcano
    #[serde(default)]
    pub name: Option<String>,

    /// Degrees north
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Degrees east, in the same convention as the shifted longitude axis
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Meters above sea level
    #[serde(default)]
    pub altitude_m: Option<f64>,
}

/// Altitude assigned to one pressure level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelAltitude {
    pub pressure_hpa: f64,
    pub altitude_km: f64,
}

/// Dataset reading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Eastward wind component variable
    #[serde(default = "default_u_variable")]
    pub u_variable: String,

    /// Northward wind component variable
    #[serde(default = "default_v_variable")]
    pub v_variable: String,

    #[serde(default = "default_longitude_variable")]
    pub longitude_variable: String,

    #[serde(default = "default_latitude_variable")]
    pub latitude_variable: String,

    /// Pressure level coordinate, in hPa
    #[serde(default = "default_level_variable")]
    pub level_variable: String,

    #[serde(default = "default_time_variable")]
    pub time_variable: String,

    /// Relative humidity candidates, the first one present is used
    #[serde(default = "default_humidity_variables")]
    pub humidity_variables: Vec<String>,

    /// Cloud cover variable, read when present
    #[serde(default = "default_cloud_cover_variable")]
    pub cloud_cover_variable: Option<String>,

    /// Offset in degrees added to every longitude value
    #[serde(default = "default_longitude_offset")]
    pub longitude_offset: f64,

    /// Altitude of each pressure level
    #[serde(default = "default_level_altitudes")]
    pub level_altitudes: Vec<LevelAltitude>,
}

/// Report output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report file (None = stdout)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Report format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.latitude.is_some() {
            config.target.latitude = args.latitude;
        }
        if args.longitude.is_some() {
            config.target.longitude = args.longitude;
        }
        if args.altitude.is_some() {
            config.target.altitude_m = args.altitude;
        }
        if args.name.is_some() {
            config.target.name = args.name;
        }
        if let Some(offset) = args.longitude_offset {
            config.data.longitude_offset = offset;
        }
        if args.output.is_some() {
            config.output.path = args.output;
        }
        if let Some(format) = args.format {
            config.output.format = format;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.netcdf_file))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.target.name.is_some() {
            self.target.name = other.target.name;
        }
        if other.target.latitude.is_some() {
            self.target.latitude = other.target.latitude;
        }
        if other.target.longitude.is_some() {
            self.target.longitude = other.target.longitude;
        }
        if other.target.altitude_m.is_some() {
            self.target.altitude_m = other.target.altitude_m;
        }
        self.data = other.data;
        self.output = other.output;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GridwindError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        // Validate report format
        match self.output.format.as_str() {
            "text" | "json" => {}
            _ => {
                return Err(GridwindError::Config {
                    message: format!(
                        "Invalid output format: {}. Must be one of: text, json",
                        self.output.format
                    ),
                });
            }
        }

        self.data.validate()?;
        self.target.to_position()?;

        Ok(())
    }
}

impl TargetConfig {
    /// Turn the configured target into a position, requiring every coordinate
    pub fn to_position(&self) -> Result<TargetPosition> {
        let require = |value: Option<f64>, field: &str| {
            value
                .filter(|v| v.is_finite())
                .ok_or_else(|| GridwindError::Config {
                    message: format!("Target {} must be set to a finite number", field),
                })
        };

        let latitude = require(self.latitude, "latitude")?;
        let longitude = require(self.longitude, "longitude")?;
        let altitude_m = require(self.altitude_m, "altitude")?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GridwindError::Config {
                message: format!("Target latitude {} is outside [-90, 90]", latitude),
            });
        }

        Ok(TargetPosition {
            name: self.name.clone(),
            latitude,
            longitude,
            altitude_m,
        })
    }
}

impl DataConfig {
    /// Altitude in km of a pressure level, if the table knows it
    pub fn altitude_for_pressure(&self, pressure_hpa: f64) -> Option<f64> {
        self.level_altitudes
            .iter()
            .find(|level| level.pressure_hpa == pressure_hpa)
            .map(|level| level.altitude_km)
    }

    fn validate(&self) -> Result<()> {
        let names = [
            ("u_variable", &self.u_variable),
            ("v_variable", &self.v_variable),
            ("longitude_variable", &self.longitude_variable),
            ("latitude_variable", &self.latitude_variable),
            ("level_variable", &self.level_variable),
            ("time_variable", &self.time_variable),
        ];
        for (field, name) in names {
            if name.is_empty() {
                return Err(GridwindError::Config {
                    message: format!("{} cannot be empty", field),
                });
            }
        }

        if !self.longitude_offset.is_finite() {
            return Err(GridwindError::Config {
                message: "longitude_offset must be finite".to_string(),
            });
        }

        for (i, level) in self.level_altitudes.iter().enumerate() {
            if !level.pressure_hpa.is_finite() || !level.altitude_km.is_finite() {
                return Err(GridwindError::Config {
                    message: format!("Level altitude entry {} is not finite", i),
                });
            }
            if self.level_altitudes[..i]
                .iter()
                .any(|other| other.pressure_hpa == level.pressure_hpa)
            {
                return Err(GridwindError::Config {
                    message: format!(
                        "Pressure level {} hPa appears more than once in the altitude table",
                        level.pressure_hpa
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            data: DataConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            u_variable: default_u_variable(),
            v_variable: default_v_variable(),
            longitude_variable: default_longitude_variable(),
            latitude_variable: default_latitude_variable(),
            level_variable: default_level_variable(),
            time_variable: default_time_variable(),
            humidity_variables: default_humidity_variables(),
            cloud_cover_variable: default_cloud_cover_variable(),
            longitude_offset: default_longitude_offset(),
            level_altitudes: default_level_altitudes(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: default_format(),
        }
    }
}

/// Standard altitudes of the ERA5 pressure levels between 225 and 1000 hPa
pub const STANDARD_LEVEL_ALTITUDES: [(f64, f64); 22] = [
    (225.0, 10.42),
    (250.0, 9.59),
    (300.0, 8.81),
    (350.0, 7.38),
    (400.0, 6.71),
    (450.0, 5.50),
    (500.0, 4.94),
    (550.0, 4.42),
    (600.0, 3.48),
    (650.0, 3.06),
    (700.0, 2.67),
    (750.0, 2.31),
    (775.0, 1.98),
    (800.0, 1.68),
    (825.0, 1.41),
    (850.0, 1.17),
    (875.0, 0.95),
    (900.0, 0.76),
    (925.0, 0.60),
    (950.0, 0.46),
    (975.0, 0.24),
    (1000.0, 0.10),
];

// Default value functions for serde
fn default_u_variable() -> String {
    "u".to_string()
}

fn default_v_variable() -> String {
    "v".to_string()
}

fn default_longitude_variable() -> String {
    "longitude".to_string()
}

fn default_latitude_variable() -> String {
    "latitude".to_string()
}

fn default_level_variable() -> String {
    "level".to_string()
}

fn default_time_variable() -> String {
    "time".to_string()
}

fn default_humidity_variables() -> Vec<String> {
    vec!["r".to_string(), "rh".to_string()]
}

fn default_cloud_cover_variable() -> Option<String> {
    Some("cc".to_string())
}

fn default_longitude_offset() -> f64 {
    -360.0
}

fn default_level_altitudes() -> Vec<LevelAltitude> {
    STANDARD_LEVEL_ALTITUDES
        .iter()
        .map(|&(pressure_hpa, altitude_km)| LevelAltitude {
            pressure_hpa,
            altitude_km,
        })
        .collect()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
