//! CF-style time axis units such as `hours since 1900-01-01 00:00:00.0`.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{GridwindError, Result};

/// Units assumed when a time axis carries no `units` attribute
pub const DEFAULT_TIME_UNITS: &str = "hours since 1900-01-01 00:00:00";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Reference epoch and step length of a numeric time axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeReference {
    pub epoch: NaiveDateTime,
    pub seconds_per_unit: f64,
}

impl TimeReference {
    /// Parse `<unit> since <date>[ <time>][ <zone>]`
    pub fn parse(units: &str) -> Result<Self> {
        let invalid = |reason: &str| GridwindError::TimeUnits {
            message: format!("'{}': {}", units, reason),
        };

        let (unit, reference) = units
            .trim()
            .split_once(" since ")
            .ok_or_else(|| invalid("expected '<unit> since <date>'"))?;

        let seconds_per_unit = match unit.trim().to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => 1.0,
            "minutes" | "minute" | "mins" | "min" => 60.0,
            "hours" | "hour" | "hrs" | "hr" | "h" => 3600.0,
            "days" | "day" | "d" => 86400.0,
            _ => return Err(invalid("unsupported unit")),
        };

        let reference = reference
            .trim()
            .trim_end_matches("UTC")
            .trim_end_matches('Z')
            .trim();

        let epoch = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(reference, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(reference, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| invalid("unrecognised reference date"))?;

        Ok(Self {
            epoch,
            seconds_per_unit,
        })
    }

    /// Timestamp of a value on the axis, to the nearest millisecond
    pub fn to_datetime(&self, value: f64) -> Result<NaiveDateTime> {
        let millis = value * self.seconds_per_unit * 1000.0;
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
            return Err(GridwindError::TimeUnits {
                message: format!("time value {} cannot be represented", value),
            });
        }

        Duration::try_milliseconds(millis.round() as i64)
            .and_then(|offset| self.epoch.checked_add_signed(offset))
            .ok_or_else(|| GridwindError::TimeUnits {
                message: format!("time value {} is out of range", value),
            })
    }
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(1900, 1, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            seconds_per_unit: 3600.0,
        }
    }
}
