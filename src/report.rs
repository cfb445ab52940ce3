//! Report writers for extracted point series.
//!
//! The text report has one row per time step with the timestamp, any scalar
//! fields, then wind speed, speed uncertainty, direction and direction
//! uncertainty, all with one decimal:
//!
//! ```text
//! date time rh ws wse wd wde
//! 2005.01.01 00:00 75.0 5.2 0.3 -135.0 1.2
//! ```

use std::io::Write;

use crate::error::{GridwindError, Result};
use crate::extract::PointSeries;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M";

/// Write `point` in the requested format (`text` or `json`)
pub fn write_report<W: Write>(writer: &mut W, point: &PointSeries, format: &str) -> Result<()> {
    match format {
        "text" => write_text_report(writer, point),
        "json" => write_json_report(writer, point),
        other => Err(GridwindError::Config {
            message: format!("Unknown report format: {}", other),
        }),
    }
}

/// Write the whitespace separated text report
pub fn write_text_report<W: Write>(writer: &mut W, point: &PointSeries) -> Result<()> {
    let series = &point.series;

    let steps = point.times.len();
    let lengths = [
        ("speed", Some(series.speed.len())),
        ("speed_uncertainty", Some(series.speed_uncertainty.len())),
        ("direction", Some(series.direction.len())),
        ("direction_uncertainty", Some(series.direction_uncertainty.len())),
        ("cloud_coverage", series.cloud_coverage.as_ref().map(Vec::len)),
        ("relative_humidity", series.relative_humidity.as_ref().map(Vec::len)),
    ];
    for (name, len) in lengths {
        if let Some(len) = len.filter(|&len| len != steps) {
            return Err(GridwindError::DimensionMismatch {
                message: format!("{} timestamps for {} {} samples", steps, len, name),
            });
        }
    }

    let mut header = String::from("date time");
    if series.cloud_coverage.is_some() {
        header.push_str(" cc");
    }
    if series.relative_humidity.is_some() {
        header.push_str(" rh");
    }
    header.push_str(" ws wse wd wde");
    writeln!(writer, "{}", header)?;

    for (i, time) in point.times.iter().enumerate() {
        write!(writer, "{}", time.format(TIMESTAMP_FORMAT))?;
        if let Some(cloud) = &series.cloud_coverage {
            write!(writer, " {:.1}", cloud[i])?;
        }
        if let Some(humidity) = &series.relative_humidity {
            write!(writer, " {:.1}", humidity[i])?;
        }
        writeln!(
            writer,
            " {:.1} {:.1} {:.1} {:.1}",
            series.speed[i],
            series.speed_uncertainty[i],
            series.direction[i],
            series.direction_uncertainty[i]
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the series as a single pretty-printed JSON document
pub fn write_json_report<W: Write>(writer: &mut W, point: &PointSeries) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, point)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
