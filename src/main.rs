//! gridwind - single-point wind time series from gridded NetCDF data
//!
//! This is the main entry point for the gridwind command line tool.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;
use tracing::{error, info};

use gridwind::data_loader::load_wind_dataset;
use gridwind::report::write_report;
use gridwind::{
    extract_point_series, init_tracing, log_error, log_operation_end, log_operation_start,
    log_timed_operation, Config, Result,
};

fn main() -> Result<()> {
    // Load configuration
    let (config, netcdf_path) = Config::load().map_err(|e| {
        init_tracing("info");
        error!("Configuration error: {}", e);
        e
    })?;

    init_tracing(&config.log_level);

    info!("Starting gridwind v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        log_error(&e, "Invalid configuration");
        e
    })?;
    let target = config.target.to_position()?;

    let start = Instant::now();
    log_operation_start("extract", Some(&netcdf_path.display().to_string()));

    let result = run(&config, &netcdf_path, &target);
    log_operation_end("extract", start, result.is_ok());

    result.map_err(|e| {
        log_error(&e, "Extraction failed");
        e
    })
}

fn run(
    config: &Config,
    netcdf_path: &std::path::Path,
    target: &gridwind::TargetPosition,
) -> Result<()> {
    info!("Loading NetCDF file: {:?}", netcdf_path);
    let dataset = log_timed_operation("load_dataset", || {
        load_wind_dataset(netcdf_path, &config.data)
    })?;

    let point = log_timed_operation("interpolate", || extract_point_series(&dataset, target))?;

    match &config.output.path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_report(&mut writer, &point, &config.output.format)?;
            writer.flush()?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&mut writer, &point, &config.output.format)?;
        }
    }

    Ok(())
}
