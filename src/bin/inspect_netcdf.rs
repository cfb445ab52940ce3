//! Prints the dimensions, variables and attributes of a NetCDF file.
//!
//! Handy for finding out which variable names a reanalysis download uses
//! before configuring an extraction.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Inspect the structure of a NetCDF file
#[derive(Parser, Debug)]
#[command(name = "inspect_netcdf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the NetCDF file to inspect
    netcdf_file: PathBuf,

    /// Also print the values of one-dimensional variables
    #[arg(long)]
    coordinates: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let file_path = &args.netcdf_file;

    println!("Inspecting NetCDF file: {}", file_path.display());

    let file = netcdf::open(file_path)
        .with_context(|| format!("Failed to open NetCDF file {}", file_path.display()))?;

    // Print global attributes
    println!("\nGlobal attributes:");
    for attr in file.attributes() {
        match attr.value() {
            Ok(val) => println!("  {}: {:?}", attr.name(), val),
            Err(e) => println!("  {}: <error reading value: {}>", attr.name(), e),
        }
    }

    // Print dimensions
    println!("\nDimensions:");
    for dim in file.dimensions() {
        println!(
            "  {} = {} {}",
            dim.name(),
            dim.len(),
            if dim.is_unlimited() { "(unlimited)" } else { "" }
        );
    }

    // Print variables
    println!("\nVariables:");
    for var in file.variables() {
        let dims: Vec<String> = var
            .dimensions()
            .iter()
            .map(|dim| format!("{} = {}", dim.name(), dim.len()))
            .collect();
        println!("  {} ({:?}) [{}]", var.name(), var.vartype(), dims.join(", "));

        for attr in var.attributes() {
            match attr.value() {
                Ok(val) => println!("    {}: {:?}", attr.name(), val),
                Err(e) => println!("    {}: <error reading value: {}>", attr.name(), e),
            }
        }

        if args.coordinates && var.dimensions().len() == 1 {
            let values: Vec<f64> = var
                .get_values::<f64, _>(..)
                .with_context(|| format!("Failed to read values of {}", var.name()))?;
            println!("    values: {:?}", values);
        }
    }

    Ok(())
}
