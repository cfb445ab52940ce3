//! Common test utilities for gridwind.
//!
//! This module provides shared helpers for the integration tests.

#![allow(dead_code)]

pub mod assertions;
#[cfg(feature = "netcdf")]
pub mod test_data;
