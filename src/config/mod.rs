//! Configuration loading and management for the payroll engine.
//!
//! This module loads the year-keyed statutory rate table (tax rates,
//! thresholds, caps and contribution rates) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pl").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeeRates, EmployerRates, EmploymentParams, MandateParams, MiddleClassRelief, RateTable,
    ReliefBand, SchemeMetadata, TaxParams, YearParams,
};
