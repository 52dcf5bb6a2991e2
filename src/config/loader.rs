//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! rate table from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{RateTable, SchemeMetadata, YearParams};

/// Loads and provides access to the statutory rate table.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and hands out one immutable [`YearParams`] snapshot per tax year.
///
/// # Directory Structure
///
/// ```text
/// config/pl/
/// ├── scheme.yaml     # Scheme metadata
/// └── years/
///     ├── 2021.yaml   # Rates, thresholds and caps for 2021
///     └── 2022.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pl").unwrap();
/// let params = loader.year(2023).unwrap();
/// println!("ZUS base cap: {}", params.zus_base_cap);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: RateTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate lies outside `[0, 1]` or an amount is negative
    /// - Two files describe the same year
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/pl")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let years = Self::load_years(&path.join("years"))?;

        Ok(Self {
            table: RateTable::new(metadata, years),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all year files from the years directory.
    fn load_years(years_dir: &Path) -> EngineResult<BTreeMap<i32, YearParams>> {
        let years_dir_str = years_dir.display().to_string();

        if !years_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: years_dir_str,
            });
        }

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut years = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let params = Self::load_yaml::<YearParams>(&path)?;
            let path_str = path.display().to_string();

            if let Some(field) = params.invalid_field() {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: format!("{} is out of range", field),
                });
            }

            if years.contains_key(&params.year) {
                return Err(EngineError::ConfigParseError {
                    path: path_str,
                    message: format!("year {} is configured more than once", params.year),
                });
            }

            years.insert(params.year, params);
        }

        if years.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no year files found)", years_dir_str),
            });
        }

        Ok(years)
    }

    /// Returns the underlying rate table.
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.table.scheme()
    }

    /// Gets the parameter snapshot for a tax year.
    ///
    /// There is no fallback to a neighbouring year: a year missing from
    /// the table is an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/pl")?;
    /// let params = loader.year(2021)?;
    /// assert_eq!(params.year, 2021);
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn year(&self, year: i32) -> EngineResult<&YearParams> {
        self.table
            .years()
            .get(&year)
            .ok_or(EngineError::YearNotConfigured { year })
    }

    /// Returns the configured years, oldest first.
    pub fn available_years(&self) -> Vec<i32> {
        self.table.years().keys().copied().collect()
    }
}
