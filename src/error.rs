//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables or
//! running a yearly calculation.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::YearNotConfigured { year: 2019 };
/// assert_eq!(error.to_string(), "No rate table configured for year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested year has no entry in the rate table.
    #[error("No rate table configured for year {year}")]
    YearNotConfigured {
        /// The year that was requested.
        year: i32,
    },

    /// A monthly input record violated a domain invariant.
    #[error("Invalid input for month {month}, field '{field}': {message}")]
    InvalidMonthlyInput {
        /// Zero-based month index of the offending record.
        month: usize,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// More monthly inputs were supplied than a year has months.
    #[error("A yearly run accepts at most 12 months, got {count}")]
    TooManyMonths {
        /// The number of records supplied.
        count: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
