//! Yearly payroll engine for Polish contracts
//!
//! This crate calculates social and health contributions, deductible
//! expenses and income tax advances month by month over a tax year, for
//! contracts of mandate and employment, self-employment and the employer
//! side, carrying the yearly caps and thresholds from month to month.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
