//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod monthly_input;
mod running_totals;

pub use calculation_result::{
    AuditStep, EmployeeMonthlyResult, EmployerMonthlyResult, Month, MonthlyCalculation,
    SelfEmploymentMonthlyResult, WholeYear, YearlyResult,
};
pub use monthly_input::{
    DEFAULT_ACCIDENT_RATE, EmployerMonthlyInput, EmploymentMonthlyInput, MAX_MONTHLY_AMOUNT,
    MandateMonthlyInput, SelfEmploymentMonthlyInput, TaxRules,
};
pub use running_totals::{RunningTotals, TotalsDelta};
