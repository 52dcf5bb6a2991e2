//! Calculation result models for the payroll engine.
//!
//! This module contains the monthly result rows of every contract type,
//! the [`YearlyResult`] that wraps a whole run, and the audit steps that
//! record each threshold decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RunningTotals, TotalsDelta};

/// Identifies the month a result row belongs to.
///
/// Calendar months are zero-based; the synthesized summary row carries
/// [`Month::WholeYear`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::Month;
///
/// let json = serde_json::to_string(&Month::WholeYear).unwrap();
/// assert_eq!(json, "\"whole_year\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    /// A calendar month, 0 for January.
    Calendar(u8),
    /// The summary row of a yearly run.
    WholeYear,
}

impl Month {
    /// Returns true for the summary row marker.
    pub fn is_whole_year(&self) -> bool {
        matches!(self, Month::WholeYear)
    }
}

/// A single step in the audit trail recording a threshold decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number within the yearly run.
    pub step_number: u32,
    /// Zero-based month the decision was taken in.
    pub month: u8,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// One month of a worker's pay under a contract of mandate or employment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthlyResult {
    /// The month this row describes.
    pub month: Month,
    /// Gross amount.
    pub gross_amount: Decimal,
    /// Pension contribution.
    pub pension_contribution: Decimal,
    /// Rent contribution.
    pub rent_contribution: Decimal,
    /// Sickness contribution.
    pub sick_contribution: Decimal,
    /// Health contribution.
    pub health_contribution: Decimal,
    /// Employee PPK contribution.
    pub ppk_contribution: Decimal,
    /// Deducted expenses.
    pub expenses: Decimal,
    /// Tax basis, in whole units.
    pub basis_for_tax: Decimal,
    /// Income tax advance, in whole units.
    pub tax_amount: Decimal,
    /// Amount paid out to the worker.
    pub net_amount: Decimal,
}

/// One month of employer cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerMonthlyResult {
    /// The month this row describes.
    pub month: Month,
    /// Gross amount paid to the worker.
    pub gross_amount: Decimal,
    /// Employer pension contribution.
    pub pension_contribution: Decimal,
    /// Employer rent contribution.
    pub rent_contribution: Decimal,
    /// Accident contribution.
    pub accident_contribution: Decimal,
    /// Employer PPK contribution.
    pub ppk_contribution: Decimal,
    /// Gross amount plus every employer contribution.
    pub total_amount: Decimal,
}

/// One month of self-employment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentMonthlyResult {
    /// The month this row describes.
    pub month: Month,
    /// Revenue.
    pub revenue: Decimal,
    /// Business costs.
    pub costs: Decimal,
    /// Pension contribution.
    pub pension_contribution: Decimal,
    /// Rent contribution.
    pub rent_contribution: Decimal,
    /// Sickness contribution.
    pub sick_contribution: Decimal,
    /// Accident contribution.
    pub accident_contribution: Decimal,
    /// Health contribution.
    pub health_contribution: Decimal,
    /// Tax basis, in whole units.
    pub basis_for_tax: Decimal,
    /// Income tax advance, in whole units.
    pub tax_amount: Decimal,
    /// What is left after costs, contributions and tax.
    pub net_amount: Decimal,
}

/// Result rows that can be folded into a whole-year summary row.
pub trait WholeYear: Sized {
    /// Sums every numeric field across `rows` and tags the result with
    /// [`Month::WholeYear`].
    fn whole_year(rows: &[Self]) -> Self;
}

fn sum_by<T>(rows: &[T], field: impl Fn(&T) -> Decimal) -> Decimal {
    rows.iter().map(field).sum()
}

impl WholeYear for EmployeeMonthlyResult {
    fn whole_year(rows: &[Self]) -> Self {
        Self {
            month: Month::WholeYear,
            gross_amount: sum_by(rows, |r| r.gross_amount),
            pension_contribution: sum_by(rows, |r| r.pension_contribution),
            rent_contribution: sum_by(rows, |r| r.rent_contribution),
            sick_contribution: sum_by(rows, |r| r.sick_contribution),
            health_contribution: sum_by(rows, |r| r.health_contribution),
            ppk_contribution: sum_by(rows, |r| r.ppk_contribution),
            expenses: sum_by(rows, |r| r.expenses),
            basis_for_tax: sum_by(rows, |r| r.basis_for_tax),
            tax_amount: sum_by(rows, |r| r.tax_amount),
            net_amount: sum_by(rows, |r| r.net_amount),
        }
    }
}

impl WholeYear for EmployerMonthlyResult {
    fn whole_year(rows: &[Self]) -> Self {
        Self {
            month: Month::WholeYear,
            gross_amount: sum_by(rows, |r| r.gross_amount),
            pension_contribution: sum_by(rows, |r| r.pension_contribution),
            rent_contribution: sum_by(rows, |r| r.rent_contribution),
            accident_contribution: sum_by(rows, |r| r.accident_contribution),
            ppk_contribution: sum_by(rows, |r| r.ppk_contribution),
            total_amount: sum_by(rows, |r| r.total_amount),
        }
    }
}

impl WholeYear for SelfEmploymentMonthlyResult {
    fn whole_year(rows: &[Self]) -> Self {
        Self {
            month: Month::WholeYear,
            revenue: sum_by(rows, |r| r.revenue),
            costs: sum_by(rows, |r| r.costs),
            pension_contribution: sum_by(rows, |r| r.pension_contribution),
            rent_contribution: sum_by(rows, |r| r.rent_contribution),
            sick_contribution: sum_by(rows, |r| r.sick_contribution),
            accident_contribution: sum_by(rows, |r| r.accident_contribution),
            health_contribution: sum_by(rows, |r| r.health_contribution),
            basis_for_tax: sum_by(rows, |r| r.basis_for_tax),
            tax_amount: sum_by(rows, |r| r.tax_amount),
            net_amount: sum_by(rows, |r| r.net_amount),
        }
    }
}

/// What a monthly calculator hands back to the yearly aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCalculation<R> {
    /// The month's result row.
    pub result: R,
    /// The amounts to fold into the running totals.
    pub delta: TotalsDelta,
    /// Threshold decisions taken while computing the month.
    pub audit_steps: Vec<AuditStep>,
}

/// The complete result of a yearly run.
///
/// `rows` holds one row per input month in input order followed by
/// exactly one whole-year row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyResult<R> {
    /// Monthly rows followed by the whole-year row.
    pub rows: Vec<R>,
    /// Running totals after the last month.
    pub totals: RunningTotals,
    /// Every threshold decision of the run, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl<R> YearlyResult<R> {
    /// Returns the monthly rows without the summary.
    pub fn months(&self) -> &[R] {
        &self.rows[..self.rows.len().saturating_sub(1)]
    }

    /// Returns the whole-year summary row.
    pub fn whole_year(&self) -> Option<&R> {
        self.rows.last()
    }
}
