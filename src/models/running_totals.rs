//! Running totals carried from month to month within one yearly run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cumulative amounts a yearly run carries forward.
///
/// A fresh value is created at the start of every run and owned
/// exclusively by it. Monthly calculators only read it and return a
/// [`TotalsDelta`]; the yearly aggregator folds the delta in.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{RunningTotals, TotalsDelta};
/// use rust_decimal::Decimal;
///
/// let mut totals = RunningTotals::default();
/// totals.apply(&TotalsDelta {
///     contribution_base: Decimal::new(5000, 0),
///     ..TotalsDelta::default()
/// });
/// assert_eq!(totals.contribution_base, Decimal::new(5000, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningTotals {
    /// Gross amounts counted towards the ZUS base cap.
    pub contribution_base: Decimal,
    /// Expenses already deducted this year.
    pub deducted_expenses: Decimal,
    /// Gross income received this year, used by the young-worker exemption.
    pub taxable_gross: Decimal,
    /// Tax bases accumulated this year, used by the bracket split.
    pub basis_for_tax: Decimal,
}

/// The amounts one month adds to the [`RunningTotals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsDelta {
    /// Full gross amount of the month, including any part above the cap.
    pub contribution_base: Decimal,
    /// Expenses deducted in the month.
    pub deducted_expenses: Decimal,
    /// Gross income of the month.
    pub taxable_gross: Decimal,
    /// Tax basis of the month.
    pub basis_for_tax: Decimal,
}

impl RunningTotals {
    /// Creates zeroed totals for a new yearly run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one month's delta into the totals.
    pub fn apply(&mut self, delta: &TotalsDelta) {
        self.contribution_base += delta.contribution_base;
        self.deducted_expenses += delta.deducted_expenses;
        self.taxable_gross += delta.taxable_gross;
        self.basis_for_tax += delta.basis_for_tax;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_totals_are_zero() {
        let totals = RunningTotals::new();

        assert_eq!(totals.contribution_base, Decimal::ZERO);
        assert_eq!(totals.deducted_expenses, Decimal::ZERO);
        assert_eq!(totals.taxable_gross, Decimal::ZERO);
        assert_eq!(totals.basis_for_tax, Decimal::ZERO);
    }

    #[test]
    fn test_apply_accumulates_every_field() {
        let mut totals = RunningTotals::new();
        let delta = TotalsDelta {
            contribution_base: dec("5000"),
            deducted_expenses: dec("862.90"),
            taxable_gross: dec("5000"),
            basis_for_tax: dec("3452"),
        };

        totals.apply(&delta);
        totals.apply(&delta);

        assert_eq!(totals.contribution_base, dec("10000"));
        assert_eq!(totals.deducted_expenses, dec("1725.80"));
        assert_eq!(totals.taxable_gross, dec("10000"));
        assert_eq!(totals.basis_for_tax, dec("6904"));
    }
}
