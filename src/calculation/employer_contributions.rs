//! Employer-side contributions.
//!
//! Mirrors the employee side without sickness, health or tax: pension and
//! rent on the capped base, accident and PPK on the gross amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EmployerRates;

use super::rounding::round_money;

/// Every employer contribution of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Pension contribution.
    pub pension: Decimal,
    /// Rent contribution.
    pub rent: Decimal,
    /// Accident contribution.
    pub accident: Decimal,
    /// Employer PPK contribution.
    pub ppk: Decimal,
}

impl EmployerContributions {
    /// Sum of all employer contributions.
    pub fn total(&self) -> Decimal {
        self.pension + self.rent + self.accident + self.ppk
    }
}

/// Calculates the employer pension contribution on the capped base.
pub fn calculate_employer_pension_contribution(base: Decimal, rates: &EmployerRates) -> Decimal {
    round_money(base * rates.pension)
}

/// Calculates the employer rent contribution on the capped base.
pub fn calculate_employer_rent_contribution(base: Decimal, rates: &EmployerRates) -> Decimal {
    round_money(base * rates.rent)
}

/// Calculates the accident contribution at the employer's risk-class rate.
pub fn calculate_accident_contribution(gross_amount: Decimal, accident_rate: Decimal) -> Decimal {
    round_money(gross_amount * accident_rate)
}

/// Calculates the employer PPK contribution.
///
/// The same amount is taxable income of the worker.
pub fn calculate_employer_ppk_contribution(gross_amount: Decimal, ppk_rate: Decimal) -> Decimal {
    round_money(gross_amount * ppk_rate)
}

/// Calculates every employer contribution of one month.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_employer_contributions;
/// use payroll_engine::config::EmployerRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = EmployerRates { pension: dec("0.0976"), rent: dec("0.065") };
///
/// let c = calculate_employer_contributions(
///     dec("5000"), dec("5000"), dec("0.0167"), dec("0.015"), true, true, &rates,
/// );
/// assert_eq!(c.rent, dec("325.00"));
/// assert_eq!(c.accident, dec("83.50"));
/// assert_eq!(c.total(), dec("971.50"));
/// ```
pub fn calculate_employer_contributions(
    gross_amount: Decimal,
    contribution_base: Decimal,
    accident_rate: Decimal,
    ppk_rate: Decimal,
    is_pension_contribution: bool,
    is_rent_contribution: bool,
    rates: &EmployerRates,
) -> EmployerContributions {
    let pension = if is_pension_contribution {
        calculate_employer_pension_contribution(contribution_base, rates)
    } else {
        Decimal::ZERO
    };
    let rent = if is_rent_contribution {
        calculate_employer_rent_contribution(contribution_base, rates)
    } else {
        Decimal::ZERO
    };

    EmployerContributions {
        pension,
        rent,
        accident: calculate_accident_contribution(gross_amount, accident_rate),
        ppk: calculate_employer_ppk_contribution(gross_amount, ppk_rate),
    }
}
