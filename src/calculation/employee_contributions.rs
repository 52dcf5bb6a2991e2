//! Employee-side social and health contributions.
//!
//! Pension and rent are charged on the capped contribution base; sickness
//! and PPK on the raw gross amount; health on the gross amount left after
//! social contributions. Every amount is rounded to two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EmployeeRates;

use super::rounding::round_money;

/// Which employee contributions are paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionFlags {
    /// Pension contribution is paid.
    pub pension: bool,
    /// Rent contribution is paid.
    pub rent: bool,
    /// Sickness contribution is paid.
    pub sickness: bool,
    /// Health contribution is paid.
    pub health: bool,
}

/// Every employee contribution of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributions {
    /// Pension contribution.
    pub pension: Decimal,
    /// Rent contribution.
    pub rent: Decimal,
    /// Sickness contribution.
    pub sickness: Decimal,
    /// Health contribution.
    pub health: Decimal,
    /// Employee PPK contribution.
    pub ppk: Decimal,
    /// Part of the health contribution deductible from tax.
    pub health_deduction: Decimal,
    /// Gross amount minus pension, rent and sickness.
    pub gross_minus_social: Decimal,
}

impl EmployeeContributions {
    /// Sum of pension, rent, sickness and health (PPK excluded).
    pub fn total(&self) -> Decimal {
        self.pension + self.rent + self.sickness + self.health
    }
}

/// Calculates the pension contribution on the capped base.
pub fn calculate_pension_contribution(base: Decimal, rates: &EmployeeRates) -> Decimal {
    round_money(base * rates.pension)
}

/// Calculates the rent contribution on the capped base.
pub fn calculate_rent_contribution(base: Decimal, rates: &EmployeeRates) -> Decimal {
    round_money(base * rates.rent)
}

/// Calculates the sickness contribution on the gross amount.
pub fn calculate_sick_contribution(gross_amount: Decimal, rates: &EmployeeRates) -> Decimal {
    round_money(gross_amount * rates.sickness)
}

/// Calculates the health contribution on the gross amount left after
/// social contributions.
pub fn calculate_health_contribution(health_base: Decimal, rates: &EmployeeRates) -> Decimal {
    round_money(health_base * rates.health)
}

/// Calculates the part of the health contribution deductible from tax.
///
/// The deduction is a fixed share of the health base and never exceeds
/// the health contribution itself.
pub fn calculate_health_deduction(
    health_base: Decimal,
    health_contribution: Decimal,
    rates: &EmployeeRates,
) -> Decimal {
    round_money(health_base * rates.health_deduction).min(health_contribution)
}

/// Calculates a PPK contribution, zero when no rate is configured.
pub fn calculate_ppk_contribution(gross_amount: Decimal, ppk_rate: Decimal) -> Decimal {
    round_money(gross_amount * ppk_rate)
}

/// Calculates every employee contribution of one month.
///
/// # Arguments
///
/// * `gross_amount` - The month's gross amount
/// * `contribution_base` - The part of the gross amount under the ZUS base cap
/// * `ppk_rate` - Employee PPK rate (zero when not saving)
/// * `flags` - Which contributions are paid
/// * `rates` - Contribution rates of the year
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_employee_contributions, ContributionFlags};
/// use payroll_engine::config::EmployeeRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = EmployeeRates {
///     pension: dec("0.0976"),
///     rent: dec("0.015"),
///     sickness: dec("0.0245"),
///     health: dec("0.09"),
///     health_deduction: dec("0.0775"),
/// };
/// let flags = ContributionFlags { pension: true, rent: true, sickness: true, health: true };
///
/// let c = calculate_employee_contributions(dec("5000"), dec("5000"), Decimal::ZERO, flags, &rates);
/// assert_eq!(c.pension, dec("488.00"));
/// assert_eq!(c.health, dec("388.31"));
/// assert_eq!(c.total(), dec("1073.81"));
/// ```
pub fn calculate_employee_contributions(
    gross_amount: Decimal,
    contribution_base: Decimal,
    ppk_rate: Decimal,
    flags: ContributionFlags,
    rates: &EmployeeRates,
) -> EmployeeContributions {
    let pension = if flags.pension {
        calculate_pension_contribution(contribution_base, rates)
    } else {
        Decimal::ZERO
    };
    let rent = if flags.rent {
        calculate_rent_contribution(contribution_base, rates)
    } else {
        Decimal::ZERO
    };
    let sickness = if flags.sickness {
        calculate_sick_contribution(gross_amount, rates)
    } else {
        Decimal::ZERO
    };
    let ppk = calculate_ppk_contribution(gross_amount, ppk_rate);

    let gross_minus_social = gross_amount - pension - rent - sickness;

    let (health, health_deduction) = if flags.health {
        let health = calculate_health_contribution(gross_minus_social, rates);
        (
            health,
            calculate_health_deduction(gross_minus_social, health, rates),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    EmployeeContributions {
        pension,
        rent,
        sickness,
        health,
        ppk,
        health_deduction,
        gross_minus_social,
    }
}
