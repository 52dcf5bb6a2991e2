//! Monthly input records for the yearly calculations.
//!
//! Every optional flag has a documented default so a record can be built
//! from a gross amount alone. Records are validated before a yearly run
//! touches any running total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Accident contribution rate used when the employer supplies none.
///
/// This is the rate of the most common risk class for small employers.
pub const DEFAULT_ACCIDENT_RATE: Decimal = Decimal::from_parts(167, 0, 0, false, 4);

fn default_true() -> bool {
    true
}

fn default_accident_rate() -> Decimal {
    DEFAULT_ACCIDENT_RATE
}

/// Largest amount a single monthly field may carry.
///
/// Twelve months of it, multiplied by any rate, stay far inside the range
/// of [`Decimal`], so the yearly sums cannot overflow.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

fn ensure_amount(month: usize, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidMonthlyInput {
            month,
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    if value > MAX_MONTHLY_AMOUNT {
        return Err(EngineError::InvalidMonthlyInput {
            month,
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", MAX_MONTHLY_AMOUNT, value),
        });
    }
    Ok(())
}

fn ensure_share(month: usize, field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::InvalidMonthlyInput {
            month,
            field: field.to_string(),
            message: format!("must be between 0 and 1, got {}", value),
        });
    }
    Ok(())
}

/// One month of a contract of mandate, seen from the worker's side.
///
/// # Example
///
/// ```
/// use payroll_engine::models::MandateMonthlyInput;
/// use rust_decimal::Decimal;
///
/// let input = MandateMonthlyInput::new(Decimal::new(5000, 0));
/// assert!(input.is_pension_contribution);
/// assert!(!input.is_sick_contribution);
/// assert!(input.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandateMonthlyInput {
    /// Gross amount paid for the month.
    pub gross_amount: Decimal,
    /// Employee PPK rate, zero when the worker does not save in PPK.
    #[serde(default)]
    pub employee_ppk_rate: Decimal,
    /// Employer PPK rate, zero when the worker does not save in PPK.
    #[serde(default)]
    pub employer_ppk_rate: Decimal,
    /// Share of the work qualifying for creative-work expenses.
    #[serde(default)]
    pub author_expenses_share: Decimal,
    /// Pension contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_pension_contribution: bool,
    /// Rent contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_rent_contribution: bool,
    /// Voluntary sickness contribution is paid (default: no).
    #[serde(default)]
    pub is_sick_contribution: bool,
    /// Health contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_health_contribution: bool,
    /// Worker qualifies for the young-worker exemption (default: no).
    #[serde(default)]
    pub is_young: bool,
}

impl MandateMonthlyInput {
    /// Creates an input with the given gross amount and default flags.
    pub fn new(gross_amount: Decimal) -> Self {
        Self {
            gross_amount,
            employee_ppk_rate: Decimal::ZERO,
            employer_ppk_rate: Decimal::ZERO,
            author_expenses_share: Decimal::ZERO,
            is_pension_contribution: true,
            is_rent_contribution: true,
            is_sick_contribution: false,
            is_health_contribution: true,
            is_young: false,
        }
    }

    /// Rejects negative or oversized amounts and rates or shares outside `[0, 1]`.
    pub fn validate(&self, month: usize) -> EngineResult<()> {
        ensure_amount(month, "gross_amount", self.gross_amount)?;
        ensure_share(month, "employee_ppk_rate", self.employee_ppk_rate)?;
        ensure_share(month, "employer_ppk_rate", self.employer_ppk_rate)?;
        ensure_share(month, "author_expenses_share", self.author_expenses_share)
    }
}

/// One month of a contract of employment, seen from the employee's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentMonthlyInput {
    /// Gross salary for the month.
    pub gross_amount: Decimal,
    /// Employee PPK rate.
    #[serde(default)]
    pub employee_ppk_rate: Decimal,
    /// Employer PPK rate.
    #[serde(default)]
    pub employer_ppk_rate: Decimal,
    /// Pension contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_pension_contribution: bool,
    /// Rent contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_rent_contribution: bool,
    /// Sickness contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_sick_contribution: bool,
    /// Health contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_health_contribution: bool,
    /// Worker qualifies for the young-worker exemption (default: no).
    #[serde(default)]
    pub is_young: bool,
    /// Employee commutes from another town (default: no).
    #[serde(default)]
    pub is_elevated_expenses: bool,
    /// Monthly tax-reducing amount is claimed (default: yes).
    #[serde(default = "default_true")]
    pub is_tax_reducing_amount: bool,
    /// Middle-class relief is claimed where the year has one (default: yes).
    #[serde(default = "default_true")]
    pub is_middle_class_relief: bool,
}

impl EmploymentMonthlyInput {
    /// Creates an input with the given gross amount and default flags.
    pub fn new(gross_amount: Decimal) -> Self {
        Self {
            gross_amount,
            employee_ppk_rate: Decimal::ZERO,
            employer_ppk_rate: Decimal::ZERO,
            is_pension_contribution: true,
            is_rent_contribution: true,
            is_sick_contribution: true,
            is_health_contribution: true,
            is_young: false,
            is_elevated_expenses: false,
            is_tax_reducing_amount: true,
            is_middle_class_relief: true,
        }
    }

    /// Rejects negative or oversized amounts and rates outside `[0, 1]`.
    pub fn validate(&self, month: usize) -> EngineResult<()> {
        ensure_amount(month, "gross_amount", self.gross_amount)?;
        ensure_share(month, "employee_ppk_rate", self.employee_ppk_rate)?;
        ensure_share(month, "employer_ppk_rate", self.employer_ppk_rate)
    }
}

/// One month of the employer's side of a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerMonthlyInput {
    /// Gross amount paid to the worker.
    pub gross_amount: Decimal,
    /// Accident contribution rate of the employer's risk class.
    #[serde(default = "default_accident_rate")]
    pub accident_rate: Decimal,
    /// Employer PPK rate.
    #[serde(default)]
    pub ppk_rate: Decimal,
    /// Pension contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_pension_contribution: bool,
    /// Rent contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_rent_contribution: bool,
}

impl EmployerMonthlyInput {
    /// Creates an input with the given gross amount and default flags.
    pub fn new(gross_amount: Decimal) -> Self {
        Self {
            gross_amount,
            accident_rate: DEFAULT_ACCIDENT_RATE,
            ppk_rate: Decimal::ZERO,
            is_pension_contribution: true,
            is_rent_contribution: true,
        }
    }

    /// Rejects negative or oversized amounts and rates outside `[0, 1]`.
    pub fn validate(&self, month: usize) -> EngineResult<()> {
        ensure_amount(month, "gross_amount", self.gross_amount)?;
        ensure_share(month, "accident_rate", self.accident_rate)?;
        ensure_share(month, "ppk_rate", self.ppk_rate)
    }
}

/// How a self-employed person's income is taxed for the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxRules {
    /// Progressive scale.
    General {
        /// Monthly tax-reducing amount is claimed.
        #[serde(default = "default_true")]
        tax_reducing_amount: bool,
        /// Middle-class relief is claimed where the year has one.
        #[serde(default)]
        middle_class_relief: bool,
    },
    /// Flat linear rate from the rate table.
    Linear,
    /// Flat rate on revenue, chosen per type of activity.
    LumpSum {
        /// The lump-sum rate.
        rate: Decimal,
    },
}

impl TaxRules {
    /// Rejects a lump-sum rate outside `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            TaxRules::LumpSum { rate } => ensure_share(0, "tax_rules.rate", *rate),
            _ => Ok(()),
        }
    }
}

/// One month of self-employment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfEmploymentMonthlyInput {
    /// Revenue invoiced in the month.
    pub revenue: Decimal,
    /// Deductible business costs of the month.
    #[serde(default)]
    pub costs: Decimal,
    /// Declared base of the social contributions.
    pub contribution_basis: Decimal,
    /// Declared base of the health contribution.
    #[serde(default)]
    pub health_contribution_basis: Decimal,
    /// Accident contribution rate.
    #[serde(default = "default_accident_rate")]
    pub accident_rate: Decimal,
    /// Pension contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_pension_contribution: bool,
    /// Rent contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_rent_contribution: bool,
    /// Voluntary sickness contribution is paid (default: no).
    #[serde(default)]
    pub is_sick_contribution: bool,
    /// Health contribution is paid (default: yes).
    #[serde(default = "default_true")]
    pub is_health_contribution: bool,
}

impl SelfEmploymentMonthlyInput {
    /// Creates an input with default flags and no costs or health base.
    pub fn new(revenue: Decimal, contribution_basis: Decimal) -> Self {
        Self {
            revenue,
            costs: Decimal::ZERO,
            contribution_basis,
            health_contribution_basis: Decimal::ZERO,
            accident_rate: DEFAULT_ACCIDENT_RATE,
            is_pension_contribution: true,
            is_rent_contribution: true,
            is_sick_contribution: false,
            is_health_contribution: true,
        }
    }

    /// Rejects negative or oversized amounts and rates outside `[0, 1]`.
    pub fn validate(&self, month: usize) -> EngineResult<()> {
        ensure_amount(month, "revenue", self.revenue)?;
        ensure_amount(month, "costs", self.costs)?;
        ensure_amount(month, "contribution_basis", self.contribution_basis)?;
        ensure_amount(
            month,
            "health_contribution_basis",
            self.health_contribution_basis,
        )?;
        ensure_share(month, "accident_rate", self.accident_rate)
    }
}
