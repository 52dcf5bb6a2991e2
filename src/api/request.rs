//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.
//! Decimal amounts are sent as strings, e.g. `"gross_amount": "5000.00"`.

use serde::{Deserialize, Serialize};

use crate::models::{
    EmployerMonthlyInput, EmploymentMonthlyInput, MandateMonthlyInput,
    SelfEmploymentMonthlyInput, TaxRules,
};

fn default_tax_rules() -> TaxRules {
    TaxRules::General {
        tax_reducing_amount: true,
        middle_class_relief: false,
    }
}

/// Request body for the `/calculate` endpoint.
///
/// The `calculation` tag selects the yearly run; `months` holds at most
/// twelve monthly records in calendar order.
///
/// # Example
///
/// ```
/// use payroll_engine::api::CalculationRequest;
///
/// let json = r#"{
///     "calculation": "contract_of_mandate",
///     "year": 2021,
///     "months": [{ "gross_amount": "5000" }]
/// }"#;
/// let request: CalculationRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.year(), 2021);
/// assert_eq!(request.kind(), "contract_of_mandate");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculation", rename_all = "snake_case")]
pub enum CalculationRequest {
    /// A worker's year under a contract of mandate.
    ContractOfMandate {
        /// Tax year.
        year: i32,
        /// Monthly records.
        months: Vec<MandateMonthlyInput>,
    },
    /// A worker's year under a contract of employment.
    ContractOfEmployment {
        /// Tax year.
        year: i32,
        /// Monthly records.
        months: Vec<EmploymentMonthlyInput>,
    },
    /// The employer's side of a worker's year.
    Employer {
        /// Tax year.
        year: i32,
        /// Monthly records.
        months: Vec<EmployerMonthlyInput>,
    },
    /// A self-employed person's year.
    SelfEmployment {
        /// Tax year.
        year: i32,
        /// Tax rules for the year (default: general rules with the
        /// tax-reducing amount).
        #[serde(default = "default_tax_rules")]
        tax_rules: TaxRules,
        /// Monthly records.
        months: Vec<SelfEmploymentMonthlyInput>,
    },
}

impl CalculationRequest {
    /// Returns the requested tax year.
    pub fn year(&self) -> i32 {
        match self {
            CalculationRequest::ContractOfMandate { year, .. }
            | CalculationRequest::ContractOfEmployment { year, .. }
            | CalculationRequest::Employer { year, .. }
            | CalculationRequest::SelfEmployment { year, .. } => *year,
        }
    }

    /// Returns the number of monthly records.
    pub fn month_count(&self) -> usize {
        match self {
            CalculationRequest::ContractOfMandate { months, .. } => months.len(),
            CalculationRequest::ContractOfEmployment { months, .. } => months.len(),
            CalculationRequest::Employer { months, .. } => months.len(),
            CalculationRequest::SelfEmployment { months, .. } => months.len(),
        }
    }

    /// Returns the calculation tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationRequest::ContractOfMandate { .. } => "contract_of_mandate",
            CalculationRequest::ContractOfEmployment { .. } => "contract_of_employment",
            CalculationRequest::Employer { .. } => "employer",
            CalculationRequest::SelfEmployment { .. } => "self_employment",
        }
    }
}
