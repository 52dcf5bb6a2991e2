//! Configuration types for the statutory rate table.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. One [`YearParams`]
//! snapshot exists per tax year and is passed explicitly into every
//! calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata about the payroll scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// Short code of the scheme (e.g., "PL").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
}

/// One linear segment of the middle-class relief.
///
/// The relief for a gross amount `g` inside `[from, to)` is
/// `g * slope + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliefBand {
    /// Lower bound of the band (inclusive).
    pub from: Decimal,
    /// Upper bound of the band (exclusive).
    pub to: Decimal,
    /// Multiplier applied to the gross amount.
    pub slope: Decimal,
    /// Constant term added after the multiplication.
    pub intercept: Decimal,
}

/// Middle-class relief made of a rising band followed by a falling band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddleClassRelief {
    /// Band in which the relief grows with the gross amount.
    pub rising: ReliefBand,
    /// Band in which the relief shrinks with the gross amount.
    pub falling: ReliefBand,
}

/// Income tax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxParams {
    /// Rate of the first bracket of the progressive scale.
    pub first_rate: Decimal,
    /// Rate of the second bracket of the progressive scale.
    pub second_rate: Decimal,
    /// Flat rate for linear taxation.
    pub linear_rate: Decimal,
    /// Yearly income at which the second bracket starts.
    pub bracket_threshold: Decimal,
    /// Monthly tax-reducing amount.
    pub tax_reducing_amount: Decimal,
    /// Middle-class relief, absent in years where it did not apply.
    #[serde(default)]
    pub middle_class_relief: Option<MiddleClassRelief>,
}

/// Employee-side contribution rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// Pension contribution rate.
    pub pension: Decimal,
    /// Rent (disability) contribution rate.
    pub rent: Decimal,
    /// Sickness contribution rate.
    pub sickness: Decimal,
    /// Health contribution rate.
    pub health: Decimal,
    /// Share of the health base that may be deducted from tax.
    pub health_deduction: Decimal,
}

/// Employer-side contribution rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerRates {
    /// Pension contribution rate.
    pub pension: Decimal,
    /// Rent (disability) contribution rate.
    pub rent: Decimal,
}

/// Parameters specific to the contract of mandate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandateParams {
    /// Standard expense rate.
    pub expenses_rate: Decimal,
    /// Elevated expense rate for creative work.
    pub author_expenses_rate: Decimal,
    /// Monthly amount up to which the lump-sum tax applies.
    pub lump_sum_up_to_amount: Decimal,
    /// Yearly cap on deducted expenses.
    pub expenses_cap: Decimal,
}

/// Parameters specific to the contract of employment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentParams {
    /// Monthly expenses for an employee working in their home town.
    pub basic_expenses: Decimal,
    /// Monthly expenses for a commuting employee.
    pub elevated_expenses: Decimal,
}

/// The immutable parameter snapshot of one tax year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearParams {
    /// The tax year these parameters apply to.
    pub year: i32,
    /// Income tax parameters.
    pub tax: TaxParams,
    /// Employee contribution rates.
    pub employee_contributions: EmployeeRates,
    /// Employer contribution rates.
    pub employer_contributions: EmployerRates,
    /// Yearly cap of the pension and rent contribution base.
    pub zus_base_cap: Decimal,
    /// Yearly income under which young workers are exempt from tax.
    pub young_exemption_threshold: Decimal,
    /// Contract of mandate parameters.
    pub contract_of_mandate: MandateParams,
    /// Contract of employment parameters.
    pub contract_of_employment: EmploymentParams,
}

impl YearParams {
    /// Checks every rate lies in `[0, 1]` and every amount is non-negative.
    ///
    /// Returns the name of the first offending field.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let rates = [
            ("tax.first_rate", self.tax.first_rate),
            ("tax.second_rate", self.tax.second_rate),
            ("tax.linear_rate", self.tax.linear_rate),
            ("employee_contributions.pension", self.employee_contributions.pension),
            ("employee_contributions.rent", self.employee_contributions.rent),
            ("employee_contributions.sickness", self.employee_contributions.sickness),
            ("employee_contributions.health", self.employee_contributions.health),
            (
                "employee_contributions.health_deduction",
                self.employee_contributions.health_deduction,
            ),
            ("employer_contributions.pension", self.employer_contributions.pension),
            ("employer_contributions.rent", self.employer_contributions.rent),
            ("contract_of_mandate.expenses_rate", self.contract_of_mandate.expenses_rate),
            (
                "contract_of_mandate.author_expenses_rate",
                self.contract_of_mandate.author_expenses_rate,
            ),
        ];
        let amounts = [
            ("tax.bracket_threshold", self.tax.bracket_threshold),
            ("tax.tax_reducing_amount", self.tax.tax_reducing_amount),
            ("zus_base_cap", self.zus_base_cap),
            ("young_exemption_threshold", self.young_exemption_threshold),
            (
                "contract_of_mandate.lump_sum_up_to_amount",
                self.contract_of_mandate.lump_sum_up_to_amount,
            ),
            ("contract_of_mandate.expenses_cap", self.contract_of_mandate.expenses_cap),
            (
                "contract_of_employment.basic_expenses",
                self.contract_of_employment.basic_expenses,
            ),
            (
                "contract_of_employment.elevated_expenses",
                self.contract_of_employment.elevated_expenses,
            ),
        ];

        rates
            .iter()
            .find(|(_, rate)| *rate < Decimal::ZERO || *rate > Decimal::ONE)
            .or_else(|| amounts.iter().find(|(_, amount)| *amount < Decimal::ZERO))
            .map(|(name, _)| *name)
    }
}

/// The complete rate table loaded from YAML files.
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Parameters keyed by tax year.
    years: BTreeMap<i32, YearParams>,
}

impl RateTable {
    /// Creates a new RateTable from its component parts.
    pub fn new(metadata: SchemeMetadata, years: BTreeMap<i32, YearParams>) -> Self {
        Self { metadata, years }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the parameters of every configured year, oldest first.
    pub fn years(&self) -> &BTreeMap<i32, YearParams> {
        &self.years
    }
}
