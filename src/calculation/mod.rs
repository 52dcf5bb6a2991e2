//! Calculation logic for the payroll engine.
//!
//! This module contains the rounding rules, threshold apportionment,
//! employee and employer contribution formulas, income tax under general,
//! linear and lump-sum rules, the young-worker exemption, the monthly
//! calculators for contracts of mandate and employment, self-employment
//! and the employer side, and the yearly aggregator that drives them.

mod apportion;
mod contract_of_employment;
mod contract_of_mandate;
mod employee_contributions;
mod employer;
mod employer_contributions;
mod income_tax;
mod rounding;
mod self_employment;
mod yearly;
mod young_exemption;

pub use apportion::{ThresholdSplit, apportion, split_at_threshold};
pub use contract_of_employment::{
    calculate_employment_expenses, calculate_monthly_result_of_employment,
};
pub use contract_of_mandate::{
    apply_mandate_expenses_cap, calculate_monthly_result_of_mandate,
    calculate_requested_mandate_expenses,
};
pub use employee_contributions::{
    ContributionFlags, EmployeeContributions, calculate_employee_contributions,
    calculate_health_contribution, calculate_health_deduction, calculate_pension_contribution,
    calculate_ppk_contribution, calculate_rent_contribution, calculate_sick_contribution,
};
pub use employer::calculate_monthly_result_of_employer;
pub use employer_contributions::{
    EmployerContributions, calculate_accident_contribution, calculate_employer_contributions,
    calculate_employer_pension_contribution, calculate_employer_ppk_contribution,
    calculate_employer_rent_contribution,
};
pub use income_tax::{
    GeneralRulesInput, GeneralRulesTax, calculate_income_tax_using_general_rules,
    calculate_income_tax_using_linear_rules, calculate_income_tax_using_lump_sum_rules,
    calculate_middle_class_relief,
};
pub use rounding::{round, round_money, round_whole};
pub use self_employment::{
    SelfEmploymentContributions, calculate_monthly_result_of_self_employment,
    calculate_self_employment_contributions,
};
pub use yearly::{
    MONTHS_IN_YEAR, calculate_yearly_result_of_employer, calculate_yearly_result_of_employment,
    calculate_yearly_result_of_mandate, calculate_yearly_result_of_self_employment,
};
pub use young_exemption::is_taxed_despite_young_exemption;
