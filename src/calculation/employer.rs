//! Monthly cost of a worker to the employer.

use rust_decimal::Decimal;

use crate::config::YearParams;
use crate::models::{
    EmployerMonthlyInput, EmployerMonthlyResult, Month, MonthlyCalculation, RunningTotals,
    TotalsDelta,
};

use super::apportion::{apportion, cap_audit_step};
use super::employer_contributions::calculate_employer_contributions;
use super::rounding::round_money;

/// Calculates one month of employer contributions.
///
/// The employer's contribution base is capped against its own running
/// total, kept apart from the worker's.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_monthly_result_of_employer;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{EmployerMonthlyInput, RunningTotals};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/pl").unwrap();
/// let params = loader.year(2021).unwrap();
/// let input = EmployerMonthlyInput::new(Decimal::from(5000));
///
/// let calc = calculate_monthly_result_of_employer(0, &input, &RunningTotals::new(), params, 1);
/// assert_eq!(calc.result.total_amount, Decimal::new(589650, 2));
/// ```
pub fn calculate_monthly_result_of_employer(
    month: u8,
    input: &EmployerMonthlyInput,
    totals: &RunningTotals,
    params: &YearParams,
    step_number: u32,
) -> MonthlyCalculation<EmployerMonthlyResult> {
    let gross_amount = input.gross_amount;
    let contribution_base = apportion(gross_amount, totals.contribution_base, params.zus_base_cap);

    let audit_step = cap_audit_step(
        step_number,
        month,
        "employer_zus_base_cap",
        "Employer ZUS Base Cap",
        gross_amount,
        totals.contribution_base,
        params.zus_base_cap,
        contribution_base,
    );

    let contributions = calculate_employer_contributions(
        gross_amount,
        contribution_base,
        input.accident_rate,
        input.ppk_rate,
        input.is_pension_contribution,
        input.is_rent_contribution,
        &params.employer_contributions,
    );

    MonthlyCalculation {
        result: EmployerMonthlyResult {
            month: Month::Calendar(month),
            gross_amount,
            pension_contribution: contributions.pension,
            rent_contribution: contributions.rent,
            accident_contribution: contributions.accident,
            ppk_contribution: contributions.ppk,
            total_amount: round_money(gross_amount + contributions.total()),
        },
        delta: TotalsDelta {
            contribution_base: gross_amount,
            ..TotalsDelta::default()
        },
        audit_steps: vec![audit_step],
    }
}
