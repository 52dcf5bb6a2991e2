//! Monthly pay under a contract of employment.
//!
//! Employment income gets flat monthly expenses instead of a percentage
//! and is taxed progressively against the year's running basis, with the
//! tax-reducing amount and, in years that have one, the middle-class
//! relief.

use rust_decimal::Decimal;

use crate::config::YearParams;
use crate::models::{
    EmployeeMonthlyResult, EmploymentMonthlyInput, Month, MonthlyCalculation, RunningTotals,
    TotalsDelta,
};

use super::apportion::{apportion, cap_audit_step};
use super::employee_contributions::{ContributionFlags, calculate_employee_contributions};
use super::employer_contributions::calculate_employer_ppk_contribution;
use super::income_tax::{
    GeneralRulesInput, bracket_audit_step, calculate_income_tax_using_general_rules,
};
use super::rounding::{round_money, round_whole};
use super::young_exemption::{is_taxed_despite_young_exemption, young_exemption_audit_step};

/// Monthly flat expenses, elevated for workers commuting from another town.
pub fn calculate_employment_expenses(is_elevated_expenses: bool, params: &YearParams) -> Decimal {
    let employment = &params.contract_of_employment;
    if is_elevated_expenses {
        employment.elevated_expenses
    } else {
        employment.basic_expenses
    }
}

/// Calculates one month of a worker's pay under a contract of employment.
///
/// # Arguments
///
/// * `month` - Zero-based month index
/// * `input` - The month's input record
/// * `totals` - Running totals after the previous month
/// * `params` - Parameters of the year
/// * `step_number` - Number of the first audit step this month emits
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_monthly_result_of_employment;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{EmploymentMonthlyInput, RunningTotals};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/pl").unwrap();
/// let input = EmploymentMonthlyInput::new(Decimal::from(5000));
///
/// let calc = calculate_monthly_result_of_employment(
///     0, &input, &RunningTotals::new(), loader.year(2023).unwrap(), 1,
/// );
/// assert_eq!(calc.result.tax_amount, Decimal::from(188));
/// ```
pub fn calculate_monthly_result_of_employment(
    month: u8,
    input: &EmploymentMonthlyInput,
    totals: &RunningTotals,
    params: &YearParams,
    step_number: u32,
) -> MonthlyCalculation<EmployeeMonthlyResult> {
    let gross_amount = input.gross_amount;
    let mut audit_steps = Vec::new();
    let mut next_step = step_number;

    let contribution_base = apportion(gross_amount, totals.contribution_base, params.zus_base_cap);
    audit_steps.push(cap_audit_step(
        next_step,
        month,
        "zus_base_cap",
        "ZUS Base Cap",
        gross_amount,
        totals.contribution_base,
        params.zus_base_cap,
        contribution_base,
    ));
    next_step += 1;

    let flags = ContributionFlags {
        pension: input.is_pension_contribution,
        rent: input.is_rent_contribution,
        sickness: input.is_sick_contribution,
        health: input.is_health_contribution,
    };
    let contributions = calculate_employee_contributions(
        gross_amount,
        contribution_base,
        input.employee_ppk_rate,
        flags,
        &params.employee_contributions,
    );

    let taxed = if input.is_young {
        let taxed =
            is_taxed_despite_young_exemption(gross_amount, totals.taxable_gross, params);
        audit_steps.push(young_exemption_audit_step(
            next_step,
            month,
            gross_amount,
            totals.taxable_gross,
            params.young_exemption_threshold,
            taxed,
        ));
        next_step += 1;
        taxed
    } else {
        true
    };

    let mut expenses = Decimal::ZERO;
    let mut basis_for_tax = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    if taxed {
        expenses = calculate_employment_expenses(input.is_elevated_expenses, params);

        let mut basis = contributions.gross_minus_social - expenses;
        if month > 0 {
            basis += calculate_employer_ppk_contribution(gross_amount, input.employer_ppk_rate);
        }
        basis_for_tax = round_whole(basis).max(Decimal::ZERO);

        let tax_input = GeneralRulesInput {
            gross_amount,
            basis_for_tax,
            health_deduction: contributions.health_deduction,
            total_basis_for_tax: totals.basis_for_tax,
            apply_tax_reducing_amount: input.is_tax_reducing_amount,
            apply_middle_class_relief: input.is_middle_class_relief,
        };
        let tax = calculate_income_tax_using_general_rules(&tax_input, &params.tax);
        audit_steps.push(bracket_audit_step(
            next_step,
            month,
            &tax_input,
            &params.tax,
            &tax,
        ));
        tax_amount = tax.tax_amount;
    }

    let net_amount =
        round_money(gross_amount - tax_amount - contributions.ppk - contributions.total());

    MonthlyCalculation {
        result: EmployeeMonthlyResult {
            month: Month::Calendar(month),
            gross_amount,
            pension_contribution: contributions.pension,
            rent_contribution: contributions.rent,
            sick_contribution: contributions.sickness,
            health_contribution: contributions.health,
            ppk_contribution: contributions.ppk,
            expenses,
            basis_for_tax,
            tax_amount,
            net_amount,
        },
        delta: TotalsDelta {
            contribution_base: gross_amount,
            deducted_expenses: expenses,
            taxable_gross: gross_amount,
            basis_for_tax,
        },
        audit_steps,
    }
}
