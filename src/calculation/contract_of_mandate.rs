//! Monthly pay under a contract of mandate.
//!
//! A mandate is taxed at the first rate without the tax-reducing amount.
//! Income after contributions up to the lump-sum limit is taxed on the
//! gross amount with no expenses and no health deduction. Above it,
//! expenses (standard and creative-work) are deducted against a yearly
//! cap.

use rust_decimal::Decimal;

use crate::config::YearParams;
use crate::models::{
    EmployeeMonthlyResult, MandateMonthlyInput, Month, MonthlyCalculation, RunningTotals,
    TotalsDelta,
};

use super::apportion::{apportion, cap_audit_step};
use super::employee_contributions::{ContributionFlags, calculate_employee_contributions};
use super::employer_contributions::calculate_employer_ppk_contribution;
use super::rounding::{round_money, round_whole};
use super::young_exemption::{is_taxed_despite_young_exemption, young_exemption_audit_step};

/// Calculates the expenses a month would claim before the yearly cap.
///
/// # Arguments
///
/// * `basis_for_expenses` - Gross amount minus social contributions
/// * `expenses_rate` - Standard rate, zero at or under the lump-sum limit
/// * `author_expenses_share` - Share of the work paid at the creative-work rate
/// * `params` - Parameters of the year
pub fn calculate_requested_mandate_expenses(
    basis_for_expenses: Decimal,
    expenses_rate: Decimal,
    author_expenses_share: Decimal,
    params: &YearParams,
) -> Decimal {
    let mandate = &params.contract_of_mandate;
    let standard_share = Decimal::ONE - author_expenses_share;

    let expenses = basis_for_expenses * standard_share * expenses_rate
        + basis_for_expenses * author_expenses_share * mandate.author_expenses_rate;
    expenses.max(Decimal::ZERO).min(mandate.expenses_cap)
}

/// Cuts requested expenses to what is left under the yearly cap.
pub fn apply_mandate_expenses_cap(
    requested: Decimal,
    deducted_expenses: Decimal,
    params: &YearParams,
) -> Decimal {
    let cap = params.contract_of_mandate.expenses_cap;
    round_money(apportion(requested, deducted_expenses, cap))
}

/// Calculates one month of a worker's pay under a contract of mandate.
///
/// The calculator only reads `totals`; the returned delta must be folded
/// in by the caller before the next month is calculated.
///
/// # Arguments
///
/// * `month` - Zero-based month index
/// * `input` - The month's input record
/// * `totals` - Running totals after the previous month
/// * `params` - Parameters of the year
/// * `step_number` - Number of the first audit step this month emits
pub fn calculate_monthly_result_of_mandate(
    month: u8,
    input: &MandateMonthlyInput,
    totals: &RunningTotals,
    params: &YearParams,
    step_number: u32,
) -> MonthlyCalculation<EmployeeMonthlyResult> {
    let mandate = &params.contract_of_mandate;
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

    let above_lump_sum = gross_amount > mandate.lump_sum_up_to_amount;
    let mut expenses = Decimal::ZERO;
    let mut basis_for_tax = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    if taxed {
        let expenses_rate = if above_lump_sum {
            mandate.expenses_rate
        } else {
            Decimal::ZERO
        };
        let requested = calculate_requested_mandate_expenses(
            contributions.gross_minus_social,
            expenses_rate,
            input.author_expenses_share,
            params,
        );
        expenses = apply_mandate_expenses_cap(requested, totals.deducted_expenses, params);
        audit_steps.push(cap_audit_step(
            next_step,
            month,
            "expenses_cap",
            "Expenses Cap",
            requested,
            totals.deducted_expenses,
            mandate.expenses_cap,
            expenses,
        ));

        let mut basis = if contributions.gross_minus_social > mandate.lump_sum_up_to_amount {
            contributions.gross_minus_social - expenses
        } else {
            gross_amount
        };
        // Employer PPK is taxable income of the worker.
        if month > 0 {
            basis += calculate_employer_ppk_contribution(gross_amount, input.employer_ppk_rate);
        }
        basis_for_tax = round_whole(basis.max(Decimal::ZERO));

        let mut tax = basis_for_tax * params.tax.first_rate;
        if above_lump_sum {
            tax -= contributions.health_deduction;
        }
        tax_amount = round_whole(tax.max(Decimal::ZERO));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn params(year: i32) -> YearParams {
        ConfigLoader::load("./config/pl")
            .unwrap()
            .year(year)
            .unwrap()
            .clone()
    }

    fn without_contributions(gross: &str) -> MandateMonthlyInput {
        MandateMonthlyInput {
            is_pension_contribution: false,
            is_rent_contribution: false,
            is_sick_contribution: false,
            is_health_contribution: false,
            ..MandateMonthlyInput::new(dec(gross))
        }
    }

    fn with_all_contributions(gross: &str) -> MandateMonthlyInput {
        MandateMonthlyInput {
            is_sick_contribution: true,
            ..MandateMonthlyInput::new(dec(gross))
        }
    }

    #[test]
    fn test_5000_without_contributions_2021() {
        let calc = calculate_monthly_result_of_mandate(
            0,
            &without_contributions("5000"),
            &RunningTotals::new(),
            &params(2021),
            1,
        );
        let r = calc.result;

        assert_eq!(r.expenses, dec("1000.00"));
        assert_eq!(r.basis_for_tax, dec("4000"));
        assert_eq!(r.tax_amount, dec("680"));
        assert_eq!(r.net_amount, dec("4320.00"));
    }

    #[test]
    fn test_5000_with_all_contributions_2021() {
        let calc = calculate_monthly_result_of_mandate(
            0,
            &with_all_contributions("5000"),
            &RunningTotals::new(),
            &params(2021),
            1,
        );
        let r = calc.result;

        assert_eq!(r.pension_contribution, dec("488.00"));
        assert_eq!(r.rent_contribution, dec("75.00"));
        assert_eq!(r.sick_contribution, dec("122.50"));
        assert_eq!(r.health_contribution, dec("388.31"));
        assert_eq!(r.expenses, dec("862.90"));
        assert_eq!(r.basis_for_tax, dec("3452"));
        // 3452 * 0.17 - 334.37 = 252.47
        assert_eq!(r.tax_amount, dec("252"));
        assert_eq!(r.net_amount, dec("3674.19"));
    }

    #[test]
    fn test_delta_carries_full_gross() {
        let totals = RunningTotals {
            contribution_base: dec("157000"),
            ..RunningTotals::new()
        };
        let calc = calculate_monthly_result_of_mandate(
            3,
            &with_all_contributions("5000"),
            &totals,
            &params(2021),
            1,
        );

        // only 770 fits under the cap but the total grows by the full gross
        assert_eq!(calc.result.pension_contribution, dec("75.15"));
        assert_eq!(calc.delta.contribution_base, dec("5000"));
        assert_eq!(calc.delta.taxable_gross, dec("5000"));
        assert_eq!(calc.delta.deducted_expenses, calc.result.expenses);
    }

    #[test]
    fn test_at_or_under_lump_sum_limit_taxes_gross() {
        let calc = calculate_monthly_result_of_mandate(
            0,
            &without_contributions("200"),
            &RunningTotals::new(),
            &params(2021),
            1,
        );
        let r = calc.result;

        assert_eq!(r.expenses, Decimal::ZERO);
        assert_eq!(r.basis_for_tax, dec("200"));
        assert_eq!(r.tax_amount, dec("34"));
        assert_eq!(r.net_amount, dec("166.00"));
    }

    #[test]
    fn test_author_expenses_use_elevated_rate() {
        let input = MandateMonthlyInput {
            author_expenses_share: dec("0.5"),
            ..without_contributions("10000")
        };
        let calc =
            calculate_monthly_result_of_mandate(0, &input, &RunningTotals::new(), &params(2021), 1);

        // 5000 * 0.2 + 5000 * 0.5
        assert_eq!(calc.result.expenses, dec("3500.00"));
        assert_eq!(calc.result.basis_for_tax, dec("6500"));
    }

    #[test]
    fn test_expenses_cut_at_yearly_cap() {
        let input = MandateMonthlyInput {
            author_expenses_share: Decimal::ONE,
            ..without_contributions("10000")
        };
        let totals = RunningTotals {
            deducted_expenses: dec("85000"),
            ..RunningTotals::new()
        };
        let calc = calculate_monthly_result_of_mandate(0, &input, &totals, &params(2021), 1);

        assert_eq!(calc.result.expenses, dec("528"));
        assert_eq!(calc.result.basis_for_tax, dec("9472"));
    }

    #[test]
    fn test_expenses_zero_once_cap_exceeded() {
        let input = MandateMonthlyInput {
            author_expenses_share: Decimal::ONE,
            ..without_contributions("10000")
        };
        let totals = RunningTotals {
            deducted_expenses: dec("86000"),
            ..RunningTotals::new()
        };
        let calc = calculate_monthly_result_of_mandate(0, &input, &totals, &params(2021), 1);

        assert_eq!(calc.result.expenses, Decimal::ZERO);
        assert_eq!(calc.result.basis_for_tax, dec("10000"));
    }

    #[test]
    fn test_young_worker_under_threshold_pays_no_tax() {
        let input = MandateMonthlyInput {
            is_young: true,
            ..without_contributions("13000")
        };
        let calc =
            calculate_monthly_result_of_mandate(0, &input, &RunningTotals::new(), &params(2021), 1);

        assert_eq!(calc.result.tax_amount, Decimal::ZERO);
        assert_eq!(calc.result.expenses, Decimal::ZERO);
        assert_eq!(calc.result.net_amount, dec("13000.00"));
        assert!(calc.audit_steps.iter().any(|s| s.rule_id == "young_exemption"
            && s.output["taxed"] == serde_json::json!(false)));
    }

    #[test]
    fn test_young_worker_crossing_threshold_taxed_on_full_basis() {
        let input = MandateMonthlyInput {
            is_young: true,
            ..without_contributions("13000")
        };
        let totals = RunningTotals {
            taxable_gross: dec("78000"),
            ..RunningTotals::new()
        };
        let calc = calculate_monthly_result_of_mandate(6, &input, &totals, &params(2021), 1);

        assert_eq!(calc.result.basis_for_tax, dec("10400"));
        assert_eq!(calc.result.tax_amount, dec("1768"));
    }

    #[test]
    fn test_employer_ppk_added_from_second_month() {
        let input = MandateMonthlyInput {
            employer_ppk_rate: dec("0.015"),
            ..without_contributions("5000")
        };
        let params = params(2021);

        let first = calculate_monthly_result_of_mandate(0, &input, &RunningTotals::new(), &params, 1);
        let second =
            calculate_monthly_result_of_mandate(1, &input, &RunningTotals::new(), &params, 1);

        assert_eq!(first.result.basis_for_tax, dec("4000"));
        assert_eq!(second.result.basis_for_tax, dec("4075"));
        assert_eq!(second.result.tax_amount, dec("693"));
    }

    #[test]
    fn test_employee_ppk_reduces_net() {
        let input = MandateMonthlyInput {
            employee_ppk_rate: dec("0.02"),
            ..without_contributions("5000")
        };
        let calc =
            calculate_monthly_result_of_mandate(0, &input, &RunningTotals::new(), &params(2021), 1);

        assert_eq!(calc.result.ppk_contribution, dec("100.00"));
        assert_eq!(calc.result.net_amount, dec("4220.00"));
    }

    #[test]
    fn test_zero_gross_gives_zero_row() {
        let calc = calculate_monthly_result_of_mandate(
            0,
            &with_all_contributions("0"),
            &RunningTotals::new(),
            &params(2023),
            1,
        );

        assert_eq!(calc.result.tax_amount, Decimal::ZERO);
        assert_eq!(calc.result.net_amount, Decimal::ZERO);
    }

    #[test]
    fn test_audit_steps_numbered_from_given_step() {
        let calc = calculate_monthly_result_of_mandate(
            2,
            &with_all_contributions("5000"),
            &RunningTotals::new(),
            &params(2021),
            10,
        );

        let numbers: Vec<u32> = calc.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![10, 11]);
        assert!(calc.audit_steps.iter().all(|s| s.month == 2));
    }
}
