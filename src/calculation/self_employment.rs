//! Monthly settlement of a self-employed person.
//!
//! The self-employed pay both the employee and the employer share of
//! pension and rent on a declared contribution basis, plus accident and
//! optional sickness contributions. Income tax follows the rules chosen
//! for the year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EmployeeRates, EmployerRates, YearParams};
use crate::models::{
    Month, MonthlyCalculation, RunningTotals, SelfEmploymentMonthlyInput,
    SelfEmploymentMonthlyResult, TaxRules, TotalsDelta,
};

use super::apportion::{apportion, cap_audit_step};
use super::employer_contributions::calculate_accident_contribution;
use super::income_tax::{
    GeneralRulesInput, bracket_audit_step, calculate_income_tax_using_general_rules,
    calculate_income_tax_using_linear_rules, calculate_income_tax_using_lump_sum_rules,
};
use super::rounding::{round_money, round_whole};

/// Social and health contributions of one self-employed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentContributions {
    /// Pension contribution, both shares.
    pub pension: Decimal,
    /// Rent contribution, both shares.
    pub rent: Decimal,
    /// Voluntary sickness contribution.
    pub sickness: Decimal,
    /// Accident contribution.
    pub accident: Decimal,
    /// Health contribution.
    pub health: Decimal,
    /// Part of the health contribution deductible from tax.
    pub health_deduction: Decimal,
}

impl SelfEmploymentContributions {
    /// Pension, rent, sickness and accident.
    pub fn social(&self) -> Decimal {
        self.pension + self.rent + self.sickness + self.accident
    }
}

/// Calculates the contributions of one month.
///
/// `contribution_base` is the declared basis already cut at the yearly
/// ZUS cap; sickness and accident use the full declared basis.
pub fn calculate_self_employment_contributions(
    input: &SelfEmploymentMonthlyInput,
    contribution_base: Decimal,
    employee: &EmployeeRates,
    employer: &EmployerRates,
) -> SelfEmploymentContributions {
    let pension = if input.is_pension_contribution {
        round_money(contribution_base * (employee.pension + employer.pension))
    } else {
        Decimal::ZERO
    };
    let rent = if input.is_rent_contribution {
        round_money(contribution_base * (employee.rent + employer.rent))
    } else {
        Decimal::ZERO
    };
    let sickness = if input.is_sick_contribution {
        round_money(input.contribution_basis * employee.sickness)
    } else {
        Decimal::ZERO
    };

    let (health, health_deduction) = if input.is_health_contribution {
        let health = round_money(input.health_contribution_basis * employee.health);
        let deduction =
            round_money(input.health_contribution_basis * employee.health_deduction).min(health);
        (health, deduction)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    SelfEmploymentContributions {
        pension,
        rent,
        sickness,
        accident: calculate_accident_contribution(input.contribution_basis, input.accident_rate),
        health,
        health_deduction,
    }
}

/// Calculates one month of self-employment.
///
/// # Arguments
///
/// * `month` - Zero-based month index
/// * `input` - The month's input record
/// * `tax_rules` - Tax rules chosen for the year
/// * `totals` - Running totals after the previous month
/// * `params` - Parameters of the year
/// * `step_number` - Number of the first audit step this month emits
pub fn calculate_monthly_result_of_self_employment(
    month: u8,
    input: &SelfEmploymentMonthlyInput,
    tax_rules: &TaxRules,
    totals: &RunningTotals,
    params: &YearParams,
    step_number: u32,
) -> MonthlyCalculation<SelfEmploymentMonthlyResult> {
    let mut audit_steps = Vec::new();

    let contribution_base = apportion(
        input.contribution_basis,
        totals.contribution_base,
        params.zus_base_cap,
    );
    audit_steps.push(cap_audit_step(
        step_number,
        month,
        "zus_base_cap",
        "ZUS Base Cap",
        input.contribution_basis,
        totals.contribution_base,
        params.zus_base_cap,
        contribution_base,
    ));

    let contributions = calculate_self_employment_contributions(
        input,
        contribution_base,
        &params.employee_contributions,
        &params.employer_contributions,
    );
    let social = contributions.social();

    let income = input.revenue - input.costs;
    let taxable = match tax_rules {
        TaxRules::LumpSum { .. } => input.revenue - social,
        _ => income - social,
    };
    let basis_for_tax = round_whole(taxable.max(Decimal::ZERO));

    let tax_amount = match *tax_rules {
        TaxRules::General {
            tax_reducing_amount,
            middle_class_relief,
        } => {
            let tax_input = GeneralRulesInput {
                gross_amount: income,
                basis_for_tax,
                health_deduction: contributions.health_deduction,
                total_basis_for_tax: totals.basis_for_tax,
                apply_tax_reducing_amount: tax_reducing_amount,
                apply_middle_class_relief: middle_class_relief,
            };
            let tax = calculate_income_tax_using_general_rules(&tax_input, &params.tax);
            audit_steps.push(bracket_audit_step(
                step_number + 1,
                month,
                &tax_input,
                &params.tax,
                &tax,
            ));
            tax.tax_amount
        }
        TaxRules::Linear => calculate_income_tax_using_linear_rules(
            basis_for_tax,
            contributions.health_deduction,
            &params.tax,
        ),
        TaxRules::LumpSum { rate } => calculate_income_tax_using_lump_sum_rules(
            basis_for_tax,
            rate,
            contributions.health_deduction,
        ),
    };

    let net_amount = round_money(income - social - contributions.health - tax_amount);

    MonthlyCalculation {
        result: SelfEmploymentMonthlyResult {
            month: Month::Calendar(month),
            revenue: input.revenue,
            costs: input.costs,
            pension_contribution: contributions.pension,
            rent_contribution: contributions.rent,
            sick_contribution: contributions.sickness,
            accident_contribution: contributions.accident,
            health_contribution: contributions.health,
            basis_for_tax,
            tax_amount,
            net_amount,
        },
        delta: TotalsDelta {
            contribution_base: input.contribution_basis,
            deducted_expenses: Decimal::ZERO,
            taxable_gross: input.revenue,
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

    fn linear_input() -> SelfEmploymentMonthlyInput {
        SelfEmploymentMonthlyInput {
            costs: dec("5000"),
            is_health_contribution: false,
            ..SelfEmploymentMonthlyInput::new(dec("20000"), dec("4161"))
        }
    }

    #[test]
    fn test_linear_rules_2023() {
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &linear_input(),
            &TaxRules::Linear,
            &RunningTotals::new(),
            &params(2023),
            1,
        );
        let r = calc.result;

        assert_eq!(r.pension_contribution, dec("812.23"));
        assert_eq!(r.rent_contribution, dec("332.88"));
        assert_eq!(r.accident_contribution, dec("69.49"));
        assert_eq!(r.basis_for_tax, dec("13785"));
        assert_eq!(r.tax_amount, dec("2619"));
        assert_eq!(r.net_amount, dec("11166.40"));
    }

    #[test]
    fn test_general_rules_2023() {
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &linear_input(),
            &TaxRules::General {
                tax_reducing_amount: true,
                middle_class_relief: false,
            },
            &RunningTotals::new(),
            &params(2023),
            1,
        );

        // 13785 * 0.12 - 300 = 1354.20
        assert_eq!(calc.result.tax_amount, dec("1354"));
        assert_eq!(calc.audit_steps[1].rule_id, "tax_bracket_split");
    }

    #[test]
    fn test_lump_sum_ignores_costs() {
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &linear_input(),
            &TaxRules::LumpSum { rate: dec("0.12") },
            &RunningTotals::new(),
            &params(2023),
            1,
        );

        // 20000 - 1214.60 rounds to 18785
        assert_eq!(calc.result.basis_for_tax, dec("18785"));
        assert_eq!(calc.result.tax_amount, dec("2254"));
        assert_eq!(calc.result.net_amount, dec("11531.40"));
    }

    #[test]
    fn test_health_on_declared_basis() {
        let input = SelfEmploymentMonthlyInput {
            health_contribution_basis: dec("5000"),
            ..SelfEmploymentMonthlyInput::new(dec("10000"), dec("4161"))
        };
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &input,
            &TaxRules::Linear,
            &RunningTotals::new(),
            &params(2021),
            1,
        );

        assert_eq!(calc.result.health_contribution, dec("450.00"));
        // 5000 * 0.0775 = 387.50 deducted from tax
        let basis = calc.result.basis_for_tax;
        assert_eq!(
            calc.result.tax_amount,
            round_whole(basis * dec("0.19") - dec("387.50"))
        );
    }

    #[test]
    fn test_sickness_only_when_enabled() {
        let input = SelfEmploymentMonthlyInput {
            is_sick_contribution: true,
            ..SelfEmploymentMonthlyInput::new(dec("10000"), dec("4161"))
        };
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &input,
            &TaxRules::Linear,
            &RunningTotals::new(),
            &params(2023),
            1,
        );

        // 4161 * 0.0245 = 101.9445
        assert_eq!(calc.result.sick_contribution, dec("101.94"));
    }

    #[test]
    fn test_pension_stops_at_cap_but_accident_does_not() {
        let totals = RunningTotals {
            contribution_base: dec("210000"),
            ..RunningTotals::new()
        };
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &linear_input(),
            &TaxRules::Linear,
            &totals,
            &params(2023),
            1,
        );

        assert_eq!(calc.result.pension_contribution, Decimal::ZERO);
        assert_eq!(calc.result.rent_contribution, Decimal::ZERO);
        assert_eq!(calc.result.accident_contribution, dec("69.49"));
        assert_eq!(calc.delta.contribution_base, dec("4161"));
    }

    #[test]
    fn test_loss_gives_zero_basis_and_tax() {
        let input = SelfEmploymentMonthlyInput {
            costs: dec("9000"),
            is_health_contribution: false,
            ..SelfEmploymentMonthlyInput::new(dec("5000"), dec("4161"))
        };
        let calc = calculate_monthly_result_of_self_employment(
            0,
            &input,
            &TaxRules::Linear,
            &RunningTotals::new(),
            &params(2023),
            1,
        );

        assert_eq!(calc.result.basis_for_tax, Decimal::ZERO);
        assert_eq!(calc.result.tax_amount, Decimal::ZERO);
        assert!(calc.result.net_amount < Decimal::ZERO);
    }
}
