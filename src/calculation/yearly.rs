//! Yearly aggregation of monthly results.
//!
//! A yearly run owns a fresh [`RunningTotals`], feeds it to the monthly
//! calculator of one contract type in input order, folds each month's
//! delta back in and finally appends a whole-year summary row. Every
//! input is validated before the first month is calculated, so a failing
//! run never yields partial rows.

use tracing::debug;

use crate::config::YearParams;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeMonthlyResult, EmployerMonthlyInput, EmployerMonthlyResult, EmploymentMonthlyInput,
    MandateMonthlyInput, MonthlyCalculation, RunningTotals, SelfEmploymentMonthlyInput,
    SelfEmploymentMonthlyResult, TaxRules, WholeYear, YearlyResult,
};

use super::contract_of_employment::calculate_monthly_result_of_employment;
use super::contract_of_mandate::calculate_monthly_result_of_mandate;
use super::employer::calculate_monthly_result_of_employer;
use super::self_employment::calculate_monthly_result_of_self_employment;

/// Most months a yearly run accepts.
pub const MONTHS_IN_YEAR: usize = 12;

fn run_year<I, R>(
    inputs: &[I],
    validate: impl Fn(&I, usize) -> EngineResult<()>,
    calculate: impl Fn(u8, &I, &RunningTotals, u32) -> MonthlyCalculation<R>,
) -> EngineResult<YearlyResult<R>>
where
    R: WholeYear,
{
    if inputs.len() > MONTHS_IN_YEAR {
        return Err(EngineError::TooManyMonths {
            count: inputs.len(),
        });
    }
    for (month, input) in inputs.iter().enumerate() {
        validate(input, month)?;
    }

    let mut totals = RunningTotals::new();
    let mut rows = Vec::with_capacity(inputs.len() + 1);
    let mut audit_steps = Vec::new();

    for (month, input) in (0u8..).zip(inputs) {
        let step_number = audit_steps.len() as u32 + 1;
        let calculation = calculate(month, input, &totals, step_number);

        totals.apply(&calculation.delta);
        debug!(
            month,
            contribution_base = %totals.contribution_base,
            deducted_expenses = %totals.deducted_expenses,
            taxable_gross = %totals.taxable_gross,
            basis_for_tax = %totals.basis_for_tax,
            "Month calculated"
        );

        rows.push(calculation.result);
        audit_steps.extend(calculation.audit_steps);
    }

    let summary = R::whole_year(&rows);
    rows.push(summary);

    Ok(YearlyResult {
        rows,
        totals,
        audit_steps,
    })
}

/// Calculates a year of pay under a contract of mandate.
///
/// # Errors
///
/// Returns [`EngineError::TooManyMonths`] for more than twelve inputs and
/// [`EngineError::InvalidMonthlyInput`] for the first invalid record.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_yearly_result_of_mandate;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{MandateMonthlyInput, Month};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/pl").unwrap();
/// let inputs = vec![MandateMonthlyInput::new(Decimal::from(5000)); 3];
///
/// let result = calculate_yearly_result_of_mandate(&inputs, loader.year(2021).unwrap()).unwrap();
/// assert_eq!(result.rows.len(), 4);
/// assert_eq!(result.whole_year().unwrap().month, Month::WholeYear);
/// assert_eq!(result.totals.contribution_base, Decimal::from(15000));
/// ```
pub fn calculate_yearly_result_of_mandate(
    inputs: &[MandateMonthlyInput],
    params: &YearParams,
) -> EngineResult<YearlyResult<EmployeeMonthlyResult>> {
    run_year(
        inputs,
        |input, month| input.validate(month),
        |month, input, totals, step| {
            calculate_monthly_result_of_mandate(month, input, totals, params, step)
        },
    )
}

/// Calculates a year of pay under a contract of employment.
///
/// # Errors
///
/// Same as [`calculate_yearly_result_of_mandate`].
pub fn calculate_yearly_result_of_employment(
    inputs: &[EmploymentMonthlyInput],
    params: &YearParams,
) -> EngineResult<YearlyResult<EmployeeMonthlyResult>> {
    run_year(
        inputs,
        |input, month| input.validate(month),
        |month, input, totals, step| {
            calculate_monthly_result_of_employment(month, input, totals, params, step)
        },
    )
}

/// Calculates a year of employer contributions.
///
/// The employer keeps its own contribution base total. The final totals
/// of the worker's run are in [`YearlyResult::totals`] for callers that
/// report both sides together.
///
/// # Errors
///
/// Same as [`calculate_yearly_result_of_mandate`].
pub fn calculate_yearly_result_of_employer(
    inputs: &[EmployerMonthlyInput],
    params: &YearParams,
) -> EngineResult<YearlyResult<EmployerMonthlyResult>> {
    run_year(
        inputs,
        |input, month| input.validate(month),
        |month, input, totals, step| {
            calculate_monthly_result_of_employer(month, input, totals, params, step)
        },
    )
}

/// Calculates a year of self-employment under the given tax rules.
///
/// # Errors
///
/// Same as [`calculate_yearly_result_of_mandate`], plus
/// [`EngineError::InvalidMonthlyInput`] for a lump-sum rate outside
/// `[0, 1]`.
pub fn calculate_yearly_result_of_self_employment(
    inputs: &[SelfEmploymentMonthlyInput],
    tax_rules: &TaxRules,
    params: &YearParams,
) -> EngineResult<YearlyResult<SelfEmploymentMonthlyResult>> {
    tax_rules.validate()?;
    run_year(
        inputs,
        |input, month| input.validate(month),
        |month, input, totals, step| {
            calculate_monthly_result_of_self_employment(month, input, tax_rules, totals, params, step)
        },
    )
}
