//! Income tax under general, linear and lump-sum rules.
//!
//! General rules charge the part of the month's basis that still fits under
//! the yearly bracket threshold at the first rate and the rest at the
//! second rate. Every result is floored at zero and rounded to whole units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MiddleClassRelief, ReliefBand, TaxParams};
use crate::models::AuditStep;

use super::apportion::{ThresholdSplit, split_at_threshold};
use super::rounding::{round_money, round_whole};

/// Inputs of a general-rules tax calculation for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralRulesInput {
    /// The month's gross amount, used by the middle-class relief.
    pub gross_amount: Decimal,
    /// The month's tax basis.
    pub basis_for_tax: Decimal,
    /// Health contribution deductible from tax.
    pub health_deduction: Decimal,
    /// Tax bases of earlier months of the year.
    pub total_basis_for_tax: Decimal,
    /// The monthly tax-reducing amount is claimed.
    pub apply_tax_reducing_amount: bool,
    /// The middle-class relief is claimed.
    pub apply_middle_class_relief: bool,
}

/// Outcome of a general-rules tax calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralRulesTax {
    /// Tax due, floored at zero, in whole units.
    pub tax_amount: Decimal,
    /// The basis split at the bracket threshold.
    pub split: ThresholdSplit,
    /// Tax-reducing amount actually subtracted.
    pub tax_reducing_amount: Decimal,
    /// Middle-class relief actually subtracted.
    pub middle_class_relief: Decimal,
}

/// Calculates the income tax using general (progressive) rules.
///
/// The tax-reducing amount is withdrawn once earlier months alone have
/// already pushed the yearly basis over the bracket threshold.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_income_tax_using_general_rules, GeneralRulesInput};
/// use payroll_engine::config::TaxParams;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let params = TaxParams {
///     first_rate: dec("0.17"),
///     second_rate: dec("0.32"),
///     linear_rate: dec("0.19"),
///     bracket_threshold: dec("85528"),
///     tax_reducing_amount: dec("43.76"),
///     middle_class_relief: None,
/// };
/// let input = GeneralRulesInput {
///     gross_amount: dec("12000"),
///     basis_for_tax: dec("10000"),
///     health_deduction: Decimal::ZERO,
///     total_basis_for_tax: dec("80000"),
///     apply_tax_reducing_amount: false,
///     apply_middle_class_relief: false,
/// };
///
/// // 5528 at 17% plus 4472 at 32%
/// let tax = calculate_income_tax_using_general_rules(&input, &params);
/// assert_eq!(tax.tax_amount, dec("2371"));
/// ```
pub fn calculate_income_tax_using_general_rules(
    input: &GeneralRulesInput,
    params: &TaxParams,
) -> GeneralRulesTax {
    let split = split_at_threshold(
        input.basis_for_tax,
        input.total_basis_for_tax,
        params.bracket_threshold,
    );

    let tax_reducing_amount = if input.apply_tax_reducing_amount
        && input.total_basis_for_tax <= params.bracket_threshold
    {
        params.tax_reducing_amount
    } else {
        Decimal::ZERO
    };

    let middle_class_relief = if input.apply_middle_class_relief {
        calculate_middle_class_relief(input.gross_amount, params.middle_class_relief.as_ref())
    } else {
        Decimal::ZERO
    };

    let tax_amount = split.within * params.first_rate + split.excess * params.second_rate
        - input.health_deduction
        - tax_reducing_amount
        - middle_class_relief;

    GeneralRulesTax {
        tax_amount: round_whole(tax_amount.max(Decimal::ZERO)),
        split,
        tax_reducing_amount,
        middle_class_relief,
    }
}

/// Calculates the income tax using the flat linear rate.
pub fn calculate_income_tax_using_linear_rules(
    basis_for_tax: Decimal,
    health_deduction: Decimal,
    params: &TaxParams,
) -> Decimal {
    let tax_amount = basis_for_tax * params.linear_rate - health_deduction;
    round_whole(tax_amount.max(Decimal::ZERO))
}

/// Calculates the income tax using a lump-sum rate supplied by the caller.
pub fn calculate_income_tax_using_lump_sum_rules(
    basis_for_tax: Decimal,
    lump_sum_rate: Decimal,
    health_deduction: Decimal,
) -> Decimal {
    let tax_amount = basis_for_tax * lump_sum_rate - health_deduction;
    round_whole(tax_amount.max(Decimal::ZERO))
}

fn band_relief(gross: Decimal, band: &ReliefBand) -> Option<Decimal> {
    if gross >= band.from && gross < band.to {
        Some(round_money(gross * band.slope + band.intercept).max(Decimal::ZERO))
    } else {
        None
    }
}

/// Calculates the middle-class relief for a monthly gross amount.
///
/// The gross amount is first rounded to whole units. Outside both bands,
/// and in years without a relief, the result is zero.
pub fn calculate_middle_class_relief(
    gross_amount: Decimal,
    relief: Option<&MiddleClassRelief>,
) -> Decimal {
    let Some(relief) = relief else {
        return Decimal::ZERO;
    };
    let gross = round_whole(gross_amount);

    band_relief(gross, &relief.rising)
        .or_else(|| band_relief(gross, &relief.falling))
        .unwrap_or(Decimal::ZERO)
}

/// Builds the audit step for a bracket split.
pub(crate) fn bracket_audit_step(
    step_number: u32,
    month: u8,
    input: &GeneralRulesInput,
    params: &TaxParams,
    tax: &GeneralRulesTax,
) -> AuditStep {
    let reasoning = if input.total_basis_for_tax > params.bracket_threshold {
        format!(
            "Yearly basis {} already above threshold {}, {} taxed at {}",
            input.total_basis_for_tax.normalize(),
            params.bracket_threshold.normalize(),
            input.basis_for_tax.normalize(),
            params.second_rate.normalize()
        )
    } else if tax.split.crosses() {
        format!(
            "{} taxed at {} and {} at {} after crossing threshold {}",
            tax.split.within.normalize(),
            params.first_rate.normalize(),
            tax.split.excess.normalize(),
            params.second_rate.normalize(),
            params.bracket_threshold.normalize()
        )
    } else {
        format!(
            "{} taxed at {}, yearly basis stays under threshold {}",
            input.basis_for_tax.normalize(),
            params.first_rate.normalize(),
            params.bracket_threshold.normalize()
        )
    };

    AuditStep {
        step_number,
        month,
        rule_id: "tax_bracket_split".to_string(),
        rule_name: "Tax Bracket Split".to_string(),
        input: serde_json::json!({
            "basis_for_tax": input.basis_for_tax.normalize().to_string(),
            "total_basis_for_tax": input.total_basis_for_tax.normalize().to_string(),
            "threshold": params.bracket_threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "within_first_bracket": tax.split.within.normalize().to_string(),
            "over_first_bracket": tax.split.excess.normalize().to_string(),
            "tax_reducing_amount": tax.tax_reducing_amount.normalize().to_string(),
            "middle_class_relief": tax.middle_class_relief.normalize().to_string(),
            "tax_amount": tax.tax_amount.normalize().to_string()
        }),
        reasoning,
    }
}
