//! Young-worker exemption.
//!
//! Workers under 26 pay no income tax on gross income up to a yearly
//! threshold. Both employee calculators share the check against the
//! running taxable gross and the audit step recording it.

use rust_decimal::Decimal;

use crate::config::YearParams;
use crate::models::AuditStep;

/// Returns true when a young worker's income is taxed this month.
///
/// The exemption only covers income that never crosses the yearly
/// threshold: once the running gross plus this month passes it, the
/// whole month is taxed.
pub fn is_taxed_despite_young_exemption(
    gross_amount: Decimal,
    taxable_gross: Decimal,
    params: &YearParams,
) -> bool {
    taxable_gross + gross_amount > params.young_exemption_threshold
}

pub(crate) fn young_exemption_audit_step(
    step_number: u32,
    month: u8,
    gross_amount: Decimal,
    taxable_gross: Decimal,
    threshold: Decimal,
    taxed: bool,
) -> AuditStep {
    let reasoning = if taxed {
        format!(
            "Yearly gross {} plus {} exceeds exemption threshold {}, month is taxed",
            taxable_gross.normalize(),
            gross_amount.normalize(),
            threshold.normalize()
        )
    } else {
        format!(
            "Yearly gross {} plus {} stays within exemption threshold {}, no tax",
            taxable_gross.normalize(),
            gross_amount.normalize(),
            threshold.normalize()
        )
    };

    AuditStep {
        step_number,
        month,
        rule_id: "young_exemption".to_string(),
        rule_name: "Young Worker Exemption".to_string(),
        input: serde_json::json!({
            "gross_amount": gross_amount.normalize().to_string(),
            "taxable_gross": taxable_gross.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({ "taxed": taxed }),
        reasoning,
    }
}
