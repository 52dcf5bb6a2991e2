//! Threshold apportionment.
//!
//! Yearly caps and thresholds are crossed part-way through a month. This
//! module decides how much of a new amount still fits under a cap given
//! the running total carried from earlier months. The same rule serves the
//! ZUS contribution base cap, the expense cap and the tax bracket
//! threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Returns the part of `amount` that still fits under `cap`.
///
/// - a running total already above the cap leaves no headroom
/// - an amount that would cross the cap is cut to the remaining headroom
/// - otherwise the whole amount fits
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::apportion;
/// use rust_decimal::Decimal;
///
/// let cap = Decimal::from(100);
/// assert_eq!(apportion(Decimal::from(30), Decimal::from(50), cap), Decimal::from(30));
/// assert_eq!(apportion(Decimal::from(80), Decimal::from(50), cap), Decimal::from(50));
/// assert_eq!(apportion(Decimal::from(80), Decimal::from(120), cap), Decimal::ZERO);
/// ```
pub fn apportion(amount: Decimal, running_total: Decimal, cap: Decimal) -> Decimal {
    if running_total > cap {
        Decimal::ZERO
    } else if running_total + amount > cap {
        cap - running_total
    } else {
        amount
    }
}

/// An amount split at a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSplit {
    /// The part falling under the threshold.
    pub within: Decimal,
    /// The part falling above the threshold.
    pub excess: Decimal,
}

impl ThresholdSplit {
    /// Returns true when some of the amount lies above the threshold.
    pub fn crosses(&self) -> bool {
        self.excess > Decimal::ZERO
    }
}

/// Splits `amount` into the part under `threshold` and the part above it.
///
/// Where a cap discards the excess, a threshold keeps it so it can be
/// charged at a second rate. `within + excess` always equals `amount`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_at_threshold;
/// use rust_decimal::Decimal;
///
/// let split = split_at_threshold(Decimal::from(10000), Decimal::from(80000), Decimal::from(85528));
/// assert_eq!(split.within, Decimal::from(5528));
/// assert_eq!(split.excess, Decimal::from(4472));
/// ```
pub fn split_at_threshold(
    amount: Decimal,
    running_total: Decimal,
    threshold: Decimal,
) -> ThresholdSplit {
    let within = apportion(amount, running_total, threshold);
    ThresholdSplit {
        within,
        excess: amount - within,
    }
}

/// Builds the audit step for one cap decision.
#[allow(clippy::too_many_arguments)]
pub(crate) fn cap_audit_step(
    step_number: u32,
    month: u8,
    rule_id: &str,
    rule_name: &str,
    amount: Decimal,
    running_total: Decimal,
    cap: Decimal,
    applied: Decimal,
) -> AuditStep {
    let reasoning = if running_total > cap {
        format!(
            "Running total {} already exceeds cap {}, nothing of {} applies",
            running_total.normalize(),
            cap.normalize(),
            amount.normalize()
        )
    } else if applied < amount {
        format!(
            "Running total {} plus {} crosses cap {}, only {} applies",
            running_total.normalize(),
            amount.normalize(),
            cap.normalize(),
            applied.normalize()
        )
    } else {
        format!(
            "Running total {} plus {} stays within cap {}",
            running_total.normalize(),
            amount.normalize(),
            cap.normalize()
        )
    };

    AuditStep {
        step_number,
        month,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "running_total": running_total.normalize().to_string(),
            "cap": cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "applied": applied.normalize().to_string()
        }),
        reasoning,
    }
}
