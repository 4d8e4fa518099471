use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Computed refund terms for a bill at a given moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundQuote {
    pub percentage: u8,
    pub refund_amount: Decimal,
    pub policy_label: &'static str,
    pub days_until_departure: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefundPolicyError {
    #[error("total price must not be negative")]
    NegativeTotal,
}

/// Tier lookup: first matching band on whole days until departure.
/// Departures already in the past fall through to the lowest band.
const fn tier(days_until_departure: i64) -> (u8, &'static str) {
    if days_until_departure < 3 {
        (10, "Less than 3 days before departure")
    } else if days_until_departure < 7 {
        (50, "3–7 days before departure")
    } else {
        (100, "More than 7 days before departure")
    }
}

/// Compute the refundable share of `total_price` for a booking departing at
/// `departure`, evaluated at `now`.
///
/// Pure function of its inputs: the caller supplies the clock instant, so
/// identical arguments always produce identical quotes. Amounts are rounded
/// to two decimal places away from zero so no cents are lost.
pub fn quote(
    total_price: Decimal,
    departure: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<RefundQuote, RefundPolicyError> {
    if total_price.is_sign_negative() && !total_price.is_zero() {
        return Err(RefundPolicyError::NegativeTotal);
    }

    let days_until_departure = (departure - now).num_days();
    let (percentage, policy_label) = tier(days_until_departure);

    let refund_amount = (total_price * Decimal::from(percentage) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(RefundQuote {
        percentage,
        refund_amount,
        policy_label,
        days_until_departure,
    })
}
