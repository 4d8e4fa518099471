use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::booking::domain::ReservationId;

/// Identifier wrapper for bills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillId(pub String);

/// Payment states a bill moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillStatus {
    Unpaid,
    Paid,
    Refunded,
    Cancelled,
}

impl BillStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BillStatus::Unpaid => "unpaid",
            BillStatus::Paid => "paid",
            BillStatus::Refunded => "refunded",
            BillStatus::Cancelled => "cancelled",
        }
    }

    /// A settled bill can no longer accept a refund.
    pub const fn settled(self) -> bool {
        matches!(self, BillStatus::Refunded | BillStatus::Cancelled)
    }
}

/// Monetary record attached to a reservation.
///
/// `departure` is the reservation's check-in captured when the bill was
/// raised; the refund tiers are anchored on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub reservation_id: ReservationId,
    pub total_price: Decimal,
    pub departure: DateTime<Utc>,
    pub status: BillStatus,
    pub refund_amount: Option<Decimal>,
}
