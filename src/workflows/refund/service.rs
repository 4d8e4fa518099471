use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Bill, BillId, BillStatus};
use super::policy::{self, RefundPolicyError, RefundQuote};
use super::repository::BillRepository;
use crate::workflows::booking::repository::RepositoryError;

/// Settled refund decision applied to a bill.
#[derive(Debug, Clone, Serialize)]
pub struct RefundOutcome {
    pub bill_id: BillId,
    pub bill_status: BillStatus,
    pub quote: RefundQuote,
}

impl RefundOutcome {
    pub fn status_view(&self) -> RefundStatusView {
        RefundStatusView {
            bill_id: self.bill_id.clone(),
            status: self.bill_status.label(),
            percentage: self.quote.percentage,
            refund_amount: self.quote.refund_amount,
            policy_label: self.quote.policy_label,
            days_until_departure: self.quote.days_until_departure,
        }
    }
}

/// Sanitized representation of an applied refund for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RefundStatusView {
    pub bill_id: BillId,
    pub status: &'static str,
    pub percentage: u8,
    pub refund_amount: Decimal,
    pub policy_label: &'static str,
    pub days_until_departure: i64,
}

/// Service applying the tiered refund policy to stored bills.
pub struct RefundService<B> {
    repository: Arc<B>,
}

impl<B> RefundService<B>
where
    B: BillRepository + 'static,
{
    pub fn new(repository: Arc<B>) -> Self {
        Self { repository }
    }

    /// Quote a refund without touching any bill.
    pub fn quote(
        &self,
        total_price: Decimal,
        departure: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<RefundQuote, RefundServiceError> {
        Ok(policy::quote(total_price, departure, now)?)
    }

    /// Approve a refund on a bill and persist the resulting state.
    ///
    /// Only paid bills are refundable; there is nothing to return on an
    /// unpaid bill and settled bills cannot pay out twice. A full refund
    /// cancels the bill outright; a partial refund marks it refunded with
    /// the computed amount recorded.
    pub fn approve(
        &self,
        bill_id: &BillId,
        now: DateTime<Utc>,
    ) -> Result<RefundOutcome, RefundServiceError> {
        let mut bill = self
            .repository
            .fetch(bill_id)?
            .ok_or(RepositoryError::NotFound)?;

        if bill.status.settled() {
            return Err(RefundServiceError::AlreadySettled);
        }
        if bill.status != BillStatus::Paid {
            return Err(RefundServiceError::Unpaid);
        }

        let quote = policy::quote(bill.total_price, bill.departure, now)?;

        bill.status = if quote.percentage == 100 {
            BillStatus::Cancelled
        } else {
            BillStatus::Refunded
        };
        bill.refund_amount = Some(quote.refund_amount);
        let status = bill.status;
        self.repository.update(bill)?;

        Ok(RefundOutcome {
            bill_id: bill_id.clone(),
            bill_status: status,
            quote,
        })
    }

    /// Fetch a bill for API responses.
    pub fn get(&self, bill_id: &BillId) -> Result<Bill, RefundServiceError> {
        let bill = self
            .repository
            .fetch(bill_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(bill)
    }
}

/// Error raised by the refund service.
#[derive(Debug, thiserror::Error)]
pub enum RefundServiceError {
    #[error(transparent)]
    Policy(#[from] RefundPolicyError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("bill is already settled")]
    AlreadySettled,
    #[error("bill has not been paid")]
    Unpaid,
}
