//! Tiered refund calculation and bill settlement.

pub mod domain;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Bill, BillId, BillStatus};
pub use policy::{quote, RefundPolicyError, RefundQuote};
pub use repository::{BillRepository, MemoryBillRepository};
pub use router::refund_router;
pub use service::{RefundOutcome, RefundService, RefundServiceError, RefundStatusView};
