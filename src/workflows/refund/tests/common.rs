use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::booking::domain::ReservationId;
use crate::workflows::booking::repository::RepositoryError;
use crate::workflows::refund::domain::{Bill, BillId, BillStatus};
use crate::workflows::refund::repository::{BillRepository, MemoryBillRepository};
use crate::workflows::refund::service::RefundService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn departure_in_days(days: i64) -> DateTime<Utc> {
    now() + Duration::days(days)
}

pub(super) fn bill(suffix: &str, total_price: Decimal, departure: DateTime<Utc>) -> Bill {
    Bill {
        id: BillId(format!("bill-{suffix}")),
        reservation_id: ReservationId(format!("res-{suffix}")),
        total_price,
        departure,
        status: BillStatus::Paid,
        refund_amount: None,
    }
}

pub(super) fn build_service() -> (RefundService<MemoryBillRepository>, Arc<MemoryBillRepository>) {
    let repository = Arc::new(MemoryBillRepository::default());
    let service = RefundService::new(repository.clone());
    (service, repository)
}

pub(super) struct UnavailableBillRepository;

impl BillRepository for UnavailableBillRepository {
    fn insert(&self, _bill: Bill) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &BillId) -> Result<Option<Bill>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _bill: Bill) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
