use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{Bill, BillId};
use crate::workflows::booking::repository::RepositoryError;

/// Storage abstraction for bills so the refund service can be exercised in
/// isolation.
pub trait BillRepository: Send + Sync {
    fn insert(&self, bill: Bill) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BillId) -> Result<Option<Bill>, RepositoryError>;
    fn update(&self, bill: Bill) -> Result<(), RepositoryError>;
}

/// In-process bill store backing the service binary and the test suites.
#[derive(Default, Clone)]
pub struct MemoryBillRepository {
    bills: Arc<Mutex<HashMap<BillId, Bill>>>,
}

impl BillRepository for MemoryBillRepository {
    fn insert(&self, bill: Bill) -> Result<(), RepositoryError> {
        let mut guard = self.bills.lock().expect("bill mutex poisoned");
        if guard.contains_key(&bill.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(bill.id.clone(), bill);
        Ok(())
    }

    fn fetch(&self, id: &BillId) -> Result<Option<Bill>, RepositoryError> {
        let guard = self.bills.lock().expect("bill mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, bill: Bill) -> Result<(), RepositoryError> {
        let mut guard = self.bills.lock().expect("bill mutex poisoned");
        if !guard.contains_key(&bill.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(bill.id.clone(), bill);
        Ok(())
    }
}
