use std::sync::Arc;

use parking_lot::Mutex;
use shelf_events::{DeliveryReport, SharedSink};

use super::receipt::{LoanReceipt, StockSummary};
use super::LendingService;
use crate::error::LibraryError;
use crate::modules::users::models::UserId;

/// Cloneable handle for hosts that call the service from several threads.
///
/// One lock covers the catalog and the ledger together and is held for the
/// whole of each call, so a borrow's decrement and ledger entry are never
/// observed apart.
#[derive(Debug, Clone, Default)]
pub struct SharedLending {
    inner: Arc<Mutex<LendingService>>,
}

impl SharedLending {
    pub fn new(service: LendingService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access, for multi-step work that must not
    /// interleave with other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut LendingService) -> R) -> R {
        let mut service = self.inner.lock();
        f(&mut service)
    }

    pub fn add_book(&self, title: &str, count: u32) -> Result<DeliveryReport, LibraryError> {
        self.inner.lock().add_book(title, count)
    }

    pub fn search(&self, title: &str) -> Result<StockSummary, LibraryError> {
        self.inner.lock().search(title)
    }

    pub fn add_user(&self, user_id: UserId, name: &str) -> bool {
        self.inner.lock().add_user(user_id, name)
    }

    pub fn subscribe(&self, title: &str, sink: SharedSink) {
        self.inner.lock().subscribe(title, sink);
    }

    pub fn borrow(&self, user_id: UserId, title: &str) -> Result<LoanReceipt, LibraryError> {
        self.inner.lock().borrow(user_id, title)
    }

    pub fn return_book(&self, user_id: UserId, title: &str) -> Result<LoanReceipt, LibraryError> {
        self.inner.lock().return_book(user_id, title)
    }
}

impl From<LendingService> for SharedLending {
    fn from(service: LendingService) -> Self {
        Self::new(service)
    }
}
