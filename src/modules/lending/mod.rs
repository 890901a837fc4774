pub mod receipt;
pub mod shared;

use shelf_events::{DeliveryReport, SharedSink};

use crate::error::LibraryError;
use crate::modules::books::Catalog;
use crate::modules::users::models::UserId;
use crate::modules::users::UserLedger;
use receipt::{LoanAction, LoanReceipt, StockSummary};

/// Single entry point over the catalog and the user ledger.
///
/// Borrow and return validate against both sides before touching either, and
/// undo the catalog step if the ledger step fails, so the two never disagree
/// about who holds which copy. No role checks or per-user limits apply here.
#[derive(Debug, Default)]
pub struct LendingService {
    catalog: Catalog,
    ledger: UserLedger,
}

impl LendingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(catalog: Catalog, ledger: UserLedger) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &UserLedger {
        &self.ledger
    }

    pub fn add_book(&mut self, title: &str, count: u32) -> Result<DeliveryReport, LibraryError> {
        self.catalog.add_book(title, count)
    }

    /// Apply `(title, count)` pairs in order, one `add_book` each.
    ///
    /// Stops at the first rejected pair; pairs before it stay applied.
    /// Returns how many pairs were applied.
    pub fn ingest<I, T>(&mut self, entries: I) -> Result<usize, LibraryError>
    where
        I: IntoIterator<Item = (T, u32)>,
        T: AsRef<str>,
    {
        let mut applied = 0;
        for (title, count) in entries {
            self.catalog.add_book(title.as_ref(), count)?;
            applied += 1;
        }

        tracing::info!(target: "shelf::lending", applied, "stock ingested");
        Ok(applied)
    }

    pub fn search(&self, title: &str) -> Result<StockSummary, LibraryError> {
        let record = self.catalog.search(title)?;
        tracing::debug!(target: "shelf::lending", %title, "stock searched");
        Ok(StockSummary {
            title: title.to_string(),
            record,
        })
    }

    pub fn add_user(&mut self, user_id: UserId, name: &str) -> bool {
        self.ledger.add_user(user_id, name)
    }

    pub fn subscribe(&mut self, title: &str, sink: SharedSink) {
        self.catalog.subscribe(title, sink);
    }

    /// Lend one copy of `title` to `user_id`.
    pub fn borrow(&mut self, user_id: UserId, title: &str) -> Result<LoanReceipt, LibraryError> {
        let receipt = self
            .try_borrow(user_id, title)
            .inspect_err(|err| log_refusal(LoanAction::Borrowed, user_id, title, err))?;

        tracing::info!(target: "shelf::lending", %user_id, %title, "book borrowed");
        Ok(receipt)
    }

    /// Take back one copy of `title` from `user_id`.
    pub fn return_book(
        &mut self,
        user_id: UserId,
        title: &str,
    ) -> Result<LoanReceipt, LibraryError> {
        let receipt = self
            .try_return(user_id, title)
            .inspect_err(|err| log_refusal(LoanAction::Returned, user_id, title, err))?;

        tracing::info!(target: "shelf::lending", %user_id, %title, "book returned");
        Ok(receipt)
    }

    fn try_borrow(&mut self, user_id: UserId, title: &str) -> Result<LoanReceipt, LibraryError> {
        let user_name = self.ledger.get(user_id)?.name.clone();
        let record = self.catalog.search(title)?;
        if record.available == 0 {
            return Err(LibraryError::book_unavailable(title));
        }

        self.catalog.decrement_available(title)?;
        if let Err(err) = self.ledger.record_borrow(user_id, title) {
            // The copy must not stay off the shelf without a holder.
            let undo = self.catalog.increment_available(title);
            return Err(keep_refusal(title, err, undo));
        }

        Ok(LoanReceipt {
            action: LoanAction::Borrowed,
            user_id,
            user_name,
            title: title.to_string(),
        })
    }

    fn try_return(&mut self, user_id: UserId, title: &str) -> Result<LoanReceipt, LibraryError> {
        let user = self.ledger.get(user_id)?;
        self.catalog.search(title)?;
        if !user.holds(title) {
            return Err(LibraryError::not_held(user_id, title));
        }
        let user_name = user.name.clone();

        self.catalog.increment_available(title)?;
        if let Err(err) = self.ledger.record_return(user_id, title) {
            let undo = self.catalog.decrement_available(title);
            return Err(keep_refusal(title, err, undo));
        }

        Ok(LoanReceipt {
            action: LoanAction::Returned,
            user_id,
            user_name,
            title: title.to_string(),
        })
    }
}

/// The ledger refusal is what the caller sees; a failed catalog undo is only
/// logged.
fn keep_refusal(title: &str, refusal: LibraryError, undo: Result<(), LibraryError>) -> LibraryError {
    if let Err(undo_err) = undo {
        tracing::warn!(
            target: "shelf::lending",
            %title,
            code = refusal.code(),
            rollback = undo_err.code(),
            "catalog rollback failed"
        );
    }
    refusal
}

fn log_refusal(action: LoanAction, user_id: UserId, title: &str, err: &LibraryError) {
    tracing::warn!(
        target: "shelf::lending",
        action = action.verb(),
        %user_id,
        %title,
        code = err.code(),
        "loan refused"
    );
}
