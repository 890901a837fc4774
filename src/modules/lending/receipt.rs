use std::fmt;

use serde::Serialize;

use crate::modules::books::models::BookRecord;
use crate::modules::users::models::UserId;

/// Search result for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSummary {
    pub title: String,
    #[serde(flatten)]
    pub record: BookRecord,
}

impl fmt::Display for StockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book: {}, Available: {}, Total: {}",
            self.title, self.record.available, self.record.total
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    Borrowed,
    Returned,
}

impl LoanAction {
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Borrowed => "borrowed",
            Self::Returned => "returned",
        }
    }
}

/// Confirmation of a completed borrow or return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanReceipt {
    pub action: LoanAction,
    pub user_id: UserId,
    pub user_name: String,
    pub title: String,
}

impl fmt::Display for LoanReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book '{}' {} successfully by {}.",
            self.title,
            self.action.verb(),
            self.user_name
        )
    }
}
