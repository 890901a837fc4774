pub mod books;
pub mod lending;
pub mod users;

pub use books::models::{BookRecord, Listing};
pub use books::Catalog;
pub use lending::receipt::{LoanAction, LoanReceipt, StockSummary};
pub use lending::shared::SharedLending;
pub use lending::LendingService;
pub use users::models::{UserId, UserRecord};
pub use users::UserLedger;
