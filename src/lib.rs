//! SHELF library engine
//!
//! An in-memory catalog of book stock, a ledger of borrowers, and the lending
//! service that keeps the two consistent across borrow and return.

pub mod bootstrap;
pub mod error;
pub mod modules;

/// Re-export commonly used types
pub use error::LibraryError;
pub use modules::*;
