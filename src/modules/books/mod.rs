pub mod models;

use linked_hash_map::LinkedHashMap;
use shelf_events::{DeliveryReport, SharedSink, Subscriptions};

use crate::error::LibraryError;
use models::{BookRecord, Listing};

/// Registry of book stock and the sole writer of its counters.
///
/// Titles are kept in the order they were first added. Subscribers are
/// notified after every successful `add_book` for their title.
#[derive(Debug, Default)]
pub struct Catalog {
    books: LinkedHashMap<String, BookRecord>,
    subscriptions: Subscriptions,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of `title`, creating the record on first sight,
    /// then notify the title's subscribers.
    pub fn add_book(&mut self, title: &str, count: u32) -> Result<DeliveryReport, LibraryError> {
        if count == 0 {
            return Err(LibraryError::invalid_argument(format!(
                "copy count for '{title}' must be positive"
            )));
        }

        let record = match self.books.get_mut(title) {
            Some(record) => {
                let total = record.total.checked_add(count).ok_or_else(|| {
                    LibraryError::invalid_argument(format!(
                        "adding {count} copies of '{title}' overflows its stock"
                    ))
                })?;
                // available <= total, so this cannot overflow once total fits.
                record.available += count;
                record.total = total;
                *record
            }
            None => {
                let record = BookRecord::new(count);
                self.books.insert(title.to_string(), record);
                record
            }
        };

        tracing::info!(
            target: "shelf::books",
            %title,
            added = count,
            available = record.available,
            total = record.total,
            "stock added"
        );

        let message = format!("The book '{title}' is now available!");
        let report = self.subscriptions.publish(title, &message);
        if report.attempted() > 0 {
            tracing::debug!(
                target: "shelf::books",
                %title,
                delivered = report.delivered,
                failed = report.failed,
                "availability notifications sent"
            );
        }

        Ok(report)
    }

    pub fn search(&self, title: &str) -> Result<BookRecord, LibraryError> {
        self.books
            .get(title)
            .copied()
            .ok_or_else(|| LibraryError::book_not_found(title))
    }

    /// Take one copy off the shelf.
    pub fn decrement_available(&mut self, title: &str) -> Result<(), LibraryError> {
        let record = self
            .books
            .get_mut(title)
            .ok_or_else(|| LibraryError::book_not_found(title))?;
        if record.available == 0 {
            return Err(LibraryError::book_unavailable(title));
        }

        record.available -= 1;
        Ok(())
    }

    /// Put one copy back on the shelf.
    pub fn increment_available(&mut self, title: &str) -> Result<(), LibraryError> {
        let record = self
            .books
            .get_mut(title)
            .ok_or_else(|| LibraryError::book_not_found(title))?;
        if record.available >= record.total {
            return Err(LibraryError::OverReturn {
                title: title.to_string(),
                total: record.total,
            });
        }

        record.available += 1;
        Ok(())
    }

    /// Register `sink` for stock additions to `title`. The title does not
    /// need to exist yet.
    pub fn subscribe(&mut self, title: &str, sink: SharedSink) {
        self.subscriptions.subscribe(title, sink);
    }

    pub fn subscriber_count(&self, title: &str) -> usize {
        self.subscriptions.subscriber_count(title)
    }

    pub fn iter(&self) -> Listing<'_> {
        Listing::new(&self.books)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_events::MemorySink;
    use std::sync::Arc;

    fn assert_invariant(catalog: &Catalog) {
        for (title, record) in catalog.iter() {
            assert!(
                record.available <= record.total,
                "'{title}' has {} available of {}",
                record.available,
                record.total
            );
        }
    }

    #[test]
    fn new_title_starts_fully_available() {
        let mut catalog = Catalog::new();
        catalog.add_book("1984", 5).unwrap();

        assert_eq!(
            catalog.search("1984").unwrap(),
            BookRecord {
                available: 5,
                total: 5
            }
        );
    }

    #[test]
    fn restock_adds_to_both_counters() {
        let mut catalog = Catalog::new();
        catalog.add_book("1984", 5).unwrap();
        catalog.decrement_available("1984").unwrap();
        catalog.add_book("1984", 3).unwrap();

        let record = catalog.search("1984").unwrap();
        assert_eq!(record.available, 7);
        assert_eq!(record.total, 8);
        assert_eq!(record.on_loan(), 1);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn zero_count_is_invalid() {
        let mut catalog = Catalog::new();
        let err = catalog.add_book("Dune", 0).unwrap_err();

        assert_eq!(err.code(), "invalid_argument");
        assert!(catalog.is_empty());
    }

    #[test]
    fn overflowing_restock_is_invalid_and_leaves_stock_alone() {
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", u32::MAX).unwrap();

        let err = catalog.add_book("Dune", 1).unwrap_err();

        assert_eq!(err.code(), "invalid_argument");
        assert_eq!(catalog.search("Dune").unwrap().total, u32::MAX);
    }

    #[test]
    fn search_unknown_title() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.search("Hobbit").unwrap_err(),
            LibraryError::book_not_found("Hobbit")
        );
    }

    #[test]
    fn decrement_stops_at_zero() {
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", 1).unwrap();

        catalog.decrement_available("Dune").unwrap();
        let err = catalog.decrement_available("Dune").unwrap_err();

        assert_eq!(err, LibraryError::book_unavailable("Dune"));
        assert_eq!(catalog.search("Dune").unwrap().available, 0);
        assert_eq!(
            catalog.decrement_available("Emma").unwrap_err().code(),
            "book_not_found"
        );
    }

    #[test]
    fn increment_refuses_over_return() {
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", 2).unwrap();
        catalog.decrement_available("Dune").unwrap();

        catalog.increment_available("Dune").unwrap();
        let err = catalog.increment_available("Dune").unwrap_err();

        assert_eq!(
            err,
            LibraryError::OverReturn {
                title: "Dune".to_string(),
                total: 2
            }
        );
        assert_invariant(&catalog);
        assert_eq!(
            catalog.increment_available("Emma").unwrap_err().code(),
            "book_not_found"
        );
    }

    #[test]
    fn listing_keeps_first_seen_order_and_restarts() {
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", 3).unwrap();
        catalog.add_book("1984", 5).unwrap();
        catalog.add_book("Hobbit", 2).unwrap();
        catalog.add_book("Dune", 1).unwrap();

        let listing = catalog.iter();
        let first: Vec<&str> = listing.iter().map(|(title, _)| title).collect();
        let second: Vec<(&str, BookRecord)> = listing.into_iter().collect();

        assert_eq!(first, vec!["Dune", "1984", "Hobbit"]);
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].1.total, 4);
        assert_eq!(listing.iter().len(), 3);
    }

    #[test]
    fn empty_catalog_lists_nothing() {
        let catalog = Catalog::new();
        assert!(catalog.iter().is_empty());
        assert_eq!(catalog.iter().iter().next(), None);
    }

    #[test]
    fn add_book_notifies_only_that_title() {
        let hobbit = Arc::new(MemorySink::new());
        let dune = Arc::new(MemorySink::new());
        let mut catalog = Catalog::new();
        catalog.subscribe("Hobbit", hobbit.clone());
        catalog.subscribe("Dune", dune.clone());

        let report = catalog.add_book("Hobbit", 1).unwrap();

        assert_eq!(report.delivered, 1);
        assert_eq!(
            hobbit.messages(),
            vec!["The book 'Hobbit' is now available!"]
        );
        assert!(dune.is_empty());
    }

    #[test]
    fn borrow_and_return_do_not_notify() {
        let sink = Arc::new(MemorySink::new());
        let mut catalog = Catalog::new();
        catalog.add_book("Dune", 1).unwrap();
        catalog.subscribe("Dune", sink.clone());

        catalog.decrement_available("Dune").unwrap();
        catalog.increment_available("Dune").unwrap();

        assert!(sink.is_empty());
        assert_eq!(catalog.subscriber_count("Dune"), 1);
    }

    #[test]
    fn failing_sink_does_not_abort_add_book() {
        let after = Arc::new(MemorySink::new());
        let mut catalog = Catalog::new();
        catalog.subscribe(
            "Dune",
            Arc::new(|_: &str| -> anyhow::Result<()> { anyhow::bail!("mailbox full") }),
        );
        catalog.subscribe("Dune", after.clone());

        let report = catalog.add_book("Dune", 2).unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(after.len(), 1);
        assert_eq!(catalog.search("Dune").unwrap().total, 2);
    }

    #[test]
    fn rejected_add_book_sends_nothing() {
        let sink = Arc::new(MemorySink::new());
        let mut catalog = Catalog::new();
        catalog.subscribe("Dune", sink.clone());

        assert!(catalog.add_book("Dune", 0).is_err());
        assert!(sink.is_empty());
    }
}
