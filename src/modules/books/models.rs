use linked_hash_map::LinkedHashMap;
use serde::Serialize;

/// Stock counters for one title.
///
/// `available` never exceeds `total`; only the catalog mutates either field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    /// Copies currently on the shelf
    pub available: u32,
    /// Copies the library owns
    pub total: u32,
}

impl BookRecord {
    pub(crate) const fn new(count: u32) -> Self {
        Self {
            available: count,
            total: count,
        }
    }

    /// Copies currently out on loan.
    pub const fn on_loan(&self) -> u32 {
        self.total - self.available
    }
}

/// Read-only, restartable view over the catalog in first-seen title order.
///
/// Each call to [`Listing::iter`] starts from the first title again.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    books: &'a LinkedHashMap<String, BookRecord>,
}

impl<'a> Listing<'a> {
    pub(crate) fn new(books: &'a LinkedHashMap<String, BookRecord>) -> Self {
        Self { books }
    }

    pub fn iter(&self) -> ListingIter<'a> {
        ListingIter {
            inner: self.books.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for Listing<'a> {
    type Item = (&'a str, BookRecord);
    type IntoIter = ListingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Listing<'a> {
    type Item = (&'a str, BookRecord);
    type IntoIter = ListingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`Listing::iter`].
pub struct ListingIter<'a> {
    inner: linked_hash_map::Iter<'a, String, BookRecord>,
}

impl<'a> Iterator for ListingIter<'a> {
    type Item = (&'a str, BookRecord);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(title, record)| (title.as_str(), *record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ListingIter<'_> {}
