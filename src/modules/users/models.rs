use std::fmt;
use std::str::FromStr;

/// Opaque library-card number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered borrower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Display name given at registration
    pub name: String,
    /// Borrowed titles in borrow order; a title repeats once per copy held
    pub borrowed: Vec<String>,
}

impl UserRecord {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            borrowed: Vec::new(),
        }
    }

    pub fn holds(&self, title: &str) -> bool {
        self.borrowed.iter().any(|held| held == title)
    }

    pub fn copies_of(&self, title: &str) -> usize {
        self.borrowed.iter().filter(|held| *held == title).count()
    }
}
