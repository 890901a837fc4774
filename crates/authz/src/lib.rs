//! Library roles.
//!
//! Roles are informational: they describe what a member may do, but nothing in
//! the lending engine consults them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl AuthzError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "unknown_role",
        }
    }
}

/// Closed set of library roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
    Librarian,
    Guest,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Librarian, Role::Guest];

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Librarian => "librarian",
            Self::Guest => "guest",
        }
    }

    /// Human-readable summary of what the role allows.
    pub const fn capabilities(self) -> &'static str {
        match self {
            Self::Student => "Can borrow up to 5 books",
            Self::Teacher => "Can borrow up to 10 books",
            Self::Librarian => "Can manage books, users, and the library system",
            Self::Guest => "Can browse the library catalog",
        }
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    /// Case-insensitive lookup of a role tag.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let role = Self::ALL
            .into_iter()
            .find(|role| role.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| AuthzError::UnknownRole(tag.to_string()));

        if let Err(err) = &role {
            tracing::debug!(target: "shelf-authz", %tag, code = err.code(), "role lookup failed");
        }
        role
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named person holding one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub role: Role,
}

impl Member {
    /// Resolve `role_tag` and attach it to `name`.
    pub fn new(role_tag: &str, name: impl Into<String>) -> Result<Self, AuthzError> {
        let role = role_tag.parse()?;
        Ok(Self::with_role(role, name))
    }

    pub fn with_role(role: Role, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn capabilities(&self) -> &'static str {
        self.role.capabilities()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.capabilities())
    }
}
