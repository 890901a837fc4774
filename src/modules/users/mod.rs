pub mod models;

use std::collections::BTreeMap;

use crate::error::LibraryError;
use models::{UserId, UserRecord};

/// Registered users and the titles each one currently holds.
#[derive(Debug, Default)]
pub struct UserLedger {
    users: BTreeMap<UserId, UserRecord>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `user_id` under `name`. An existing id keeps its record
    /// untouched; the return value tells whether a new record was created.
    pub fn add_user(&mut self, user_id: UserId, name: &str) -> bool {
        if self.users.contains_key(&user_id) {
            tracing::debug!(target: "shelf::users", %user_id, "user already registered");
            return false;
        }

        self.users.insert(user_id, UserRecord::new(name));
        tracing::info!(target: "shelf::users", %user_id, %name, "user registered");
        true
    }

    pub fn get(&self, user_id: UserId) -> Result<&UserRecord, LibraryError> {
        self.users
            .get(&user_id)
            .ok_or_else(|| LibraryError::user_not_found(user_id))
    }

    /// Note one more copy of `title` held by the user.
    pub fn record_borrow(&mut self, user_id: UserId, title: &str) -> Result<(), LibraryError> {
        let user = self.get_mut(user_id)?;
        user.borrowed.push(title.to_string());
        Ok(())
    }

    /// Drop one held copy of `title`.
    pub fn record_return(&mut self, user_id: UserId, title: &str) -> Result<(), LibraryError> {
        let user = self.get_mut(user_id)?;
        let position = user
            .borrowed
            .iter()
            .position(|held| held == title)
            .ok_or_else(|| LibraryError::not_held(user_id, title))?;

        user.borrowed.remove(position);
        Ok(())
    }

    /// Users in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, &UserRecord)> + '_ {
        self.users.iter().map(|(user_id, record)| (*user_id, record))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn get_mut(&mut self, user_id: UserId) -> Result<&mut UserRecord, LibraryError> {
        self.users
            .get_mut(&user_id)
            .ok_or_else(|| LibraryError::user_not_found(user_id))
    }
}
