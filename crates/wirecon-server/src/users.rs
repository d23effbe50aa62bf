//! Per-user shared secrets and permissions.

use std::collections::HashMap;

/// One account that may issue commands.
#[derive(Debug, Clone)]
pub struct User {
    pub name: String,
    /// Shared secret for this user's key derivation.
    pub secret: String,
    /// Whether this user may queue commands.
    pub queue: bool,
}

/// Registry of known users, keyed by name. Built once at startup and
/// shared read-only with the request pipeline.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<String, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.name.clone(), user);
    }

    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
