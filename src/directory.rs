//! User directory seam.
//!
//! The org chart lives outside the engine. This trait is the read-only
//! view the engine needs: resolving names, finding a requester's manager,
//! and targeting role-based notifications.

use std::collections::HashMap;

use crate::models::{UserProfile, UserRole};

/// Read-only access to the organizational directory.
pub trait UserDirectory: Send + Sync {
    /// Looks up a user profile by id.
    fn user(&self, id: u64) -> Option<UserProfile>;

    /// Returns all users with the given role.
    fn users_with_role(&self, role: UserRole) -> Vec<UserProfile>;
}

/// A directory backed by an in-memory map, for tests and single-process
/// deployments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashMap<u64, UserProfile>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with the given profiles.
    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Adds or replaces a profile.
    pub fn insert(&mut self, profile: UserProfile) {
        self.users.insert(profile.id, profile);
    }
}

impl UserDirectory for InMemoryDirectory {
    fn user(&self, id: u64) -> Option<UserProfile> {
        self.users.get(&id).cloned()
    }

    fn users_with_role(&self, role: UserRole) -> Vec<UserProfile> {
        let mut matched: Vec<UserProfile> = self
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        matched.sort_by_key(|u| u.id);
        matched
    }
}
