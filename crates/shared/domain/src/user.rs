//! User domain entity, roles and the credential projection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Granted authority
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub authority: String,
}

impl Role {
    pub fn new(id: i64, authority: impl Into<String>) -> Self {
        Self {
            id,
            authority: authority.into(),
        }
    }
}

/// User domain entity.
///
/// Owned by the identity store; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
}

/// One row of the user/role join: the same identity repeated per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetailsRow {
    pub username: String,
    pub password_hash: String,
    pub role_id: i64,
    pub authority: String,
}

/// Credentials and authorities of a single user, used for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub username: String,
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
}

impl UserDetails {
    /// Fold projection rows into one user-with-roles view.
    ///
    /// The first row supplies username and password hash; every row that
    /// shares its username contributes one role. Returns `None` for no rows.
    pub fn from_rows<I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = UserDetailsRow>,
    {
        let mut rows = rows.into_iter();
        let first = rows.next()?;

        let mut details = UserDetails {
            username: first.username,
            password_hash: first.password_hash,
            roles: BTreeSet::from([Role::new(first.role_id, first.authority)]),
        };

        for row in rows.filter(|row| row.username == details.username) {
            details.roles.insert(Role::new(row.role_id, row.authority));
        }

        Some(details)
    }

    /// Authority names, sorted
    pub fn authorities(&self) -> Vec<String> {
        let mut authorities: Vec<String> =
            self.roles.iter().map(|r| r.authority.clone()).collect();
        authorities.sort();
        authorities.dedup();
        authorities
    }
}
