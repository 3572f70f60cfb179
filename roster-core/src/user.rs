use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, id::UserId};

/// Access role attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Regular account.
    User,
    /// Read-only account.
    Viewer,
}

impl Role {
    /// Every accepted role, in the order they are reported in error messages.
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Viewer];

    /// The wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::InvalidRole { value: s.to_owned() })
    }
}

/// A validated creation payload, ready to be stored.
///
/// Normally obtained from [`validate_new_user`](crate::validation::validate_new_user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A stored user record.
///
/// Immutable once created: the store only ever inserts or removes whole
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a stored record from a validated payload.
    #[must_use]
    pub fn new(id: UserId, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        let NewUser { name, email, role } = new_user;
        Self { id, name, email, role, created_at }
    }
}
