//! Shared wire and storage DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! `User` doubles as the persisted session record, so its serde shape is the
//! storage format (`{ "email": ..., "roles": [...] }`) as well as the decoded
//! token identity.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portal roles, declared in ascending dashboard priority.
///
/// The derived `Ord` is what makes `ADMIN > FACULTY > STUDENT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Faculty, Role::Student];

    /// Upper-case wire name (`"ADMIN"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Faculty => "FACULTY",
            Self::Student => "STUDENT",
        }
    }

    /// Human-readable label for headers and badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Faculty => "Faculty",
            Self::Student => "Student",
        }
    }

    /// Lower-case tag used in the `?role=` dashboard query.
    pub fn dashboard_tag(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Faculty => "faculty",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; tolerates whitespace and a Spring-style `ROLE_` prefix.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "ADMIN" => Ok(Self::Admin),
            "FACULTY" => Ok(Self::Faculty),
            "STUDENT" => Ok(Self::Student),
            _ => Err(UnknownRole(raw.to_owned())),
        }
    }
}

/// The signed-in identity: token subject plus its role set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl User {
    /// Highest-priority role held, if any.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.iter().next_back().copied()
    }
}

/// `POST /auth/login` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /auth/register` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}
