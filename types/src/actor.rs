//! Actors and the fixed set of roles they may hold.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an authenticated party (e.g. `investigator1`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The role an actor holds for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Investigator,
    Analyst,
    Prosecutor,
    Judge,
    Admin,
}

impl Role {
    /// Every valid role, in table order.
    pub const ALL: [Role; 5] = [
        Role::Investigator,
        Role::Analyst,
        Role::Prosecutor,
        Role::Judge,
        Role::Admin,
    ];

    /// The lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investigator => "investigator",
            Self::Analyst => "analyst",
            Self::Prosecutor => "prosecutor",
            Self::Judge => "judge",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TypesError::UnknownRole(s.to_string()))
    }
}

/// An authenticated, session-scoped party.
///
/// The role is fixed when the session is created and cannot be changed
/// afterwards; a different role means a new session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    id: ActorId,
    role: Role,
    display_name: String,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            display_name: display_name.into(),
        }
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
