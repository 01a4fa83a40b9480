//! Edit capability resolution.
//!
//! The controller never decides permissions itself. It is handed an
//! `EditCapability` and refuses to issue mutating requests when the
//! capability is not granted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's role within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl ProjectRole {
    /// Resolve the edit capability for servers in this project.
    pub fn edit_capability(self) -> EditCapability {
        match self {
            Self::Owner | Self::Admin | Self::Member => EditCapability::granted(),
            Self::Viewer => EditCapability::denied("Viewers cannot modify servers in this project"),
        }
    }
}

impl FromStr for ProjectRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" | "developer" => Ok(Self::Member),
            "viewer" | "readonly" => Ok(Self::Viewer),
            other => Err(format!("unknown project role: {other}")),
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        };
        f.write_str(name)
    }
}

/// Whether mutating actions may be issued, and why not if they may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCapability {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EditCapability {
    pub const fn granted() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    /// The reason to show when the capability is not granted.
    pub fn denial_reason(&self) -> Option<&str> {
        if self.allowed {
            return None;
        }
        Some(
            self.reason
                .as_deref()
                .unwrap_or("You do not have permission to modify this server"),
        )
    }
}
