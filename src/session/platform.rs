//! Platform selector options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend platform the conversation is routed to.
///
/// Variant order is selector order; the first one is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    #[serde(rename = "Service Public")]
    ServicePublic,
    #[serde(rename = "Voyage")]
    Voyage,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::ServicePublic, Platform::Voyage];

    /// Label shown in the selector and sent to the backend
    pub fn label(self) -> &'static str {
        match self {
            Platform::ServicePublic => "Service Public",
            Platform::Voyage => "Voyage",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.label()).collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == s.trim())
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
