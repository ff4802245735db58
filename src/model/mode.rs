//! Mode: a closed family of mutually composable relations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Relation domain. Every relation belongs to exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Equality,
    Temporal,
    Spatial2d,
    Containment,
    Spatial3d,
}

impl Mode {
    /// All modes, in catalog order.
    pub const ALL: [Mode; 5] = [
        Mode::Equality,
        Mode::Temporal,
        Mode::Spatial2d,
        Mode::Containment,
        Mode::Spatial3d,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Equality => "equality",
            Mode::Temporal => "temporal",
            Mode::Spatial2d => "spatial2d",
            Mode::Containment => "containment",
            Mode::Spatial3d => "spatial3d",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownMode(s.to_string()))
    }
}
