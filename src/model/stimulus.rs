//! Stimulus: an opaque item a premise talks about.

use serde::{Deserialize, Serialize};

/// How the host should present a stimulus. The engine never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusKind {
    /// Nonsense letter string, e.g. `"QXB"`.
    Word,
    Emoji,
    /// Tag for a procedurally generated picture, e.g. `"voronoi:48213"`.
    GeneratedImage,
    /// Tag for a vibration pattern, e.g. `"100.300.200"`.
    Vibration,
}

/// A stimulus. Identity is the whole value: kind and payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Stimulus {
    pub kind: StimulusKind,
    pub payload: String,
}

impl Stimulus {
    pub fn new(kind: StimulusKind, payload: impl Into<String>) -> Self {
        Self { kind, payload: payload.into() }
    }

    /// Shorthand for a `Word` stimulus.
    pub fn word(payload: impl Into<String>) -> Self {
        Self::new(StimulusKind::Word, payload)
    }
}

impl std::fmt::Display for Stimulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.payload)
    }
}
