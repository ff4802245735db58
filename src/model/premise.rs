//! Premise: a trained, directed statement `source RELATION target`.

use serde::{Deserialize, Serialize};

use super::{Relation, Stimulus};

/// "`source` is `relation` to `target`".
///
/// Premises are immutable once created. Walking one from `target` to
/// `source` uses the inverse relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Premise {
    pub source: Stimulus,
    pub relation: Relation,
    pub target: Stimulus,
}

impl Premise {
    pub fn new(source: Stimulus, relation: Relation, target: Stimulus) -> Self {
        Self { source, relation, target }
    }

    /// True if this premise joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &Stimulus, b: &Stimulus) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }
}

impl std::fmt::Display for Premise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.source, self.relation, self.target)
    }
}
