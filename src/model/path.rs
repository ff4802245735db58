//! DerivationPath: a chain of premises walked from one stimulus to another.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Relation, Stimulus};

/// One premise as walked: `from relation to`, already oriented in the
/// direction of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: Stimulus,
    pub relation: Relation,
    pub to: Stimulus,
    /// The premise was stored `to -> from`; `relation` is its inverse.
    pub reversed: bool,
}

/// A simple path: start -[rel]-> s1 -[rel]-> s2 ... -> end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationPath {
    start: Stimulus,
    steps: SmallVec<[PathStep; 4]>,
}

impl DerivationPath {
    pub fn single(start: Stimulus) -> Self {
        Self { start, steps: SmallVec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> &Stimulus {
        &self.start
    }

    pub fn end(&self) -> &Stimulus {
        self.steps.last().map_or(&self.start, |s| &s.to)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Oriented relations along the path, in order.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.steps.iter().map(|s| s.relation)
    }

    /// True if the path already passes through `stimulus`.
    pub fn visits(&self, stimulus: &Stimulus) -> bool {
        self.start == *stimulus || self.steps.iter().any(|s| s.to == *stimulus)
    }

    /// A new path extended by one step. The receiver is left untouched.
    pub fn extended(&self, step: PathStep) -> Self {
        let mut next = self.clone();
        next.steps.push(step);
        next
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)?;
        for step in &self.steps {
            write!(f, " -[{}]-> {}", step.relation, step.to)?;
        }
        Ok(())
    }
}
