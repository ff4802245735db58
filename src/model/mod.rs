//! # Relational Frame Model
//!
//! Clean DTOs for stimuli, relations, premises and trials.
//! These types cross every boundary: algebra ↔ graph ↔ synthesizer ↔ host.
//!
//! Design rule: this module is pure data with no I/O and no randomness.

pub mod mode;
pub mod relation;
pub mod stimulus;
pub mod premise;
pub mod path;
pub mod trial;

pub use mode::Mode;
pub use relation::{
    Relation, Derivation, Equality, Temporal, Compass, Containment, Vertical, Position,
};
pub use stimulus::{Stimulus, StimulusKind};
pub use premise::Premise;
pub use path::{DerivationPath, PathStep};
pub use trial::{Trial, Question, Answer};
