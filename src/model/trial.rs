//! Trial: one round: premises, a probe question and its correct answer.

use serde::{Deserialize, Serialize};

use super::{Derivation, DerivationPath, Mode, Premise, Relation, Stimulus};

/// The learner's verdict on a probe (and the key a trial is scored against).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    /// Cannot be determined from the premises.
    Ambiguous,
}

impl Answer {
    /// Label shown on the answer button.
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
            Answer::Ambiguous => "CAN'T TELL",
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The probe: "is `subject` `relation` to `object`?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub subject: Stimulus,
    pub relation: Relation,
    pub object: Stimulus,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Is {} {} {}?", self.subject, self.relation, self.object)
    }
}

/// A synthesized trial. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// Mode every premise and the probe are drawn from.
    pub mode: Mode,
    pub premises: Vec<Premise>,
    pub question: Question,
    pub correct_answer: Answer,
    /// Ground truth for the probe pair (`Ambiguous` when unconnected).
    pub derived: Derivation,
    /// Simple paths between the probe stimuli, for explanations. At most
    /// [`MAX_EXPLAINED_PATHS`](crate::synth::MAX_EXPLAINED_PATHS).
    pub paths: Vec<DerivationPath>,
    /// More paths exist than `paths` holds.
    #[serde(default)]
    pub paths_truncated: bool,
    pub stimuli: Vec<Stimulus>,
}

impl Trial {
    pub fn premise_count(&self) -> usize {
        self.premises.len()
    }

    /// Score a learner answer against the key.
    pub fn is_correct(&self, answer: Answer) -> bool {
        answer == self.correct_answer
    }
}
