//! # frame-trainer: Adaptive Relational Frame Trainer
//!
//! Synthesizes relational reasoning puzzles ("A is SAME as B, B is OPPOSITE
//! to C, is A OPPOSITE to C?"), derives their ground truth over the premise
//! graph, and adapts difficulty to the learner.
//!
//! ## Design Principles
//!
//! 1. **Typed relations**: a relation's mode is part of its type, never sniffed from a string
//! 2. **Ambiguity is a value**: the algebra and graph never fail, they return `Ambiguous` or `None`
//! 3. **Settings are a snapshot**: every entry point takes an explicit `Settings`
//! 4. **Injected randomness**: RNG and stimulus minting are parameters, so runs are reproducible
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_trainer::{Answer, Mode, Settings, Trainer};
//!
//! # fn example() -> frame_trainer::Result<()> {
//! let settings = Settings::default().with_modes([Mode::Equality, Mode::Temporal]);
//! let mut trainer = Trainer::new(settings)?;
//!
//! let trial = trainer.next_trial()?;
//! for premise in &trial.premises {
//!     println!("{premise}");
//! }
//! println!("{}", trial.question);
//!
//! let outcome = trainer.answer(Answer::Yes, 4.2)?;
//! println!("correct: {}", outcome.correct);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modes
//!
//! | Mode | Relations |
//! |------|-----------|
//! | `equality` | SAME, OPPOSITE, DIFFERENT |
//! | `temporal` | BEFORE, AFTER, AT |
//! | `spatial2d` | 8 compass directions |
//! | `containment` | CONTAINS, WITHIN |
//! | `spatial3d` | (AT / ABOVE / BELOW) × (none / compass direction) |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod algebra;
pub mod graph;
pub mod synth;
pub mod progress;
pub mod config;
pub mod session;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Answer, Derivation, DerivationPath, Mode, PathStep, Premise, Question,
    Relation, Stimulus, StimulusKind, Trial,
};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use algebra::{compose, derive_from_path, reflexive_identity};
pub use graph::{derive_relation, find_all_paths, PremiseGraph};
pub use synth::{generate_trial, StimulusFactory, StimulusSource};
pub use progress::{Advance, ProgressScope, ProgressState, Progression};

// ============================================================================
// Re-exports: Host surface
// ============================================================================

pub use config::Settings;
pub use session::{HistoryEntry, Score, Session, StatsEntry, StatsSummary};
pub use export::{export_progress, import_progress, ProgressSnapshot};

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Top-level Trainer handle
// ============================================================================

/// What answering a trial produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The key the answer was scored against.
    pub expected: Answer,
    pub advance: Option<Advance>,
}

/// The primary entry point. A `Trainer` owns the mutable side of a session:
/// settings, progression, the answer record and the trial in flight.
pub struct Trainer<S = StimulusFactory, R = StdRng> {
    settings: Settings,
    progression: Progression,
    session: Session,
    source: S,
    rng: R,
    current: Option<Trial>,
}

impl Trainer<StimulusFactory, StdRng> {
    /// Trainer with entropy-seeded randomness and the default stimulus factory.
    pub fn new(settings: Settings) -> Result<Self> {
        let source = StimulusFactory::new(&settings.stimuli);
        Self::with_parts(settings, source, StdRng::from_entropy())
    }

    /// Fully reproducible trainer.
    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self> {
        let source = StimulusFactory::with_rng(&settings.stimuli, StdRng::seed_from_u64(seed ^ 0x5eed));
        Self::with_parts(settings, source, StdRng::seed_from_u64(seed))
    }

    /// Trainer with settings loaded from a TOML file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Settings::load(path)?)
    }
}

impl<S: StimulusSource, R: Rng> Trainer<S, R> {
    /// Create a Trainer from its injected parts.
    pub fn with_parts(settings: Settings, source: S, rng: R) -> Result<Self> {
        settings.validate()?;
        let progression =
            Progression::new(&settings.progression, settings.difficulty, settings.time_limit_secs);
        Ok(Self { settings, progression, session: Session::new(), source, rng, current: None })
    }

    /// Synthesize the next trial and make it current. Replaces any
    /// unanswered trial without recording it.
    pub fn next_trial(&mut self) -> Result<&Trial> {
        let settings = self.trial_settings();
        let trial = generate_trial(&settings, &mut self.rng, &mut self.source)?;
        Ok(&*self.current.insert(trial))
    }

    /// Per-mode progression pins the mode first so its own difficulty applies.
    fn trial_settings(&mut self) -> Settings {
        let Progression::PerMode(states) = &self.progression else {
            return self.settings.clone();
        };
        let modes = self.settings.active_modes();
        let mode = modes[self.rng.gen_range(0..modes.len())];
        let difficulty = states.get(&mode).map_or(self.settings.difficulty, |s| s.difficulty);
        self.settings.clone().with_modes([mode]).with_difficulty(difficulty)
    }

    pub fn current_trial(&self) -> Option<&Trial> {
        self.current.as_ref()
    }

    /// Time allowed for the current trial (or the next one, if none is current).
    pub fn time_limit_secs(&self) -> u32 {
        self.current
            .as_ref()
            .and_then(|t| self.progression.state_for(t.mode))
            .map_or(self.settings.time_limit_secs, |s| s.time_limit_secs)
    }

    /// Answer the current trial.
    pub fn answer(&mut self, answer: Answer, time_used_secs: f64) -> Result<AnswerOutcome> {
        let trial = self.current.take().ok_or(Error::NoActiveTrial)?;
        let correct = self.session.record_answer(&trial, answer, time_used_secs);

        let progression = std::mem::replace(&mut self.progression, Progression::Off);
        let (progression, advance) = progression.apply_outcome(correct, trial.mode);
        self.progression = progression;

        if let Some(advance) = advance {
            tracing::info!(mode = %trial.mode, ?advance, "progression advanced");
            if let Progression::Universal(state) = &self.progression {
                self.settings.difficulty = state.difficulty;
                self.settings.time_limit_secs = state.time_limit_secs;
            }
        }

        Ok(AnswerOutcome { correct, expected: trial.correct_answer, advance })
    }

    /// The current trial ran out of time. Counted as missed; progression is not fed.
    pub fn timeout(&mut self, time_used_secs: f64) -> Result<()> {
        let trial = self.current.take().ok_or(Error::NoActiveTrial)?;
        tracing::debug!(mode = %trial.mode, time_used_secs, "trial timed out");
        self.session.record_timeout(&trial, time_used_secs);
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Progression restarts when its configuration,
    /// the difficulty or the time limit changed. The stimulus source is kept.
    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let restart = settings.progression != self.settings.progression
            || settings.difficulty != self.settings.difficulty
            || settings.time_limit_secs != self.settings.time_limit_secs;
        if restart {
            self.progression =
                Progression::new(&settings.progression, settings.difficulty, settings.time_limit_secs);
        }
        self.settings = settings;
        Ok(())
    }

    pub fn score(&self) -> Score {
        self.session.score
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Progression state an outcome in `mode` feeds (`None` when off).
    pub fn progress_for(&self, mode: Mode) -> Option<&ProgressState> {
        self.progression.state_for(mode)
    }

    /// Clear score, history, stats and progression.
    pub fn reset(&mut self) {
        self.session.clear();
        self.current = None;
        self.progression = Progression::new(
            &self.settings.progression,
            self.settings.difficulty,
            self.settings.time_limit_secs,
        );
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(&self.session, &self.settings, &self.progression)
    }

    /// Resume from a snapshot. Drops the trial in flight.
    ///
    /// A stored progression whose scope differs from the snapshot's own
    /// settings is restarted from those settings.
    pub fn restore(&mut self, snapshot: ProgressSnapshot) -> Result<()> {
        let (session, settings, mut progression) = snapshot.into_parts();
        settings.validate()?;
        if progression.scope() != settings.progression.scope {
            tracing::warn!(
                stored = ?progression.scope(),
                configured = ?settings.progression.scope,
                "snapshot progression does not match its settings, restarting it"
            );
            progression =
                Progression::new(&settings.progression, settings.difficulty, settings.time_limit_secs);
        }
        self.session = session;
        self.settings = settings;
        self.progression = progression;
        self.current = None;
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown {mode} relation: {token:?}")]
    UnknownRelation { mode: Mode, token: String },

    #[error("Unknown mode: {0:?}")]
    UnknownMode(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Config parse error ({}): {message}", .path.as_deref().unwrap_or("<string>"))]
    ConfigParse { path: Option<String>, message: String },

    #[error("No trial in progress")]
    NoActiveTrial,

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
