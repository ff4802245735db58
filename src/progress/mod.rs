//! # Adaptive Progression
//!
//! A monotonic ratchet over `(difficulty, time limit)`. Once the last
//! `window` outcomes reach `target_accuracy` percent, the time limit is
//! tightened by 5 s; reaching the 10 s floor instead raises difficulty by
//! one, resets the limit to 30 s and clears the window. There is no
//! decrease path. Difficulty stops at [`MAX_DIFFICULTY`], where the time
//! limit stays at the floor.
//!
//! Tracked either once for the whole session (`Universal`), once per mode
//! (`PerMode`), or not at all (`Off`).

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::model::Mode;

pub const DEFAULT_WINDOW: usize = 40;
pub const DEFAULT_TARGET_ACCURACY: f64 = 95.0;
pub const DEFAULT_DIFFICULTY: u32 = 3;
/// Largest premise count a trial may ask for.
pub const MAX_DIFFICULTY: u32 = 100;
pub const TIME_LIMIT_RESET_SECS: u32 = 30;
pub const TIME_LIMIT_FLOOR_SECS: u32 = 10;
pub const TIME_LIMIT_STEP_SECS: u32 = 5;

// ============================================================================
// Scope & targets
// ============================================================================

/// Which outcomes feed which progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressScope {
    #[default]
    Universal,
    PerMode,
    Off,
}

/// The trigger condition: `target_accuracy` percent over `window` outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressTargets {
    pub window: usize,
    pub target_accuracy: f64,
}

impl Default for ProgressTargets {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, target_accuracy: DEFAULT_TARGET_ACCURACY }
    }
}

/// Progression section of the settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub scope: ProgressScope,
    #[serde(flatten)]
    pub targets: ProgressTargets,
    /// Overrides of `targets` for individual modes (`PerMode` scope only).
    pub per_mode: BTreeMap<Mode, ProgressTargets>,
}

impl ProgressionConfig {
    pub fn targets_for(&self, mode: Mode) -> ProgressTargets {
        self.per_mode.get(&mode).copied().unwrap_or(self.targets)
    }
}

/// What a single outcome changed, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advance {
    TimeTightened { time_limit_secs: u32 },
    DifficultyRaised { difficulty: u32 },
}

// ============================================================================
// ProgressState
// ============================================================================

/// Rolling window of outcomes plus the values it controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub targets: ProgressTargets,
    /// Most recent last; never longer than `targets.window`.
    pub recent: VecDeque<bool>,
    pub difficulty: u32,
    pub time_limit_secs: u32,
}

impl ProgressState {
    pub fn new(targets: ProgressTargets, difficulty: u32, time_limit_secs: u32) -> Self {
        Self {
            targets,
            recent: VecDeque::with_capacity(targets.window),
            difficulty,
            time_limit_secs,
        }
    }

    /// Percent correct over the window, once the window is full.
    pub fn accuracy(&self) -> Option<f64> {
        let window = self.targets.window;
        if window == 0 || self.recent.len() < window {
            return None;
        }
        let correct = self.recent.iter().filter(|&&c| c).count();
        Some(correct as f64 / window as f64 * 100.0)
    }

    /// Record one outcome and apply the ratchet.
    pub fn apply_outcome(mut self, correct: bool) -> (Self, Option<Advance>) {
        self.recent.push_back(correct);
        while self.recent.len() > self.targets.window {
            self.recent.pop_front();
        }

        let Some(accuracy) = self.accuracy() else {
            return (self, None);
        };
        if accuracy < self.targets.target_accuracy {
            return (self, None);
        }

        let before = self.time_limit_secs;
        if self.time_limit_secs > TIME_LIMIT_FLOOR_SECS {
            self.time_limit_secs = self
                .time_limit_secs
                .saturating_sub(TIME_LIMIT_STEP_SECS)
                .max(TIME_LIMIT_FLOOR_SECS);
            if self.time_limit_secs != TIME_LIMIT_FLOOR_SECS {
                let advance = Advance::TimeTightened { time_limit_secs: self.time_limit_secs };
                return (self, Some(advance));
            }
        }

        if self.difficulty >= MAX_DIFFICULTY {
            let advance = (self.time_limit_secs != before)
                .then_some(Advance::TimeTightened { time_limit_secs: self.time_limit_secs });
            return (self, advance);
        }

        self.difficulty += 1;
        self.time_limit_secs = TIME_LIMIT_RESET_SECS;
        self.recent.clear();
        let advance = Advance::DifficultyRaised { difficulty: self.difficulty };
        (self, Some(advance))
    }
}

// ============================================================================
// Progression
// ============================================================================

/// Progression state for a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "state", rename_all = "snake_case")]
pub enum Progression {
    Universal(ProgressState),
    PerMode(BTreeMap<Mode, ProgressState>),
    Off,
}

impl Progression {
    /// Fresh progression for the configured scope. Per-mode states start
    /// from the session's difficulty and time limit.
    pub fn new(config: &ProgressionConfig, difficulty: u32, time_limit_secs: u32) -> Self {
        match config.scope {
            ProgressScope::Universal => Progression::Universal(ProgressState::new(
                config.targets,
                difficulty,
                time_limit_secs,
            )),
            ProgressScope::PerMode => Progression::PerMode(
                Mode::ALL
                    .into_iter()
                    .map(|m| {
                        let state = ProgressState::new(config.targets_for(m), difficulty, time_limit_secs);
                        (m, state)
                    })
                    .collect(),
            ),
            ProgressScope::Off => Progression::Off,
        }
    }

    pub fn scope(&self) -> ProgressScope {
        match self {
            Progression::Universal(_) => ProgressScope::Universal,
            Progression::PerMode(_) => ProgressScope::PerMode,
            Progression::Off => ProgressScope::Off,
        }
    }

    /// The state an outcome in `mode` would feed.
    pub fn state_for(&self, mode: Mode) -> Option<&ProgressState> {
        match self {
            Progression::Universal(state) => Some(state),
            Progression::PerMode(states) => states.get(&mode),
            Progression::Off => None,
        }
    }

    /// Feed one answered trial's outcome. Pure: returns the next progression.
    pub fn apply_outcome(self, correct: bool, mode: Mode) -> (Self, Option<Advance>) {
        match self {
            Progression::Universal(state) => {
                let (state, advance) = state.apply_outcome(correct);
                (Progression::Universal(state), advance)
            }
            Progression::PerMode(mut states) => {
                let advance = match states.remove(&mode) {
                    Some(state) => {
                        let (state, advance) = state.apply_outcome(correct);
                        states.insert(mode, state);
                        advance
                    }
                    None => None,
                };
                (Progression::PerMode(states), advance)
            }
            Progression::Off => (Progression::Off, None),
        }
    }
}
