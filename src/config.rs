//! Settings: the immutable snapshot the engine reads.
//!
//! The host owns the mutable copy and threads a `Settings` value into every
//! call. Loaded from TOML; every field has a default.
//!
//! ```toml
//! difficulty = 4
//! time_limit_secs = 30
//! network_complexity = 0.6
//! enabled_modes = ["equality", "spatial3d"]
//!
//! [progression]
//! scope = "per_mode"
//! window = 40
//! target_accuracy = 95.0
//!
//! [progression.per_mode.spatial3d]
//! window = 20
//!
//! [stimuli]
//! kinds = ["word", "emoji"]
//! word_length = 3
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algebra::reflexive_identity;
use crate::model::{Mode, Relation, StimulusKind};
use crate::progress::{ProgressionConfig, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, TIME_LIMIT_RESET_SECS};
use crate::{Error, Result};

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of premises per trial, 1 to
    /// [`MAX_DIFFICULTY`](crate::progress::MAX_DIFFICULTY).
    pub difficulty: u32,
    pub time_limit_secs: u32,
    /// Probability in [0, 1] of linking a still-ambiguous pair while
    /// building premises.
    pub network_complexity: f64,
    /// Modes a trial may be drawn from. Empty means equality.
    pub enabled_modes: BTreeSet<Mode>,
    pub progression: ProgressionConfig,
    pub stimuli: StimulusConfig,
}

/// How the default stimulus factory mints stimuli.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// Kinds to draw from uniformly. Empty means words.
    pub kinds: BTreeSet<StimulusKind>,
    /// Letters per `Word` stimulus.
    pub word_length: usize,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self { kinds: [StimulusKind::Word].into(), word_length: 3 }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            time_limit_secs: TIME_LIMIT_RESET_SECS,
            network_complexity: 0.5,
            enabled_modes: [Mode::Equality].into(),
            progression: ProgressionConfig::default(),
            stimuli: StimulusConfig::default(),
        }
    }
}

impl Settings {
    /// Settings with only the given modes enabled.
    pub fn with_modes(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        self.enabled_modes = modes.into_iter().collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_network_complexity(mut self, complexity: f64) -> Self {
        self.network_complexity = complexity;
        self
    }

    /// Enabled modes, falling back to equality when none are enabled.
    pub fn active_modes(&self) -> Vec<Mode> {
        if self.enabled_modes.is_empty() {
            vec![Mode::Equality]
        } else {
            self.enabled_modes.iter().copied().collect()
        }
    }

    /// What a stimulus is to itself under these settings.
    pub fn reflexive_relation(&self) -> Option<Relation> {
        reflexive_identity(&self.enabled_modes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty == 0 {
            return Err(Error::InvalidSettings("difficulty must be at least 1".into()));
        }
        if self.difficulty > MAX_DIFFICULTY {
            return Err(Error::InvalidSettings(format!(
                "difficulty must be at most {MAX_DIFFICULTY}, got {}",
                self.difficulty
            )));
        }
        if self.time_limit_secs == 0 {
            return Err(Error::InvalidSettings("time_limit_secs must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.network_complexity) {
            return Err(Error::InvalidSettings(format!(
                "network_complexity must be in [0, 1], got {}",
                self.network_complexity
            )));
        }
        let mut targets = vec![self.progression.targets];
        targets.extend(self.progression.per_mode.values().copied());
        for t in targets {
            if t.window == 0 {
                return Err(Error::InvalidSettings("progression window must be at least 1".into()));
            }
            if !(0.0..=100.0).contains(&t.target_accuracy) {
                return Err(Error::InvalidSettings(format!(
                    "target_accuracy must be a percentage, got {}",
                    t.target_accuracy
                )));
            }
        }
        if self.stimuli.word_length == 0 {
            return Err(Error::InvalidSettings("word_length must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: None,
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::ConfigParse {
            path: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressScope;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, 3);
        assert_eq!(s.time_limit_secs, 30);
        assert_eq!(s.network_complexity, 0.5);
        assert_eq!(s.active_modes(), vec![Mode::Equality]);
        assert_eq!(s.progression.scope, ProgressScope::Universal);
        assert_eq!(s.progression.targets.window, 40);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_empty_modes_fall_back_to_equality() {
        let s = Settings::default().with_modes([]);
        assert_eq!(s.active_modes(), vec![Mode::Equality]);
        assert_eq!(s.reflexive_relation(), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = Settings::from_toml_str(
            r#"
            difficulty = 5
            enabled_modes = ["temporal", "spatial3d"]

            [progression]
            scope = "per_mode"
            target_accuracy = 80.0

            [progression.per_mode.spatial3d]
            window = 10
            "#,
        )
        .unwrap();
        assert_eq!(s.difficulty, 5);
        assert_eq!(s.time_limit_secs, 30);
        assert_eq!(s.active_modes(), vec![Mode::Temporal, Mode::Spatial3d]);
        assert_eq!(s.progression.scope, ProgressScope::PerMode);
        assert_eq!(s.progression.targets.window, 40);
        assert_eq!(s.progression.targets.target_accuracy, 80.0);
        assert_eq!(s.progression.targets_for(Mode::Spatial3d).window, 10);
        assert_eq!(s.progression.targets_for(Mode::Temporal).window, 40);
        assert_eq!(s.reflexive_relation(), Some(Relation::AT));
    }

    #[test]
    fn test_rejects_out_of_range_complexity() {
        let err = Settings::from_toml_str("network_complexity = 1.5").unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_difficulty_ceiling() {
        assert!(Settings::default().with_difficulty(MAX_DIFFICULTY).validate().is_ok());
        let err = Settings::default().with_difficulty(MAX_DIFFICULTY + 1).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(ref m) if m.contains("at most")));
        let err = Settings::from_toml_str("difficulty = 5000").unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = Settings::from_toml_str(r#"enabled_modes = ["telepathy"]"#).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let s = Settings::default()
            .with_modes([Mode::Containment, Mode::Spatial2d])
            .with_difficulty(7);
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
    }
}
