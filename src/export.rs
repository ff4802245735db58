//! Progress export: persist a learner's session as one JSON document.
//!
//! ```text
//! Trainer → ProgressSnapshot → export_progress() → JSON
//!   → file / key-value store / wherever the host keeps it
//! JSON → import_progress() → Trainer::restore()
//! ```
//!
//! The document is self-contained: score, full answer history, the stats
//! series, the settings snapshot and the progression state.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::progress::Progression;
use crate::session::{HistoryEntry, Score, Session, StatsEntry};
use crate::{Error, Result};

/// Format version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub version: u32,
    pub score: Score,
    pub history: Vec<HistoryEntry>,
    pub stats_history: Vec<StatsEntry>,
    pub settings: Settings,
    pub progression: Progression,
    pub updated_at: DateTime<Utc>,
}

impl ProgressSnapshot {
    pub fn new(session: &Session, settings: &Settings, progression: &Progression) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            score: session.score,
            history: session.history.clone(),
            stats_history: session.stats.clone(),
            settings: settings.clone(),
            progression: progression.clone(),
            updated_at: Utc::now(),
        }
    }

    /// Split back into the session record, settings and progression.
    pub fn into_parts(self) -> (Session, Settings, Progression) {
        let session = Session { score: self.score, history: self.history, stats: self.stats_history };
        (session, self.settings, self.progression)
    }
}

/// Write a snapshot as pretty-printed JSON.
pub fn export_progress(snapshot: &ProgressSnapshot, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writeln!(writer)?;
    Ok(())
}

/// Read a snapshot back, rejecting unknown versions and invalid settings.
pub fn import_progress(reader: &mut dyn Read) -> Result<ProgressSnapshot> {
    let snapshot: ProgressSnapshot = serde_json::from_reader(reader)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(Error::UnsupportedSnapshot { found: snapshot.version, expected: SNAPSHOT_VERSION });
    }
    snapshot.settings.validate()?;
    Ok(snapshot)
}
