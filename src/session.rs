//! Session record: score, answer history and the per-trial stats series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Answer, Trial};

/// Running tally of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
    /// Trials that ran out of time.
    pub missed: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect + self.missed
    }
}

/// One finished trial as the learner saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub trial: Trial,
    /// `None` when the trial timed out.
    pub answer: Option<Answer>,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
    pub time_used_secs: f64,
    pub premise_count: usize,
}

/// Lightweight stats point, kept separately so charts don't need the trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub timestamp: DateTime<Utc>,
    pub time_used_secs: f64,
    pub premise_count: usize,
    pub correct: bool,
}

/// Aggregates over a stats series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub trials: usize,
    /// Percent correct.
    pub accuracy: f64,
    pub mean_time_secs: f64,
    pub mean_premises: f64,
}

/// Everything recorded about one learner's session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: Score,
    pub history: Vec<HistoryEntry>,
    pub stats: Vec<StatsEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `answer` against `trial` and record it. Returns whether it was correct.
    pub fn record_answer(&mut self, trial: &Trial, answer: Answer, time_used_secs: f64) -> bool {
        let correct = trial.is_correct(answer);
        if correct {
            self.score.correct += 1;
        } else {
            self.score.incorrect += 1;
        }
        self.push(trial, Some(answer), correct, time_used_secs);
        correct
    }

    /// Record a trial the learner let run out.
    pub fn record_timeout(&mut self, trial: &Trial, time_used_secs: f64) {
        self.score.missed += 1;
        self.push(trial, None, false, time_used_secs);
    }

    fn push(&mut self, trial: &Trial, answer: Option<Answer>, correct: bool, time_used_secs: f64) {
        let timestamp = Utc::now();
        let premise_count = trial.premise_count();
        self.history.push(HistoryEntry {
            trial: trial.clone(),
            answer,
            correct,
            timestamp,
            time_used_secs,
            premise_count,
        });
        self.stats.push(StatsEntry { timestamp, time_used_secs, premise_count, correct });
    }

    /// Summary over the last `last` stats points (all of them if `None`).
    pub fn summary(&self, last: Option<usize>) -> Option<StatsSummary> {
        let skip = last.map_or(0, |n| self.stats.len().saturating_sub(n));
        let window = &self.stats[skip..];
        if window.is_empty() {
            return None;
        }
        let n = window.len() as f64;
        let correct = window.iter().filter(|s| s.correct).count() as f64;
        Some(StatsSummary {
            trials: window.len(),
            accuracy: correct / n * 100.0,
            mean_time_secs: window.iter().map(|s| s.time_used_secs).sum::<f64>() / n,
            mean_premises: window.iter().map(|s| s.premise_count as f64).sum::<f64>() / n,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Derivation, Mode, Premise, Question, Relation, Stimulus};

    fn trial() -> Trial {
        let (a, b) = (Stimulus::word("A"), Stimulus::word("B"));
        Trial {
            mode: Mode::Equality,
            premises: vec![Premise::new(a.clone(), Relation::SAME, b.clone())],
            question: Question { subject: a.clone(), relation: Relation::SAME, object: b.clone() },
            correct_answer: Answer::Yes,
            derived: Derivation::Known(Relation::SAME),
            paths: Vec::new(),
            paths_truncated: false,
            stimuli: vec![a, b],
        }
    }

    #[test]
    fn test_record_answers_and_timeouts() {
        let t = trial();
        let mut session = Session::new();
        assert!(session.record_answer(&t, Answer::Yes, 2.5));
        assert!(!session.record_answer(&t, Answer::Ambiguous, 4.0));
        session.record_timeout(&t, 30.0);

        assert_eq!(session.score, Score { correct: 1, incorrect: 1, missed: 1 });
        assert_eq!(session.score.total(), 3);
        assert_eq!(session.history.len(), 3);
        assert_eq!(session.history[2].answer, None);
        assert!(!session.stats[2].correct);
        assert_eq!(session.stats[0].premise_count, 1);
    }

    #[test]
    fn test_summary() {
        let t = trial();
        let mut session = Session::new();
        assert_eq!(session.summary(None), None);
        session.record_answer(&t, Answer::No, 1.0);
        session.record_answer(&t, Answer::Yes, 3.0);
        session.record_answer(&t, Answer::Yes, 5.0);

        let all = session.summary(None).unwrap();
        assert_eq!(all.trials, 3);
        assert!((all.accuracy - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(all.mean_time_secs, 3.0);
        assert_eq!(all.mean_premises, 1.0);

        let last_two = session.summary(Some(2)).unwrap();
        assert_eq!(last_two.accuracy, 100.0);
        assert_eq!(last_two.mean_time_secs, 4.0);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.record_timeout(&trial(), 1.0);
        session.clear();
        assert_eq!(session, Session::default());
    }
}
