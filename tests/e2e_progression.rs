//! End-to-end tests for a training session driven through `Trainer`:
//! answering, timeouts, adaptive progression and reset.

use frame_trainer::progress::{ProgressTargets, ProgressionConfig};
use frame_trainer::{
    Advance, Answer, Error, Mode, ProgressScope, Score, Settings, Stimulus, Trainer,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Helpers
// ============================================================================

fn quick_progression(scope: ProgressScope) -> ProgressionConfig {
    ProgressionConfig {
        scope,
        targets: ProgressTargets { window: 1, target_accuracy: 100.0 },
        per_mode: Default::default(),
    }
}

fn trainer(settings: Settings) -> Trainer<impl FnMut() -> Stimulus, StdRng> {
    let mut n = 0u32;
    let source = move || {
        n += 1;
        Stimulus::word(format!("S{n}"))
    };
    Trainer::with_parts(settings, source, StdRng::seed_from_u64(42)).unwrap()
}

/// Answer the next trial correctly; returns the advance, if any.
fn answer_right<S, R>(t: &mut Trainer<S, R>) -> Option<Advance>
where
    S: frame_trainer::StimulusSource,
    R: rand::Rng,
{
    let key = t.next_trial().unwrap().correct_answer;
    let outcome = t.answer(key, 1.0).unwrap();
    assert!(outcome.correct);
    assert_eq!(outcome.expected, key);
    outcome.advance
}

fn wrong(key: Answer) -> Answer {
    match key {
        Answer::Yes => Answer::No,
        Answer::No | Answer::Ambiguous => Answer::Yes,
    }
}

// ============================================================================
// 1. Universal progression
// ============================================================================

#[test]
fn test_universal_ratchet_updates_settings() {
    let mut settings = Settings::default();
    settings.progression = quick_progression(ProgressScope::Universal);
    let mut t = trainer(settings);

    let advances: Vec<_> = (0..4).filter_map(|_| answer_right(&mut t)).collect();
    assert_eq!(
        advances,
        vec![
            Advance::TimeTightened { time_limit_secs: 25 },
            Advance::TimeTightened { time_limit_secs: 20 },
            Advance::TimeTightened { time_limit_secs: 15 },
            Advance::DifficultyRaised { difficulty: 4 },
        ],
    );
    assert_eq!(t.settings().difficulty, 4);
    assert_eq!(t.settings().time_limit_secs, 30);

    let next = t.next_trial().unwrap();
    assert_eq!(next.premise_count(), 4);
}

#[test]
fn test_wrong_answers_do_not_advance() {
    let mut settings = Settings::default();
    settings.progression = quick_progression(ProgressScope::Universal);
    let mut t = trainer(settings);

    for _ in 0..5 {
        let key = t.next_trial().unwrap().correct_answer;
        let outcome = t.answer(wrong(key), 2.0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.advance, None);
    }
    assert_eq!(t.score(), Score { correct: 0, incorrect: 5, missed: 0 });
    assert_eq!(t.settings().time_limit_secs, 30);
}

#[test]
fn test_timeouts_are_missed_and_not_fed() {
    let mut settings = Settings::default();
    settings.progression = quick_progression(ProgressScope::Universal);
    let mut t = trainer(settings);

    t.next_trial().unwrap();
    t.timeout(30.0).unwrap();
    assert_eq!(t.score().missed, 1);
    assert!(t.progress_for(Mode::Equality).unwrap().recent.is_empty());

    let entry = &t.session().history[0];
    assert_eq!(entry.answer, None);
    assert!(!entry.correct);
    assert_eq!(entry.time_used_secs, 30.0);
}

#[test]
fn test_answer_without_trial_is_an_error() {
    let mut t = trainer(Settings::default());
    assert!(matches!(t.answer(Answer::Yes, 1.0), Err(Error::NoActiveTrial)));
    assert!(matches!(t.timeout(1.0), Err(Error::NoActiveTrial)));

    t.next_trial().unwrap();
    t.answer(Answer::Ambiguous, 1.0).unwrap();
    assert!(matches!(t.answer(Answer::Ambiguous, 1.0), Err(Error::NoActiveTrial)));
}

// ============================================================================
// 2. Per-mode progression
// ============================================================================

#[test]
fn test_per_mode_progression_tracks_modes_separately() {
    let mut settings = Settings::default().with_modes([Mode::Temporal]);
    settings.progression = quick_progression(ProgressScope::PerMode);
    let mut t = trainer(settings);

    for _ in 0..4 {
        answer_right(&mut t);
    }
    let temporal = t.progress_for(Mode::Temporal).unwrap();
    assert_eq!((temporal.difficulty, temporal.time_limit_secs), (4, 30));
    let equality = t.progress_for(Mode::Equality).unwrap();
    assert_eq!((equality.difficulty, equality.time_limit_secs), (3, 30));

    // the session-wide values stay put; the mode's own difficulty applies
    assert_eq!(t.settings().difficulty, 3);
    let trial = t.next_trial().unwrap();
    assert_eq!(trial.mode, Mode::Temporal);
    assert_eq!(trial.premise_count(), 4);
}

#[test]
fn test_per_mode_time_limit_follows_current_trial() {
    let mut settings = Settings::default().with_modes([Mode::Containment]);
    settings.progression = quick_progression(ProgressScope::PerMode);
    let mut t = trainer(settings);

    answer_right(&mut t);
    t.next_trial().unwrap();
    assert_eq!(t.time_limit_secs(), 25);
}

#[test]
fn test_progression_off() {
    let mut settings = Settings::default();
    settings.progression = quick_progression(ProgressScope::Off);
    let mut t = trainer(settings);
    for _ in 0..6 {
        assert_eq!(answer_right(&mut t), None);
    }
    assert!(t.progress_for(Mode::Equality).is_none());
    assert_eq!(t.settings().difficulty, 3);
}

// ============================================================================
// 3. Settings changes & reset
// ============================================================================

#[test]
fn test_reset_clears_everything() {
    let mut settings = Settings::default();
    settings.progression = quick_progression(ProgressScope::Universal);
    let mut t = trainer(settings);
    answer_right(&mut t);
    t.next_trial().unwrap();

    t.reset();
    assert_eq!(t.score(), Score::default());
    assert!(t.session().history.is_empty());
    assert!(t.session().stats.is_empty());
    assert!(t.current_trial().is_none());
    assert!(t.progress_for(Mode::Equality).unwrap().recent.is_empty());
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut t = trainer(Settings::default());
    let bad = Settings::default().with_network_complexity(-0.1);
    assert!(matches!(t.set_settings(bad), Err(Error::InvalidSettings(_))));
    assert_eq!(t.settings(), &Settings::default());
}

#[test]
fn test_changing_scope_restarts_progression() {
    let mut t = trainer(Settings::default());
    let mut settings = Settings::default();
    settings.progression.scope = ProgressScope::PerMode;
    t.set_settings(settings).unwrap();
    assert_eq!(t.progression().scope(), ProgressScope::PerMode);
}
