//! # Trial Synthesizer
//!
//! Builds one random trial for a settings snapshot:
//!
//! 1. pick a mode from the enabled set and use its relations as the pool
//! 2. grow `difficulty` premises, steering toward still-ambiguous pairs with
//!    probability `network_complexity`
//! 3. draw two distinct probe stimuli and derive the ground truth
//! 4. pick the probe relation and the answer it is scored against
//!
//! Randomness and stimulus minting are injected so hosts and tests can make
//! a run deterministic.

pub mod probe;
pub mod stimuli;

pub use probe::{choose_probe, equality_entailment};
pub use stimuli::{StimulusFactory, StimulusSource};

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::Settings;
use crate::graph::PremiseGraph;
use crate::model::{Derivation, Premise, Question, Stimulus, Trial};
use crate::Result;

/// Smallest stimulus pool a trial aims for.
const MIN_STIMULI: usize = 3;

/// Re-mints allowed before a colliding identifier gets a suffix.
const MINT_RETRIES: usize = 32;

/// Paths kept on a trial for explanations. Dense networks have far more.
pub const MAX_EXPLAINED_PATHS: usize = 256;

/// Synthesize one trial.
///
/// Fails only when `settings` does not validate.
pub fn generate_trial<R, S>(settings: &Settings, rng: &mut R, source: &mut S) -> Result<Trial>
where
    R: Rng + ?Sized,
    S: StimulusSource + ?Sized,
{
    settings.validate()?;

    let modes = settings.active_modes();
    let mode = modes[rng.gen_range(0..modes.len())];
    let pool = mode.relations();

    let difficulty = settings.difficulty as usize;
    let target_stimuli = MIN_STIMULI.max(difficulty + 1);

    let mut stimuli = vec![mint_unique(source, &[])];
    let mut premises: Vec<Premise> = Vec::with_capacity(difficulty);

    for _ in 0..difficulty {
        let (a, b) = choose_pair(
            rng,
            source,
            &premises,
            &mut stimuli,
            target_stimuli,
            settings.network_complexity,
        );
        let relation = pool[rng.gen_range(0..pool.len())];
        let premise = Premise::new(stimuli[a].clone(), relation, stimuli[b].clone());
        trace!(%premise, "added premise");
        premises.push(premise);
    }

    let n = stimuli.len();
    let start = rng.gen_range(0..n);
    let mut end = rng.gen_range(0..n);
    if end == start {
        end = (end + 1) % n;
    }
    let subject = stimuli[start].clone();
    let object = stimuli[end].clone();

    let (derived, mut paths) = {
        let graph = PremiseGraph::new(&premises);
        let derived = graph.derive(&subject, &object, settings.reflexive_relation());
        (derived, graph.find_paths(&subject, &object, MAX_EXPLAINED_PATHS + 1))
    };
    let paths_truncated = paths.len() > MAX_EXPLAINED_PATHS;
    paths.truncate(MAX_EXPLAINED_PATHS);
    let (relation, correct_answer) = choose_probe(rng, &pool, derived);

    let derived = derived.unwrap_or(Derivation::Ambiguous);
    debug!(
        %mode,
        premises = premises.len(),
        stimuli = stimuli.len(),
        paths = paths.len(),
        paths_truncated,
        %derived,
        answer = %correct_answer,
        "synthesized trial"
    );

    Ok(Trial {
        mode,
        premises,
        question: Question { subject, relation, object },
        correct_answer,
        derived,
        paths,
        paths_truncated,
        stimuli,
    })
}

/// Pick the next pair to connect, as indices into `stimuli`. May mint a new
/// stimulus. Never returns a pair that already has a premise.
fn choose_pair<R, S>(
    rng: &mut R,
    source: &mut S,
    premises: &[Premise],
    stimuli: &mut Vec<Stimulus>,
    target_stimuli: usize,
    complexity: f64,
) -> (usize, usize)
where
    R: Rng + ?Sized,
    S: StimulusSource + ?Sized,
{
    let graph = PremiseGraph::new(premises);
    let mut open = Vec::new();
    let mut ambiguous = Vec::new();
    for i in 0..stimuli.len() {
        for j in (i + 1)..stimuli.len() {
            let (a, b) = (&stimuli[i], &stimuli[j]);
            if graph.has_premise_between(a, b) {
                continue;
            }
            open.push((i, j));
            if graph.derive(a, b, None) == Some(Derivation::Ambiguous) {
                ambiguous.push((i, j));
            }
        }
    }

    if !ambiguous.is_empty() && rng.gen_bool(complexity) {
        trace!(candidates = ambiguous.len(), "linking ambiguous pair");
        return ambiguous[rng.gen_range(0..ambiguous.len())];
    }
    if stimuli.len() < target_stimuli || open.is_empty() {
        let anchor = rng.gen_range(0..stimuli.len());
        let fresh = mint_unique(source, stimuli);
        stimuli.push(fresh);
        return (anchor, stimuli.len() - 1);
    }
    open[rng.gen_range(0..open.len())]
}

/// Mint a stimulus not already in `taken`.
fn mint_unique<S>(source: &mut S, taken: &[Stimulus]) -> Stimulus
where
    S: StimulusSource + ?Sized,
{
    let mut candidate = source.mint();
    for _ in 0..MINT_RETRIES {
        if !taken.contains(&candidate) {
            return candidate;
        }
        candidate = source.mint();
    }
    if !taken.contains(&candidate) {
        return candidate;
    }

    warn!(stimulus = %candidate, retries = MINT_RETRIES, "stimulus source keeps colliding, suffixing");
    let base = candidate.payload.clone();
    let mut n = taken.len();
    loop {
        candidate.payload = format!("{base}{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, Mode};
    use crate::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counter() -> impl FnMut() -> Stimulus {
        let mut n = 0;
        move || {
            n += 1;
            Stimulus::word(format!("S{n}"))
        }
    }

    fn assert_no_duplicate_pairs(trial: &Trial) {
        for (i, p) in trial.premises.iter().enumerate() {
            for q in &trial.premises[i + 1..] {
                assert!(!p.connects(&q.source, &q.target), "duplicate pair {p} / {q}");
            }
        }
    }

    #[test]
    fn test_premise_count_matches_difficulty() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut source = counter();
        for difficulty in 1..=8 {
            let settings = Settings::default().with_difficulty(difficulty);
            let trial = generate_trial(&settings, &mut rng, &mut source).unwrap();
            assert_eq!(trial.premise_count(), difficulty as usize);
            assert!(trial.stimuli.len() >= 2);
            assert_no_duplicate_pairs(&trial);
        }
    }

    #[test]
    fn test_zero_complexity_builds_a_tree_first() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = Settings::default().with_difficulty(4).with_network_complexity(0.0);
        let trial = generate_trial(&settings, &mut rng, &mut counter()).unwrap();
        // max(3, 4 + 1) stimuli, each after the first minted with one premise
        assert_eq!(trial.stimuli.len(), 5);
    }

    #[test]
    fn test_probe_uses_distinct_stimuli_from_trial() {
        let mut rng = StdRng::seed_from_u64(23);
        let settings = Settings::default().with_modes(Mode::ALL);
        for _ in 0..50 {
            let trial = generate_trial(&settings, &mut rng, &mut counter()).unwrap();
            let q = &trial.question;
            assert_ne!(q.subject, q.object);
            assert!(trial.stimuli.contains(&q.subject));
            assert!(trial.stimuli.contains(&q.object));
            assert_eq!(q.relation.mode(), trial.mode);
            for premise in &trial.premises {
                assert_eq!(premise.relation.mode(), trial.mode);
            }
        }
    }

    #[test]
    fn test_ambiguous_derivation_answers_cant_tell() {
        let mut rng = StdRng::seed_from_u64(99);
        let settings = Settings::default().with_modes([Mode::Spatial2d]).with_difficulty(5);
        for _ in 0..30 {
            let trial = generate_trial(&settings, &mut rng, &mut counter()).unwrap();
            if trial.derived.is_ambiguous() {
                assert_eq!(trial.correct_answer, Answer::Ambiguous);
            }
        }
    }

    #[test]
    fn test_same_seed_same_trial() {
        let settings = Settings::default().with_modes([Mode::Temporal, Mode::Containment]);
        let a = generate_trial(&settings, &mut StdRng::seed_from_u64(3), &mut counter()).unwrap();
        let b = generate_trial(&settings, &mut StdRng::seed_from_u64(3), &mut counter()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_colliding_source_still_yields_unique_stimuli() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut stuck = || Stimulus::word("AAA");
        let settings = Settings::default().with_difficulty(4);
        let trial = generate_trial(&settings, &mut rng, &mut stuck).unwrap();
        let mut sorted = trial.stimuli.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), trial.stimuli.len());
        assert_no_duplicate_pairs(&trial);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = Settings::default().with_difficulty(0);
        let err = generate_trial(&settings, &mut rng, &mut counter()).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
    }
}
