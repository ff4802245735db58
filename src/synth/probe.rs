//! Probe selection: which relation to ask about and what the right answer is.

use rand::Rng;

use crate::model::{Answer, Derivation, Equality, Relation};

/// How an equality-mode derivation judges a probe relation.
///
/// `OPPOSITE` entails `DIFFERENT`; `DIFFERENT` leaves `OPPOSITE` open and
/// does not carry over to a re-asked `DIFFERENT`. Anything else that is not
/// the derived relation is false.
pub fn equality_entailment(derived: Equality, probe: Equality) -> Answer {
    match (derived, probe) {
        (Equality::Opposite, Equality::Different) => Answer::Yes,
        (Equality::Different, Equality::Opposite) => Answer::Ambiguous,
        (Equality::Different, Equality::Different) => Answer::Ambiguous,
        (Equality::Different, Equality::Same) => Answer::No,
        (d, p) if d == p => Answer::Yes,
        _ => Answer::No,
    }
}

/// Pick the probe relation from `pool` and the answer it is scored against.
///
/// - Unresolved (`None` or `Ambiguous`): any relation, answer "can't tell".
/// - Resolved, coin lands heads: ask the derived relation, answer yes.
/// - Resolved, tails: ask another relation from the pool, answer no
///   (equality modes go through [`equality_entailment`]).
pub fn choose_probe<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[Relation],
    derived: Option<Derivation>,
) -> (Relation, Answer) {
    let Some(Derivation::Known(derived)) = derived else {
        return (pool[rng.gen_range(0..pool.len())], Answer::Ambiguous);
    };

    if rng.gen_bool(0.5) {
        return (derived, Answer::Yes);
    }

    let others: Vec<Relation> = pool.iter().copied().filter(|r| *r != derived).collect();
    if others.is_empty() {
        return (derived, Answer::Yes);
    }
    let probe = others[rng.gen_range(0..others.len())];

    let answer = match (derived, probe) {
        (Relation::Equality(d), Relation::Equality(p)) => equality_entailment(d, p),
        _ => Answer::No,
    };
    (probe, answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_entailment_table() {
        use Equality::*;
        assert_eq!(equality_entailment(Opposite, Different), Answer::Yes);
        assert_eq!(equality_entailment(Different, Same), Answer::No);
        assert_eq!(equality_entailment(Same, Different), Answer::No);
        assert_eq!(equality_entailment(Different, Opposite), Answer::Ambiguous);
        assert_eq!(equality_entailment(Different, Different), Answer::Ambiguous);
        assert_eq!(equality_entailment(Same, Opposite), Answer::No);
        assert_eq!(equality_entailment(Opposite, Same), Answer::No);
        assert_eq!(equality_entailment(Same, Same), Answer::Yes);
        assert_eq!(equality_entailment(Opposite, Opposite), Answer::Yes);
    }

    #[test]
    fn test_unresolved_is_always_cant_tell() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = Mode::Temporal.relations();
        for derived in [None, Some(Derivation::Ambiguous)] {
            for _ in 0..20 {
                let (probe, answer) = choose_probe(&mut rng, &pool, derived);
                assert!(pool.contains(&probe));
                assert_eq!(answer, Answer::Ambiguous);
            }
        }
    }

    #[test]
    fn test_resolved_non_equality() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = Mode::Containment.relations();
        let mut seen_yes = false;
        let mut seen_no = false;
        for _ in 0..64 {
            let (probe, answer) = choose_probe(&mut rng, &pool, Some(Relation::CONTAINS.into()));
            match answer {
                Answer::Yes => {
                    assert_eq!(probe, Relation::CONTAINS);
                    seen_yes = true;
                }
                Answer::No => {
                    assert_eq!(probe, Relation::WITHIN);
                    seen_no = true;
                }
                Answer::Ambiguous => panic!("resolved pair judged ambiguous"),
            }
        }
        assert!(seen_yes && seen_no);
    }

    #[test]
    fn test_resolved_equality_uses_table() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = Mode::Equality.relations();
        for _ in 0..64 {
            let (probe, answer) = choose_probe(&mut rng, &pool, Some(Relation::OPPOSITE.into()));
            let expected = if probe == Relation::OPPOSITE || probe == Relation::DIFFERENT {
                Answer::Yes
            } else {
                Answer::No
            };
            assert_eq!(answer, expected, "probe {probe}");
        }
    }
}
