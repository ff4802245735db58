//! # Premise Graph & Path Derivation
//!
//! A trial's premises viewed as an undirected multigraph over stimuli.
//! Each premise is one edge, walkable both ways; walking it against its
//! stored direction substitutes the inverse relation.
//!
//! Ground truth between two stimuli is the reconciliation of every simple
//! path between them, each folded through the algebra:
//!
//! ```text
//! no path                         → None        (nothing connects them)
//! every path ambiguous            → Ambiguous   (inconclusive)
//! conclusive paths disagree       → Ambiguous   (contradiction)
//! conclusive paths agree on r     → Known(r)
//! ```
//!
//! A partial path whose fold is already `Ambiguous` can only end
//! inconclusive, so `derive` stops extending it. It also stops at the first
//! disagreement. Only conclusive prefixes are ever walked.
//!
//! Callers own the premise slice and must not mutate it while a graph view
//! borrows it.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::algebra::compose;
use crate::model::{Derivation, DerivationPath, PathStep, Premise, Relation, Stimulus};

// ============================================================================
// PremiseGraph
// ============================================================================

/// Borrowed adjacency view over a premise list.
pub struct PremiseGraph<'p> {
    premises: &'p [Premise],
    /// stimulus → indices of premises touching it, in premise order
    adjacency: HashMap<&'p Stimulus, Vec<usize>>,
}

impl<'p> PremiseGraph<'p> {
    pub fn new(premises: &'p [Premise]) -> Self {
        let mut adjacency: HashMap<&'p Stimulus, Vec<usize>> = HashMap::new();
        for (idx, premise) in premises.iter().enumerate() {
            adjacency.entry(&premise.source).or_default().push(idx);
            if premise.source != premise.target {
                adjacency.entry(&premise.target).or_default().push(idx);
            }
        }
        Self { premises, adjacency }
    }

    /// Number of distinct stimuli mentioned by any premise.
    pub fn stimulus_count(&self) -> usize {
        self.adjacency.len()
    }

    /// True if some premise states a relation between `a` and `b` directly.
    pub fn has_premise_between(&self, a: &Stimulus, b: &Stimulus) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|ids| ids.iter().any(|&i| self.premises[i].connects(a, b)))
    }

    /// Every premise touching `from` as `(relation, far end, reversed)`,
    /// oriented to leave `from`.
    fn edges_from<'a>(&'a self, from: &'a Stimulus) -> impl Iterator<Item = (Relation, &'p Stimulus, bool)> + 'a {
        self.adjacency
            .get(from)
            .into_iter()
            .flatten()
            .filter_map(move |&i| {
                let premise = &self.premises[i];
                if premise.source == *from {
                    Some((premise.relation, &premise.target, false))
                } else if premise.target == *from {
                    Some((premise.relation.inverse(), &premise.source, true))
                } else {
                    None
                }
            })
    }

    /// Every premise touching `from`, oriented to leave `from`.
    pub fn steps_from<'a>(&'a self, from: &'a Stimulus) -> impl Iterator<Item = PathStep> + 'a {
        self.edges_from(from).map(move |(relation, to, reversed)| PathStep {
            from: from.clone(),
            relation,
            to: to.clone(),
            reversed,
        })
    }

    /// True if some chain of premises joins `start` and `end`.
    pub fn is_connected(&self, start: &Stimulus, end: &Stimulus) -> bool {
        if start == end {
            return true;
        }
        let mut seen: HashSet<&Stimulus> = HashSet::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(at) = queue.pop_front() {
            for (_, to, _) in self.edges_from(at) {
                if to == end {
                    return true;
                }
                if seen.insert(to) {
                    queue.push_back(to);
                }
            }
        }
        false
    }

    /// All simple paths from `start` to `end` (no stimulus repeated).
    ///
    /// Exhaustive depth-first enumeration in premise order. Returns nothing
    /// when `start == end`.
    pub fn find_all_paths(&self, start: &Stimulus, end: &Stimulus) -> Vec<DerivationPath> {
        self.find_paths(start, end, usize::MAX)
    }

    /// The first `limit` simple paths from `start` to `end`, in the order
    /// [`find_all_paths`](Self::find_all_paths) yields them.
    pub fn find_paths(&self, start: &Stimulus, end: &Stimulus, limit: usize) -> Vec<DerivationPath> {
        if start == end {
            return Vec::new();
        }
        self.walk(&DerivationPath::single(start.clone()), end, limit)
    }

    fn walk(&self, trail: &DerivationPath, end: &Stimulus, limit: usize) -> Vec<DerivationPath> {
        if limit == 0 {
            return Vec::new();
        }
        if trail.end() == end && !trail.is_empty() {
            return vec![trail.clone()];
        }
        let mut found = Vec::new();
        for step in self.steps_from(trail.end()) {
            if found.len() >= limit {
                break;
            }
            if trail.visits(&step.to) {
                continue;
            }
            found.extend(self.walk(&trail.extended(step), end, limit - found.len()));
        }
        found
    }

    /// Ground-truth relation from `start` to `end`.
    ///
    /// `reflexive` is what a stimulus is to itself (see
    /// [`crate::algebra::reflexive_identity`]). `None` means no path
    /// connects the two stimuli.
    ///
    /// Agrees with [`reconcile`] over the folds of
    /// [`find_all_paths`](Self::find_all_paths), without enumerating the
    /// paths that cannot be conclusive.
    pub fn derive(
        &self,
        start: &Stimulus,
        end: &Stimulus,
        reflexive: Option<Relation>,
    ) -> Option<Derivation> {
        if start == end {
            return reflexive.map(Derivation::Known);
        }
        if !self.is_connected(start, end) {
            return None;
        }
        let derived = match self.conclusive(&[start], None, end) {
            Verdict::Agreed(r) => Derivation::Known(r),
            Verdict::Nothing | Verdict::Conflict => Derivation::Ambiguous,
        };
        tracing::trace!(%start, %end, %derived, "derived relation");
        Some(derived)
    }

    /// Verdict over every simple path to `end` that continues `trail` and
    /// stays conclusive. `acc` is the fold of `trail` so far.
    fn conclusive(&self, trail: &[&Stimulus], acc: Option<Relation>, end: &Stimulus) -> Verdict {
        let Some(&here) = trail.last() else {
            return Verdict::Nothing;
        };
        let mut verdict = Verdict::Nothing;
        for (relation, to, _) in self.edges_from(here) {
            if trail.iter().any(|&seen| seen == to) {
                continue;
            }
            let folded = match acc {
                None => relation,
                Some(r) => match compose(r, relation) {
                    Derivation::Known(folded) => folded,
                    Derivation::Ambiguous => continue,
                },
            };
            let found = if to == end {
                Verdict::Agreed(folded)
            } else {
                let mut next: Vec<&Stimulus> = trail.to_vec();
                next.push(to);
                self.conclusive(&next, Some(folded), end)
            };
            verdict = verdict.merge(found);
            if verdict == Verdict::Conflict {
                break;
            }
        }
        verdict
    }
}

/// Running agreement over conclusive path results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Nothing,
    Agreed(Relation),
    Conflict,
}

impl Verdict {
    fn merge(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Conflict, _) | (_, Verdict::Conflict) => Verdict::Conflict,
            (Verdict::Nothing, v) | (v, Verdict::Nothing) => v,
            (Verdict::Agreed(a), Verdict::Agreed(b)) if a == b => Verdict::Agreed(a),
            (Verdict::Agreed(_), Verdict::Agreed(_)) => Verdict::Conflict,
        }
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Reconcile per-path results into one verdict.
///
/// Empty paths (`None`) are dropped. The first conclusive relation wins
/// only if every other conclusive relation equals it.
pub fn reconcile<I>(derivations: I) -> Derivation
where
    I: IntoIterator<Item = Option<Derivation>>,
{
    let mut agreed: Option<Relation> = None;
    for derivation in derivations.into_iter().flatten() {
        if let Derivation::Known(r) = derivation {
            match agreed {
                None => agreed = Some(r),
                Some(first) if first != r => return Derivation::Ambiguous,
                Some(_) => {}
            }
        }
    }
    agreed.map_or(Derivation::Ambiguous, Derivation::Known)
}

/// All simple paths between two stimuli over `premises`.
pub fn find_all_paths(premises: &[Premise], start: &Stimulus, end: &Stimulus) -> Vec<DerivationPath> {
    PremiseGraph::new(premises).find_all_paths(start, end)
}

/// Ground-truth relation between two stimuli over `premises`.
pub fn derive_relation(
    premises: &[Premise],
    start: &Stimulus,
    end: &Stimulus,
    reflexive: Option<Relation>,
) -> Option<Derivation> {
    PremiseGraph::new(premises).derive(start, end, reflexive)
}

// ============================================================================
// Tests
// ============================================================================
