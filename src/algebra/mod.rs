//! # Relation Algebra
//!
//! The catalog of relations per mode and the composition rules that chain
//! two relations into the one they logically force, or into
//! [`Derivation::Ambiguous`] when nothing is forced.
//!
//! Everything here is total: "cannot be determined" is a value, not an error.
//!
//! | Mode | Identity | Transitive | Everything else |
//! |------|----------|------------|-----------------|
//! | equality | `SAME` | `OPPOSITE∘OPPOSITE = SAME` | ambiguous (`DIFFERENT` is non-transitive) |
//! | temporal | `AT` | `BEFORE`, `AFTER` | ambiguous |
//! | containment | none | `CONTAINS`, `WITHIN` | ambiguous |
//! | spatial2d | none | same direction | ambiguous |
//! | spatial3d | `AT` | per axis | vertical cancels, horizontal tie-break |

pub mod catalog;
mod spatial;

pub use catalog::reflexive_identity;

use crate::model::{Containment, Derivation, Equality, Relation, Temporal};

/// Compose two relations: if `A r1 B` and `B r2 C`, what is `A ? C`?
///
/// Relations from different modes never compose.
pub fn compose(r1: Relation, r2: Relation) -> Derivation {
    match (r1, r2) {
        (Relation::Equality(a), Relation::Equality(b)) => compose_equality(a, b),
        (Relation::Temporal(a), Relation::Temporal(b)) => compose_temporal(a, b),
        (Relation::Containment(a), Relation::Containment(b)) => compose_containment(a, b),
        (Relation::Spatial2d(a), Relation::Spatial2d(b)) => spatial::compose_compass(a, b),
        (Relation::Spatial3d(a), Relation::Spatial3d(b)) => spatial::compose_position(a, b),
        _ => Derivation::Ambiguous,
    }
}

/// Compose a derivation-so-far with the next relation. `Ambiguous` absorbs.
pub fn compose_derivation(acc: Derivation, next: Relation) -> Derivation {
    match acc {
        Derivation::Known(r) => compose(r, next),
        Derivation::Ambiguous => Derivation::Ambiguous,
    }
}

/// Fold a chain of relations left to right.
///
/// Returns `None` for an empty chain and stops at the first `Ambiguous`.
pub fn derive_from_path<I>(relations: I) -> Option<Derivation>
where
    I: IntoIterator<Item = Relation>,
{
    let mut iter = relations.into_iter();
    let mut acc = Derivation::Known(iter.next()?);
    for rel in iter {
        acc = compose_derivation(acc, rel);
        if acc.is_ambiguous() {
            break;
        }
    }
    Some(acc)
}

fn compose_equality(a: Equality, b: Equality) -> Derivation {
    match (a, b) {
        (Equality::Same, x) | (x, Equality::Same) => Derivation::Known(Relation::Equality(x)),
        (Equality::Opposite, Equality::Opposite) => Derivation::Known(Relation::SAME),
        // DIFFERENT says nothing about *how* different.
        _ => Derivation::Ambiguous,
    }
}

fn compose_temporal(a: Temporal, b: Temporal) -> Derivation {
    match (a, b) {
        (Temporal::At, x) | (x, Temporal::At) => Derivation::Known(Relation::Temporal(x)),
        (x, y) if x == y => Derivation::Known(Relation::Temporal(x)),
        _ => Derivation::Ambiguous,
    }
}

fn compose_containment(a: Containment, b: Containment) -> Derivation {
    if a == b {
        Derivation::Known(Relation::Containment(a))
    } else {
        Derivation::Ambiguous
    }
}
