//! Composition rules for the two spatial modes.

use crate::model::{Compass, Derivation, Position, Relation, Vertical};

/// `spatial2d`: a direction chained with itself is transitive; every other
/// pairing (opposites included) says nothing about the endpoints.
pub(super) fn compose_compass(a: Compass, b: Compass) -> Derivation {
    if a == b {
        Derivation::Known(Relation::Spatial2d(a))
    } else {
        Derivation::Ambiguous
    }
}

/// `spatial3d`: vertical and horizontal components compose independently
/// and never yield `Ambiguous`.
pub(super) fn compose_position(a: Position, b: Position) -> Derivation {
    let vertical = compose_vertical(a.vertical, b.vertical);
    let horizontal = compose_horizontal(a.horizontal, b.horizontal);
    Derivation::Known(Relation::position(vertical, horizontal))
}

/// Signed one-dimensional axis: `AT` is identity, equal signs reinforce,
/// opposite signs cancel.
fn compose_vertical(a: Vertical, b: Vertical) -> Vertical {
    match (a, b) {
        (Vertical::At, v) | (v, Vertical::At) => v,
        (x, y) if x == y => x,
        _ => Vertical::At,
    }
}

/// `None` (AT) is identity, equal directions reinforce, opposites cancel.
///
/// Two distinct non-opposite directions resolve to the second operand.
/// This is a fixed tie-break, not a sound derivation.
fn compose_horizontal(a: Option<Compass>, b: Option<Compass>) -> Option<Compass> {
    match (a, b) {
        (None, h) | (h, None) => h,
        (Some(x), Some(y)) if x == y => Some(x),
        (Some(x), Some(y)) if x.opposite() == y => None,
        (Some(_), Some(y)) => Some(y),
    }
}
