//! Relation catalog: which relations each mode offers, which mode a
//! relation belongs to, and each relation's inverse.

use crate::model::{Compass, Containment, Mode, Position, Relation, Temporal, Vertical};

impl Mode {
    /// The relations of this mode, in catalog order.
    ///
    /// `spatial3d` enumerates every (vertical, horizontal) pair:
    /// `AT`, the eight compass points, `ABOVE`, `ABOVE_*`, `BELOW`, `BELOW_*`.
    pub fn relations(&self) -> Vec<Relation> {
        match self {
            Mode::Equality => vec![Relation::SAME, Relation::OPPOSITE, Relation::DIFFERENT],
            Mode::Temporal => vec![Relation::BEFORE, Relation::AFTER, Relation::AT],
            Mode::Spatial2d => Compass::ALL.into_iter().map(Relation::Spatial2d).collect(),
            Mode::Containment => vec![Relation::CONTAINS, Relation::WITHIN],
            Mode::Spatial3d => Vertical::ALL
                .into_iter()
                .flat_map(|v| {
                    std::iter::once(None)
                        .chain(Compass::ALL.into_iter().map(Some))
                        .map(move |h| Relation::position(v, h))
                })
                .collect(),
        }
    }
}

impl Relation {
    /// The mode this relation belongs to.
    pub fn mode(&self) -> Mode {
        match self {
            Relation::Equality(_) => Mode::Equality,
            Relation::Temporal(_) => Mode::Temporal,
            Relation::Spatial2d(_) => Mode::Spatial2d,
            Relation::Containment(_) => Mode::Containment,
            Relation::Spatial3d(_) => Mode::Spatial3d,
        }
    }

    /// The relation read in the other direction: if `A r B` then `B r⁻¹ A`.
    pub fn inverse(&self) -> Relation {
        match *self {
            Relation::Equality(e) => Relation::Equality(e),
            Relation::Temporal(t) => Relation::Temporal(match t {
                Temporal::Before => Temporal::After,
                Temporal::After => Temporal::Before,
                Temporal::At => Temporal::At,
            }),
            Relation::Spatial2d(c) => Relation::Spatial2d(c.opposite()),
            Relation::Containment(c) => Relation::Containment(match c {
                Containment::Contains => Containment::Within,
                Containment::Within => Containment::Contains,
            }),
            Relation::Spatial3d(p) => Relation::Spatial3d(p.inverse()),
        }
    }
}

impl Compass {
    /// The geometrically opposite direction.
    pub fn opposite(&self) -> Compass {
        match self {
            Compass::North => Compass::South,
            Compass::South => Compass::North,
            Compass::East => Compass::West,
            Compass::West => Compass::East,
            Compass::Northeast => Compass::Southwest,
            Compass::Southwest => Compass::Northeast,
            Compass::Northwest => Compass::Southeast,
            Compass::Southeast => Compass::Northwest,
        }
    }
}

impl Vertical {
    pub fn opposite(&self) -> Vertical {
        match self {
            Vertical::At => Vertical::At,
            Vertical::Above => Vertical::Below,
            Vertical::Below => Vertical::Above,
        }
    }
}

impl Position {
    /// Both components inverted independently.
    pub fn inverse(&self) -> Position {
        Position::new(self.vertical.opposite(), self.horizontal.map(|h| h.opposite()))
    }
}

/// The relation every stimulus has to itself, given the enabled modes:
/// `SAME` when equality is enabled, else `AT` when temporal is, else none.
pub fn reflexive_identity<'a>(modes: impl IntoIterator<Item = &'a Mode>) -> Option<Relation> {
    let mut temporal = false;
    for mode in modes {
        match mode {
            Mode::Equality => return Some(Relation::SAME),
            Mode::Temporal => temporal = true,
            _ => {}
        }
    }
    temporal.then_some(Relation::AT)
}
