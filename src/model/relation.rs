//! Relation: a typed, mode-tagged relationship between two stimuli.
//!
//! Each mode has its own closed enum; `Relation` wraps exactly one of them,
//! so the mode of a relation is a structural property of the value.

use serde::{Deserialize, Serialize};

use super::Mode;
use crate::{Error, Result};

/// Relations of the `equality` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Equality {
    Same,
    Opposite,
    Different,
}

/// Relations of the `temporal` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Temporal {
    Before,
    After,
    At,
}

/// Horizontal compass direction (the `spatial2d` mode, and the horizontal
/// component of `spatial3d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compass {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

/// Relations of the `containment` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Containment {
    Contains,
    Within,
}

/// Vertical component of a `spatial3d` relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vertical {
    At,
    Above,
    Below,
}

/// A `spatial3d` relation: vertical part plus an optional horizontal part.
/// `horizontal: None` is the neutral (`AT`) horizontal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub vertical: Vertical,
    pub horizontal: Option<Compass>,
}

impl Position {
    pub const AT: Position = Position { vertical: Vertical::At, horizontal: None };

    pub fn new(vertical: Vertical, horizontal: Option<Compass>) -> Self {
        Self { vertical, horizontal }
    }
}

/// A relation drawn from exactly one [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "relation", rename_all = "lowercase")]
pub enum Relation {
    Equality(Equality),
    Temporal(Temporal),
    Spatial2d(Compass),
    Containment(Containment),
    Spatial3d(Position),
}

/// Outcome of composing relations: a single forced relation, or nothing
/// can be concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "relation", rename_all = "snake_case")]
pub enum Derivation {
    Known(Relation),
    Ambiguous,
}

impl Derivation {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Derivation::Ambiguous)
    }
}

impl From<Relation> for Derivation {
    fn from(r: Relation) -> Self {
        Derivation::Known(r)
    }
}

impl std::fmt::Display for Derivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Derivation::Known(r) => std::fmt::Display::fmt(r, f),
            Derivation::Ambiguous => f.write_str("AMBIGUOUS"),
        }
    }
}

// ============================================================================
// Shorthand constructors
// ============================================================================

impl Relation {
    pub const SAME: Relation = Relation::Equality(Equality::Same);
    pub const OPPOSITE: Relation = Relation::Equality(Equality::Opposite);
    pub const DIFFERENT: Relation = Relation::Equality(Equality::Different);
    pub const BEFORE: Relation = Relation::Temporal(Temporal::Before);
    pub const AFTER: Relation = Relation::Temporal(Temporal::After);
    pub const AT: Relation = Relation::Temporal(Temporal::At);
    pub const CONTAINS: Relation = Relation::Containment(Containment::Contains);
    pub const WITHIN: Relation = Relation::Containment(Containment::Within);

    /// A `spatial3d` relation from its two components.
    pub fn position(vertical: Vertical, horizontal: Option<Compass>) -> Self {
        Relation::Spatial3d(Position::new(vertical, horizontal))
    }

    /// Parse a serialized relation name within the given mode.
    ///
    /// The mode is required: `AT` and the bare compass names are legal in
    /// more than one mode.
    pub fn parse(mode: Mode, token: &str) -> Result<Self> {
        let t = token.trim().to_ascii_uppercase();
        let unknown = || Error::UnknownRelation { mode, token: token.to_string() };
        match mode {
            Mode::Equality => Equality::parse(&t).map(Relation::Equality).ok_or_else(unknown),
            Mode::Temporal => Temporal::parse(&t).map(Relation::Temporal).ok_or_else(unknown),
            Mode::Spatial2d => Compass::parse(&t).map(Relation::Spatial2d).ok_or_else(unknown),
            Mode::Containment => Containment::parse(&t).map(Relation::Containment).ok_or_else(unknown),
            Mode::Spatial3d => Position::parse(&t).map(Relation::Spatial3d).ok_or_else(unknown),
        }
    }
}

// ============================================================================
// Names
// ============================================================================

impl Equality {
    pub fn name(&self) -> &'static str {
        match self {
            Equality::Same => "SAME",
            Equality::Opposite => "OPPOSITE",
            Equality::Different => "DIFFERENT",
        }
    }

    fn parse(t: &str) -> Option<Self> {
        [Equality::Same, Equality::Opposite, Equality::Different]
            .into_iter()
            .find(|r| r.name() == t)
    }
}

impl Temporal {
    pub fn name(&self) -> &'static str {
        match self {
            Temporal::Before => "BEFORE",
            Temporal::After => "AFTER",
            Temporal::At => "AT",
        }
    }

    fn parse(t: &str) -> Option<Self> {
        [Temporal::Before, Temporal::After, Temporal::At]
            .into_iter()
            .find(|r| r.name() == t)
    }
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::North,
        Compass::South,
        Compass::East,
        Compass::West,
        Compass::Northeast,
        Compass::Northwest,
        Compass::Southeast,
        Compass::Southwest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Compass::North => "NORTH",
            Compass::South => "SOUTH",
            Compass::East => "EAST",
            Compass::West => "WEST",
            Compass::Northeast => "NORTHEAST",
            Compass::Northwest => "NORTHWEST",
            Compass::Southeast => "SOUTHEAST",
            Compass::Southwest => "SOUTHWEST",
        }
    }

    fn parse(t: &str) -> Option<Self> {
        Compass::ALL.into_iter().find(|r| r.name() == t)
    }
}

impl Containment {
    pub fn name(&self) -> &'static str {
        match self {
            Containment::Contains => "CONTAINS",
            Containment::Within => "WITHIN",
        }
    }

    fn parse(t: &str) -> Option<Self> {
        [Containment::Contains, Containment::Within]
            .into_iter()
            .find(|r| r.name() == t)
    }
}

impl Vertical {
    pub const ALL: [Vertical; 3] = [Vertical::At, Vertical::Above, Vertical::Below];

    pub fn name(&self) -> &'static str {
        match self {
            Vertical::At => "AT",
            Vertical::Above => "ABOVE",
            Vertical::Below => "BELOW",
        }
    }

    fn parse(t: &str) -> Option<Self> {
        Vertical::ALL.into_iter().find(|r| r.name() == t)
    }
}

impl Position {
    /// `VERTICAL_HORIZONTAL`, `VERTICAL`, `HORIZONTAL`, or `AT`.
    fn parse(t: &str) -> Option<Self> {
        if let Some((v, h)) = t.split_once('_') {
            let vertical = Vertical::parse(v).filter(|v| *v != Vertical::At)?;
            return Some(Position::new(vertical, Some(Compass::parse(h)?)));
        }
        if let Some(vertical) = Vertical::parse(t) {
            return Some(Position::new(vertical, None));
        }
        Compass::parse(t).map(|h| Position::new(Vertical::At, Some(h)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.vertical, self.horizontal) {
            (Vertical::At, None) => f.write_str("AT"),
            (Vertical::At, Some(h)) => f.write_str(h.name()),
            (v, None) => f.write_str(v.name()),
            (v, Some(h)) => write!(f, "{}_{}", v.name(), h.name()),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Equality(r) => f.write_str(r.name()),
            Relation::Temporal(r) => f.write_str(r.name()),
            Relation::Spatial2d(r) => f.write_str(r.name()),
            Relation::Containment(r) => f.write_str(r.name()),
            Relation::Spatial3d(p) => std::fmt::Display::fmt(p, f),
        }
    }
}
