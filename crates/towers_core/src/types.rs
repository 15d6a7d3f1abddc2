//! Core domain identifiers for the puzzle.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of pegs on the board. The solver relies on there being exactly three.
pub const PEG_COUNT: usize = 3;

/// One of the three pegs.
///
/// Pegs are laid out left to right along the X axis and carry the indices
/// `0`, `1` and `2`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum PegId {
    /// Peg 0, where every disc starts.
    #[display("0")]
    Left,
    /// Peg 1.
    #[display("1")]
    Center,
    /// Peg 2, the default solve target.
    #[display("2")]
    Right,
}

impl PegId {
    /// All pegs in index order.
    pub const ALL: [PegId; PEG_COUNT] = [PegId::Left, PegId::Center, PegId::Right];

    /// Converts to the peg index (0-2).
    pub fn index(self) -> usize {
        match self {
            PegId::Left => 0,
            PegId::Center => 1,
            PegId::Right => 2,
        }
    }

    /// Creates a peg from its index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PegId::Left),
            1 => Some(PegId::Center),
            2 => Some(PegId::Right),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PegId::Left => "Left",
            PegId::Center => "Center",
            PegId::Right => "Right",
        }
    }

    /// The peg that is neither `a` nor `b`.
    ///
    /// Returns `None` when `a == b`, since two pegs are then left over.
    pub fn spare(a: PegId, b: PegId) -> Option<PegId> {
        if a == b {
            return None;
        }
        let mut rest = Self::ALL.into_iter().filter(|p| *p != a && *p != b);
        let spare = rest.next();
        debug_assert!(rest.next().is_none(), "exactly one spare peg");
        spare
    }
}

/// Identity of a disc. Disc `0` is the smallest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("disc {}", _0)]
pub struct DiscId(pub usize);

impl DiscId {
    /// Index into per-disc tables.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single step of the puzzle: lift the top disc of `from` onto `to`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_new::new,
)]
#[display("{from} -> {to}")]
pub struct Move {
    /// Source peg.
    pub from: PegId,
    /// Destination peg.
    pub to: PegId,
}

impl Move {
    /// Returns the move as a pair of peg indices.
    pub fn indices(&self) -> (usize, usize) {
        (self.from.index(), self.to.index())
    }
}

/// Travel direction of a flying disc, used to orient the rolling visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollDirection {
    /// Travelling toward lower peg indices.
    Backward,
    /// Not travelling.
    #[default]
    Stationary,
    /// Travelling toward higher peg indices.
    Forward,
}

impl RollDirection {
    /// Direction from the sign of `to - from`.
    pub fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => RollDirection::Forward,
            std::cmp::Ordering::Less => RollDirection::Backward,
            std::cmp::Ordering::Equal => RollDirection::Stationary,
        }
    }

    /// Sign as `-1`, `0` or `+1`.
    pub fn sign(self) -> i8 {
        match self {
            RollDirection::Backward => -1,
            RollDirection::Stationary => 0,
            RollDirection::Forward => 1,
        }
    }
}
