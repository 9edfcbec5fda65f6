//! Moves: a top turn and a bottom turn, each followed by a slice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::slot::{SLOTS_PER_HALF, SLOTS_PER_ROW, SLOT_SIZE};

/// Move histories stay on the stack for the depths the solver searches.
pub type MoveList = SmallVec<[Move; 16]>;

const TURN_MASK: u16 = (1 << SLOT_SIZE) - 1;
const ROW_SLOTS: i32 = SLOTS_PER_ROW as i32;
const HALF_SLOTS: i32 = SLOTS_PER_HALF as i32;

/// Wraps a turn amount into `[0, 18)`.
pub fn wrap_positive(turns: i32) -> i32 {
    turns.rem_euclid(ROW_SLOTS)
}

/// Wraps a turn amount into `[-8, 9]` for display.
pub fn wrap_negative(turns: i32) -> i32 {
    (wrap_positive(turns) + HALF_SLOTS - 1) % ROW_SLOTS - (HALF_SLOTS - 1)
}

/// One step of a solution: turn both rows, then slice.
///
/// Amounts are stored wrapped into `[0, 18)` so equal rotations compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "(i32, i32)", from = "(i32, i32)")]
pub struct Move {
    top: u8,
    bottom: u8,
}

impl Move {
    /// The "no rotation" placeholder. Applied, it is a bare slice.
    pub const SLICE: Move = Move { top: 0, bottom: 0 };

    pub fn new(top: i32, bottom: i32) -> Self {
        Self {
            top: wrap_positive(top) as u8,
            bottom: wrap_positive(bottom) as u8,
        }
    }

    pub fn top(self) -> i32 {
        i32::from(self.top)
    }

    pub fn bottom(self) -> i32 {
        i32::from(self.bottom)
    }

    /// True for the placeholder that turns neither row.
    pub fn is_slice_only(self) -> bool {
        self == Self::SLICE
    }

    /// The move that turns both rows back.
    pub fn inverse(self) -> Self {
        Self::new(-self.top(), -self.bottom())
    }

    /// Packs the move as `top << 6 | bottom`.
    pub fn encode(self) -> u16 {
        u16::from(self.top) << SLOT_SIZE | u16::from(self.bottom)
    }

    /// Unpacks a code produced by [`Move::encode`].
    pub fn decode(code: u16) -> Self {
        Self::new(
            i32::from((code >> SLOT_SIZE) & TURN_MASK),
            i32::from(code & TURN_MASK),
        )
    }

    /// Amounts re-expressed around zero, as printed.
    pub fn centered(self) -> (i32, i32) {
        (wrap_negative(self.top()), wrap_negative(self.bottom()))
    }
}

impl From<(i32, i32)> for Move {
    fn from((top, bottom): (i32, i32)) -> Self {
        Self::new(top, bottom)
    }
}

impl From<Move> for (i32, i32) {
    fn from(mv: Move) -> Self {
        mv.centered()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (top, bottom) = self.centered();
        write!(f, "{top} {bottom}")
    }
}

/// Error parsing a move or a move sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("move {0:?} must be two integers, e.g. \"3 -3\"")]
    Shape(String),

    #[error("invalid turn amount {0:?}")]
    Amount(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses `"top bottom"` or `"top,bottom"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let (Some(top), Some(bottom), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseMoveError::Shape(s.trim().to_string()));
        };
        let amount = |p: &str| {
            p.parse::<i32>()
                .map_err(|_| ParseMoveError::Amount(p.to_string()))
        };
        Ok(Self::new(amount(top)?, amount(bottom)?))
    }
}

/// Parses a `/`-separated sequence such as `"3 0 / -3 -3 / 0 3"`.
///
/// Blank steps (a trailing `/`) are skipped.
pub fn parse_sequence(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split('/')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::parse::<Move>)
        .collect()
}
