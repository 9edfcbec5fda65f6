//! Bit-packed Hexagon-1 state and its primitive operations.
//!
//! A puzzle is two [`Row`]s and nothing else, so cloning is a 32-byte copy
//! and every operation is a handful of shifts and masks. Piece validity is
//! not enforced: turns and slices assume they are only fed legal moves, and
//! the predicates in [`crate::predicates`] check shape lazily.

use std::fmt;

use thiserror::Error;

use crate::moves::{wrap_positive, Move};
use crate::slot::{
    unpack_row, Row, HALF_MASK, ROW_BITS, ROW_MASK, SLOT_SIZE, SOLVED_BOTTOM, SOLVED_TOP,
    TOTAL_BITS,
};

/// Errors from applying caller-supplied moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// A corner straddles the slice axis after the turn of step `step`.
    #[error("step {step} ({mv}) leaves a corner across the slice axis")]
    SliceBlocked { step: usize, mv: Move },
}

/// A Hexagon-1 puzzle: the top and bottom rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    pub(crate) top: Row,
    pub(crate) bottom: Row,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::solved()
    }
}

/// Rotates a row clockwise by `slots` (counterclockwise when negative).
///
/// Slot `i` moves to slot `i + slots`; the trailing slots wrap around to
/// the front.
pub fn turn_row(row: Row, slots: i32) -> Row {
    let slots = wrap_positive(slots) as u32;
    if slots == 0 {
        return row;
    }
    let shift = slots * SLOT_SIZE;
    let tail = (row << (TOTAL_BITS - shift)) >> (TOTAL_BITS - ROW_BITS);
    ((row >> shift) | tail) & ROW_MASK
}

impl Puzzle {
    pub fn new(top: Row, bottom: Row) -> Self {
        Self { top, bottom }
    }

    /// The solved reference state.
    pub fn solved() -> Self {
        Self::new(SOLVED_TOP, SOLVED_BOTTOM)
    }

    pub fn top(&self) -> Row {
        self.top
    }

    pub fn bottom(&self) -> Row {
        self.bottom
    }

    /// Rotates both rows. No legality check.
    pub fn turn(&mut self, top_turns: i32, bottom_turns: i32) {
        self.top = turn_row(self.top, top_turns);
        self.bottom = turn_row(self.bottom, bottom_turns);
    }

    /// Swaps the right halves of the two rows.
    ///
    /// # Panics
    ///
    /// Panics if a corner straddles the slice axis. Slicing through it would
    /// split the corner between rows, which this model cannot represent.
    pub fn slice(&mut self) {
        assert!(
            self.can_slice(),
            "cannot slice while a corner straddles the slice axis"
        );
        self.swap_halves();
    }

    /// Slices if the axis is clear, leaving the puzzle untouched otherwise.
    pub fn try_slice(&mut self) -> bool {
        if !self.can_slice() {
            return false;
        }
        self.swap_halves();
        true
    }

    fn swap_halves(&mut self) {
        let top_half = self.top & HALF_MASK;
        let bottom_half = self.bottom & HALF_MASK;
        self.top = (self.top & !HALF_MASK) | bottom_half;
        self.bottom = (self.bottom & !HALF_MASK) | top_half;
    }

    /// Turn, then slice.
    pub fn apply(&mut self, mv: Move) {
        self.turn(mv.top(), mv.bottom());
        self.slice();
    }

    /// Turn, then slice, recording the move in `moves`.
    pub fn apply_logged<E: Extend<Move>>(&mut self, mv: Move, moves: &mut E) {
        self.apply(mv);
        moves.extend(Some(mv));
    }

    /// Applies a sequence of caller-supplied moves, stopping at the first
    /// step whose slice is blocked.
    pub fn apply_sequence<'a, I>(&mut self, moves: I) -> Result<(), PuzzleError>
    where
        I: IntoIterator<Item = &'a Move>,
    {
        for (step, &mv) in moves.into_iter().enumerate() {
            self.turn(mv.top(), mv.bottom());
            if !self.try_slice() {
                return Err(PuzzleError::SliceBlocked { step, mv });
            }
        }
        Ok(())
    }

    /// Replays a recorded history: every move is turn-then-slice, except
    /// that the last one only turns when `ends_on_slice` is false.
    pub fn replay(&mut self, moves: &[Move], ends_on_slice: bool) {
        for (i, &mv) in moves.iter().enumerate() {
            self.turn(mv.top(), mv.bottom());
            if ends_on_slice || i + 1 < moves.len() {
                self.slice();
            }
        }
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, row: Row) -> fmt::Result {
    write!(f, "{label}:")?;
    for slot in unpack_row(row) {
        write!(f, " {slot:06b}")?;
    }
    writeln!(f)
}

/// Debug dump: both rows slot by slot, then the headline predicates.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(f, "Top", self.top)?;
        write_row(f, "Bottom", self.bottom)?;
        writeln!(f, "Cube Shape: {}", self.cube_shape())?;
        writeln!(f, "Can Slice: {}", self.can_slice())?;
        writeln!(f, "R.O. Solved: {}", self.is_row_orientation_solved())?;
        write!(f, "Is Solved: {}", self.is_solved())
    }
}
