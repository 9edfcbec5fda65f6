//! Shape, slice and solve checks over the packed rows.
//!
//! Every check is a fixed mask-and-compare; none of them walks the slots.

use crate::puzzle::Puzzle;
use crate::slot::{
    Row, BOTTOM_CUBE_SHAPE, ROW_ORIENTATION_MASK, SLICE_MASK, SOLVED_BOTTOM, SOLVED_TOP,
    TOP_CUBE_SHAPE,
};

impl Puzzle {
    /// True if the puzzle has the geometry of the solved state.
    ///
    /// There are exactly twelve edges, so once every edge position holds a
    /// piece without the corner flag, only corners are left for the other
    /// slots. This relies on only legal moves having been applied; it says
    /// nothing about piece identity or orientation.
    pub fn cube_shape(&self) -> bool {
        self.top & TOP_CUBE_SHAPE == 0 && self.bottom & BOTTOM_CUBE_SHAPE == 0
    }

    /// True if neither row has a corner across the slice axis.
    ///
    /// Both halves of a corner always move together, so a corner straddles
    /// the axis exactly when a right half sits in slot 0 or slot 9.
    pub fn can_slice(&self) -> bool {
        self.can_slice_top() && self.can_slice_bottom()
    }

    pub fn can_slice_top(&self) -> bool {
        self.top & SLICE_MASK == 0
    }

    pub fn can_slice_bottom(&self) -> bool {
        self.bottom & SLICE_MASK == 0
    }

    /// True if every top piece is on the top row and every bottom piece on
    /// the bottom row, whatever their rotational position.
    pub fn is_row_orientation_solved(&self) -> bool {
        self.top & ROW_ORIENTATION_MASK == 0 && !self.bottom & ROW_ORIENTATION_MASK == 0
    }

    /// Partial solve check: shape and row orientation must hold, and both
    /// rows must equal their match rows wherever the mask is set. Zero mask
    /// bits are "don't care".
    pub fn is_solved_by_matches(
        &self,
        top_match: Row,
        top_mask: Row,
        bottom_match: Row,
        bottom_mask: Row,
    ) -> bool {
        if !self.cube_shape() || !self.is_row_orientation_solved() {
            return false;
        }
        self.top & top_mask == top_match & top_mask
            && self.bottom & bottom_mask == bottom_match & bottom_mask
    }

    pub fn is_solved(&self) -> bool {
        self.is_top_solved() && self.is_bottom_solved()
    }

    pub fn is_top_solved(&self) -> bool {
        self.top == SOLVED_TOP
    }

    pub fn is_bottom_solved(&self) -> bool {
        self.bottom == SOLVED_BOTTOM
    }
}
