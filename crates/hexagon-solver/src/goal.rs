//! What counts as "solved" for a search.

use thiserror::Error;

use crate::puzzle::Puzzle;
use crate::slot::{label_slots, Row, SLOTS_PER_ROW, SLOT_MASK, SLOT_SIZE};

/// A piece layout that does not describe one row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown piece label {0:?}")]
    UnknownLabel(String),

    #[error("layout {layout:?} covers {slots} slots, expected {}", SLOTS_PER_ROW)]
    SlotCount { layout: String, slots: usize },
}

/// Termination condition checked after every turn and every slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    /// Cube shape with every piece in its own row.
    #[default]
    CubeShape,
    /// Exactly the solved reference state.
    Solved,
    /// Cube shape, row orientation, and the masked slots match.
    Pattern {
        top_match: Row,
        top_mask: Row,
        bottom_match: Row,
        bottom_mask: Row,
    },
}

impl Goal {
    pub fn is_reached(&self, puzzle: &Puzzle) -> bool {
        match *self {
            Goal::CubeShape => puzzle.cube_shape() && puzzle.is_row_orientation_solved(),
            Goal::Solved => puzzle.is_solved(),
            Goal::Pattern {
                top_match,
                top_mask,
                bottom_match,
                bottom_mask,
            } => puzzle.is_solved_by_matches(top_match, top_mask, bottom_match, bottom_mask),
        }
    }

    /// Builds a pattern from piece labels, one layout string per row.
    ///
    /// ```
    /// use hexagon_solver::Goal;
    ///
    /// // First layer: top row solved, bottom row ignored.
    /// let goal = Goal::pattern(
    ///     "c1a e1a c2a e2a c3a e3a c4a e4a c5a e5a c6a e6a",
    ///     "xx x xx x xx x xx x xx x xx x",
    /// )
    /// .unwrap();
    /// assert!(goal.is_reached(&hexagon_solver::Puzzle::solved()));
    /// ```
    pub fn pattern(top: &str, bottom: &str) -> Result<Self, PatternError> {
        let (top_match, top_mask) = layout_row(top)?;
        let (bottom_match, bottom_mask) = layout_row(bottom)?;
        Ok(Goal::Pattern {
            top_match,
            top_mask,
            bottom_match,
            bottom_mask,
        })
    }
}

/// Turns a layout like `"c1a e1a xx e2a"` into a match row and its mask.
fn layout_row(layout: &str) -> Result<(Row, Row), PatternError> {
    let mut row: Row = 0;
    let mut mask: Row = 0;
    let mut slots = 0;
    for label in layout.split_whitespace() {
        let (values, significant) = label_slots(label)
            .ok_or_else(|| PatternError::UnknownLabel(label.to_string()))?;
        for value in values {
            let bits = if significant { SLOT_MASK } else { 0 };
            row = row << SLOT_SIZE | value;
            mask = mask << SLOT_SIZE | bits;
            slots += 1;
        }
    }
    if slots != SLOTS_PER_ROW {
        return Err(PatternError::SlotCount {
            layout: layout.to_string(),
            slots,
        });
    }
    Ok((row, mask))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{ROW_MASK, SOLVED_BOTTOM, SOLVED_TOP};

    const SOLVED_TOP_LAYOUT: &str = "c1a e1a c2a e2a c3a e3a c4a e4a c5a e5a c6a e6a";
    const SOLVED_BOTTOM_LAYOUT: &str = "e3b c3b e2b c2b e1b c1b e6b c6b e5b c5b e4b c4b";

    #[test]
    fn test_full_layout_is_solved_state() {
        let goal = Goal::pattern(SOLVED_TOP_LAYOUT, SOLVED_BOTTOM_LAYOUT).unwrap();
        assert_eq!(
            goal,
            Goal::Pattern {
                top_match: SOLVED_TOP,
                top_mask: ROW_MASK,
                bottom_match: SOLVED_BOTTOM,
                bottom_mask: ROW_MASK,
            }
        );
    }

    #[test]
    fn test_partial_layout() {
        let goal = Goal::pattern(
            "c1a e1a xx e2a xx e3a xx e4a xx e5a xx e6a",
            "e3b c3b e2b c2b x xx e6b c6b x xx e4b c4b",
        )
        .unwrap();
        let Goal::Pattern {
            top_match,
            top_mask,
            bottom_mask,
            ..
        } = goal
        else {
            panic!("expected a pattern");
        };
        assert_eq!(top_match & top_mask, SOLVED_TOP & top_mask);
        assert_ne!(top_mask, ROW_MASK);
        assert_ne!(bottom_mask, ROW_MASK);
        assert!(goal.is_reached(&Puzzle::solved()));
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            Goal::pattern("c1a", SOLVED_BOTTOM_LAYOUT),
            Err(PatternError::SlotCount {
                layout: "c1a".to_string(),
                slots: 2,
            })
        );
        assert_eq!(
            Goal::pattern(SOLVED_TOP_LAYOUT, "zz"),
            Err(PatternError::UnknownLabel("zz".to_string()))
        );
    }

    #[test]
    fn test_goals_after_turn() {
        let mut puzzle = Puzzle::solved();
        puzzle.turn(3, 0);
        assert!(Goal::CubeShape.is_reached(&puzzle));
        assert!(!Goal::Solved.is_reached(&puzzle));
    }
}
