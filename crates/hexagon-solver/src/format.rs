//! Canonicalizes and renders a recorded move history.
//!
//! The search records one entry per accepted node, including slice-only
//! placeholders. Every entry is a turn followed by a slice, except the last
//! one when the goal was met before its slice. Each rewrite here keeps that
//! reading intact, so the printed steps replay to the same state as the raw
//! history.

use crate::moves::Move;

/// Collapses each run of slice-only placeholders by parity.
///
/// Two slices in a row undo each other, so an even run disappears and an
/// odd run leaves the single placeholder that immediately precedes the next
/// real move (or ends the list).
pub fn collapse_slices(moves: &[Move]) -> Vec<Move> {
    let mut collapsed = Vec::with_capacity(moves.len());
    let mut run = 0usize;
    for &mv in moves {
        if mv.is_slice_only() {
            run += 1;
            continue;
        }
        if run % 2 == 1 {
            collapsed.push(Move::SLICE);
        }
        collapsed.push(mv);
        run = 0;
    }
    if run % 2 == 1 {
        collapsed.push(Move::SLICE);
    }
    collapsed
}

/// Cancels inverse turns that only a double slice separates, repeating
/// until a full pass changes nothing.
///
/// `a / / -a /` turns back to where it started and leaves the last slice,
/// so the three entries become one placeholder. Inverse turns that sit
/// next to each other keep the single slice between them and stay.
pub fn cancel_inverses(mut moves: Vec<Move>) -> Vec<Move> {
    loop {
        let mut changed = false;
        let mut kept: Vec<Move> = Vec::with_capacity(moves.len());
        for &mv in &moves {
            if let [.., prev, between] = kept[..] {
                if between.is_slice_only() && !mv.is_slice_only() && prev == mv.inverse() {
                    kept.truncate(kept.len() - 2);
                    kept.push(Move::SLICE);
                    changed = true;
                    continue;
                }
            }
            kept.push(mv);
        }
        if !changed {
            return moves;
        }
        moves = collapse_slices(&kept);
    }
}

/// Canonical form of a history and its final-slice flag.
///
/// A trailing placeholder whose slice never happens turns nothing, so it
/// is dropped and the entry before it keeps its slice instead.
pub fn canonicalize(moves: &[Move], ends_on_slice: bool) -> (Vec<Move>, bool) {
    let mut moves = moves.to_vec();
    let mut ends_on_slice = ends_on_slice;
    loop {
        while !ends_on_slice && moves.last().is_some_and(|mv| mv.is_slice_only()) {
            moves.pop();
            ends_on_slice = true;
        }
        let next = cancel_inverses(collapse_slices(&moves));
        if next == moves {
            return (moves, ends_on_slice);
        }
        moves = next;
    }
}

/// Renders moves as `"top bottom "` pairs separated by `"/ "`.
///
/// Every entry but the last is followed by a slice; the last one is too
/// when `ends_on_slice` is set. A placeholder prints as its slice alone.
pub fn render(moves: &[Move], ends_on_slice: bool) -> String {
    let mut out = String::new();
    let separated = moves.len().saturating_sub(usize::from(!ends_on_slice));
    for (i, mv) in moves.iter().enumerate() {
        if !mv.is_slice_only() {
            out.push_str(&mv.to_string());
            out.push(' ');
        }
        if i < separated {
            out.push_str("/ ");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::turn_row;
    use crate::slot::{Row, HALF_MASK, SOLVED_BOTTOM, SOLVED_TOP};

    fn moves(pairs: &[(i32, i32)]) -> Vec<Move> {
        pairs.iter().copied().map(Move::from).collect()
    }

    /// Plays a history from solved without the slice precondition, so any
    /// sequence can be compared with its canonical form.
    fn rows_after(moves: &[Move], ends_on_slice: bool) -> (Row, Row) {
        let (mut top, mut bottom) = (SOLVED_TOP, SOLVED_BOTTOM);
        for (i, mv) in moves.iter().enumerate() {
            top = turn_row(top, mv.top());
            bottom = turn_row(bottom, mv.bottom());
            if ends_on_slice || i + 1 < moves.len() {
                let (top_half, bottom_half) = (top & HALF_MASK, bottom & HALF_MASK);
                top = (top & !HALF_MASK) | bottom_half;
                bottom = (bottom & !HALF_MASK) | top_half;
            }
        }
        (top, bottom)
    }

    fn assert_same_state(raw: &[(i32, i32)], ends_on_slice: bool) {
        let raw = moves(raw);
        let (canonical, canonical_ends) = canonicalize(&raw, ends_on_slice);
        assert_eq!(
            rows_after(&canonical, canonical_ends),
            rows_after(&raw, ends_on_slice),
            "{raw:?} (ends_on_slice {ends_on_slice}) canonicalized to {canonical:?}"
        );
    }

    #[test]
    fn test_collapse_odd_run_keeps_one_slice() {
        let collapsed = collapse_slices(&moves(&[(3, 0), (0, 0), (1, 2)]));
        assert_eq!(collapsed, moves(&[(3, 0), (0, 0), (1, 2)]));

        let collapsed = collapse_slices(&moves(&[(3, 0), (0, 0), (0, 0), (0, 0), (1, 2)]));
        assert_eq!(collapsed, moves(&[(3, 0), (0, 0), (1, 2)]));
    }

    #[test]
    fn test_collapse_even_run_vanishes() {
        let collapsed = collapse_slices(&moves(&[(3, 0), (0, 0), (0, 0), (1, 2)]));
        assert_eq!(collapsed, moves(&[(3, 0), (1, 2)]));
    }

    #[test]
    fn test_collapse_trailing_and_leading_runs() {
        let collapsed = collapse_slices(&moves(&[(3, 0), (0, 0)]));
        assert_eq!(collapsed, moves(&[(3, 0), (0, 0)]));

        let collapsed = collapse_slices(&moves(&[(0, 0), (0, 0), (3, 0)]));
        assert_eq!(collapsed, moves(&[(3, 0)]));

        assert!(collapse_slices(&[]).is_empty());
    }

    #[test]
    fn test_cancel_inverse_across_double_slice() {
        let cancelled = cancel_inverses(moves(&[(1, 2), (0, 0), (-1, -2), (5, 5)]));
        assert_eq!(cancelled, moves(&[(0, 0), (5, 5)]));
    }

    #[test]
    fn test_cancel_keeps_inverse_split_by_one_slice() {
        let cancelled = cancel_inverses(moves(&[(3, 0), (-3, 0)]));
        assert_eq!(cancelled, moves(&[(3, 0), (-3, 0)]));
    }

    #[test]
    fn test_cancel_reaches_fixed_point() {
        let cancelled = cancel_inverses(moves(&[
            (3, 0),
            (0, 0),
            (1, 1),
            (0, 0),
            (-1, -1),
            (0, 0),
            (-3, 0),
        ]));
        assert_eq!(cancelled, moves(&[(0, 0)]));
    }

    #[test]
    fn test_cancel_ignores_partial_inverse() {
        let cancelled = cancel_inverses(moves(&[(3, 0), (0, 0), (-3, 3)]));
        assert_eq!(cancelled, moves(&[(3, 0), (0, 0), (-3, 3)]));
    }

    #[test]
    fn test_canonicalize_keeps_leading_slice() {
        let (canonical, ends) = canonicalize(&moves(&[(0, 0), (-3, 0)]), false);
        assert_eq!(canonical, moves(&[(0, 0), (-3, 0)]));
        assert!(!ends);
        assert_eq!(render(&canonical, ends), "/ -3 0 ");
    }

    #[test]
    fn test_canonicalize_drops_unsliced_trailing_placeholder() {
        let raw = moves(&[(3, 0), (1, 1), (0, 0), (-1, -1), (0, 0)]);
        let (canonical, ends) = canonicalize(&raw, false);
        assert_eq!(canonical, moves(&[(3, 0), (0, 0)]));
        assert!(ends);

        let (canonical, ends) = canonicalize(&moves(&[(0, 0)]), false);
        assert!(canonical.is_empty());
        assert_eq!(render(&canonical, ends), "");
    }

    #[test]
    fn test_canonical_form_replays_to_same_state() {
        let histories: &[&[(i32, i32)]] = &[
            &[(0, 0), (-3, 0)],
            &[(3, 0), (0, 0), (0, 0), (1, 2), (0, 0)],
            &[(3, 0), (1, 1), (0, 0), (-1, -1), (0, 0)],
            &[(3, 0), (0, 0), (1, 1), (0, 0), (-1, -1), (0, 0), (-3, 0)],
            &[(0, 0), (0, 0), (0, 0)],
            &[(2, 5), (-2, -5), (0, 0), (0, 0), (7, 1), (0, 0), (-7, -1)],
            &[(6, 0), (0, 0), (0, 0), (0, 0), (0, 3)],
        ];
        for history in histories {
            assert_same_state(history, false);
            assert_same_state(history, true);
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&moves(&[(3, 0), (-3, -3)]), true), "3 0 / -3 -3 / ");
        assert_eq!(render(&moves(&[(3, 0), (-3, -3)]), false), "3 0 / -3 -3 ");
        assert_eq!(render(&moves(&[(15, 1)]), false), "-3 1 ");
        assert_eq!(render(&[], false), "");
        assert_eq!(render(&[], true), "");
    }

    #[test]
    fn test_render_placeholders() {
        assert_eq!(render(&moves(&[(0, 0), (3, 0)]), false), "/ 3 0 ");
        assert_eq!(render(&moves(&[(3, 0), (0, 0), (1, 2)]), false), "3 0 / / 1 2 ");
        assert_eq!(render(&moves(&[(3, 0), (0, 0)]), true), "3 0 / / ");
    }

    #[test]
    fn test_canonicalize_then_render() {
        let raw = moves(&[(3, 0), (0, 0), (0, 0), (1, 2), (0, 0)]);
        let (canonical, ends) = canonicalize(&raw, true);
        assert_eq!(canonical, moves(&[(3, 0), (1, 2), (0, 0)]));
        assert!(ends);
        assert_eq!(render(&canonical, ends), "3 0 / 1 2 / / ");
    }
}
