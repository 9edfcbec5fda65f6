//! Depth-bounded parallel search for a solving move sequence.
//!
//! Every node tries each configured top turn, drops the ones that leave a
//! corner across the slice axis, then does the same for each bottom turn.
//! A surviving pair is checked against the goal before and after its slice,
//! then searched one level deeper. The first solution found wins: it is
//! written once to a shared slot and a flag tells every other branch to
//! return.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::{DEFAULT_MAX_DEPTH, DEFAULT_MOVE_MAGNITUDES};
use crate::format::{canonicalize, render};
use crate::goal::Goal;
use crate::moves::{Move, MoveList};
use crate::puzzle::Puzzle;

/// Configuration for the solver
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Turn sizes tried for each row at every node. Only these ever reach
    /// [`Puzzle::turn`], so they are the whole legal move set.
    pub move_magnitudes: Vec<i32>,
    /// Branches deeper than this stop. The root is depth 0, so solutions
    /// have at most `max_depth + 1` moves.
    pub max_depth: usize,
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// When to stop.
    pub goal: Goal,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            move_magnitudes: DEFAULT_MOVE_MAGNITUDES.to_vec(),
            max_depth: DEFAULT_MAX_DEPTH,
            threads: None,
            goal: Goal::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A move history that reaches the goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Moves as the search recorded them, slice-only placeholders included.
    pub moves: MoveList,
    /// Whether the goal was met after the last move's slice rather than
    /// right after its turn.
    pub ends_on_slice: bool,
}

impl Solution {
    /// The same solution with slice runs collapsed and inverse turns
    /// cancelled. Replaying it reaches the same state as the raw history.
    pub fn canonical(&self) -> Solution {
        let (moves, ends_on_slice) = canonicalize(&self.moves, self.ends_on_slice);
        Solution {
            moves: moves.into_iter().collect(),
            ends_on_slice,
        }
    }

    /// The canonical moves in `top bottom / ...` notation.
    pub fn render(&self) -> String {
        let canonical = self.canonical();
        render(&canonical.moves, canonical.ends_on_slice)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.canonical();
        writeln!(f, "Solution found in {} moves:", canonical.moves.len())?;
        write!(f, "{}", render(&canonical.moves, canonical.ends_on_slice))
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub solution: Option<Solution>,
    /// True when every branch ran to the depth bound without a solution.
    pub search_exhausted: bool,
    /// Turn pairs that survived pruning.
    pub nodes_explored: u64,
    pub time_elapsed_ms: u64,
}

/// One-shot "announce and stop" shared by all workers.
#[derive(Debug, Default)]
struct SolutionSlot {
    found: AtomicBool,
    solution: Mutex<Option<Solution>>,
}

impl SolutionSlot {
    fn is_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Stores the solution unless another worker got there first.
    fn announce(&self, moves: &MoveList, ends_on_slice: bool) {
        let mut slot = self.solution.lock();
        if slot.is_some() {
            return;
        }
        debug!(moves = moves.len(), ends_on_slice, "solution found");
        *slot = Some(Solution {
            moves: moves.clone(),
            ends_on_slice,
        });
        self.found.store(true, Ordering::Release);
    }

    fn into_inner(self) -> Option<Solution> {
        self.solution.into_inner()
    }
}

struct Search<'a> {
    config: &'a SolverConfig,
    slot: &'a SolutionSlot,
}

impl Search<'_> {
    /// Searches every move from `puzzle`. Returns the nodes visited.
    fn search(&self, puzzle: &Puzzle, moves: &MoveList, depth: usize) -> u64 {
        if depth > self.config.max_depth || self.slot.is_found() {
            return 0;
        }

        let mut nodes = 0;
        for &top in &self.config.move_magnitudes {
            if self.slot.is_found() {
                break;
            }
            let mut top_next = *puzzle;
            top_next.turn(top, 0);
            if !top_next.can_slice_top() {
                continue;
            }
            nodes += self.expand_bottoms(&top_next, top, moves, depth);
        }
        nodes
    }

    /// Tries every bottom turn under an already applied top turn.
    fn expand_bottoms(&self, top_next: &Puzzle, top: i32, moves: &MoveList, depth: usize) -> u64 {
        let goal = &self.config.goal;
        let mut nodes = 0;
        for &bottom in &self.config.move_magnitudes {
            if self.slot.is_found() {
                break;
            }
            let mut next = *top_next;
            next.turn(0, bottom);
            if !next.can_slice_bottom() {
                continue;
            }
            nodes += 1;

            let mut next_moves = moves.clone();
            next_moves.push(Move::new(top, bottom));

            if goal.is_reached(&next) {
                self.slot.announce(&next_moves, false);
                break;
            }
            next.slice();
            if goal.is_reached(&next) {
                self.slot.announce(&next_moves, true);
                break;
            }

            nodes += self.search(&next, &next_moves, depth + 1);
        }
        nodes
    }
}

/// Searches for a move sequence taking `start` to the configured goal.
///
/// Each top turn that survives pruning at the root becomes its own rayon
/// task with its own copy of the puzzle and history. The first solution any
/// task finds is returned; finding none is reported as an exhausted search,
/// not an error.
pub fn find_solution(start: &Puzzle, config: &SolverConfig) -> Result<SearchResult, SolverError> {
    let start_time = Instant::now();
    info!(
        magnitudes = ?config.move_magnitudes,
        max_depth = config.max_depth,
        goal = ?config.goal,
        "starting search"
    );

    if config.goal.is_reached(start) {
        info!("start state already meets the goal");
        return Ok(SearchResult {
            solution: Some(Solution {
                moves: MoveList::new(),
                ends_on_slice: false,
            }),
            search_exhausted: false,
            nodes_explored: 0,
            time_elapsed_ms: start_time.elapsed().as_millis() as u64,
        });
    }

    let roots: Vec<(i32, Puzzle)> = config
        .move_magnitudes
        .iter()
        .filter_map(|&top| {
            let mut next = *start;
            next.turn(top, 0);
            if next.can_slice_top() {
                Some((top, next))
            } else {
                trace!(top, "root turn blocks the slice");
                None
            }
        })
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;

    let slot = SolutionSlot::default();
    let search = Search {
        config,
        slot: &slot,
    };
    let nodes_explored = pool.install(|| {
        roots
            .par_iter()
            .map(|(top, puzzle)| {
                let nodes = search.expand_bottoms(puzzle, *top, &MoveList::new(), 0);
                debug!(top, nodes, "root branch finished");
                nodes
            })
            .sum::<u64>()
    });

    let solution = slot.into_inner();
    let search_exhausted = solution.is_none();
    let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(
        found = !search_exhausted,
        nodes_explored, time_elapsed_ms, "search finished"
    );

    Ok(SearchResult {
        solution,
        search_exhausted,
        nodes_explored,
        time_elapsed_ms,
    })
}
