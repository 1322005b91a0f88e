//! Breadth-first search for a shortest solution.
//!
//! Transitions go through [`SimulationState::apply`] and goals through the
//! variant win check, so whatever comes out of here checks as
//! [`Verdict::Solved`](crate::Verdict::Solved).

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::{debug, trace};

use crate::{Direction, Level, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
  /// Give up after this many distinct states have been seen.
  pub max_states: usize,
}

impl Default for SearchLimits {
  fn default() -> Self {
    Self {
      max_states: 1_000_000,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
  /// A solution no longer than any other.
  Solved(Vec<Direction>),
  /// Every reachable state was explored without winning.
  Unsolvable,
  LimitReached,
}

impl Level {
  pub fn solve(&self, limits: SearchLimits) -> SolveOutcome {
    let start = self.start();
    if start.is_won() {
      return SolveOutcome::Solved(Vec::new());
    }

    // Each node remembers the node it came from and the move taken. The
    // root has no parent.
    let mut nodes: Vec<Option<(usize, Direction)>> = vec![None];
    let mut seen = AHashSet::new();
    seen.insert(start.key());
    let mut queue: VecDeque<(usize, SimulationState)> = VecDeque::new();
    queue.push_back((0, start));

    while let Some((node, state)) = queue.pop_front() {
      for dir in Direction::ALL {
        let mut next = state.clone();
        if next.apply(dir).is_err() || !seen.insert(next.key()) {
          continue;
        }
        nodes.push(Some((node, dir)));
        let id = nodes.len() - 1;

        if next.is_won() {
          let path = trace_back(&nodes, id);
          debug!(moves = path.len(), states = seen.len(), "found solution");
          return SolveOutcome::Solved(path);
        }
        if seen.len() >= limits.max_states {
          debug!(states = seen.len(), "search limit reached");
          return SolveOutcome::LimitReached;
        }
        if seen.len() % 10_000 == 0 {
          trace!(states = seen.len(), frontier = queue.len(), "searching");
        }
        queue.push_back((id, next));
      }
    }

    debug!(states = seen.len(), "no solution");
    SolveOutcome::Unsolvable
  }
}

fn trace_back(
  nodes: &[Option<(usize, Direction)>],
  mut id: usize,
) -> Vec<Direction> {
  let mut path = Vec::new();
  while let Some((parent, dir)) = nodes[id] {
    path.push(dir);
    id = parent;
  }
  path.reverse();
  path
}
