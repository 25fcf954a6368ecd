//! Line decisions for the morse dot style.
//!
//! Consecutive dark modules along a row or column are grouped into dashes.
//! The first time a module is visited its run is scanned forward (right or
//! down) and every module of the run gets a decision at once. Decisions are
//! write-once: a later visit to any module of the run only reads its entry.

use std::collections::HashMap;

use log::{debug, trace};
use rand::Rng;

use crate::neighbors::NeighborQuery;

/// Grid coordinate of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    fn step(self, axis: Axis, offset: i32) -> Self {
        match axis {
            Axis::Horizontal => Cell::new(self.row, self.col + offset),
            Axis::Vertical => Cell::new(self.row + offset, self.col),
        }
    }
}

/// Scan direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Neighbor offset `(dx, dy)` of the module `offset` steps along the axis.
    fn offset(self, offset: i32) -> (i32, i32) {
        match self {
            Axis::Horizontal => (offset, 0),
            Axis::Vertical => (0, offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Horizontal,
    Vertical,
    /// An isolated dot, not part of any run.
    Single,
}

impl From<Axis> for LineDirection {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => LineDirection::Horizontal,
            Axis::Vertical => LineDirection::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePosition {
    Start,
    Middle,
    End,
}

/// The role a module plays in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDecision {
    pub direction: LineDirection,
    pub position: LinePosition,
}

impl LineDecision {
    /// Decision for a module drawn as a lone dot.
    pub const SINGLE: LineDecision = LineDecision {
        direction: LineDirection::Single,
        position: LinePosition::Start,
    };
}

/// Write-once map from module coordinate to its line decision.
///
/// One instance covers one matrix render. Reusing it for another matrix
/// would apply stale decisions.
#[derive(Debug, Clone, Default)]
pub struct LineDecisions {
    decisions: HashMap<Cell, LineDecision>,
}

impl LineDecisions {
    pub fn new() -> Self {
        LineDecisions::default()
    }

    pub fn get(&self, cell: Cell) -> Option<LineDecision> {
        self.decisions.get(&cell).copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.decisions.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &LineDecision)> {
        self.decisions.iter()
    }

    /// Returns the decision for `cell`, scanning and committing its run first
    /// if the cell has not been decided yet.
    ///
    /// Only the right and bottom neighbors are inspected: runs are always
    /// committed forward from their first visited module. When both are dark
    /// the scan axis is picked at random.
    pub fn decide<Q, R>(&mut self, cell: Cell, neighbors: &Q, rng: &mut R) -> LineDecision
    where
        Q: NeighborQuery + ?Sized,
        R: Rng,
    {
        if let Some(decision) = self.get(cell) {
            trace!("morse cache hit at {:?}: {:?}", cell, decision);
            return decision;
        }

        let has_right = neighbors.has_neighbor(1, 0);
        let has_bottom = neighbors.has_neighbor(0, 1);

        let axis = match (has_right, has_bottom) {
            (true, true) => {
                if rng.gen_bool(0.5) {
                    Some(Axis::Horizontal)
                } else {
                    Some(Axis::Vertical)
                }
            }
            (true, false) => Some(Axis::Horizontal),
            (false, true) => Some(Axis::Vertical),
            (false, false) => None,
        };

        match axis {
            Some(axis) => self.mark_line_from_point(cell, axis, neighbors),
            None => {
                self.decisions.insert(cell, LineDecision::SINGLE);
            }
        }

        self.get(cell).unwrap_or(LineDecision::SINGLE)
    }

    /// Scans the run starting at `start` along `axis` and commits it.
    ///
    /// The walk stops at the first absent module or at the first module that
    /// already holds a decision (claimed by a perpendicular run). A run of one
    /// module is committed as a single dot.
    pub fn mark_line_from_point<Q>(&mut self, start: Cell, axis: Axis, neighbors: &Q)
    where
        Q: NeighborQuery + ?Sized,
    {
        let mut points = vec![start];
        let mut offset = 1;
        loop {
            let (dx, dy) = axis.offset(offset);
            let next = start.step(axis, offset);
            if !neighbors.has_neighbor(dx, dy) || self.contains(next) {
                break;
            }
            points.push(next);
            offset += 1;
        }

        if points.len() == 1 {
            debug!("morse run at {:?} collapsed to a single dot", start);
            self.decisions.insert(start, LineDecision::SINGLE);
            return;
        }

        debug!(
            "morse {:?} run of {} modules from {:?}",
            axis,
            points.len(),
            start
        );
        let last = points.len() - 1;
        let direction = LineDirection::from(axis);
        for (index, point) in points.into_iter().enumerate() {
            let position = if index == 0 {
                LinePosition::Start
            } else if index == last {
                LinePosition::End
            } else {
                LinePosition::Middle
            };
            self.decisions
                .entry(point)
                .or_insert(LineDecision { direction, position });
        }
    }
}
