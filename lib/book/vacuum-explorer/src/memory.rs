/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use crate::coordinate::{Action, GridCoordinate};
use crate::HashSet;

/// What the explorer remembers about the grid. Every set only ever grows during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    visited: HashSet<GridCoordinate>,
    visited_by_others: HashSet<GridCoordinate>,
    walls: HashSet<GridCoordinate>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &HashSet<GridCoordinate> {
        &self.visited
    }

    pub fn visited_by_others(&self) -> &HashSet<GridCoordinate> {
        &self.visited_by_others
    }

    pub fn walls(&self) -> &HashSet<GridCoordinate> {
        &self.walls
    }

    pub fn record_visit(&mut self, cell: GridCoordinate) -> bool {
        self.visited.insert(cell)
    }

    pub fn record_peer_cell(&mut self, cell: GridCoordinate) -> bool {
        self.visited_by_others.insert(cell)
    }

    pub fn record_wall(&mut self, cell: GridCoordinate) -> bool {
        self.walls.insert(cell)
    }

    /// A cell is worth entering only if nobody has been there and nothing blocks it.
    pub fn is_unexplored(&self, cell: &GridCoordinate) -> bool {
        !self.walls.contains(cell)
            && !self.visited.contains(cell)
            && !self.visited_by_others.contains(cell)
    }
}

/// A cell on the backtracking trail and the move that reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierEntry {
    pub cell: GridCoordinate,
    pub action: Action,
}

impl FrontierEntry {
    pub fn new(cell: GridCoordinate, action: Action) -> Self {
        Self { cell, action }
    }

    pub fn is_sentinel(&self) -> bool {
        !self.action.is_move()
    }
}

/// FrontierStack is the depth-first trail. It always holds the root entry `(origin, NoOp)` at
/// the bottom and that entry is never popped, so a stack holding only the root has nothing left
/// to backtrack to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierStack {
    entries: Vec<FrontierEntry>,
}

impl Default for FrontierStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontierStack {
    pub fn new() -> Self {
        Self {
            entries: vec![FrontierEntry::new(GridCoordinate::ORIGIN, Action::NoOp)],
        }
    }

    pub fn push(&mut self, cell: GridCoordinate, action: Action) {
        debug_assert!(action.is_move(), "only moves go on the trail");
        self.entries.push(FrontierEntry::new(cell, action));
    }

    /// Remove the most recent move. The root entry stays.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&FrontierEntry> {
        self.entries.last()
    }

    /// Top entry if it can be backtracked from, i.e. it is not the root.
    pub fn peek_move(&self) -> Option<&FrontierEntry> {
        self.peek().filter(|entry| !entry.is_sentinel())
    }

    /// Number of moves on the trail, not counting the root.
    pub fn depth(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter().rev()
    }
}
