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

use rand::Rng as _;
use tracing::trace;

use crate::coordinate::{Action, GridCoordinate};
use crate::percept::{
    AgentId, AgentKind, BumpStatus, DirtStatus, ExplorerPercept, NeighborObservation,
};
use crate::{Environment, HashMap, HashSet, Rng};

/// How far, in either axis, the explorer can see other agents.
pub const SENSOR_RADIUS: i32 = 2;

/// An agent that holds its cell for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub id: AgentId,
    pub kind: AgentKind,
    pub location: GridCoordinate,
}

/// A bounded rectangle of squares for one explorer, with optional interior walls and stationary
/// peers. Everything outside the rectangle is wall. Locations here are absolute; the explorer only
/// ever learns offsets.
pub struct GridWorld {
    width: i32,
    height: i32,
    squares: HashMap<GridCoordinate, DirtStatus>,
    walls: HashSet<GridCoordinate>,
    peers: Vec<Peer>,
    explorer_id: AgentId,
    explorer_kind: AgentKind,
    explorer_location: GridCoordinate,
    bumped: bool,
}

impl GridWorld {
    pub fn new(
        width: i32,
        height: i32,
        start: GridCoordinate,
        explorer_id: AgentId,
        explorer_kind: AgentKind,
    ) -> Self {
        let mut squares = HashMap::default();
        for x in 0..width {
            for y in 0..height {
                squares.insert(GridCoordinate::new(x, y), DirtStatus::Dirty);
            }
        }
        Self {
            width,
            height,
            squares,
            walls: HashSet::default(),
            peers: Vec::new(),
            explorer_id,
            explorer_kind,
            explorer_location: start,
            bumped: false,
        }
    }

    /// Each square other than the start turns into a wall with `wall_probability`.
    pub fn random(
        width: i32,
        height: i32,
        wall_probability: f64,
        rng: &mut Rng,
        explorer_id: AgentId,
        explorer_kind: AgentKind,
    ) -> Self {
        let start = GridCoordinate::ORIGIN;
        let mut world = Self::new(width, height, start, explorer_id, explorer_kind);
        for x in 0..width {
            for y in 0..height {
                let cell = GridCoordinate::new(x, y);
                if cell != start && rng.gen_bool(wall_probability) {
                    world.add_wall(cell);
                }
            }
        }
        world
    }

    pub fn add_wall(&mut self, cell: GridCoordinate) {
        self.squares.remove(&cell);
        self.walls.insert(cell);
    }

    /// The peer's square is never reachable, so it stops counting towards the score.
    pub fn add_peer(&mut self, id: AgentId, kind: AgentKind, location: GridCoordinate) {
        self.squares.remove(&location);
        self.peers.push(Peer { id, kind, location });
    }

    pub fn explorer_location(&self) -> GridCoordinate {
        self.explorer_location
    }

    pub fn square_count(&self) -> usize {
        self.squares.len()
    }

    pub fn clean_square_count(&self) -> usize {
        self.squares
            .values()
            .filter(|&s| *s == DirtStatus::Clean)
            .count()
    }

    fn is_blocked(&self, cell: &GridCoordinate) -> bool {
        cell.x < 0
            || cell.y < 0
            || cell.x >= self.width
            || cell.y >= self.height
            || self.walls.contains(cell)
            || self.peers.iter().any(|peer| peer.location == *cell)
    }

    fn visible_peers(&self) -> impl Iterator<Item = NeighborObservation> + '_ {
        self.peers.iter().filter_map(|peer| {
            let relative = peer.location - self.explorer_location;
            (relative.x.unsigned_abs() <= SENSOR_RADIUS.unsigned_abs()
                && relative.y.unsigned_abs() <= SENSOR_RADIUS.unsigned_abs()).then(|| {
                NeighborObservation::new(peer.id, peer.kind.clone(), relative)
            })
        })
    }
}

impl Environment for GridWorld {
    type Action = Action;
    type Percept = ExplorerPercept;
    type Score = i32;

    fn percept(&self) -> Self::Percept {
        let status = self
            .squares
            .get(&self.explorer_location)
            .copied()
            .unwrap_or(DirtStatus::Clean);
        let bump = if self.bumped {
            BumpStatus::Bump
        } else {
            BumpStatus::None
        };
        // the simulator lists the explorer itself as well
        let mut neighbors = vec![NeighborObservation::new(
            self.explorer_id,
            self.explorer_kind.clone(),
            GridCoordinate::ORIGIN,
        )];
        neighbors.extend(self.visible_peers());
        ExplorerPercept::new(status, bump, neighbors)
    }

    fn execute_action(&mut self, action: &Self::Action) {
        self.bumped = false;
        match action {
            Action::Suck => {
                self.squares
                    .insert(self.explorer_location, DirtStatus::Clean);
            }
            Action::NoOp => {}
            Action::North | Action::West | Action::South | Action::East => {
                let destination = action.destination(self.explorer_location);
                if self.is_blocked(&destination) {
                    trace!(%destination, "move rejected");
                    self.bumped = true;
                } else {
                    self.explorer_location = destination;
                }
            }
        }
    }

    fn score(&self) -> Self::Score {
        self.clean_square_count() as i32
    }
}
