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

use std::fmt::Display;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::VacuumWorldError;

/// A cell on the unbounded integer grid. The explorer keeps these in its own frame, where the
/// cell it started on is the origin. Arithmetic saturates at the `i32` bounds, since offsets
/// arrive unchecked from the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const ORIGIN: GridCoordinate = GridCoordinate { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// The cell itself plus its four axis-adjacent cells.
    pub fn with_axis_neighbors(&self) -> [GridCoordinate; 5] {
        [
            *self,
            *self + Action::North.delta(),
            *self + Action::West.delta(),
            *self + Action::South.delta(),
            *self + Action::East.delta(),
        ]
    }

    pub fn euclidean_distance(&self) -> f64 {
        f64::from(self.x).hypot(f64::from(self.y))
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, rhs: Self) -> Self::Output {
        GridCoordinate::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, rhs: Self) -> Self::Output {
        GridCoordinate::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Display for GridCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Every command the explorer can emit in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    North,
    West,
    South,
    East,
    NoOp,
    Suck,
}

impl Action {
    /// The four moves, in the order the explorer falls back to them.
    pub const CARDINALS: [Action; 4] = [Action::North, Action::West, Action::South, Action::East];

    /// Unit displacement of this action. Non-moves stay put.
    pub fn delta(&self) -> GridCoordinate {
        match self {
            Action::North => GridCoordinate::new(0, 1),
            Action::West => GridCoordinate::new(-1, 0),
            Action::South => GridCoordinate::new(0, -1),
            Action::East => GridCoordinate::new(1, 0),
            Action::NoOp | Action::Suck => GridCoordinate::ORIGIN,
        }
    }

    pub fn is_move(&self) -> bool {
        !matches!(self, Action::NoOp | Action::Suck)
    }

    /// The move that undoes this one: North and South swap, West and East swap.
    pub fn reverse(&self) -> Option<Action> {
        match self {
            Action::North => Some(Action::South),
            Action::West => Some(Action::East),
            Action::South => Some(Action::North),
            Action::East => Some(Action::West),
            Action::NoOp | Action::Suck => None,
        }
    }

    /// Where this action leads from `from`.
    pub fn destination(&self, from: GridCoordinate) -> GridCoordinate {
        from + self.delta()
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::North => write!(f, "GoNorth"),
            Action::West => write!(f, "GoWest"),
            Action::South => write!(f, "GoSouth"),
            Action::East => write!(f, "GoEast"),
            Action::NoOp => write!(f, "NoOp"),
            Action::Suck => write!(f, "Suck"),
        }
    }
}

impl FromStr for Action {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GoNorth" => Ok(Action::North),
            "GoWest" => Ok(Action::West),
            "GoSouth" => Ok(Action::South),
            "GoEast" => Ok(Action::East),
            // older harnesses spell it "Noop"
            "NoOp" | "Noop" => Ok(Action::NoOp),
            "Suck" => Ok(Action::Suck),
            _ => Err(VacuumWorldError::UnknownAction(s.to_string())),
        }
    }
}
