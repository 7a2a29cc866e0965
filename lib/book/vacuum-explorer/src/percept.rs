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
use std::str::FromStr;

use crate::coordinate::GridCoordinate;
use crate::VacuumWorldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirtStatus {
    Clean,
    Dirty,
}

impl FromStr for DirtStatus {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Clean" => Ok(DirtStatus::Clean),
            "Dirty" => Ok(DirtStatus::Dirty),
            _ => Err(VacuumWorldError::UnknownDirtStatus(s.to_string())),
        }
    }
}

/// Whether the environment rejected the previous move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpStatus {
    Bump,
    None,
}

impl FromStr for BumpStatus {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bump" => Ok(BumpStatus::Bump),
            "None" => Ok(BumpStatus::None),
            _ => Err(VacuumWorldError::UnknownBumpStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The type label an agent reports about itself. Two agents with the same kind are clones of
/// each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentKind(pub String);

impl AgentKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Another agent seen this tick, positioned relative to the observer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NeighborObservation {
    pub id: AgentId,
    pub kind: AgentKind,
    pub relative: GridCoordinate,
}

impl NeighborObservation {
    pub fn new(id: AgentId, kind: AgentKind, relative: GridCoordinate) -> Self {
        Self { id, kind, relative }
    }
}

/// ExplorerPercept is everything the environment hands the explorer in a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerPercept {
    pub status: DirtStatus,
    pub bump: BumpStatus,
    pub neighbors: Vec<NeighborObservation>,
}

impl ExplorerPercept {
    pub fn new(status: DirtStatus, bump: BumpStatus, neighbors: Vec<NeighborObservation>) -> Self {
        Self {
            status,
            bump,
            neighbors,
        }
    }

    /// Clean square, no bump, nobody around.
    pub fn quiet() -> Self {
        Self::new(DirtStatus::Clean, BumpStatus::None, Vec::new())
    }

    pub fn is_dirty(&self) -> bool {
        self.status == DirtStatus::Dirty
    }

    pub fn is_bumped(&self) -> bool {
        self.bump == BumpStatus::Bump
    }

    /// Build a percept from the string labels used by the simulator.
    pub fn from_labels(
        status: &str,
        bump: &str,
        neighbors: Vec<NeighborObservation>,
    ) -> Result<Self, VacuumWorldError> {
        Ok(Self::new(status.parse()?, bump.parse()?, neighbors))
    }
}
