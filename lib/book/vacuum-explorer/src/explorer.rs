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

//! The exploring vacuum agent.
//!
//! Each tick the explorer either sucks, steps onto a cell nobody has covered yet, retraces the
//! move that brought it to its current cell, or idles. Forward moves go onto a depth-first trail
//! (the frontier) so the explorer can always walk back out of a dead end. Idling costs one unit
//! of a budget; once the budget is spent the explorer stays put for the rest of the run.

use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::ExplorerConfig;
use crate::coordinate::{Action, GridCoordinate};
use crate::memory::{FrontierEntry, FrontierStack, Memory};
use crate::neighbors::{NeighborAnalysis, NeighborAnalyzer};
use crate::percept::{AgentId, AgentKind, ExplorerPercept, NeighborObservation};
use crate::{Agent, Rng, VacuumWorldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Exploring,
    Backtracking,
    /// The no-op budget is spent. Terminal.
    Exhausted,
}

/// The move handed to the environment last tick, kept until the next percept confirms or
/// rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMove {
    Forward {
        from: GridCoordinate,
        to: GridCoordinate,
        action: Action,
    },
    Backtrack {
        from: GridCoordinate,
        popped: FrontierEntry,
    },
}

pub struct ExplorerAgent {
    id: AgentId,
    kind: AgentKind,
    position: GridCoordinate,
    last_action: Action,
    current_action: Action,
    no_op_budget: u32,
    phase: Phase,
    memory: Memory,
    frontier: FrontierStack,
    pending: Option<PendingMove>,
    rng: Rng,
}

impl ExplorerAgent {
    pub fn new(id: AgentId, kind: AgentKind, no_op_budget: u32, rng: Rng) -> Self {
        let frontier = FrontierStack::new();
        let mut memory = Memory::new();
        // the trail's root entry stands for the starting cell
        memory.record_visit(GridCoordinate::ORIGIN);
        Self {
            id,
            kind,
            position: GridCoordinate::ORIGIN,
            last_action: Action::NoOp,
            current_action: Action::NoOp,
            no_op_budget,
            phase: if no_op_budget == 0 {
                Phase::Exhausted
            } else {
                Phase::Exploring
            },
            memory,
            frontier,
            pending: None,
            rng,
        }
    }

    pub fn from_config(id: AgentId, config: &ExplorerConfig) -> Self {
        Self::new(
            id,
            AgentKind::new(config.kind.clone()),
            config.no_op_budget,
            Rng::seed_from_u64(config.seed),
        )
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn kind(&self) -> &AgentKind {
        &self.kind
    }

    pub fn position(&self) -> GridCoordinate {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_action(&self) -> Action {
        self.last_action
    }

    pub fn current_action(&self) -> Action {
        self.current_action
    }

    pub fn no_op_budget(&self) -> u32 {
        self.no_op_budget
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn frontier(&self) -> &FrontierStack {
        &self.frontier
    }

    /// Entry point for harnesses that speak in string labels, e.g. `("Dirty", "None", [...])`.
    /// Nothing changes if a label is not recognised.
    pub fn program(
        &mut self,
        status: &str,
        bump: &str,
        neighbors: Vec<NeighborObservation>,
    ) -> Result<Action, VacuumWorldError> {
        let percept = ExplorerPercept::from_labels(status, bump, neighbors)?;
        Ok(self.decide(&percept))
    }

    /// Run one tick.
    pub fn decide(&mut self, percept: &ExplorerPercept) -> Action {
        if self.no_op_budget == 0 {
            return Action::NoOp;
        }

        let attempted = self.pending.take();
        if percept.is_bumped() {
            self.recover_from_bump(attempted);
        }
        self.observe_peers(&percept.neighbors);

        let action = if percept.is_dirty() {
            debug!(id = %self.id, position = %self.position, "sucking");
            Action::Suck
        } else {
            self.choose_move(&percept.neighbors)
        };
        self.last_action = self.current_action;
        self.current_action = action;
        action
    }

    fn recover_from_bump(&mut self, attempted: Option<PendingMove>) {
        match attempted {
            Some(PendingMove::Forward { from, to, action }) => {
                debug!(id = %self.id, wall = %to, "bumped into a wall");
                self.memory.record_wall(to);
                if self.frontier.peek() == Some(&FrontierEntry::new(to, action)) {
                    self.frontier.pop();
                }
                self.position = from;
            }
            Some(PendingMove::Backtrack { from, popped }) => {
                // the cell behind us was visited, so something else is standing on it
                debug!(id = %self.id, position = %from, "backtrack blocked, keeping trail");
                self.frontier.push(popped.cell, popped.action);
                self.position = from;
            }
            None => {
                debug!(id = %self.id, "bump without a pending move, ignoring");
            }
        }
    }

    fn observe_peers(&mut self, neighbors: &[NeighborObservation]) {
        for neighbor in neighbors.iter().filter(|n| n.id != self.id) {
            self.memory
                .record_peer_cell(self.position + neighbor.relative);
        }
    }

    fn choose_move(&mut self, neighbors: &[NeighborObservation]) -> Action {
        let analysis = NeighborAnalyzer::new(&self.id, &self.kind).analyze(neighbors, &mut self.rng);
        match self.pick_forward(&analysis) {
            Some(action) => self.commit_forward(action),
            None => self.backtrack(&analysis),
        }
    }

    /// Neighbor-driven candidates first, farthest neighbor first, then the fixed cardinal order.
    fn pick_forward(&self, analysis: &NeighborAnalysis) -> Option<Action> {
        analysis
            .ranked_directions
            .iter()
            .flat_map(|ranked| ranked.candidates.iter().copied())
            .chain(Action::CARDINALS)
            .find(|action| {
                analysis.allows(*action)
                    && self
                        .memory
                        .is_unexplored(&action.destination(self.position))
            })
    }

    fn commit_forward(&mut self, action: Action) -> Action {
        let from = self.position;
        let to = action.destination(from);
        self.pending = Some(PendingMove::Forward { from, to, action });
        self.position = to;
        self.frontier.push(to, action);
        self.memory.record_visit(to);
        self.phase = Phase::Exploring;
        debug!(id = %self.id, %from, %to, %action, "exploring");
        action
    }

    fn backtrack(&mut self, analysis: &NeighborAnalysis) -> Action {
        let Some((entry, reverse)) = self
            .frontier
            .peek_move()
            .and_then(|entry| entry.action.reverse().map(|reverse| (*entry, reverse)))
        else {
            debug!(id = %self.id, position = %self.position, "nothing left to explore");
            return self.idle();
        };

        if !analysis.allows(reverse) {
            debug!(id = %self.id, %reverse, "backtrack blocked by a neighbor, waiting");
            return self.idle();
        }

        self.frontier.pop();
        let from = self.position;
        self.pending = Some(PendingMove::Backtrack {
            from,
            popped: entry,
        });
        self.position = reverse.destination(from);
        self.phase = Phase::Backtracking;
        debug!(id = %self.id, %from, to = %self.position, %reverse, "backtracking");
        reverse
    }

    fn idle(&mut self) -> Action {
        self.no_op_budget = self.no_op_budget.saturating_sub(1);
        if self.no_op_budget == 0 {
            info!(id = %self.id, visited = self.memory.visited().len(), "no-op budget spent, going inert");
            self.phase = Phase::Exhausted;
        }
        Action::NoOp
    }
}

impl Agent for ExplorerAgent {
    type Action = Action;
    type Percept = ExplorerPercept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        self.decide(percept)
    }
}
