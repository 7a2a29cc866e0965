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

// PEAS - Performance, Environment, Action, Sensing
//
// See:
// -  Chapter 2: Intelligent Agents, page 40

//! A depth-first exploring agent for the multi-agent vacuum world.
//!
//! The agent only ever sees its own square, whether its last move bumped, and where the other
//! agents are relative to it. From that it keeps a private map of visited cells and walls and a
//! trail it can backtrack along.

use num_traits::Zero;

pub mod config;
pub mod coordinate;
pub mod explorer;
pub mod grid_world;
pub mod memory;
pub mod neighbors;
pub mod percept;

pub type Rng = rand_pcg::Pcg64;
pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<K> = rustc_hash::FxHashSet<K>;

/// Vacuum world error. The explorer itself never fails; these come from the edges where labels
/// and configuration are read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VacuumWorldError {
    /// Square status label other than `Dirty` or `Clean`.
    #[error("unknown dirt status: {0}")]
    UnknownDirtStatus(String),

    /// Bump label other than `Bump` or `None`.
    #[error("unknown bump status: {0}")]
    UnknownBumpStatus(String),

    /// Action label that is not one of the six commands.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Perception, the Agent will return an Action.
///
/// Notice that the Agent is not aware of an Environment, it's only interface
/// is the Perception coming in then the Action going out.
pub trait Agent {
    type Action;
    type Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action;
}

/// An Environment runs a single Agent in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    type Action;
    type Percept;
    type Score: num_traits::NumAssign + Copy;

    fn percept(&self) -> Self::Percept;
    fn execute_action(&mut self, action: &Self::Action);

    /// Returns the score of the Environment. This is not cumulative or stateful. This is the score
    /// of the Environment at the current state.
    fn score(&self) -> Self::Score;
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles. The Agent's score (Performance) is continually kept up to date.
pub struct Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    environment: _Environment,
    agent: _Agent,
    time_steps: i32,
    score: _Environment::Score,
}

impl<_Environment, _Agent> Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    pub fn new(environment: _Environment, agent: _Agent, time_steps: i32) -> Self {
        Self {
            environment,
            agent,
            time_steps,
            score: _Environment::Score::zero(),
        }
    }

    pub fn run(&mut self) {
        for _ in 0..self.time_steps {
            self.step();
        }
    }

    pub fn step(&mut self) {
        let percept = self.environment.percept();
        let action = self.agent.act(&percept);
        self.environment.execute_action(&action);
        self.score += self.environment.score();
    }

    pub fn score(&self) -> <_Environment as Environment>::Score {
        self.score
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }

    pub fn agent(&self) -> &_Agent {
        &self.agent
    }
}
