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

#![warn(missing_docs)]

//! Evaluate the exploring agent over many generated rooms.

use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vacuum_explorer::config::ExplorerConfig;
use vacuum_explorer::explorer::ExplorerAgent;
use vacuum_explorer::grid_world::GridWorld;
use vacuum_explorer::percept::{AgentId, AgentKind};
use vacuum_explorer::Simulation;

const ROOMS: u64 = 256;
const WIDTH: i32 = 10;
const HEIGHT: i32 = 10;
const WALL_PROBABILITY: f64 = 0.2;
const TIME_STEPS: i32 = 2000;

struct RoomResult {
    score: i32,
    clean: usize,
    squares: usize,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vacuum_explorer=warn,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn run_room(base: &ExplorerConfig, seed: u64) -> RoomResult {
    let config = ExplorerConfig {
        seed,
        ..base.clone()
    };
    let explorer_id = AgentId(1);
    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    let environment = GridWorld::random(
        WIDTH,
        HEIGHT,
        WALL_PROBABILITY,
        &mut rng,
        explorer_id,
        AgentKind::new(config.kind.clone()),
    );
    let agent = ExplorerAgent::from_config(explorer_id, &config);
    let mut simulation = Simulation::new(environment, agent, TIME_STEPS);
    simulation.run();

    let world = simulation.environment();
    let result = RoomResult {
        score: simulation.score(),
        clean: world.clean_square_count(),
        squares: world.square_count(),
    };
    debug!(seed, score = result.score, clean = result.clean, "room done");
    result
}

// Chapter 2 Intelligent Agents, Exercise 12, for the exploring agent: run it over many initial
// wall and dirt configurations, record the performance score of each and report the average.
// Walls can cut rooms into pieces the explorer never reaches, so coverage is reported too.
//
// Usage: evaluate-explorer [config.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => ExplorerConfig::from_json_file(path)?,
        None => ExplorerConfig::default(),
    };

    let results: Vec<RoomResult> = (0..ROOMS)
        .into_par_iter()
        .map(|seed| run_room(&config, seed))
        .collect();

    let rooms = results.len() as f64;
    let average_score = results.iter().map(|r| f64::from(r.score)).sum::<f64>() / rooms;
    let average_coverage = results
        .iter()
        .map(|r| r.clean as f64 / r.squares as f64)
        .sum::<f64>()
        / rooms;
    info!(rooms = results.len(), "evaluation finished");
    println!("average score: {:.2}", average_score);
    println!("average coverage: {:.1}%", average_coverage * 100.0);
    Ok(())
}
