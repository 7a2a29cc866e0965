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

use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vacuum_explorer::config::ExplorerConfig;
use vacuum_explorer::coordinate::GridCoordinate;
use vacuum_explorer::explorer::ExplorerAgent;
use vacuum_explorer::grid_world::GridWorld;
use vacuum_explorer::percept::{AgentId, AgentKind};
use vacuum_explorer::Simulation;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vacuum_explorer=info,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

// Run one explorer through one randomly walled room, with a stationary agent of another kind
// parked in the far corner, and print the performance score.
//
// Usage: run-explorer-once [config.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => ExplorerConfig::from_json_file(path)?,
        None => ExplorerConfig::default(),
    };
    info!(?config, "starting");

    let width = 8;
    let height = 6;
    let explorer_id = AgentId(1);
    let mut rng = rand_pcg::Pcg64::seed_from_u64(config.seed);
    let mut environment = GridWorld::random(
        width,
        height,
        0.15,
        &mut rng,
        explorer_id,
        AgentKind::new(config.kind.clone()),
    );
    environment.add_peer(
        AgentId(2),
        AgentKind::new("AgentY"),
        GridCoordinate::new(width - 1, height - 1),
    );

    let agent = ExplorerAgent::from_config(explorer_id, &config);
    let time_steps = 1000;
    let mut simulation = Simulation::new(environment, agent, time_steps);
    simulation.run();

    let world = simulation.environment();
    info!(
        clean = world.clean_square_count(),
        squares = world.square_count(),
        phase = ?simulation.agent().phase(),
        "finished"
    );
    println!("score: {}", simulation.score());
    Ok(())
}
