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

//! Reading the other agents around the explorer.
//!
//! Two things come out of a tick's neighbor list: the moves that would bring the explorer next
//! to somebody (the forbidden deltas), and a preference order over directions, farthest
//! neighbor first.

use rand::seq::SliceRandom;
use tracing::trace;

use crate::coordinate::{Action, GridCoordinate};
use crate::percept::{AgentId, AgentKind, NeighborObservation};
use crate::{HashSet, Rng};

/// Directions suggested by one neighbor, with that neighbor's distance from the explorer.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDirection {
    pub distance: f64,
    pub candidates: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborAnalysis {
    /// Relative cells the explorer must not step onto this tick.
    pub forbidden: HashSet<GridCoordinate>,

    /// Sorted by descending distance.
    pub ranked_directions: Vec<RankedDirection>,
}

impl NeighborAnalysis {
    pub fn allows(&self, action: Action) -> bool {
        !self.forbidden.contains(&action.delta())
    }
}

/// NeighborAnalyzer knows who the explorer is, so it can tell its own entry and its clones apart
/// from everybody else.
#[derive(Debug, Clone)]
pub struct NeighborAnalyzer<'a> {
    id: &'a AgentId,
    kind: &'a AgentKind,
}

impl<'a> NeighborAnalyzer<'a> {
    pub fn new(id: &'a AgentId, kind: &'a AgentKind) -> Self {
        Self { id, kind }
    }

    pub fn analyze(&self, neighbors: &[NeighborObservation], rng: &mut Rng) -> NeighborAnalysis {
        let mut analysis = NeighborAnalysis::default();
        for neighbor in neighbors.iter().filter(|n| n.id != *self.id) {
            // a clone standing on our cell is not an obstacle
            if !neighbor.relative.is_origin() {
                analysis
                    .forbidden
                    .extend(neighbor.relative.with_axis_neighbors());
            }

            let candidates = self.candidates_for(neighbor, rng);
            if !candidates.is_empty() {
                analysis.ranked_directions.push(RankedDirection {
                    distance: neighbor.relative.euclidean_distance(),
                    candidates,
                });
            }
        }
        analysis
            .ranked_directions
            .sort_by(|a, b| b.distance.total_cmp(&a.distance));
        trace!(
            forbidden = analysis.forbidden.len(),
            ranked = analysis.ranked_directions.len(),
            "analyzed neighbors"
        );
        analysis
    }

    fn candidates_for(&self, neighbor: &NeighborObservation, rng: &mut Rng) -> Vec<Action> {
        if neighbor.kind != *self.kind {
            return toward(neighbor.relative).into_iter().collect();
        }
        if neighbor.relative.is_origin() {
            return Action::CARDINALS[..].choose(rng).copied().into_iter().collect();
        }
        // mirror what the clone does so the two drift apart
        toward(neighbor.relative)
            .and_then(|action| action.reverse())
            .into_iter()
            .collect()
    }
}

/// The single axis-aligned move that closes the larger gap to `relative`.
pub fn toward(relative: GridCoordinate) -> Option<Action> {
    if relative.x != 0 && relative.x.unsigned_abs() >= relative.y.unsigned_abs() {
        if relative.x < 0 {
            Some(Action::West)
        } else {
            Some(Action::East)
        }
    } else if relative.y < 0 {
        Some(Action::South)
    } else if relative.y > 0 {
        Some(Action::North)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    use super::*;
    use crate::explorer::ExplorerAgent;
    use crate::percept::{BumpStatus, DirtStatus, ExplorerPercept};

    fn me() -> (AgentId, AgentKind) {
        (AgentId(1), AgentKind::new("AgentX"))
    }

    fn observation(id: u64, kind: &str, x: i32, y: i32) -> NeighborObservation {
        NeighborObservation::new(AgentId(id), AgentKind::new(kind), GridCoordinate::new(x, y))
    }

    #[test]
    fn test_toward() {
        assert_eq!(toward(GridCoordinate::new(-3, 1)), Some(Action::West));
        assert_eq!(toward(GridCoordinate::new(3, -1)), Some(Action::East));
        assert_eq!(toward(GridCoordinate::new(1, -3)), Some(Action::South));
        assert_eq!(toward(GridCoordinate::new(0, 2)), Some(Action::North));
        assert_eq!(toward(GridCoordinate::new(2, 2)), Some(Action::East));
        assert_eq!(toward(GridCoordinate::ORIGIN), None);
    }

    #[test]
    fn test_empty_neighbors_forbid_nothing() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(42);
        let analysis = NeighborAnalyzer::new(&id, &kind).analyze(&[], &mut rng);
        assert!(analysis.forbidden.is_empty());
        assert!(analysis.ranked_directions.is_empty());
    }

    #[test]
    fn test_other_kind_forbids_five_cells_and_attracts() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(42);
        let analysis = NeighborAnalyzer::new(&id, &kind)
            .analyze(&[observation(2, "AgentY", 2, 0)], &mut rng);

        assert_eq!(analysis.forbidden.len(), 5);
        for cell in [(2, 0), (1, 0), (3, 0), (2, 1), (2, -1)] {
            assert!(analysis
                .forbidden
                .contains(&GridCoordinate::new(cell.0, cell.1)));
        }
        assert!(!analysis.allows(Action::East));
        assert!(analysis.allows(Action::West));

        assert_eq!(analysis.ranked_directions.len(), 1);
        assert_abs_diff_eq!(analysis.ranked_directions[0].distance, 2.0);
        assert_eq!(analysis.ranked_directions[0].candidates, vec![Action::East]);
    }

    #[test]
    fn test_clone_at_distance_is_mirrored() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(42);
        let analysis = NeighborAnalyzer::new(&id, &kind)
            .analyze(&[observation(2, "AgentX", 0, 3)], &mut rng);
        assert_eq!(analysis.ranked_directions[0].candidates, vec![Action::South]);
    }

    #[test]
    fn test_colocated_clone_is_not_an_obstacle() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(7);
        let analysis = NeighborAnalyzer::new(&id, &kind)
            .analyze(&[observation(2, "AgentX", 0, 0)], &mut rng);
        assert!(analysis.forbidden.is_empty());
        assert_eq!(analysis.ranked_directions.len(), 1);
        let candidates = &analysis.ranked_directions[0].candidates;
        assert_eq!(candidates.len(), 1);
        assert!(Action::CARDINALS.contains(&candidates[0]));
    }

    #[test]
    fn test_own_entry_is_ignored() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(42);
        let analysis = NeighborAnalyzer::new(&id, &kind)
            .analyze(&[observation(1, "AgentX", 0, 0)], &mut rng);
        assert_eq!(analysis, NeighborAnalysis::default());
    }

    #[test]
    fn test_toward_extreme_offsets() {
        assert_eq!(toward(GridCoordinate::new(i32::MIN, 0)), Some(Action::West));
        assert_eq!(toward(GridCoordinate::new(0, i32::MIN)), Some(Action::South));
        assert_eq!(toward(GridCoordinate::new(i32::MAX, i32::MIN)), Some(Action::South));
    }

    #[test]
    fn test_extreme_offsets_reach_a_decision() {
        let extremes = [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (0, i32::MIN),
            (i32::MAX, i32::MIN),
            (i32::MIN, i32::MAX),
        ];
        for (x, y) in extremes {
            for kind in ["AgentX", "AgentY"] {
                let mut agent = ExplorerAgent::new(
                    AgentId(1),
                    AgentKind::new("AgentX"),
                    10,
                    Rng::seed_from_u64(42),
                );
                let percept = ExplorerPercept::new(
                    DirtStatus::Clean,
                    BumpStatus::None,
                    vec![observation(2, kind, x, y)],
                );
                let action = agent.decide(&percept);
                assert!(Action::CARDINALS.contains(&action), "({}, {}) {}: {:?}", x, y, kind, action);
                // moving again with the neighbor still far away resolves against the new cell
                let action = agent.decide(&percept);
                assert!(action.is_move() || action == Action::NoOp);
            }
        }
    }

    #[test]
    fn test_farthest_neighbor_ranked_first() {
        let (id, kind) = me();
        let mut rng = Rng::seed_from_u64(42);
        let analysis = NeighborAnalyzer::new(&id, &kind).analyze(
            &[
                observation(2, "AgentY", 1, 1),
                observation(3, "AgentY", -4, 0),
                observation(4, "AgentY", 0, -2),
            ],
            &mut rng,
        );
        let distances: Vec<f64> = analysis
            .ranked_directions
            .iter()
            .map(|r| r.distance)
            .collect();
        assert_abs_diff_eq!(distances[0], 4.0);
        assert_abs_diff_eq!(distances[1], 2.0);
        assert_abs_diff_eq!(distances[2], std::f64::consts::SQRT_2);
        assert_eq!(analysis.ranked_directions[0].candidates, vec![Action::West]);
    }
}
