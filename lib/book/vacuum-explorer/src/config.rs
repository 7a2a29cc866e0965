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

use serde::{Deserialize, Serialize};

use crate::VacuumWorldError;

/// Settings for one explorer. Any field missing from a JSON document takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// How many idle ticks the explorer may spend before it goes inert for good.
    pub no_op_budget: u32,

    /// Seed for the tie-break random source.
    pub seed: u64,

    /// Type label other agents see. Explorers with the same label treat each other as clones.
    pub kind: String,
}

impl ExplorerConfig {
    pub fn new(no_op_budget: u32, seed: u64, kind: impl Into<String>) -> Self {
        Self {
            no_op_budget,
            seed,
            kind: kind.into(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, VacuumWorldError> {
        serde_json::from_str(json).map_err(|e| VacuumWorldError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, VacuumWorldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| VacuumWorldError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new(10, 42, "AgentX")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json_str(r#"{ "no_op_budget": 3 }"#).unwrap();
        assert_eq!(config.no_op_budget, 3);
        assert_eq!(config.seed, 42);
        assert_eq!(config.kind, "AgentX");
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = ExplorerConfig::from_json_str("{ no_op_budget: ");
        assert!(matches!(result, Err(VacuumWorldError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = ExplorerConfig::from_json_file("/definitely/not/here.json");
        assert!(matches!(result, Err(VacuumWorldError::Config(_))));
    }
}
