use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    default_pursuer_roster, AMBUSH_LOOKAHEAD, CAPTURE_PAUSE_MS, CONDITIONAL_THRESHOLD,
    DOT_POINTS, FLANK_LOOKAHEAD, MAZE_HEIGHT, MAZE_WIDTH, PLAYER_SPAWN, POWER_PICKUP_POINTS,
    PURSUER_POINTS, RALLY_POSITION, STARTING_LIVES, TICK_MS, VULNERABILITY_MS,
};
use crate::error::ConfigError;
use crate::types::{Position, PursuerKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuerSpec {
    pub kind: PursuerKind,
    pub spawn: Position,
    pub home: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub width: i32,
    pub height: i32,
    pub layout: Option<Vec<String>>,
    pub tick_ms: u64,
    pub vulnerability_ms: u64,
    pub capture_pause_ms: u64,
    pub conditional_threshold: i32,
    pub ambush_lookahead: i32,
    pub flank_lookahead: i32,
    pub starting_lives: u32,
    pub dot_points: u32,
    pub power_points: u32,
    pub pursuer_points: u32,
    pub player_spawn: Position,
    pub rally: Position,
    pub pursuers: Vec<PursuerSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: MAZE_WIDTH,
            height: MAZE_HEIGHT,
            layout: None,
            tick_ms: TICK_MS,
            vulnerability_ms: VULNERABILITY_MS,
            capture_pause_ms: CAPTURE_PAUSE_MS,
            conditional_threshold: CONDITIONAL_THRESHOLD,
            ambush_lookahead: AMBUSH_LOOKAHEAD,
            flank_lookahead: FLANK_LOOKAHEAD,
            starting_lives: STARTING_LIVES,
            dot_points: DOT_POINTS,
            power_points: POWER_PICKUP_POINTS,
            pursuer_points: PURSUER_POINTS,
            player_spawn: PLAYER_SPAWN,
            rally: RALLY_POSITION,
            pursuers: default_pursuer_roster(MAZE_WIDTH, MAZE_HEIGHT)
                .into_iter()
                .map(|(kind, spawn, home)| PursuerSpec { kind, spawn, home })
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn pursuer_spec(&self, kind: PursuerKind) -> Option<&PursuerSpec> {
        self.pursuers.iter().find(|spec| spec.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use crate::error::ConfigError;
    use crate::types::{Position, PursuerKind};

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = EngineConfig::from_json(
            r#"{ "vulnerabilityMs": 2500, "conditionalThreshold": 3 }"#,
        )
        .expect("partial config parses");
        assert_eq!(config.vulnerability_ms, 2_500);
        assert_eq!(config.conditional_threshold, 3);
        assert_eq!(config.tick_ms, EngineConfig::default().tick_ms);
        assert_eq!(config.pursuers.len(), 4);
    }

    #[test]
    fn default_roster_has_one_pursuer_of_each_kind() {
        let config = EngineConfig::default();
        for kind in [
            PursuerKind::Direct,
            PursuerKind::Ambusher,
            PursuerKind::Flanker,
            PursuerKind::Conditional,
        ] {
            assert!(config.pursuer_spec(kind).is_some());
        }
        assert_eq!(
            config.pursuer_spec(PursuerKind::Direct).map(|spec| spec.home),
            Some(Position { x: 26, y: 0 })
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = EngineConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("maze-chase-missing-config")
            .join("config.json");
        let result = EngineConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
