use std::fmt;

use crate::types::{Position, PursuerKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    InvalidDimensions { width: i32, height: i32 },
    InvalidTickPeriod,
    RaggedLayout { row: usize, expected: usize, actual: usize },
    UnknownTile { x: i32, y: i32, tile: char },
    PowerCornerOutOfBounds { corner: Position },
    PowerCornerBlocked { corner: Position },
    SpawnOutOfBounds { what: &'static str, at: Position },
    SpawnOnWall { what: &'static str, at: Position },
    PlayerSpawnRestricted { at: Position },
    PursuerRoster { missing: Option<PursuerKind>, count: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions: {width}x{height}")
            }
            Self::InvalidTickPeriod => write!(f, "tick period must be at least 1 ms"),
            Self::RaggedLayout {
                row,
                expected,
                actual,
            } => write!(
                f,
                "layout row {row} has {actual} tiles, expected {expected}"
            ),
            Self::UnknownTile { x, y, tile } => {
                write!(f, "unknown layout tile {tile:?} at ({x},{y})")
            }
            Self::PowerCornerOutOfBounds { corner } => write!(
                f,
                "power pickup corner ({},{}) is outside the maze",
                corner.x, corner.y
            ),
            Self::PowerCornerBlocked { corner } => write!(
                f,
                "power pickup corner ({},{}) is not an open cell",
                corner.x, corner.y
            ),
            Self::SpawnOutOfBounds { what, at } => {
                write!(f, "{what} at ({},{}) is outside the maze", at.x, at.y)
            }
            Self::SpawnOnWall { what, at } => {
                write!(f, "{what} at ({},{}) is a wall", at.x, at.y)
            }
            Self::PlayerSpawnRestricted { at } => write!(
                f,
                "player spawn ({},{}) is inside the restricted zone",
                at.x, at.y
            ),
            Self::PursuerRoster { missing, count } => match missing {
                Some(kind) => write!(f, "pursuer roster lacks a {kind:?} pursuer"),
                None => write!(f, "pursuer roster must have 4 entries, got {count}"),
            },
        }
    }
}

impl std::error::Error for SetupError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "failed to read config: {error}"),
            Self::Parse(error) => write!(f, "failed to parse config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Parse(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error)
    }
}
