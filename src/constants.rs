use crate::types::{Direction, Position, PursuerKind};

pub const TICK_MS: u64 = 200;

pub const MAZE_WIDTH: i32 = 28;
pub const MAZE_HEIGHT: i32 = 31;

pub const STARTING_LIVES: u32 = 3;
pub const DOT_POINTS: u32 = 10;
pub const POWER_PICKUP_POINTS: u32 = 50;
pub const PURSUER_POINTS: u32 = 200;

pub const VULNERABILITY_MS: u64 = 10_000;
pub const CAPTURE_PAUSE_MS: u64 = 1_000;

pub const CONDITIONAL_THRESHOLD: i32 = 8;
pub const AMBUSH_LOOKAHEAD: i32 = 4;
pub const FLANK_LOOKAHEAD: i32 = 2;

pub const PLAYER_SPAWN: Position = Position { x: 14, y: 23 };
pub const PLAYER_FACING: Direction = Direction::Right;
pub const RALLY_POSITION: Position = Position { x: 14, y: 12 };
pub const PURSUER_FACING: Direction = Direction::Up;

pub fn default_pursuer_roster(width: i32, height: i32) -> [(PursuerKind, Position, Position); 4] {
    [
        (
            PursuerKind::Direct,
            Position { x: 14, y: 11 },
            Position { x: width - 2, y: 0 },
        ),
        (
            PursuerKind::Ambusher,
            Position { x: 14, y: 12 },
            Position { x: 1, y: 0 },
        ),
        (
            PursuerKind::Flanker,
            Position { x: 13, y: 12 },
            Position {
                x: width - 2,
                y: height - 2,
            },
        ),
        (
            PursuerKind::Conditional,
            Position { x: 15, y: 12 },
            Position { x: 1, y: height - 2 },
        ),
    ]
}

pub fn power_corners(width: i32, height: i32) -> [Position; 4] {
    [
        Position { x: 1, y: 1 },
        Position { x: width - 2, y: 1 },
        Position { x: 1, y: height - 2 },
        Position {
            x: width - 2,
            y: height - 2,
        },
    ]
}

pub fn wall_band_rows(height: i32) -> [i32; 2] {
    [height / 6, height / 2]
}

pub fn wall_band_columns(width: i32) -> [(i32, i32); 2] {
    let start = width / 5;
    let end = start + width / 5;
    [(start, end), (width - end, width - start)]
}
