use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    // Enumeration order also serves as the pursuer tie-break order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" | "w" => Some(Self::Up),
            "down" | "s" => Some(Self::Down),
            "left" | "a" => Some(Self::Left),
            "right" | "d" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(self, dir: Direction) -> Self {
        let (dx, dy) = dir.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn moved_by(self, dir: Direction, steps: i32) -> Self {
        (0..steps).fold(self, |pos, _| pos.moved(dir))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Wall,
    Open,
    Restricted,
    Tunnel,
}

impl Cell {
    pub fn from_tile(tile: char) -> Option<Self> {
        match tile {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Open),
            '-' => Some(Self::Restricted),
            '=' => Some(Self::Tunnel),
            _ => None,
        }
    }

    pub fn tile(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open => '.',
            Self::Restricted => '-',
            Self::Tunnel => '=',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mover {
    Player,
    Pursuer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerKind {
    Direct,
    Ambusher,
    Flanker,
    Conditional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuerState {
    Chase,
    Scatter,
    Vulnerable,
    Captured,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    None,
    Regular,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Background,
    Chomp,
    Death,
    PursuerEaten,
    PowerPickup,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        level: u32,
    },
    PickupEaten {
        x: i32,
        y: i32,
    },
    PowerPickupEaten {
        x: i32,
        y: i32,
    },
    PursuerCaptured {
        kind: PursuerKind,
    },
    PlayerCaught {
        #[serde(rename = "livesLeft")]
        lives_left: u32,
    },
    VulnerabilityEnded,
    Resumed,
    LevelCleared {
        level: u32,
    },
    GameOver {
        score: u32,
        level: u32,
    },
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::GameStarted { .. } => Some(SoundCue::Background),
            Self::PickupEaten { .. } => Some(SoundCue::Chomp),
            Self::PowerPickupEaten { .. } => Some(SoundCue::PowerPickup),
            Self::PursuerCaptured { .. } => Some(SoundCue::PursuerEaten),
            Self::PlayerCaught { .. } => Some(SoundCue::Death),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub facing: Direction,
    #[serde(rename = "requestedDir")]
    pub requested: Direction,
}

#[derive(Clone, Debug, Serialize)]
pub struct PursuerView {
    pub kind: PursuerKind,
    pub x: i32,
    pub y: i32,
    pub facing: Direction,
    pub target: Position,
    pub state: PursuerState,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionView {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub active: bool,
    pub over: bool,
    #[serde(rename = "soundEnabled")]
    pub sound_enabled: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct MazeInit {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
    pub player: PlayerView,
    pub pursuers: Vec<PursuerView>,
    #[serde(rename = "regularPickups")]
    pub regular_pickups: Vec<Position>,
    #[serde(rename = "powerPickups")]
    pub power_pickups: Vec<Position>,
    pub vulnerable: bool,
    pub paused: bool,
    pub session: SessionView,
    pub events: Vec<GameEvent>,
}
