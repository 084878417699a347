use crate::config::EngineConfig;
use crate::constants::{PLAYER_FACING, PURSUER_FACING};
use crate::error::SetupError;
use crate::pickups::Pickups;
use crate::rng::Rng;
use crate::session::Session;
use crate::types::{
    Direction, GameEvent, MazeInit, Mover, PickupKind, PlayerView, Position, PursuerKind,
    PursuerState, PursuerView, Snapshot,
};
use crate::world::{generate_world, Grid};

mod collision;
mod movement;
mod targeting;
mod utils;

pub use self::movement::try_move;
pub use self::targeting::{chase_target, choose_direction};
pub(crate) use self::utils::manhattan;

use self::utils::distance_sq;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerAgent {
    pub position: Position,
    pub facing: Direction,
    pub requested: Direction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PursuerAgent {
    pub kind: PursuerKind,
    pub position: Position,
    pub facing: Direction,
    pub target: Position,
    pub state: PursuerState,
    pub home: Position,
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    config: EngineConfig,
    grid: Grid,
    level_pickups: Pickups,
    pickups: Pickups,
    player: PlayerAgent,
    pursuers: Vec<PursuerAgent>,
    session: Session,
    rng: Rng,
    events: Vec<GameEvent>,

    running: bool,
    elapsed_ms: u64,
    tick_counter: u64,
    vulnerable_until: Option<u64>,
    paused_until: Option<u64>,
}

impl GameEngine {
    pub fn new(config: EngineConfig, session: Session, seed: u32) -> Result<Self, SetupError> {
        let grid = generate_world(&config)?;
        let level_pickups = Pickups::initialize(&grid)?;
        let player = spawn_player(&config);
        let pursuers = spawn_pursuers(&config);
        Ok(Self {
            pickups: level_pickups.clone(),
            level_pickups,
            config,
            grid,
            player,
            pursuers,
            session,
            rng: Rng::new(seed),
            events: Vec::new(),
            running: false,
            elapsed_ms: 0,
            tick_counter: 0,
            vulnerable_until: None,
            paused_until: None,
        })
    }

    pub fn start_game(&mut self) {
        self.session.start();
        self.setup_level();
        self.running = true;
        self.events.push(GameEvent::GameStarted {
            level: self.session.level(),
        });
    }

    pub fn stop_game(&mut self) {
        self.running = false;
        self.cancel_timers();
    }

    pub fn request_direction(&mut self, dir: Direction) {
        self.player.requested = dir;
    }

    pub fn tick(&mut self) {
        self.step(self.config.tick_ms);
    }

    pub fn step(&mut self, dt_ms: u64) {
        if !self.running {
            return;
        }
        self.tick_counter += 1;
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        let now_ms = self.elapsed_ms;

        self.poll_timers(now_ms);
        if self.paused_until.is_some() {
            return;
        }

        self.move_player(now_ms);
        self.move_pursuers();
        self.resolve_collisions(now_ms);
        if !self.running {
            return;
        }
        self.check_level_cleared();
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        Snapshot {
            tick: self.tick_counter,
            elapsed_ms: self.elapsed_ms,
            player: PlayerView {
                x: self.player.position.x,
                y: self.player.position.y,
                facing: self.player.facing,
                requested: self.player.requested,
            },
            pursuers: self
                .pursuers
                .iter()
                .map(|p| PursuerView {
                    kind: p.kind,
                    x: p.position.x,
                    y: p.position.y,
                    facing: p.facing,
                    target: p.target,
                    state: p.state,
                })
                .collect(),
            regular_pickups: self.pickups.regular().iter().copied().collect(),
            power_pickups: self.pickups.power().iter().copied().collect(),
            vulnerable: self.is_vulnerable(),
            paused: self.is_paused(),
            session: self.session.view(),
            events: if include_events {
                std::mem::take(&mut self.events)
            } else {
                Vec::new()
            },
        }
    }

    pub fn get_maze_init(&self) -> MazeInit {
        self.grid.to_maze_init()
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.session.toggle_sound()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pickups(&self) -> &Pickups {
        &self.pickups
    }

    pub fn player(&self) -> &PlayerAgent {
        &self.player
    }

    pub fn pursuers(&self) -> &[PursuerAgent] {
        &self.pursuers
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused_until.is_some()
    }

    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable_until.is_some()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_counter
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    fn poll_timers(&mut self, now_ms: u64) {
        if self.vulnerable_until.is_some_and(|until| now_ms >= until) {
            self.end_vulnerability();
        }
        if self.paused_until.is_some_and(|until| now_ms >= until) {
            self.paused_until = None;
            self.events.push(GameEvent::Resumed);
        }
    }

    fn cancel_timers(&mut self) {
        self.vulnerable_until = None;
        self.paused_until = None;
    }

    fn check_level_cleared(&mut self) {
        if !self.pickups.is_empty() {
            return;
        }
        self.events.push(GameEvent::LevelCleared {
            level: self.session.level(),
        });
        self.session.advance_level();
        self.setup_level();
    }

    fn setup_level(&mut self) {
        self.pickups = self.level_pickups.clone();
        self.reset_agents();
        self.cancel_timers();
    }

    fn reset_agents(&mut self) {
        self.player = spawn_player(&self.config);
        self.pursuers = spawn_pursuers(&self.config);
    }
}

fn spawn_player(config: &EngineConfig) -> PlayerAgent {
    PlayerAgent {
        position: config.player_spawn,
        facing: PLAYER_FACING,
        requested: PLAYER_FACING,
    }
}

fn spawn_pursuers(config: &EngineConfig) -> Vec<PursuerAgent> {
    config
        .pursuers
        .iter()
        .map(|spec| PursuerAgent {
            kind: spec.kind,
            position: spec.spawn,
            facing: PURSUER_FACING,
            target: spec.spawn,
            state: PursuerState::Scatter,
            home: spec.home,
        })
        .collect()
}
