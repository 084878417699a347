use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use maze_chase::autopilot::Autopilot;
use maze_chase::config::EngineConfig;
use maze_chase::engine::GameEngine;
use maze_chase::session::Session;
use maze_chase::types::Direction;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

type SharedState = Arc<Mutex<PlayState>>;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    lives: Option<u32>,
    #[arg(long)]
    autopilot: bool,
    #[arg(long)]
    max_ticks: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Start,
    Stop,
    Sound,
    Quit,
}

struct PlayState {
    engine: GameEngine,
    autopilot: Option<Autopilot>,
    quit: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random::<u32>);

    let mut config = match cli.config.as_deref() {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                emit_log("error", "config_load_failed", json!({ "error": error.to_string() }));
                std::process::exit(2);
            }
        },
        None => EngineConfig::default(),
    };
    if let Some(lives) = cli.lives {
        config.starting_lives = lives.max(1);
    }
    let tick_ms = config.tick_ms;

    let session = Session::new(config.starting_lives);
    let engine = match GameEngine::new(config, session, seed) {
        Ok(engine) => engine,
        Err(error) => {
            emit_log("error", "setup_failed", json!({ "error": error.to_string() }));
            std::process::exit(2);
        }
    };

    println!(
        "{}",
        json!({
            "type": "init",
            "seed": seed,
            "maze": engine.get_maze_init(),
        })
    );
    emit_log(
        "info",
        "play_started",
        json!({ "seed": seed, "tickMs": tick_ms, "autopilot": cli.autopilot }),
    );

    let state: SharedState = Arc::new(Mutex::new(PlayState {
        engine,
        autopilot: cli.autopilot.then(|| Autopilot::new(seed)),
        quit: false,
    }));
    if cli.autopilot {
        state.lock().await.engine.start_game();
    }
    start_input_reader(state.clone());

    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    loop {
        interval.tick().await;
        let mut guard = state.lock().await;
        if guard.quit {
            break;
        }
        for line in tick_play(&mut guard) {
            println!("{line}");
        }
        if cli
            .max_ticks
            .is_some_and(|limit| guard.engine.tick_count() >= limit)
        {
            break;
        }
    }

    let guard = state.lock().await;
    let session = guard.engine.session();
    emit_log(
        "info",
        "play_finished",
        json!({
            "ticks": guard.engine.tick_count(),
            "score": session.score(),
            "level": session.level(),
            "over": session.is_over(),
        }),
    );
}

fn start_input_reader(state: SharedState) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(error) => {
                    emit_log("warn", "stdin_read_failed", json!({ "error": error.to_string() }));
                    break;
                }
            };
            let Some(command) = parse_command(&line) else {
                if !line.trim().is_empty() {
                    emit_log("warn", "unknown_command", json!({ "input": line.trim() }));
                }
                continue;
            };
            let mut guard = state.lock().await;
            apply_command(&mut guard, command);
            if guard.quit {
                break;
            }
        }
    });
}

fn parse_command(line: &str) -> Option<Command> {
    let input = line.trim().to_ascii_lowercase();
    if let Some(dir) = Direction::parse_move(&input) {
        return Some(Command::Move(dir));
    }
    match input.as_str() {
        "start" => Some(Command::Start),
        "stop" => Some(Command::Stop),
        "sound" => Some(Command::Sound),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

fn apply_command(state: &mut PlayState, command: Command) {
    match command {
        Command::Move(dir) => state.engine.request_direction(dir),
        Command::Start => state.engine.start_game(),
        Command::Stop => state.engine.stop_game(),
        Command::Sound => {
            let enabled = state.engine.toggle_sound();
            emit_log("info", "sound_toggled", json!({ "enabled": enabled }));
        }
        Command::Quit => state.quit = true,
    }
}

fn tick_play(state: &mut PlayState) -> Vec<String> {
    if let Some(pilot) = state.autopilot.as_mut() {
        if state.engine.is_running() {
            let dir = pilot.choose(&state.engine);
            state.engine.request_direction(dir);
        }
    }
    let was_running = state.engine.is_running();
    state.engine.tick();
    let snapshot = state.engine.build_snapshot(true);
    if !was_running && snapshot.events.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    if snapshot.session.sound_enabled {
        for cue in snapshot.events.iter().filter_map(|event| event.sound_cue()) {
            lines.push(json!({ "type": "sound", "cue": cue }).to_string());
        }
    }
    lines.push(json!({ "type": "state", "snapshot": snapshot }).to_string());
    lines
}

fn emit_log(level: &str, event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "timestampMs": Utc::now().timestamp_millis(),
            "level": level,
            "event": event,
            "details": details,
        })
    );
}
