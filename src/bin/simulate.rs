use chrono::{SecondsFormat, Utc};
use clap::Parser;
use maze_chase::autopilot::Autopilot;
use maze_chase::config::EngineConfig;
use maze_chase::engine::GameEngine;
use maze_chase::session::Session;
use maze_chase::types::{GameEvent, Mover, Position, Snapshot};
use maze_chase::world::Grid;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    single: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long)]
    lives: Option<u32>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    seed: u32,
    #[serde(rename = "maxTicks")]
    max_ticks: u64,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u32,
    outcome: String,
    ticks: u64,
    #[serde(rename = "elapsedMs")]
    elapsed_ms: u64,
    score: u32,
    level: u32,
    #[serde(rename = "livesLeft")]
    lives_left: u32,
    #[serde(rename = "pickupsEaten")]
    pickups_eaten: u32,
    #[serde(rename = "powerPickupsEaten")]
    power_pickups_eaten: u32,
    #[serde(rename = "pursuersCaptured")]
    pursuers_captured: u32,
    catches: u32,
    #[serde(rename = "levelsCleared")]
    levels_cleared: u32,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioRunResult {
    #[serde(flatten)]
    result: ScenarioResultLine,
    #[serde(rename = "anomalyRecords")]
    anomaly_records: Vec<AnomalyRecord>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(rename = "generatedAt")]
    generated_at: String,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageScore")]
    average_score: u32,
    #[serde(rename = "outcomeCounts")]
    outcome_counts: BTreeMap<String, usize>,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: i64,
    level: String,
    event: String,
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

#[derive(Clone, Copy, Debug)]
struct Observed {
    remaining: usize,
    level: u32,
    score: u32,
}

impl Observed {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            remaining: snapshot.regular_pickups.len() + snapshot.power_pickups.len(),
            level: snapshot.session.level,
            score: snapshot.session.score,
        }
    }
}

struct RunLog {
    match_id: String,
}

impl RunLog {
    fn new(match_id: Option<String>, seed_hint: u32) -> Self {
        let match_id = match_id
            .unwrap_or_else(|| format!("sim-{seed_hint}-{}", Utc::now().timestamp_millis()));
        Self { match_id }
    }

    fn emit(
        &self,
        level: &str,
        event: &str,
        scenario: Option<&Scenario>,
        tick: Option<u64>,
        details: Value,
    ) {
        let line = StructuredLogLine {
            timestamp_ms: Utc::now().timestamp_millis(),
            level: level.to_string(),
            event: event.to_string(),
            match_id: self.match_id.clone(),
            scenario: scenario.map(|s| s.name.clone()),
            seed: scenario.map(|s| s.seed),
            tick,
            details,
        };
        match serde_json::to_string(&line) {
            Ok(text) => eprintln!("{text}"),
            Err(error) => eprintln!("log encode failed: {error}"),
        }
    }

    fn fail(&self, event: &str, scenario: Option<&Scenario>, details: Value) -> ! {
        self.emit("error", event, scenario, None, details);
        std::process::exit(2);
    }
}

#[derive(Default)]
struct AnomalyTracker {
    seen: HashSet<String>,
    unique: Vec<String>,
    records: Vec<AnomalyRecord>,
}

impl AnomalyTracker {
    fn record(&mut self, tick: u64, message: String) {
        if self.seen.insert(message.clone()) {
            self.unique.push(message.clone());
        }
        self.records.push(AnomalyRecord { tick, message });
    }
}

impl RunSummary {
    fn from_results(match_id: &str, scenarios: Vec<ScenarioResultLine>, anomaly_count: usize) -> Self {
        let mut outcome_counts = BTreeMap::new();
        for scenario in &scenarios {
            *outcome_counts.entry(scenario.outcome.clone()).or_insert(0) += 1;
        }
        let total_score: u64 = scenarios.iter().map(|s| u64::from(s.score)).sum();
        let average_score = total_score
            .checked_div(scenarios.len() as u64)
            .unwrap_or(0) as u32;
        Self {
            match_id: match_id.to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            scenario_count: scenarios.len(),
            anomaly_count,
            average_score,
            outcome_counts,
            scenarios,
        }
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()
    }
}

fn main() {
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let log = RunLog::new(cli.match_id.clone(), seed_hint);

    let config = resolve_config(&cli)
        .unwrap_or_else(|message| log.fail("config_load_failed", None, json!({ "error": message })));

    let mut results = Vec::new();
    let mut total_anomalies = 0usize;

    for scenario in &scenarios {
        log.emit(
            "info",
            "scenario_started",
            Some(scenario),
            None,
            json!({
                "maxTicks": scenario.max_ticks,
                "startingLives": config.starting_lives,
            }),
        );

        let run = run_scenario(scenario, &config).unwrap_or_else(|message| {
            log.fail("scenario_setup_failed", Some(scenario), json!({ "error": message }))
        });

        for anomaly in &run.anomaly_records {
            log.emit(
                "warn",
                "anomaly_detected",
                Some(scenario),
                Some(anomaly.tick),
                json!({ "message": anomaly.message }),
            );
        }
        total_anomalies += run.anomaly_records.len();

        log.emit(
            "info",
            "scenario_finished",
            Some(scenario),
            Some(run.result.ticks),
            json!({
                "outcome": run.result.outcome,
                "score": run.result.score,
                "level": run.result.level,
                "anomalyCount": run.anomaly_records.len(),
            }),
        );

        println!("{}", json!(run.result));
        results.push(run.result);
    }

    let has_anomaly = results.iter().any(|result| !result.anomalies.is_empty());
    let summary = RunSummary::from_results(&log.match_id, results, total_anomalies);

    if let Some(path) = cli.summary_out.as_deref() {
        if let Err(error) = summary.save(path) {
            log.fail(
                "summary_write_failed",
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
        }
    }

    log.emit(
        "info",
        "run_finished",
        None,
        None,
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageScore": summary.average_score,
            "outcomeCounts": summary.outcome_counts,
            "summaryOut": cli.summary_out.as_ref().map(|path| path.to_string_lossy()),
        }),
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig, String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path).map_err(|error| error.to_string())?,
        None => EngineConfig::default(),
    };
    if let Some(lives) = cli.lives {
        config.starting_lives = lives.max(1);
    }
    Ok(config)
}

fn run_scenario(scenario: &Scenario, config: &EngineConfig) -> Result<ScenarioRunResult, String> {
    let session = Session::new(config.starting_lives);
    let mut engine =
        GameEngine::new(config.clone(), session, scenario.seed).map_err(|error| error.to_string())?;
    let mut pilot = Autopilot::new(scenario.seed ^ 0x9e37_79b9);

    engine.start_game();
    let mut observed = Observed::from_snapshot(&engine.build_snapshot(true));

    let mut result = ScenarioResultLine {
        scenario: scenario.name.clone(),
        seed: scenario.seed,
        outcome: String::new(),
        ticks: 0,
        elapsed_ms: 0,
        score: 0,
        level: 1,
        lives_left: config.starting_lives,
        pickups_eaten: 0,
        power_pickups_eaten: 0,
        pursuers_captured: 0,
        catches: 0,
        levels_cleared: 0,
        anomalies: Vec::new(),
    };
    let mut tracker = AnomalyTracker::default();

    while engine.is_running() && engine.tick_count() < scenario.max_ticks {
        let dir = pilot.choose(&engine);
        engine.request_direction(dir);
        engine.tick();
        let snapshot = engine.build_snapshot(true);

        for message in
            collect_snapshot_anomalies(&snapshot, engine.grid(), config.starting_lives, observed)
        {
            tracker.record(snapshot.tick, message);
        }

        for event in &snapshot.events {
            match event {
                GameEvent::PickupEaten { .. } => result.pickups_eaten += 1,
                GameEvent::PowerPickupEaten { .. } => result.power_pickups_eaten += 1,
                GameEvent::PursuerCaptured { .. } => result.pursuers_captured += 1,
                GameEvent::PlayerCaught { .. } => result.catches += 1,
                GameEvent::LevelCleared { .. } => result.levels_cleared += 1,
                _ => {}
            }
        }
        observed = Observed::from_snapshot(&snapshot);
    }

    let session = engine.session();
    result.outcome = if session.is_over() {
        "game_over"
    } else {
        "tick_limit"
    }
    .to_string();
    result.ticks = engine.tick_count();
    result.elapsed_ms = engine.elapsed_ms();
    result.score = session.score();
    result.level = session.level();
    result.lives_left = session.lives();
    result.anomalies = tracker.unique;

    Ok(ScenarioRunResult {
        result,
        anomaly_records: tracker.records,
    })
}

fn collect_snapshot_anomalies(
    snapshot: &Snapshot,
    grid: &Grid,
    starting_lives: u32,
    previous: Observed,
) -> Vec<String> {
    let mut anomalies = Vec::new();

    let regular: BTreeSet<Position> = snapshot.regular_pickups.iter().copied().collect();
    if snapshot
        .power_pickups
        .iter()
        .any(|pos| regular.contains(pos))
    {
        anomalies.push("regular and power pickups overlap".to_string());
    }

    let current = Observed::from_snapshot(snapshot);
    if current.level == previous.level {
        if current.remaining > previous.remaining {
            anomalies.push(format!(
                "pickups grew within a level: {} -> {}",
                previous.remaining, current.remaining
            ));
        }
        if previous.remaining > current.remaining + 1 {
            anomalies.push(format!(
                "more than one pickup consumed in a tick: {} -> {}",
                previous.remaining, current.remaining
            ));
        }
    } else if current.level != previous.level + 1 {
        anomalies.push(format!(
            "level jumped: {} -> {}",
            previous.level, current.level
        ));
    }
    if current.score < previous.score {
        anomalies.push(format!(
            "score decreased: {} -> {}",
            previous.score, current.score
        ));
    }

    let player = Position::new(snapshot.player.x, snapshot.player.y);
    if !grid.is_valid_move(player, Mover::Player) {
        anomalies.push(format!("player on blocked cell: ({}, {})", player.x, player.y));
    }

    let session = &snapshot.session;
    if session.lives > starting_lives {
        anomalies.push(format!("lives above start: {}", session.lives));
    }
    if session.over && (session.active || session.lives != 0) {
        anomalies.push(format!(
            "inconsistent game over: active={} lives={}",
            session.active, session.lives
        ));
    }
    if session.active && session.lives == 0 {
        anomalies.push("active session without lives".to_string());
    }
    anomalies
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = normalize_seed(cli.seed.unwrap_or_else(|| u64::from(rand::random::<u32>())));

    if cli.single || cli.max_ticks.is_some() {
        return vec![Scenario {
            name: "custom".to_string(),
            seed,
            max_ticks: cli.max_ticks.unwrap_or(3_000).clamp(1, 1_000_000),
        }];
    }

    vec![
        Scenario {
            name: "quick-check".to_string(),
            seed,
            max_ticks: 1_500,
        },
        Scenario {
            name: "long-run".to_string(),
            seed: normalize_seed(seed as u64 + 1),
            max_ticks: 20_000,
        },
    ]
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}
