//! sim-runner: headless runner for the rock / paper / scissors arena.
//!
//! Usage:
//!   sim-runner --seed 12345 --per-kind 10 --max-ticks 20000
//!   sim-runner --config data/arena.json --report-every 500
//!   sim-runner --seed 12345 --ipc-mode

use anyhow::Result;
use rps_core::{
    command::ControlCommand,
    config::SimConfig,
    engine::SimEngine,
    kind::{Kind, KindCounts},
    snapshot::{EntitySnapshot, FrameSink, FrameSnapshot},
    steering_subsystem::SteeringStats,
    types::Tick,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick {
        count: u64,
    },
    Command {
        command: ControlCommand,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    tick: Tick,
    generation: u64,
    paused: bool,
    counts: KindCounts,
    winner: Option<Kind>,
    steering: Option<SteeringStats>,
    entities: Vec<EntitySnapshot>,
}

/// Logs population every `every` frames and announces the winner.
struct ProgressSink {
    every: u64,
}

impl FrameSink for ProgressSink {
    fn on_frame(&mut self, frame: &FrameSnapshot) {
        if self.every > 0 && frame.tick.is_multiple_of(self.every) {
            log::info!(
                "tick={} rock={} paper={} scissors={}",
                frame.tick,
                frame.counts.rock,
                frame.counts.paper,
                frame.counts.scissors
            );
        }
    }

    fn on_winner(&mut self, winner: Kind, frame: &FrameSnapshot) {
        println!("The winner is {} ({winner}) after {} ticks!", winner.glyph(), frame.tick);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let max_ticks = parse_arg(&args, "--max-ticks", 100_000u64);
    let report_every = parse_arg(&args, "--report-every", 1_000u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SimConfig::load(&w[1])?,
        None => SimConfig::default(),
    };
    config.population_per_kind = parse_arg(&args, "--per-kind", config.population_per_kind);
    config.arena_width = parse_arg(&args, "--width", config.arena_width);
    config.arena_height = parse_arg(&args, "--height", config.arena_height);

    if !ipc_mode {
        println!("Rock Paper Scissors — sim-runner");
        println!("  seed:       {seed}");
        println!("  per kind:   {}", config.population_per_kind);
        println!("  arena:      {}x{}", config.arena_width, config.arena_height);
        println!("  max ticks:  {max_ticks}");
        println!();
    }

    let run_id = format!("run-{seed}-{}", unix_seconds());
    let mut engine = SimEngine::build(run_id.clone(), seed, config)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        let mut sink = ProgressSink { every: report_every };
        let winner = engine.run_until_concluded(max_ticks, &mut sink)?;
        if winner.is_none() {
            println!("No winner after {max_ticks} ticks.");
        }
        print_summary(&engine, &run_id);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                engine.run_ticks(count)?;
            }
            IpcCommand::GetState => {}
            IpcCommand::Command { command } => {
                engine.apply_command(&command)?;
            }
        }
        let state = build_ui_state(engine);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &SimEngine) -> UiState {
    let frame = engine.frame();
    UiState {
        tick: frame.tick,
        generation: engine.generation(),
        paused: engine.clock.paused,
        counts: frame.counts,
        winner: frame.winner,
        steering: engine.steering_stats(),
        entities: frame.entities,
    }
}

fn print_summary(engine: &SimEngine, run_id: &str) {
    let counts = engine.counts();
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  run_id:      {run_id}");
    println!("  seed:        {}", engine.rng_bank.master_seed());
    println!("  final tick:  {}", engine.clock.current_tick);
    println!("  rock:        {}", counts.rock);
    println!("  paper:       {}", counts.paper);
    println!("  scissors:    {}", counts.scissors);
    match engine.winner() {
        Some(w) => println!("  winner:      {} {w}", w.glyph()),
        None => println!("  winner:      (none)"),
    }

    if let Some(stats) = engine.steering_stats() {
        println!();
        println!("=== STEERING ===");
        println!("  chase steps:     {}", stats.chase_steps);
        println!("  evade steps:     {}", stats.evade_steps);
        println!("  conversions:     {}", stats.conversions);
        println!("  escapes started: {}", stats.escapes_started);
        println!("  escapes ended:   {}", stats.escapes_ended);
        println!("  held frames:     {}", stats.held);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
