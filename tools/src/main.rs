//! idle-runner: headless host for the incremental simulation core.
//!
//! Usage:
//!   idle-runner --ticks 60 --code --clicks 2 --config data/sim.json
//!   idle-runner --ipc-mode

use anyhow::Result;
use idle_core::{
    command::InputToken,
    config::SimConfig,
    engine::TickReport,
    game::Game,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Update,
    Queue { token: String },
    Start,
    Pause,
    Stop,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ticks = parse_arg(&args, "--ticks", 60u64);
    let clicks = parse_arg(&args, "--clicks", 0u32);
    let code = args.iter().any(|a| a == "--code");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut game = Game::new(&config)?;

    if ipc_mode {
        return run_ipc_loop(&mut game);
    }

    println!("idle-runner");
    println!("  ticks:   {ticks}");
    println!("  period:  {:?}", config.tick_period());
    println!("  config:  {}", config_path.unwrap_or("(defaults)"));
    println!();

    fast_forward(&mut game, &config, ticks, code, clicks);
    print_summary(&game)
}

/// Run `ticks` ticks of exactly one period each against a synthetic clock.
fn fast_forward(game: &mut Game, config: &SimConfig, ticks: u64, code: bool, clicks: u32) {
    let t0 = Instant::now();
    game.start_at(t0);

    let mut now = t0;
    for _ in 0..ticks {
        if code {
            game.queue_input(InputToken::MANUAL_CODE);
        }
        for _ in 0..clicks {
            game.queue_input(InputToken::MANUAL_CLICK);
        }
        now += config.tick_period();
        if let Some(report) = game.update_at(now) {
            log_failures(&report);
        }
    }
    game.stop();
}

fn run_ipc_loop(game: &mut Game) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    game.start();
    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
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
            IpcCommand::GetState => {}
            IpcCommand::Update => {
                if let Some(report) = game.update() {
                    log_failures(&report);
                }
            }
            IpcCommand::Queue { token } => game.queue_input(InputToken::from(token)),
            IpcCommand::Start => game.start(),
            IpcCommand::Pause => game.pause(),
            IpcCommand::Stop => game.stop(),
        }
        writeln!(stdout, "{}", serde_json::to_string(&game.snapshot())?)?;
        stdout.flush()?;
    }
    game.stop();
    Ok(())
}

fn log_failures(report: &TickReport) {
    for failure in &report.failures {
        log::warn!("tick={} {failure}", report.tick);
    }
}

fn print_summary(game: &Game) -> Result<()> {
    let snapshot = game.snapshot();

    println!("=== RUN SUMMARY ===");
    println!("  final tick:     {}", snapshot.tick);
    println!("  active timers:  {}", snapshot.timers.len());
    println!();
    println!("=== RESOURCES ===");
    if snapshot.resources.is_empty() {
        println!("  (none yet)");
    }
    for (name, amount) in &snapshot.resources {
        println!("  {name:<12} {amount:>10.1}");
    }
    println!();
    println!("=== BUILDINGS ===");
    if snapshot.buildings.is_empty() {
        println!("  (none)");
    }
    for b in &snapshot.buildings {
        println!(
            "  {:<12} x{:<4} {:>6.1}/s  cost {:.0}",
            b.name, b.count, b.production_rate, b.cost
        );
    }
    for timer in &snapshot.timers {
        println!("  timer {} {:.0}%", timer.id, timer.progress * 100.0);
    }

    log::debug!("final state: {}", serde_json::to_string(&snapshot)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
