mod algorithm;
mod chart;
mod display;
mod gui;
mod gui_data;
mod hash_rate;
mod metrics;
mod scheduler;
mod simulator;
mod state;
mod worker;

use crate::{
    algorithm::Algorithm,
    display::Display,
    gui::{Command, Gui},
    gui_data::GuiData,
    simulator::Simulator,
};
use clap::Parser;
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::{
    io::{self, Write},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};
use tracing::Level;

/// Console ticks between boxed reports.
const REPORT_EVERY_TICKS: u64 = 10;
const LOOP_SLEEP: Duration = Duration::from_millis(10);

#[derive(Parser)]
struct Args {
    /// Mining algorithm (sha256, ethash, randomx, equihash)
    #[arg(short, long, default_value = "sha256")]
    algorithm: String,
    /// Seed for the simulation noise; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Enable GUI mode
    #[arg(long)]
    gui: bool,
    /// Stop after this many ticks (console mode)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,
    /// Print one JSON snapshot per tick instead of text (console mode)
    #[arg(long)]
    json: bool,
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = Level::WARN, value_name = "LEVEL")]
    log_level: Level,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the dashboard owns stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    let Args {
        algorithm,
        seed,
        gui,
        ticks,
        json,
        log_level: _,
    } = args;

    let selection = Algorithm::from_name(&algorithm);
    if selection.is_none() {
        tracing::warn!(algorithm = %algorithm, "unknown algorithm, using default multiplier");
    }

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut simulator = Simulator::new(rng, selection);

    if gui {
        run_gui(&mut simulator)
    } else {
        run_console(&mut simulator, seed, ticks, json)
    }
}

fn run_console(simulator: &mut Simulator<StdRng>, seed: Option<u64>, ticks: Option<u64>, json: bool) -> io::Result<()> {
    if !json {
        Display::banner();
        Display::startup_info(
            simulator.workers().len(),
            algorithm::label_for(simulator.algorithm()),
            seed,
        );
        println!("{} {}", "🚀".green(), "Mining started!".green().bold());
        println!();
    }

    simulator.start(Instant::now());

    let stdout = io::stdout();
    loop {
        if !simulator.poll(Instant::now()) {
            thread::sleep(LOOP_SLEEP);
            continue;
        }

        let data = simulator.snapshot();
        if json {
            let mut out = stdout.lock();
            serde_json::to_writer(&mut out, &data).map_err(io::Error::from)?;
            writeln!(out)?;
            out.flush()?;
        } else {
            Display::tick_line(&data);
            if data.ticks % REPORT_EVERY_TICKS == 0 {
                Display::report(&data);
            }
        }

        if ticks.is_some_and(|limit| simulator.state().ticks >= limit) {
            break;
        }
    }

    simulator.stop();
    if !json {
        println!();
        Display::summary(&simulator.snapshot());
    }
    Ok(())
}

fn run_gui(simulator: &mut Simulator<StdRng>) -> io::Result<()> {
    let (log_tx, log_rx) = mpsc::channel::<String>();
    let (gui_data_tx, gui_data_rx) = mpsc::channel::<GuiData>();
    let (command_tx, command_rx) = mpsc::channel::<Command>();

    let gui_handle = thread::spawn(move || {
        let mut gui_app = Gui::new(log_rx, gui_data_rx, command_tx);
        gui_app.run()
    });

    let _ = log_tx.send("Press 's' to start mining.".to_string());
    let _ = gui_data_tx.send(simulator.snapshot());

    'sim: loop {
        let mut changed = false;

        while let Ok(command) = command_rx.try_recv() {
            match command {
                Command::Toggle => {
                    simulator.toggle(Instant::now());
                    let msg = if simulator.is_active() {
                        format!("{} Mining started", "▶".green())
                    } else {
                        format!("{} Mining stopped", "■".red())
                    };
                    let _ = log_tx.send(msg);
                }
                Command::CycleAlgorithm => {
                    let next = simulator.algorithm().map_or(Algorithm::Sha256, Algorithm::next);
                    simulator.select_algorithm(Some(next));
                    let _ = log_tx.send(format!("Algorithm switched to {}", next));
                }
                Command::Quit => break 'sim,
            }
            changed = true;
        }

        if simulator.poll(Instant::now()) {
            changed = true;
        }

        if changed && gui_data_tx.send(simulator.snapshot()).is_err() {
            tracing::warn!("GUI data channel closed, simulation loop will exit");
            break;
        }

        if gui_handle.is_finished() {
            break;
        }

        thread::sleep(LOOP_SLEEP);
    }

    simulator.stop();
    drop(gui_data_tx);
    drop(log_tx);

    match gui_handle.join() {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(io::ErrorKind::Other, "GUI thread panicked")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_limit_must_be_positive() {
        assert!(Args::try_parse_from(["minesim", "--ticks", "0"]).is_err());

        let args = Args::try_parse_from(["minesim", "--ticks", "5"]).unwrap();
        assert_eq!(args.ticks, Some(5));
        assert!(Args::try_parse_from(["minesim"]).unwrap().ticks.is_none());
    }

    #[test]
    fn defaults_to_sha256_console_mode() {
        let args = Args::try_parse_from(["minesim"]).unwrap();
        assert_eq!(args.algorithm, "sha256");
        assert!(!args.gui);
        assert!(!args.json);
        assert_eq!(args.log_level, Level::WARN);
    }
}
