//! Command-line driver for the Lightfield simulation.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use lightfield_core::SimConfig;
use lightfield_world::Simulation;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "lightfield",
    version,
    about = "Step a light source around a grid board and print each tick"
)]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width, border included.
    #[arg(long)]
    width: Option<i32>,

    /// Board height, border included.
    #[arg(long)]
    height: Option<i32>,

    /// Light source power.
    #[arg(long)]
    power: Option<i32>,

    /// Run this many ticks without prompting, then print a summary.
    #[arg(long)]
    ticks: Option<u64>,

    /// Directory for the timestamped log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Input that ends the interactive loop.
    #[arg(long, default_value = "e")]
    exit_token: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.log_dir.as_deref())?;

    info!("Application started");
    debug!("Passed arguments: {:?}", cli);

    let config = build_config(&cli)?;
    let mut sim = Simulation::new(config).context("building simulation")?;

    match cli.ticks.or(sim.config().max_ticks) {
        Some(ticks) => {
            let summary = sim.run(ticks);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        None => run_interactive(&mut sim, &cli.exit_token)?,
    }

    info!("Simulation finished. Cleaning up.");
    Ok(())
}

fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(power) = cli.power {
        config.light.power = power;
    }

    config.validate()?;
    Ok(config)
}

/// Tick, print, and wait for a line of input until the exit token or EOF
fn run_interactive(sim: &mut Simulation, exit_token: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout().lock();
    let mut line = String::new();

    loop {
        match sim.step() {
            Some(snapshot) => writeln!(stdout, "tick {}\n{}", sim.tick(), snapshot)?,
            None => warn!(tick = sim.tick(), "Tick produced no snapshot"),
        }

        write!(stdout, "signal: ")?;
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            break;
        }
        if is_exit_signal(&line, exit_token) {
            debug!("Exit signal received");
            break;
        }
    }

    Ok(())
}

fn is_exit_signal(line: &str, exit_token: &str) -> bool {
    line.trim().to_lowercase() == exit_token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_signal() {
        assert!(is_exit_signal("e\n", "e"));
        assert!(is_exit_signal("  E  \r\n", "e"));
        assert!(!is_exit_signal("\n", "e"));
        assert!(!is_exit_signal("exit\n", "e"));
        // only the input is lower-cased, never the token
        assert!(!is_exit_signal("e\n", "E"));
        assert!(!is_exit_signal("E\n", "E"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["lightfield", "--width", "9", "--power", "6"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.board.width, 9);
        assert_eq!(config.board.height, 5);
        assert_eq!(config.light.power, 6);
        assert_eq!(cli.exit_token, "e");
    }

    #[test]
    fn test_negative_power_flag_rejected() {
        let cli = Cli::parse_from(["lightfield", "--power=-1"]);
        assert!(build_config(&cli).is_err());
    }
}
