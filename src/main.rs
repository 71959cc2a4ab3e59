//! htm-rest CLI
//!
//! Run the demo networks against an htm.core REST server.
//!
//! Usage:
//!     htm-rest sine-wave --steps 2000
//!     htm-rest up-down --cycles 4 --delay-ms 250
//!     htm-rest --url http://engine:8050/network up-down --topology ~/tm.json

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use htm_rest::demos::display::FrameRenderer;
use htm_rest::demos::sine_wave::{self, SineWaveConfig};
use htm_rest::demos::up_down::{self, UpDownConfig};
use htm_rest::demos::load_topology;
use htm_rest::{EngineConfig, RestEngine};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// htm-rest - drive an htm.core network over REST
#[derive(Parser)]
#[command(name = "htm-rest")]
#[command(version)]
#[command(about = "Demo drivers for the htm.core NetworkAPI REST server", long_about = None)]
struct Cli {
    /// Base network URL (default: $HTM_REST_URL or http://localhost:8050/network)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Per-request timeout in seconds (default: $HTM_REST_TIMEOUT_SECS or 120)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a sine wave through encoder, SP and TM, print anomaly scores
    SineWave {
        /// Number of steps
        #[arg(short, long, default_value = "10000")]
        steps: usize,

        /// Increment of x per step
        #[arg(long, default_value = "0.01")]
        step_size: f64,

        /// Topology JSON file replacing the built-in network
        #[arg(long)]
        topology: Option<String>,
    },

    /// Feed a repeating up/down sequence into a TM, show its cells
    UpDown {
        /// Number of times the sequence is fed
        #[arg(short, long, default_value = "4")]
        cycles: usize,

        /// Pause between frames in milliseconds
        #[arg(long, default_value = "250")]
        delay_ms: u64,

        /// Topology JSON file replacing the built-in network
        #[arg(long)]
        topology: Option<String>,
    },
}

fn engine_config(url: Option<String>, timeout: Option<u64>) -> CliResult<EngineConfig> {
    let mut config = EngineConfig::from_env()?;
    if let Some(url) = url {
        config = EngineConfig::new(&url).with_timeout(config.timeout);
    }
    if let Some(secs) = timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn cmd_sine_wave(engine: &RestEngine, steps: usize, step_size: f64, topology: Option<String>) -> CliResult<()> {
    let mut config = SineWaveConfig::default()
        .with_steps(steps)
        .with_step_size(step_size);
    if let Some(path) = topology {
        config = config.with_topology(load_topology(&path)?);
    }

    sine_wave::run(engine, &config, |step| {
        println!("{}", sine_wave::format_step(config.max_steps, step));
    })?;
    Ok(())
}

fn cmd_up_down(engine: &RestEngine, cycles: usize, delay_ms: u64, topology: Option<String>) -> CliResult<()> {
    let mut config = UpDownConfig::default()
        .with_cycles(cycles)
        .with_display_delay(Duration::from_millis(delay_ms));
    if let Some(path) = topology {
        config = config.with_topology(load_topology(&path)?);
    }

    let renderer = FrameRenderer::auto(config.column_size, config.cells_per_column);
    let term = console::Term::stdout();

    up_down::run(engine, &config, |frame| {
        if renderer.colored {
            let _ = term.clear_screen();
        }
        println!("{}", renderer.render(frame));
        std::thread::sleep(config.display_delay);
    })?;
    Ok(())
}

fn run(cli: Cli) -> CliResult<()> {
    let config = engine_config(cli.url, cli.timeout)?;
    tracing::info!(url = %config.base_url, "using engine");
    let engine = RestEngine::new(config)?;

    match cli.command {
        Commands::SineWave { steps, step_size, topology } => {
            cmd_sine_wave(&engine, steps, step_size, topology)
        }
        Commands::UpDown { cycles, delay_ms, topology } => {
            cmd_up_down(&engine, cycles, delay_ms, topology)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("htm_rest=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("error: {}", e).red());
            ExitCode::FAILURE
        }
    }
}
