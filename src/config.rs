use crate::simulation::playback::PlaybackTiming;
use crate::solver::http::HttpSolverOptions;
use crate::solver::wire::RandomParams;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "flowlab")]
#[command(version)]
#[command(about = "Interactive max-flow explorer")]
pub struct Cli {
    /// Base URL of the max-flow service.
    #[arg(long, env = "FLOWLAB_API_URL", default_value = "http://127.0.0.1:8000/")]
    pub api_url: String,

    /// Initial node count of the solver network.
    #[arg(short = 'n', long = "nodes", default_value_t = 8)]
    pub nodes: usize,

    /// Edge probability used by the random-network endpoint.
    #[arg(long, default_value_t = 0.3)]
    pub density: f64,

    #[arg(long, default_value_t = 1)]
    pub cap_min: i64,

    #[arg(long, default_value_t = 20)]
    pub cap_max: i64,

    /// Capacity range for generated exercises.
    #[arg(long, default_value_t = 3)]
    pub lite_min: i64,

    #[arg(long, default_value_t = 10)]
    pub lite_max: i64,

    /// Seed for exercise capacities and graph layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How long each augmenting path stays highlighted.
    #[arg(long, default_value_t = 800)]
    pub highlight_ms: u64,

    /// Gap between two highlighted paths.
    #[arg(long, default_value_t = 200)]
    pub pause_ms: u64,

    #[arg(long, default_value_t = 5)]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Increase log verbosity (-v, -vv, -vvv, -vvvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs here; the terminal belongs to the UI.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub initial_nodes: usize,
    pub random: RandomParams,
    pub lite_min: i64,
    pub lite_max: i64,
    pub seed: u64,
    pub timing: PlaybackTiming,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            initial_nodes: cli.nodes,
            random: RandomParams {
                n: cli.nodes,
                density: cli.density,
                cap_min: cli.cap_min,
                cap_max: cli.cap_max,
            },
            lite_min: cli.lite_min,
            lite_max: cli.lite_max,
            seed: cli.seed.unwrap_or_else(rand::random),
            timing: PlaybackTiming {
                hold: Duration::from_millis(cli.highlight_ms),
                pause: Duration::from_millis(cli.pause_ms),
            },
        }
    }

    pub fn http_options(cli: &Cli) -> HttpSolverOptions {
        HttpSolverOptions {
            connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_nodes: 8,
            random: RandomParams {
                n: 8,
                density: 0.3,
                cap_min: 1,
                cap_max: 20,
            },
            lite_min: 3,
            lite_max: 10,
            seed: 0,
            timing: PlaybackTiming::default(),
        }
    }
}
