use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pilot_core::{run_session, EnvWrapper, PilotConfig};
use pilot_gridworld::{GridWorld, GridWorldConfig};
use pilot_human_agent::HumanAgent;
use pilot_window::WindowRenderer;

/// Drive the grid world with the arrow keys (or WASD).
///
/// Close the window or press Escape to store the replay buffer and exit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration of the session in YAML
    #[arg(long)]
    config: Option<String>,

    /// Configuration of the grid world in YAML
    #[arg(long)]
    gridworld: Option<String>,

    /// Output directory of the replay buffer
    #[arg(long, default_value_t = String::from("./pilot-window/examples/model/human_gridworld"))]
    experiment_dir: String,

    /// Waiting time in milliseconds between actions
    #[arg(long, default_value_t = 150)]
    wait: u64,

    /// Wait for a key press before every action
    #[arg(long, default_value_t = false)]
    wait_for_key: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PilotConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => PilotConfig::default()
            .level("gridworld")
            .experiment_dir(&args.experiment_dir)
            .pace_ms(args.wait)
            .wait_for_explicit_human_action(args.wait_for_key),
    }
    .human_control(true);
    let gridworld_config = match &args.gridworld {
        Some(path) => GridWorldConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => GridWorldConfig::default().size(8, 6),
    };

    let sim = GridWorld::build(&gridworld_config, config.seed)?;
    let renderer = WindowRenderer::new("human_gridworld", 4);
    let mut env = EnvWrapper::new(sim, renderer, &config)?;
    let mut agent = HumanAgent::build(&config);

    let report = run_session(&mut env, &mut agent, None)?;
    info!(
        "{} episodes, {} steps, total reward = {}",
        report.episodes, report.steps, report.total_reward
    );
    if let Some(path) = report.artifact {
        info!("Demonstrations: {:?}", path);
    }

    Ok(())
}
