use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use homestead::{autopilot::Autopilot, scenario::ScenarioLoader, Scheduler};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless homestead session runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/frontier.yaml")]
    scenario: PathBuf,

    /// Override simulated seconds (uses scenario default when omitted)
    #[arg(long)]
    seconds: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final state as JSON instead of a one-line summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let seconds = scenario.seconds(cli.seconds);
    let engine = scenario.engine(cli.seed).build()?;

    let mut scheduler = Scheduler::new(engine);
    let stats = scheduler.run_with_hook(seconds, &mut Autopilot::new(), |report| {
        if report.second % 60 == 0 {
            info!(
                minute = report.second / 60,
                population = report.state.total_population(),
                max_pop = report.state.max_pop(),
                explored = report.state.map().total_explored_tiles(),
                "progress"
            );
        }
    });

    let state = scheduler.engine().state();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state.summary())?);
    } else {
        println!(
            "Scenario '{}' ran for {} seconds. Population {}/{}, {} tiles explored, {} player actions.",
            scenario.name,
            seconds,
            state.total_population(),
            state.max_pop(),
            state.map().total_explored_tiles(),
            stats.player_actions
        );
    }
    Ok(())
}
