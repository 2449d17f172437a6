use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use palisade::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "palisade skirmish runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/skirmish.yaml")]
    scenario: PathBuf,

    /// Override turn count for headless runs (uses scenario default when omitted)
    #[arg(long)]
    turns: Option<u64>,

    /// Override snapshot interval in turns (0 disables)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Serve the browser ui instead of running headless
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        cols: scenario.cols,
        rows: scenario.rows,
        snapshot_interval_turns: cli
            .snapshot_interval
            .unwrap_or(scenario.snapshot_interval_turns),
        snapshot_dir: cli
            .snapshot_dir
            .unwrap_or_else(|| PathBuf::from("snapshots")),
    };
    let mut engine = EngineBuilder::new(settings).with_default_systems().build()?;

    if cli.serve {
        let config = WebServerConfig {
            host: cli.host.clone(),
            port: cli.port,
        };
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(web::serve(engine, config));
    }

    let turns = scenario.turns(cli.turns);
    info!(scenario = %scenario.name, turns, "running headless");
    engine.run(turns)?;
    let world = engine.world();
    println!(
        "Scenario '{}' reached turn {}. Player population: {}, enemy warriors: {}",
        scenario.name,
        engine.turn(),
        world.player().city.population,
        world.enemy().units.len()
    );
    Ok(())
}
