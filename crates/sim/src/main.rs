//! Scenario replay binary.
//!
//! Loads a card catalog, an optional battle config, and a scripted scenario,
//! replays every action through the engine, and prints the final state with
//! its commitment roots. Two runs with the same inputs print the same roots.
//!
//! ```bash
//! cargo run -p battle-sim -- \
//!     --catalog crates/game/content/data/catalog.ron \
//!     --scenario crates/game/content/data/scenarios/opening.ron \
//!     --config crates/game/content/data/config.toml
//! ```

mod config;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use battle_content::{CatalogLoader, ConfigLoader, ScenarioLoader};
use battle_core::{Action, BattleConfig, ExecuteError, GameEngine, GameError};
use clap::Parser;

use crate::config::SimConfig;

/// Replay a battle scenario deterministically
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Replay a scripted card battle and print its state root", long_about = None)]
#[command(version)]
struct Cli {
    /// Card catalog (.ron or .json)
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Scenario script (.ron)
    #[arg(long, value_name = "FILE")]
    scenario: PathBuf,

    /// Battle config (.toml); engine defaults when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Health, zones, statuses and roots
    Summary,
    /// Roots plus the full final state as JSON
    Json,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for BATTLE_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let sim_config = SimConfig::from_env();
    run(cli, sim_config)
}

fn setup_logging(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, sim_config: SimConfig) -> Result<()> {
    let catalog = Arc::new(CatalogLoader::load(&cli.catalog)?);

    let mut battle_config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => BattleConfig::default(),
    };
    if let Some(limit) = sim_config.max_resolutions {
        battle_config.max_resolutions_per_action = limit;
    }

    let mut scenario = ScenarioLoader::load(&cli.scenario)?;
    if let Some(seed) = sim_config.seed {
        tracing::info!(seed, "overriding scenario seed");
        scenario.seed = seed;
    }

    let state = scenario.build_state(catalog, battle_config)?;
    let mut engine = GameEngine::new(state);

    tracing::info!(
        seed = scenario.seed,
        seats = engine.state().player_count(),
        steps = scenario.actions.len(),
        "starting replay"
    );

    let mut applied: Vec<Action> = Vec::with_capacity(scenario.actions.len());
    for (step, action) in scenario.actions().enumerate() {
        match engine.apply_action(&action) {
            Ok(outcome) => {
                tracing::info!(
                    step,
                    action = action.as_snake_case(),
                    actor = %action.actor(),
                    resolved = outcome.resolved.len(),
                    changed_seats = outcome.delta.players.len(),
                    "applied"
                );
                for effect in &outcome.resolved {
                    tracing::debug!(
                        step,
                        effect = %effect.reference.effect,
                        source = %effect.reference.source,
                        outcome = %effect.outcome,
                        "resolved effect"
                    );
                }
                applied.push(action);
            }
            Err(err @ ExecuteError::Rejected { .. }) if sim_config.continue_on_reject => {
                tracing::warn!(
                    step,
                    code = err.error_code(),
                    "skipping rejected action: {}",
                    err
                );
            }
            Err(err) => {
                anyhow::bail!(
                    "step {} ({}) failed [{}]: {}",
                    step,
                    action.as_snake_case(),
                    err.error_code(),
                    err
                );
            }
        }
    }

    let state = engine.state();
    let output = match cli.format {
        OutputFormat::Summary => report::summary(state, &applied),
        OutputFormat::Json => report::json(state, &applied)?,
    };
    println!("{output}");

    tracing::info!("replay complete");
    Ok(())
}
