//! AUP CLI - train tabular attainable-utility agents.
//!
//! - `aup train` - train on the reference vase gridworld and report performance
//! - `aup init` - write a default YAML config

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use aup_agent::{AupAgent, AupConfig, TrainingPerformance};
use aup_core::run_episode;
use aup_gridworld::VaseWorld;

#[derive(Parser)]
#[command(name = "aup")]
#[command(about = "Tabular attainable utility preservation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent on the vase gridworld
    Train {
        /// YAML config; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Primary episode budget
        #[arg(long)]
        episodes: Option<usize>,

        /// Impact budget N, in percent
        #[arg(long)]
        impact_budget: Option<f64>,

        /// Number of sampled penalty rewards (0 trains a vanilla agent)
        #[arg(long)]
        penalties: Option<usize>,

        /// Use reachability penalties instead of sampled rewards
        #[arg(long)]
        state_penalties: bool,

        #[arg(long)]
        discount: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        #[arg(default_value = "aup.yaml")]
        path: PathBuf,
    },
}

#[derive(Serialize)]
struct TrainReport<'a> {
    agent: &'a str,
    penalties: usize,
    config: &'a AupConfig,
    final_return: f64,
    final_performance: f64,
    vases_intact: usize,
    training_performance: &'a TrainingPerformance,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train {
            config,
            episodes,
            impact_budget,
            penalties,
            state_penalties,
            discount,
            seed,
            json,
        } => {
            let mut config = match config {
                Some(path) => AupConfig::load(&path)?,
                None => AupConfig::default(),
            };
            if let Some(episodes) = episodes {
                config.num_episodes = episodes;
            }
            if let Some(budget) = impact_budget {
                config.impact_budget = budget;
            }
            if let Some(count) = penalties {
                config.num_rpenalties = count;
            }
            if state_penalties {
                config.state_penalties = true;
            }
            if let Some(discount) = discount {
                config.discount = discount;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            train(config, json)
        }
        Commands::Init { path } => init_config(&path),
    }
}

fn train(config: AupConfig, json: bool) -> Result<()> {
    let mut env = VaseWorld::new();
    tracing::info!(seed = config.seed, "Starting training");

    let agent = AupAgent::train(&mut env, config).context("Failed to configure agent")?;
    let outcome = run_episode(&agent, &mut env, agent.config().evaluation_max_steps);
    let record = agent.training_performance();

    if json {
        let report = TrainReport {
            agent: agent.name(),
            penalties: agent.num_penalties(),
            config: agent.config(),
            final_return: outcome.ret,
            final_performance: outcome.performance,
            vases_intact: env.vases_intact(),
            training_performance: record,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Agent: {} ({} penalty functions)", agent.name(), agent.num_penalties());
    println!();
    println!("{:>8}  {:>10}  {:>12}", "episode", "return", "performance");
    let stride = (record.len() / 10).max(1);
    for episode in (0..record.len()).step_by(stride) {
        println!(
            "{:>8}  {:>10.2}  {:>12.2}",
            episode,
            record.returns()[episode],
            record.performance()[episode]
        );
    }
    println!();
    println!(
        "Greedy policy: return {:.2}, performance {:.2}, {} step(s), vase {}",
        outcome.ret,
        outcome.performance,
        outcome.steps,
        if env.vases_intact() > 0 { "intact" } else { "broken" }
    );

    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, leaving it untouched", path.display());
        return Ok(());
    }

    let content = format!(
        "# Tabular AUP agent configuration\n\n{}",
        AupConfig::default().to_yaml()?
    );
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  aup train --config {}", path.display());
    Ok(())
}
