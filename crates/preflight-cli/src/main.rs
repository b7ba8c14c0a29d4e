// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod render;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use preflight_core::presets;
use preflight_core::scenario::{Scenario, ScenarioReport};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario file (aircraft, load, parameters, legs)
    #[arg(short, long, global = true, env = "PREFLIGHT_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in aircraft profiles
    Presets,
    /// Validate the scenario's aircraft profile
    Check,
    /// Weight & balance report
    Wb,
    /// Navigation log and trip fuel
    Nav,
    /// Weight & balance and navigation log
    Report,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn default_scenario_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "preflight", "Preflight")
        .map(|dirs| dirs.config_dir().join("scenario.json"))
}

fn load_scenario(path: Option<PathBuf>) -> Result<Scenario> {
    let path = match path {
        Some(path) => path,
        None => default_scenario_path()
            .filter(|p| p.exists())
            .ok_or_else(|| {
                anyhow!("No scenario found. Pass --scenario or set PREFLIGHT_SCENARIO.")
            })?,
    };
    log::info!("Loading scenario — path={}", path.display());
    Scenario::load(&path).with_context(|| format!("Failed to read scenario {}", path.display()))
}

fn evaluate(path: Option<PathBuf>) -> Result<ScenarioReport> {
    let scenario = load_scenario(path)?;
    scenario
        .evaluate()
        .context("Scenario could not be evaluated")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Presets => {
            let summaries = presets::preset_summaries();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print!("{}", render::presets(&summaries));
            }
        }
        Commands::Check => {
            let scenario = load_scenario(cli.scenario)?;
            let aircraft = scenario
                .resolve_aircraft()
                .context("Aircraft profile rejected")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&aircraft)?);
            } else {
                print!("{}", render::aircraft(&aircraft));
            }
        }
        Commands::Wb => {
            let report = evaluate(cli.scenario)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.weight_balance)?);
            } else {
                print!("{}", render::weight_balance(&report));
            }
        }
        Commands::Nav => {
            let report = evaluate(cli.scenario)?;
            if cli.json {
                let nav = serde_json::json!({ "legs": report.legs, "trip": report.trip });
                println!("{}", serde_json::to_string_pretty(&nav)?);
            } else {
                print!("{}", render::navigation(&report));
            }
        }
        Commands::Report => {
            let report = evaluate(cli.scenario)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::aircraft(&report.aircraft));
                println!();
                print!("{}", render::weight_balance(&report));
                println!();
                print!("{}", render::navigation(&report));
            }
        }
    }

    Ok(())
}
