// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use snotrac_core::render;
use snotrac_core::session::Panel;
use snotrac_core::{AnalysisOutcome, AnalysisRequest, DashboardSession, Settings};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snotrac", author, version, about, long_about = None)]
struct Cli {
    /// Fixture path or URL
    #[arg(short, long, env = "SNOTRAC_FIXTURE")]
    fixture: Option<String>,

    /// Text-generation endpoint
    #[arg(long, env = "SNOTRAC_ENDPOINT")]
    endpoint: Option<String>,

    /// API key for the text-generation endpoint
    #[arg(long, env = "SNOTRAC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Settings file (defaults to settings.json in the config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print whether each analysis is live or a fallback
    #[arg(long)]
    show_outcome: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active plows, clearance, transit delay and safety level
    Summary,
    /// Snowplow operations analysis
    Snowplow,
    /// Safety insights
    Safety,
    /// Traffic prediction for the next 30-60 minutes
    Traffic,
    /// Conditions for a specific route
    Route { start: String, end: String },
    /// Populate every dashboard panel
    Dashboard {
        /// Write a standalone HTML page here instead of printing text
        #[arg(long)]
        html: Option<PathBuf>,
        /// Request the panels concurrently
        #[arg(long)]
        parallel: bool,
    },
    /// Print the prompt an analysis would send, without sending it
    Prompt {
        #[arg(value_enum)]
        kind: PromptKind,
        #[arg(long, default_value = "")]
        start: String,
        #[arg(long, default_value = "")]
        end: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PromptKind {
    Snowplow,
    Safety,
    Traffic,
    Route,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("snotrac")
        .build();
    // A second init (e.g. under a test harness) is harmless.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn print_outcome(outcome: &AnalysisOutcome, show_outcome: bool) {
    if show_outcome {
        match outcome.reason() {
            None => println!("[live]"),
            Some(reason) => println!("[fallback: {}]", reason),
        }
    }
    println!("{}", outcome.text());
}

fn print_panels(panels: &[Panel], show_outcome: bool) {
    for panel in panels {
        println!("== {} ==", panel.kind.title());
        print_outcome(&panel.outcome, show_outcome);
        println!();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?
    .with_overrides(cli.endpoint.clone(), cli.api_key.clone(), cli.fixture.clone());

    let session = DashboardSession::start(&settings);

    match &cli.command {
        Commands::Summary => match session.summary() {
            Some(summary) => {
                println!("Active Plows:   {}", summary.active_plows);
                println!("Routes Cleared: {}%", summary.clearance_percent);
                println!("Transit Delay:  {}", summary.transit_delay);
                println!("Safety Level:   {}", summary.safety_level);
            }
            None => println!("Unable to load data from {}", settings.fixture),
        },
        Commands::Snowplow => print_outcome(&session.snowplow_status(), cli.show_outcome),
        Commands::Safety => print_outcome(&session.safety_insights(), cli.show_outcome),
        Commands::Traffic => print_outcome(&session.traffic_prediction(), cli.show_outcome),
        Commands::Route { start, end } => {
            let outcome = session
                .route_conditions(start, end)
                .context("Please enter both start and end locations")?;
            print_outcome(&outcome, cli.show_outcome);
        }
        Commands::Dashboard { html, parallel } => {
            let panels = if *parallel {
                session.initial_panels_parallel()
            } else {
                session.initial_panels()
            };

            match html {
                Some(path) => {
                    let page = render::dashboard_page(session.summary().as_ref(), &panels);
                    fs::write(path, page)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Dashboard written to {}", path.display());
                }
                None => print_panels(&panels, cli.show_outcome),
            }
        }
        Commands::Prompt { kind, start, end } => {
            let request = match kind {
                PromptKind::Snowplow => AnalysisRequest::SnowplowStatus,
                PromptKind::Safety => AnalysisRequest::Safety,
                PromptKind::Traffic => AnalysisRequest::TrafficPrediction,
                PromptKind::Route => AnalysisRequest::route(start, end)?,
            };
            let fixture = session
                .fixture()
                .ok_or_else(|| anyhow::anyhow!("Unable to load data from {}", settings.fixture))?;
            println!("{}", request.prompt(fixture));
        }
    }

    Ok(())
}
