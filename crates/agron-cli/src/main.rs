//! Agron CLI: fertilizer recommendations from a trained classifier.

mod artifacts;
mod display;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agron", version, about = "Fertilizer recommendation from form inputs")]
struct Cli {
    /// Directory holding schema.json, model.json, and optional encoder artifacts.
    #[arg(long, env = "AGRON_ARTIFACTS", default_value = "artifacts")]
    artifacts: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the top fertilizers for one set of form values.
    Predict {
        /// Form values as field=value pairs, e.g. soil_type=Loamy nitrogen=23,5
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Emit the result as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved feature schema (columns, options, medians).
    Schema,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected field=value, got {s:?}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("agron v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let engine = artifacts::load_engine(&cli.artifacts)?;

    match cli.command {
        Command::Predict { fields, json } => {
            let form: HashMap<String, String> = fields.into_iter().collect();
            let result = engine.predict(&form)?;
            if json {
                let out = serde_json::to_string_pretty(&result)
                    .context("serialize prediction result")?;
                println!("{out}");
            } else {
                display::print_predictions(&result);
            }
        }
        Command::Schema => display::print_schema(engine.schema()),
    }

    Ok(())
}
