//! querymill: translate query trees from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Translate a JSON query tree with the configured entities
//! querymill translate query.json
//!
//! # Emit the translation as JSON, with a COUNT statement
//! querymill translate query.json --format json --count
//!
//! # List the configured entities
//! querymill entities --config ./querymill.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use querymill::prelude::*;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "querymill")]
#[command(version)]
#[command(about = "Translate abstract query trees into SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    querymill translate query.json
    querymill translate query.json --dialect sqlite --format json
    querymill entities")]
struct Cli {
    /// Configuration file (defaults to <config_dir>/querymill/config.toml)
    #[arg(short, long, global = true, env = "QUERYMILL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured SQL dialect (mysql, sqlite)
    #[arg(short, long, global = true)]
    dialect: Option<Dialect>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a JSON query tree
    Translate {
        /// Path to the query JSON file
        query: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also assemble a COUNT(*) statement
        #[arg(long)]
        count: bool,
    },
    /// List configured entities
    Entities,
}

#[derive(Serialize)]
struct Report<'a> {
    translation: &'a Translation,
    select: &'a Statement,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<&'a Statement>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("QUERYMILL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "querymill=debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = TranslatorConfig::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    let dialect = cli.dialect.unwrap_or(config.dialect);
    debug!(%dialect, entities = config.entities.names().len(), "configuration loaded");

    match &cli.command {
        Commands::Translate { query, format, count } => {
            translate_file(query, &config.entities, dialect, *format, *count)
        }
        Commands::Entities => {
            show_entities(&config.entities);
            Ok(())
        }
    }
}

fn translate_file(
    path: &Path,
    entities: &EntityRegistry,
    dialect: Dialect,
    format: OutputFormat,
    count: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let query: Query =
        serde_json::from_str(&content).with_context(|| format!("invalid query tree in {}", path.display()))?;

    let translator = QueryTranslator::new(entities, dialect);
    let translation = translator.translate(&query)?;
    let select = translator.build_select(&query)?;
    let count = if count { Some(translator.build_count(&query)?) } else { None };

    match format {
        OutputFormat::Json => {
            let report = Report {
                translation: &translation,
                select: &select,
                count: count.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_translation(&translation, &select, count.as_ref()),
    }
    Ok(())
}

fn print_translation(translation: &Translation, select: &Statement, count: Option<&Statement>) {
    let fragments = [
        ("Preamble:", translation.pre_script.as_deref().unwrap_or("")),
        ("Where:", translation.condition.as_str()),
        ("Order by:", translation.sort.as_str()),
        ("Joins:", translation.joins()),
        ("Combine:", translation.combine_script.as_str()),
    ];
    for (label, text) in fragments {
        if !text.is_empty() {
            println!("{} {}", label.dimmed(), text.white());
        }
    }

    if !translation.parameters.is_empty() {
        println!();
        println!("{}", "Parameters:".cyan());
        for (name, value) in translation.parameters.iter() {
            println!("  {} = {}", name.yellow(), value);
        }
    }

    println!();
    println!("{}", "Generated SQL:".green().bold());
    println!("{}", select.sql.white());
    if let Some(count) = count {
        println!("{}", count.sql.white());
    }
}

fn show_entities(entities: &EntityRegistry) {
    println!("{}", "Configured entities".cyan().bold());
    println!();
    println!(
        "{:16} {:20} {:20} {}",
        "Entity".white().bold(),
        "Table".white().bold(),
        "Keys".white().bold(),
        "Relations".white().bold()
    );
    println!("{}", "─".repeat(80).dimmed());

    for name in entities.names() {
        let Ok(entity) = entities.get(name) else {
            continue;
        };
        let relations: Vec<&str> = entity.relations.iter().map(|r| r.target.as_str()).collect();
        println!(
            "{:16} {:20} {:20} {}",
            name.cyan().bold(),
            entity.table.yellow(),
            entity.primary_keys.join(", ").white(),
            relations.join(", ").dimmed()
        );
    }
}
