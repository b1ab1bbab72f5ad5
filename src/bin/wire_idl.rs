//! wire-idl CLI
//!
//! Generates the Elm client and Rust server command modules from a schema
//! document, and checks checked-in modules for drift.
//!
//! Usage:
//!   wire-idl generate --schema schemas/commands.toml
//!   wire-idl check --schema schemas/commands.toml
//!   wire-idl decode --schema schemas/commands.toml --union ServerCommand '{"type":"Connected"}'

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wire_idl::{generate, load_schema, render, to_wire_name, wire, GeneratorConfig, OutputSink, Target};

#[derive(Parser)]
#[command(name = "wire-idl")]
#[command(about = "Generate matching Elm and Rust JSON codecs from one schema")]
struct Cli {
    /// Config file (defaults to wire-idl.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the Elm output path
    #[arg(long, global = true)]
    client_out: Option<PathBuf>,

    /// Override the Rust output path
    #[arg(long, global = true)]
    server_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write both generated modules
    Generate {
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Fail if either module on disk differs from the generated one
    Check {
        #[arg(short, long)]
        schema: PathBuf,
    },

    /// Print one module to stdout
    Print {
        #[arg(short, long)]
        schema: PathBuf,
        /// elm (client) or rust (server)
        #[arg(short, long)]
        target: Target,
    },

    /// Print the wire spelling of an identifier
    WireName { identifier: String },

    /// Decode one JSON message as the generated decoders would
    Decode {
        #[arg(short, long)]
        schema: PathBuf,
        /// Tagged union to decode as
        #[arg(short, long)]
        union: String,
        /// The JSON message
        json: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load_from(path.to_str()),
        None => GeneratorConfig::load(),
    }
    .context("failed to load configuration")?;

    if let Some(path) = cli.client_out {
        config.output.client_path = path;
    }
    if let Some(path) = cli.server_out {
        config.output.server_path = path;
    }
    let codegen = config.codegen_config();

    match cli.command {
        Commands::Generate { schema } => {
            let schema = load(&schema)?;
            let modules = generate(&schema, &codegen)?;
            let sink = OutputSink::from_config(&config.output);
            sink.write(&modules)?;
            println!("Wrote {}", sink.client_path.display());
            println!("Wrote {}", sink.server_path.display());
        }

        Commands::Check { schema } => {
            let schema = load(&schema)?;
            let modules = generate(&schema, &codegen)?;
            let stale = OutputSink::from_config(&config.output).check(&modules)?;
            if stale.is_empty() {
                println!("Generated modules are up to date");
                return Ok(());
            }
            for file in &stale {
                if file.missing {
                    println!("Missing: {}", file.path.display());
                } else {
                    println!("Stale: {}", file.path.display());
                }
                print!("{}", file.diff);
            }
            std::process::exit(1);
        }

        Commands::Print { schema, target } => {
            let schema = load(&schema)?;
            schema.validate()?;
            let module = render(&schema, codegen.profile(target))?;
            print!("{}", module.code);
        }

        Commands::WireName { identifier } => {
            println!("{}", to_wire_name(&identifier));
        }

        Commands::Decode { schema, union, json } => {
            let schema = load(&schema)?;
            let value: serde_json::Value =
                serde_json::from_str(&json).context("message is not valid JSON")?;
            let message = wire::decode(&schema, &union, &value)?;

            println!("{}", message.variant);
            for (field, value) in &message.fields {
                println!("  {} = {}", field, value);
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<wire_idl::Schema> {
    load_schema(path).with_context(|| format!("failed to load schema {}", path.display()))
}
