//! Simulation-Object Metadata Generator CLI.
//!
//! Reads a build configuration and drives the generator.
//!
//! # Usage
//!
//! 1. **generate**: writes every artifact under the configured output directory.
//! 2. **describe**: prints one class with its flattened parameter list.
//! 3. **provenance**: prints the provenance stamp of a source tree.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use simgen::config::BuildConfig;
use simgen::emit::provenance::Provenance;
use simgen::registry::Orchestrator;
use simgen::sim::build;

/// Command-line arguments for the generator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Simulation-object metadata generator")]
struct Args {
    #[arg(short, long, default_value = "simgen.toml")]
    config: PathBuf,

    /// Raise log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every generated artifact.
    Generate,

    /// Print a class and its flattened parameters.
    Describe {
        class: String,

        #[arg(long)]
        json: bool,
    },

    /// Print the provenance stamp of a source tree.
    Provenance { dir: Option<PathBuf> },
}

fn init_logging(verbose: u8) {
    let forced = cfg!(feature = "always-trace");
    let filter = match verbose {
        0 if !forced => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        }
        0 | 1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Generate => {
            let config = BuildConfig::load(&args.config)
                .with_context(|| format!("loading {}", args.config.display()))?;
            let stats = build::generate(&config).context("generation failed")?;
            print!("{}", stats.summary());
        }
        Command::Describe { class, json } => {
            let config = BuildConfig::load(&args.config)
                .with_context(|| format!("loading {}", args.config.display()))?;
            let env = config.env()?;
            let orch = Orchestrator::new(&config.script_sources(), &[class.as_str()], &env)
                .context("discovery failed")?;
            describe(&orch, &class, json)?;
        }
        Command::Provenance { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            print!("{}", Provenance::probe(&dir).render());
        }
    }
    Ok(())
}

fn describe(orch: &Orchestrator, name: &str, json: bool) -> Result<()> {
    let class = orch.class(name)?;
    if json {
        let params: Vec<serde_json::Value> = class
            .all_params
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "type": p.ptype.name(),
                    "desc": p.desc,
                    "default": p.default,
                })
            })
            .collect();
        let value = serde_json::json!({
            "name": class.name,
            "parent": class.parent,
            "cxx_class": class.qualified_cxx(),
            "abstract": class.is_abstract,
            "module": class.module,
            "params": params,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", class.name);
    println!("--------------------");
    println!("  Parent:      {}", class.parent.as_deref().unwrap_or("-"));
    println!("  Native:      {}", class.qualified_cxx());
    println!("  Abstract:    {}", class.is_abstract);
    println!("  Module:      {}", class.module);
    println!("Parameters:");
    for p in &class.all_params {
        match &p.default {
            Some(d) => println!("  {:<20} {:<20} = {:<12} {}", p.name, p.ptype.name(), d, p.desc),
            None => println!("  {:<20} {:<20}   {:<12} {}", p.name, p.ptype.name(), "", p.desc),
        }
    }
    Ok(())
}
