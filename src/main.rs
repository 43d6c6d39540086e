use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cypher_studio::{config, QueryBuilderState, QueryCompiler};

/// cypher-studio - compile visual query builder state into Cypher
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Put every clause on its own line
    #[arg(long, global = true)]
    multiline: bool,

    /// How many times a colliding alias is bumped before giving up (1-26)
    #[arg(long, global = true)]
    max_alias_probes: Option<u32>,

    /// Variable used when nothing else is bound
    #[arg(long, global = true)]
    fallback_alias: Option<String>,

    /// YAML configuration file (environment variables are used otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a builder state into a read query
    Compile {
        /// Builder state JSON file (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Compile a builder state plus property assignments into an update
    Update {
        /// Alias of the node to update
        #[arg(long)]
        target: String,

        /// JSON object of property -> new value
        #[arg(long)]
        values: String,

        /// Builder state JSON file (stdin when omitted)
        input: Option<PathBuf>,
    },
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            multiline: cli.multiline,
            max_alias_probes: cli.max_alias_probes,
            fallback_alias: cli.fallback_alias.clone(),
        }
    }
}

fn main() {
    // Load .env first so it can carry RUST_LOG
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to WARN level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let base = match &cli.config {
        Some(path) => config::CompilerConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => config::CompilerConfig::from_env().context("reading configuration from environment")?,
    };
    let config = config::CompilerConfig::from_cli(base, (&cli).into())
        .context("invalid command line configuration")?;
    log::debug!("configuration: {:?}", config);

    let compiler = QueryCompiler::new(config);

    let query = match &cli.command {
        Command::Compile { input } => {
            let state = read_state(input.as_deref())?;
            compiler.compile(&state)
        }
        Command::Update {
            target,
            values,
            input,
        } => {
            let state = read_state(input.as_deref())?;
            let values: serde_json::Value =
                serde_json::from_str(values).context("parsing --values")?;
            let serde_json::Value::Object(values) = values else {
                bail!("--values must be a JSON object");
            };
            compiler.compile_update(&state, target, values)?
        }
    };

    println!("{}", query);
    Ok(())
}

fn read_state(input: Option<&Path>) -> anyhow::Result<QueryBuilderState> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading builder state from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("parsing builder state")
}
