//! REST Workbench command-line entry point.
//!
//! Loads a request template (and optionally an environment and a workspace)
//! from JSON files, then either prints it as a cURL command or sends it.
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for assembly details.

use clap::{Parser, Subcommand};
use log::warn;
use rest_workbench::config::load_config;
use rest_workbench::curl::{export, export_compact};
use rest_workbench::executor::{ExecutionConfig, HttpTransport};
use rest_workbench::history::HistoryStore;
use rest_workbench::models::{Environment, RequestTemplate, Workspace};
use rest_workbench::variables::MemorySecretStore;
use rest_workbench::{RequestClient, SendContext};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "workbench",
    about = "Export or send stored REST request templates",
    version
)]
struct Cli {
    /// Settings JSON applied to the global configuration
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a template as a cURL command with credentials redacted
    Curl {
        /// Request template JSON
        template: PathBuf,
        /// Environment JSON whose public variables are applied
        #[arg(short, long, value_name = "FILE")]
        env: Option<PathBuf>,
        /// Emit a single line instead of continuation lines
        #[arg(short, long)]
        compact: bool,
    },

    /// Send a template and record it in history
    Send {
        /// Request template JSON
        template: PathBuf,
        /// Environment JSON
        #[arg(short, long, value_name = "FILE")]
        env: Option<PathBuf>,
        /// Workspace JSON supplying workspace variables and settings
        #[arg(short, long, value_name = "FILE")]
        workspace: Option<PathBuf>,
    },
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Box<dyn Error>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&text).map_err(|e| format!("invalid {}: {}", path.display(), e))?)
}

fn read_environment(path: Option<&PathBuf>) -> Result<Option<Environment>, Box<dyn Error>> {
    path.map(read_json).transpose()
}

fn run_curl(template: &Path, env: Option<&PathBuf>, compact: bool) -> Result<(), Box<dyn Error>> {
    let template: RequestTemplate = read_json(template)?;
    let environment = read_environment(env)?;

    let command = if compact {
        export_compact(&template, environment.as_ref())?
    } else {
        export(&template, environment.as_ref())?
    };
    println!("{}", command);
    Ok(())
}

async fn run_send(
    template: &Path,
    env: Option<&PathBuf>,
    workspace: Option<&PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let template: RequestTemplate = read_json(template)?;
    let environment = read_environment(env)?;
    let workspace: Workspace = match workspace {
        Some(path) => read_json(path)?,
        None => Workspace::new("Default"),
    };

    let transport = HttpTransport::new(ExecutionConfig::for_workspace(&workspace.settings))?;
    let history = Arc::new(HistoryStore::open_default()?);
    let client = RequestClient::new(
        transport,
        history.clone(),
        Arc::new(MemorySecretStore::new()),
    );

    let mut ctx = SendContext::new(&template, &workspace);
    if let Some(environment) = &environment {
        ctx = ctx.with_environment(environment);
    }

    let result = client.send(&ctx).await;

    if let Err(e) = history.prune_with_config() {
        warn!("Failed to prune history: {}", e);
    }

    let response = result?;
    eprintln!(
        "{} {} ({}, {})",
        response.status_code,
        response.status_text,
        response.formatted_duration(),
        response.formatted_size()
    );
    match response.pretty_json() {
        Some(json) => println!("{}", json),
        None => println!("{}", String::from_utf8_lossy(&response.body)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(settings) = &cli.settings {
        load_config(Some(read_json(settings)?))?;
    }

    match &cli.command {
        Command::Curl {
            template,
            env,
            compact,
        } => run_curl(template, env.as_ref(), *compact),
        Command::Send {
            template,
            env,
            workspace,
        } => run_send(template, env.as_ref(), workspace.as_ref()).await,
    }
}
