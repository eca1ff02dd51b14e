//! Knowledge Hooks - Advisory knowledge capture for coding-assistant sessions
//!
//! Invoked once per host event with the event payload on stdin. The process
//! always exits successfully; failures only show up in the debug log.

use anyhow::Result;
use clap::{Parser, Subcommand};
use knowledge_hooks::{
    config::HooksConfig,
    dispatch::ProcessSink,
    hooks::{read_payload, run_advisory, AssistantResponse, HookContext, HookRunner},
    session::SessionEvent,
    tools::ToolEvent,
};
use serde::de::DeserializeOwned;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "KNOWLEDGE_HOOKS_LOG";

#[derive(Parser)]
#[command(name = "knowledge-hooks")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Advisory knowledge capture hooks for coding-assistant sessions")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "KNOWLEDGE_HOOKS_CONFIG")]
    config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    project_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract insights from an assistant response
    AssistantResponse,

    /// Record knowledge from a completed tool call
    ToolComplete,

    /// Announce a new session and detect project settings
    SessionStart,

    /// Summarize a finished session
    SessionEnd,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let config = HooksConfig::load_or_default(cli.config.as_deref());
    let project_dir = resolve_project_dir(cli.project_dir);

    match cli.command {
        Commands::AssistantResponse => {
            let payload: AssistantResponse = stdin_payload();
            run_hook("assistant-response", config, project_dir, |runner| {
                runner.assistant_response(&payload)
            });
        }
        Commands::ToolComplete => {
            let event: ToolEvent = stdin_payload();
            run_hook("tool-complete", config, project_dir, |runner| {
                runner.tool_complete(&event)
            });
        }
        Commands::SessionStart => {
            run_hook("session-start", config, project_dir, |runner| {
                runner.session_start()
            });
        }
        Commands::SessionEnd => {
            let event: SessionEvent = stdin_payload();
            run_hook("session-end", config, project_dir, |runner| {
                runner.session_end(&event)
            });
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { default } => {
                show_config(if default { None } else { Some(&config) })?;
            }
        },
    }

    Ok(())
}

/// Explicit directory, else the current one, else `.`
fn resolve_project_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Current directory unavailable, using '.'");
            PathBuf::from(".")
        })
    })
}

/// Logs go to stderr only; stdout belongs to the host.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("knowledge_hooks=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
    };

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Read the event payload, or the empty event when stdin is interactive
fn stdin_payload<T>() -> T
where
    T: DeserializeOwned + Default,
{
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return T::default();
    }
    read_payload(stdin.lock())
}

fn run_hook<F>(event: &str, config: HooksConfig, project_dir: PathBuf, hook: F)
where
    F: FnOnce(&HookRunner<'_>) -> knowledge_hooks::Result<knowledge_hooks::HookOutcome>,
{
    let sink = ProcessSink::new(config.dispatch.clone(), project_dir.clone());
    let context = HookContext::new(project_dir, config);

    run_advisory(event, || {
        let runner = HookRunner::new(&sink, context)?;
        hook(&runner)
    });
}

fn show_config(config: Option<&HooksConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_project_dir() {
        let dir = PathBuf::from("/work/app");
        assert_eq!(resolve_project_dir(Some(dir.clone())), dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_deleted_cwd_falls_back() {
        let original = std::env::current_dir().unwrap();
        let scratch = tempfile::TempDir::new().unwrap();
        let gone = scratch.path().join("gone");
        std::fs::create_dir(&gone).unwrap();
        std::env::set_current_dir(&gone).unwrap();
        std::fs::remove_dir(&gone).unwrap();

        let resolved = resolve_project_dir(None);
        std::env::set_current_dir(&original).unwrap();

        assert_eq!(resolved, PathBuf::from("."));
    }
}
