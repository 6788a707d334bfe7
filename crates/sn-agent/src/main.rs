//! sn-agent — interpret a service-desk sentence and print the backend
//! request it maps to.
//!
//! Without `--demo` this is a dry run: the planned request is printed as
//! JSON. With `--demo` the request is executed against the in-memory sample
//! backend and the resulting rows are printed instead.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use sn_agent::config::{AgentConfig, LogFormat};
use sn_agent::plan::{self, CommandKind};
use sn_agent::{MockRecordApi, NaturalLanguageService};

#[derive(Parser)]
#[command(name = "sn-agent", version)]
#[command(about = "Turn service-desk sentences into record API requests")]
struct Cli {
    /// TOML config file (falls back to environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Execute against the in-memory sample backend instead of a dry run
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// "find all incidents about email"
    Search {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// "Close INC0010002 with resolution: fixed the issue"
    Update {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// "update @my_script.js, it's a script include"
    Script {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// File holding the script body
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
}

impl Command {
    fn kind(&self) -> CommandKind {
        match self {
            Self::Search { .. } => CommandKind::Search,
            Self::Update { .. } => CommandKind::Update,
            Self::Script { .. } => CommandKind::Script,
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Search { text } | Self::Update { text } | Self::Script { text, .. } => {
                text.join(" ")
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::from_env()?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sn-agent starting");

    let kind = cli.command.kind();
    let text = cli.command.text();
    let content = match &cli.command {
        Command::Script {
            content_file: Some(path),
            ..
        } => std::fs::read_to_string(path)?,
        _ => String::new(),
    };

    let request = plan::plan(kind, &text, &content)?;
    tracing::info!(?kind, table = request.table(), "command planned");

    let output = if cli.demo {
        let api = MockRecordApi::with_sample_data();
        let service = NaturalLanguageService::new(&api);
        let result = service.execute(&request).await?;
        json!({ "request": request, "result": result })
    } else {
        json!({ "instance_url": config.instance_url, "request": request })
    };

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
