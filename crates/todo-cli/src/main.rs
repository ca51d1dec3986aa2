use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use todo_core::{StoreConfig, TodoStore};
use todo_tools::{AgentContext, ToolRegistry};

mod logging;

use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "todo-cli")]
#[command(about = "Drive the per-agent todo tools with JSON lines on stdin")]
#[command(version)]
struct Cli {
    /// Agent used when a call does not name one
    #[arg(long, env = "AGENT_TODO_AGENT_ID", default_value = "default")]
    agent_id: String,

    /// TOML file with store settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, env = "DEBUG", default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read one tool call per line from stdin and print each payload (default)
    Run,
    /// Print the tool schemas
    Tools,
}

/// One stdin line: `{"tool": "...", "args": {...}, "agent_id": "..."}`
#[derive(Deserialize, Debug)]
struct ToolCallLine {
    tool: String,
    #[serde(default)]
    args: Value,
    agent_id: Option<String>,
}

async fn handle_line(registry: &ToolRegistry, default_agent: &str, line: &str) -> Value {
    let call: ToolCallLine = match serde_json::from_str(line) {
        Ok(call) => call,
        Err(err) => {
            log::warn!("Unreadable tool call: {}", err);
            return json!({
                "success": false,
                "error": format!("Invalid tool call: {}", err),
            });
        }
    };

    let ctx = AgentContext::new(call.agent_id.unwrap_or_else(|| default_agent.to_string()));
    registry.invoke(&ctx, &call.tool, call.args).await.payload
}

async fn run(registry: &ToolRegistry, default_agent: &str) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let payload = handle_line(registry, default_agent, &line).await;
        stdout.write_all(payload.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = StoreConfig::load(cli.config.as_deref())
        .with_context(|| format!("failed to load config {:?}", cli.config))?;
    log::debug!("Store configuration: {:?}", config);

    let registry = ToolRegistry::with_todo_tools(Arc::new(TodoStore::with_config(config)));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            log::info!("Reading tool calls from stdin (default agent '{}')", cli.agent_id);
            run(&registry, &cli.agent_id).await
        }
        Commands::Tools => {
            let schemas = serde_json::to_string_pretty(&registry.list_tools())?;
            println!("{}", schemas);
            Ok(())
        }
    }
}
