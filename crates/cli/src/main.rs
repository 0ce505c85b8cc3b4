// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wren`: the thin operator CLI over a running node (spec.md §1 scopes CLI
//! argument parsing out of the core runtime, but still wants a way to drive
//! it) — bootstrap a node in the foreground, or issue one-shot
//! submit/status/cancel requests against a node's cluster address.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use wren_core::{SystemClock, WorkflowId};
use wren_kv::{KvStore, SledStore};
use wren_node::{Node, NodeConfig};
use wren_transport::{ClusterTransport, Request, Response, TcpTransport};

mod error;
use error::CliError;

#[derive(Parser)]
#[command(name = "wren", version, about = "Durable workflow runtime operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a node in the foreground until interrupted.
    Start {
        /// Path to a TOML config file; defaults are used for anything it omits.
        #[arg(long, default_value = "wren.toml")]
        config: PathBuf,
    },
    /// Submits a workflow to the node owning its id.
    Submit {
        /// Address of any node in the cluster.
        #[arg(long)]
        address: String,
        /// Name the target node registered the workflow under.
        #[arg(long)]
        workflow: String,
        /// JSON-encoded input, forwarded to the workflow body as bytes.
        #[arg(long, default_value = "{}")]
        input: String,
        /// Explicit workflow id; a fresh one is generated if omitted.
        #[arg(long)]
        workflow_id: Option<String>,
    },
    /// Reads a workflow's status from the node owning its id.
    Status {
        #[arg(long)]
        address: String,
        #[arg(long)]
        workflow_id: String,
    },
    /// Requests cancellation of a running workflow.
    Cancel {
        #[arg(long)]
        address: String,
        #[arg(long)]
        workflow_id: String,
    },
}

#[tokio::main]
async fn main() {
    wren_node::init_logging();
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    match Cli::parse().command {
        Command::Start { config } => start_node(&config).await,
        Command::Submit { address, workflow, input, workflow_id } => {
            submit(&address, &workflow, input, workflow_id).await
        }
        Command::Status { address, workflow_id } => status(&address, &workflow_id).await,
        Command::Cancel { address, workflow_id } => cancel(&address, &workflow_id).await,
    }
}

async fn start_node(config_path: &PathBuf) -> Result<(), CliError> {
    let config = if config_path.exists() {
        NodeConfig::load(config_path)?
    } else {
        tracing::warn!(path = %config_path.display(), "no config file found, starting with defaults");
        NodeConfig::default()
    };
    let bind_addr = config.bind_addr.clone();
    let kv: Arc<dyn KvStore> = Arc::new(SledStore::open(&config.data_dir)?);
    let transport = Arc::new(TcpTransport::new(bind_addr.clone()));
    let node = Arc::new(Node::new(config, kv, transport, SystemClock));

    node.start().await?;
    println!("wren node {} listening on {bind_addr}", node.local_id());

    tokio::signal::ctrl_c().await?;
    node.stop();
    Ok(())
}

async fn submit(
    address: &str,
    workflow: &str,
    input: String,
    workflow_id: Option<String>,
) -> Result<(), CliError> {
    let workflow_id = match workflow_id {
        Some(id) => WorkflowId::from(id.as_str()),
        None => WorkflowId::new(),
    };
    let request = Request::SubmitWorkflow {
        workflow_id,
        workflow_name: workflow.to_string(),
        input_json: input,
    };
    match client().send(address, request).await? {
        Response::SubmitWorkflow { success: true, .. } => {
            println!("{workflow_id}");
            Ok(())
        }
        Response::SubmitWorkflow { success: false, error_message } => {
            Err(CliError::Rejected(error_message.unwrap_or_default()))
        }
        _ => Err(CliError::Rejected("unexpected response from node".to_string())),
    }
}

async fn status(address: &str, workflow_id: &str) -> Result<(), CliError> {
    let request = Request::GetStatus { workflow_id: WorkflowId::from(workflow_id) };
    match client().send(address, request).await? {
        Response::GetStatus { found: true, status } => {
            println!("{}", status.unwrap_or_else(|| "unknown".to_string()));
            Ok(())
        }
        Response::GetStatus { found: false, .. } => Err(CliError::NotFound(workflow_id.to_string())),
        _ => Err(CliError::Rejected("unexpected response from node".to_string())),
    }
}

async fn cancel(address: &str, workflow_id: &str) -> Result<(), CliError> {
    let request = Request::CancelWorkflow { workflow_id: WorkflowId::from(workflow_id) };
    match client().send(address, request).await? {
        Response::CancelWorkflow { success } => {
            println!("{success}");
            Ok(())
        }
        _ => Err(CliError::Rejected("unexpected response from node".to_string())),
    }
}

/// A client-only transport: it never serves, so the bind address is never
/// actually bound — only used to satisfy `TcpTransport::send`'s receiver.
fn client() -> TcpTransport {
    TcpTransport::new("0.0.0.0:0")
}
