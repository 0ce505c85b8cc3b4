// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] wren_node::ConfigError),

    #[error(transparent)]
    Storage(#[from] wren_kv::KvError),

    #[error(transparent)]
    Node(#[from] wren_node::NodeError),

    #[error(transparent)]
    Transport(#[from] wren_transport::TransportError),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("workflow {0} not found")]
    NotFound(String),
}
