// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("message exceeds the maximum frame size")]
    MessageTooLarge,
    #[error("request to {0} timed out")]
    Timeout(String),
    #[error("no route to node {0}")]
    Unreachable(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Serde(e.to_string())
    }
}
