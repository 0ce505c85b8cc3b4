// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node-level failure taxonomy: wraps the lower layers' errors plus the
//! routing/config failures that only exist once they're assembled.

use thiserror::Error;
use wren_gossip::GossipError;
use wren_runtime::RuntimeError;
use wren_storage::StorageError;
use wren_transport::TransportError;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Gossip(#[from] GossipError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("remote node {0} rejected the request: {1}")]
    RemoteRejected(String, String),

    #[error("no cluster member is responsible for this key")]
    NoOwner,
}
