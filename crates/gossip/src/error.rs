// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;
use wren_transport::TransportError;

#[derive(Debug, Error)]
pub enum GossipError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("no seed node responded to join")]
    JoinFailed,
}
