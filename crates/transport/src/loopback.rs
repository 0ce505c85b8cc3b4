// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `LoopbackTransport`: an in-process test double keyed by node address,
//! standing in for a real socket-based `ClusterTransport` in unit and
//! scenario tests (spec §4.8 "abstract transport").

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::envelope::{Request, Response};
use crate::error::TransportError;
use crate::transport::{ClusterTransport, RequestHandler};

/// A shared directory of in-process peers. Each [`LoopbackTransport`]
/// registers its handler under its own address; `send` dispatches straight
/// into the target's handler with no network hop.
#[derive(Clone, Default)]
pub struct LoopbackNetwork {
    peers: Arc<RwLock<HashMap<String, RequestHandler>>>,
}

impl LoopbackNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self, address: impl Into<String>) -> LoopbackTransport {
        LoopbackTransport {
            address: address.into(),
            network: self.clone(),
        }
    }
}

pub struct LoopbackTransport {
    address: String,
    network: LoopbackNetwork,
}

#[async_trait]
impl ClusterTransport for LoopbackTransport {
    async fn send(&self, address: &str, request: Request) -> Result<Response, TransportError> {
        let handler = self
            .network
            .peers
            .read()
            .get(address)
            .cloned()
            .ok_or_else(|| TransportError::Unreachable(address.to_string()))?;
        Ok(handler(request).await)
    }

    async fn serve(&self, handler: RequestHandler) -> Result<(), TransportError> {
        self.network.peers.write().insert(self.address.clone(), handler);
        Ok(())
    }
}

#[cfg(test)]
#[path = "loopback_tests.rs"]
mod tests;
