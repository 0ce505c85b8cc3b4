// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ClusterTransport`: an abstract bidirectional channel between cluster
//! nodes (spec §4.8, §6.2). `send` resolves the target by address; `serve`
//! installs the handler this node answers incoming requests with.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::envelope::{Request, Response};
use crate::error::TransportError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A request handler may itself need to make outbound calls (gossip's
/// `PingReq` forwards a nested `Ping`), so handlers are async.
pub type RequestHandler = Arc<dyn Fn(Request) -> BoxFuture<Response> + Send + Sync>;

#[async_trait]
pub trait ClusterTransport: Send + Sync {
    /// Sends `request` to `address` and waits for its response, bounded by
    /// `rpc_timeout` (spec §4.8); implementations map a deadline overrun to
    /// [`TransportError::Timeout`].
    async fn send(&self, address: &str, request: Request) -> Result<Response, TransportError>;

    /// Installs the handler this node answers incoming requests with.
    /// Replaces any previously installed handler.
    async fn serve(&self, handler: RequestHandler) -> Result<(), TransportError>;
}
