// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `TcpTransport`: the real-network `ClusterTransport`, generalized from the
//! teacher's length-prefixed-JSON IPC pipe to a `TcpStream` (spec §4.8, §6).
//! One connection per request on the client side; the server side accepts
//! connections and keeps each one open for a stream of requests.

use async_trait::async_trait;
use tokio::net::{TcpListener, TcpStream};

use crate::envelope::{Request, Response};
use crate::error::TransportError;
use crate::transport::{ClusterTransport, RequestHandler};
use crate::wire::{decode, encode, read_message, write_message};

pub struct TcpTransport {
    bind_addr: String,
}

impl TcpTransport {
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self { bind_addr: bind_addr.into() }
    }
}

#[async_trait]
impl ClusterTransport for TcpTransport {
    async fn send(&self, address: &str, request: Request) -> Result<Response, TransportError> {
        let mut stream = TcpStream::connect(address).await?;
        let payload = encode(&request)?;
        write_message(&mut stream, &payload).await?;
        let response_bytes = read_message(&mut stream).await?;
        decode(&response_bytes)
    }

    /// Binds `bind_addr` and spawns a task that accepts connections
    /// indefinitely, each handled on its own task. Returns once the
    /// listener is bound; serving itself runs in the background.
    async fn serve(&self, handler: RequestHandler) -> Result<(), TransportError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tokio::spawn(async move {
            loop {
                let (socket, _peer) = match listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to accept cluster connection");
                        continue;
                    }
                };
                let handler = handler.clone();
                tokio::spawn(serve_connection(socket, handler));
            }
        });
        Ok(())
    }
}

async fn serve_connection(mut socket: TcpStream, handler: RequestHandler) {
    loop {
        let payload = match read_message(&mut socket).await {
            Ok(payload) => payload,
            Err(_) => return,
        };
        let request: Request = match decode(&payload) {
            Ok(request) => request,
            Err(_) => return,
        };
        let response = handler(request).await;
        let Ok(out) = encode(&response) else { return };
        if write_message(&mut socket, &out).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "tcp_tests.rs"]
mod tests;
