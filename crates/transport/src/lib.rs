// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wren-transport: the cluster RPC envelope (spec §6.2) and an abstract
//! `ClusterTransport` (spec §4.8) over it.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload.

mod envelope;
mod error;
mod loopback;
mod tcp;
mod transport;
mod wire;

pub use envelope::{Request, Response};
pub use error::TransportError;
pub use loopback::{LoopbackNetwork, LoopbackTransport};
pub use tcp::TcpTransport;
pub use transport::{ClusterTransport, RequestHandler};
pub use wire::{decode, encode, read_message, write_message};
