// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit encode/decode interface passed to state and call operations.
//!
//! The embedded store only ever sees opaque bytes (§9 of the design notes);
//! callers supply a [`Codec`] at the call site instead of the store doing
//! compile-time derivation for them.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors produced while encoding or decoding a value through a [`Codec`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// A reversible mapping between a typed value and the bytes a store persists.
pub trait Codec<T> {
    fn encode(value: &T) -> Result<Vec<u8>, CodecError>;
    fn decode(bytes: &[u8]) -> Result<T, CodecError>;
}

/// Default codec: `serde_json`. Deterministic and round-trippable, which is
/// all journal and state payloads require.
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
