// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wren-ring: a consistent hash ring with virtual nodes (spec §4.6).
//!
//! The ring is a plain, immutable value; `RingHandle` is the
//! rebuild-and-atomically-swap wrapper membership events publish into
//! (spec §5, §9 — subscriber, not back-link).

mod handle;
mod ring;

pub use handle::RingHandle;
pub use ring::Ring;
