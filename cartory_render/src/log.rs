// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conditional logging macros.
//!
//! With the `tracing` feature these re-export the `tracing` macros; without
//! it they expand to nothing. They carry a `log_` prefix because a bare
//! `warn` would collide with the builtin lint attribute.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug as log_debug, warn as log_warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {log_debug, log_warn};
