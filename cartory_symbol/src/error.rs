// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use thiserror::Error;

/// Errors raised while building symbol records.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SymbolError {
    /// A shape kind with no local shape construction.
    #[error("unsupported symbol shape `{0}`")]
    UnsupportedSymbolShape(String),
}
