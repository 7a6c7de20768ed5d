// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_path::GeometryKind;
use cartory_symbol::{BitmapId, SymbolError};
use thiserror::Error;

/// Faults that abort drawing one style of one feature.
///
/// None of these are fatal to a render pass: [`render_features`](crate::render_features)
/// logs them and moves on to the next style.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum RenderError {
    /// The style kind has no drawing for this kind of geometry.
    #[error("{style} style cannot be drawn on a {geometry}")]
    UnsupportedStyleKind {
        /// Name of the style kind.
        style: &'static str,
        /// Kind of the feature geometry.
        geometry: GeometryKind,
    },
    /// A symbol shape name with no shape, from
    /// [`Style::symbol_of_kind`](crate::Style::symbol_of_kind).
    #[error(transparent)]
    UnsupportedSymbolShape(#[from] SymbolError),
    /// A bitmap handle the bitmap lookup does not know.
    #[error("bitmap {0:?} is not registered")]
    UnknownBitmap(BitmapId),
}
