// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Paint: pen and fill records for map styles.
//!
//! Styles describe how geometry is painted with two small value records:
//! - [`Pen`]: stroke color, width, caps, join, miter limit and a [`PenStyle`]
//!   dash pattern. [`Pen::to_stroke`] produces the [`kurbo::Stroke`] handed
//!   to imaging backends.
//! - [`Fill`]: fill color and a [`FillStyle`]: solid, one of the hatch
//!   patterns, or a repeated bitmap named by a [`BitmapId`].
//!
//! Layer opacity is applied with [`with_opacity`], and [`is_invisible`] is the
//! single predicate deciding whether a fill or stroke is skipped.
//!
//! ```rust
//! use cartory_paint::{Pen, PenStyle, is_invisible, with_opacity};
//! use peniko::Color;
//!
//! let pen = Pen::new(Color::BLACK, 2.0).with_style(PenStyle::Dash);
//! assert_eq!(pen.dash_pattern().as_slice(), &[8.0, 6.0]);
//! assert!(is_invisible(with_opacity(pen.color, 0.0)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod fill;
mod pen;

pub use fill::{BitmapId, Fill, FillStyle};
pub use pen::{Pen, PenStyle};

use peniko::Color;

/// Multiplies the alpha of `color` by the layer `opacity`.
#[must_use]
#[inline]
pub fn with_opacity(color: Color, opacity: f32) -> Color {
    if opacity == 1.0 {
        color
    } else {
        color.multiply_alpha(opacity)
    }
}

/// Whether a paint with `color` would leave no mark.
///
/// Only an alpha of exactly zero counts; nearly transparent paint is still
/// drawn.
#[must_use]
#[inline]
pub fn is_invisible(color: Color) -> bool {
    color.components[3] == 0.0
}
