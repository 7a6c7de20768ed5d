// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Symbol: point symbols as local shapes plus placement transforms.
//!
//! A point feature is drawn as a small symbol at its projected screen
//! position. Instead of baking screen coordinates, this crate returns:
//! - a [`SymbolShape`] in local coordinates, centred on the origin and
//!   unscaled (circle, rectangle or equilateral triangle), and
//! - a [`Placement`]: the ordered transform stack that puts the local shape
//!   on screen.
//!
//! Backends apply the placement with their own transform stack, either step
//! by step ([`Placement::steps`]) or as one matrix ([`Placement::to_affine`]).
//!
//! ## Placement order
//!
//! For vector symbols ([`compose_symbol`]) the order is fixed:
//! 1. translate to the screen point,
//! 2. scale by [`SymbolStyle::scale`],
//! 3. translate by the style [`Offset`] (Y flipped; relative offsets are
//!    fractions of the nominal size),
//! 4. rotate by the style rotation, plus the map rotation when
//!    [`SymbolStyle::rotate_with_map`] is set, only if the total is non-zero.
//!
//! Bitmap symbols ([`compose_bitmap`]) are resolved through a
//! [`BitmapLookup`] and centred on the point.
//!
//! ```rust
//! use cartory_symbol::{SymbolShape, SymbolStyle, SymbolType, compose_symbol};
//! use cartory_view::ScreenPoint;
//!
//! let style = SymbolStyle {
//!     symbol_type: SymbolType::Triangle,
//!     width: 20.0,
//!     ..SymbolStyle::default()
//! };
//! let (shape, placement) = compose_symbol(ScreenPoint::new(64.0, 64.0), &style, 0.0);
//! assert!(matches!(shape, SymbolShape::Triangle { .. }));
//! assert_eq!(placement.steps().len(), 3);
//! ```
//!
//! Shape kinds enter the typed model through [`SymbolType`]'s `FromStr` and
//! `TryFrom<u8>` impls, which reject unknown kinds with
//! [`SymbolError::UnsupportedSymbolShape`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bitmap;
mod compose;
mod error;
mod placement;
mod shape;
mod style;

pub use bitmap::{BitmapId, BitmapInfo, BitmapLookup};
pub use compose::{compose_bitmap, compose_symbol, symbol_rotation};
pub use error::SymbolError;
pub use placement::{Placement, TransformStep};
pub use shape::SymbolShape;
pub use style::{Offset, SymbolStyle, SymbolType};
