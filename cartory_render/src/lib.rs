// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Render: draws styled map features onto an imaging backend.
//!
//! Rendering a feature takes three steps:
//! - [`resolve`] picks a [`DrawKind`] for the [`Style`] and geometry kind,
//!   or refuses the pair with [`RenderError::UnsupportedStyleKind`];
//! - geometry is projected through the [`MapViewport`](cartory_view::MapViewport)
//!   of the [`RenderContext`] into screen-space paths, or placed as a
//!   symbol, bitmap or callout bubble under a composed transform;
//! - paths are registered with the backend, painted with state operations
//!   and draw operations, and released again.
//!
//! [`render_feature`] draws one style and reports errors to the caller.
//! [`render_features`] draws a whole list, logging and skipping the styles
//! that fail.
//!
//! Paint whose color is fully transparent once the layer opacity is applied
//! is never submitted. Empty geometry submits nothing at all.
//!
//! ```rust
//! use cartory_imaging_ref::RefBackend;
//! use cartory_path::Polygon;
//! use cartory_render::{Feature, RenderContext, VectorStyle, render_features};
//! use cartory_view::MapViewport;
//! use kurbo::Point;
//!
//! let viewport = MapViewport::new(256.0, 256.0, Point::ORIGIN, 1.0);
//! let ctx = RenderContext::new(&viewport);
//! let square = Polygon::new(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! let mut features = [Feature::new(square).with_style(VectorStyle::default())];
//!
//! let mut backend = RefBackend::default();
//! let summary = render_features(&mut backend, &ctx, &mut features);
//! assert_eq!((summary.drawn, summary.skipped), (1, 0));
//! // One fill and one outline.
//! assert_eq!(backend.draws().count(), 2);
//! assert_eq!(backend.live_paths(), 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math through `libm` for `no_std` targets.
//! - `tracing`: debug and warning output through `tracing`.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod draw;
mod error;
mod feature;
pub mod hatch;
mod log;
mod options;
mod resolve;
mod style;

pub use draw::{RenderContext, render_feature};
pub use error::RenderError;
pub use feature::{Feature, RenderSummary, render_features};
pub use options::RenderOptions;
pub use resolve::{DrawKind, resolve};
pub use style::{RasterStyle, Style, VectorStyle};
