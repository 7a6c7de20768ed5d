// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Callout: bubble outlines for map callouts.
//!
//! A callout is a rounded rectangle with an arrow that points at a map
//! feature. This crate computes:
//! - the canvas size a bubble needs around its content ([`bubble_size`]),
//! - the closed bubble outline and the arrow tip used as its anchor
//!   ([`build_bubble`]),
//! - where the content goes inside the bubble and how the bubble is placed
//!   on screen ([`CalloutStyle::content_origin`], [`CalloutStyle::placement`]).
//!
//! The arrow never overlaps a rounded corner: its position along the edge is
//! clamped so the base stays clear of both corner arcs ([`arrow_offset`]).
//!
//! ## Caching
//!
//! [`CalloutStyle`] owns the only mutable derived state in the rendering
//! core: the built [`Bubble`]. The cache is tagged with a geometry version
//! that every value-changing geometry setter bumps. [`CalloutStyle::bubble`]
//! rebuilds when the cache is missing or stale; [`CalloutStyle::cached_bubble`]
//! gives shared access to a fresh cache without rebuilding.
//!
//! ```rust
//! use cartory_callout::{ArrowAlignment, CalloutStyle};
//!
//! let mut style = CalloutStyle::new();
//! style.set_content_size(50.0, 20.0);
//! let version = style.version();
//! let anchor = style.bubble().anchor;
//!
//! style.set_arrow_alignment(ArrowAlignment::Top);
//! assert_ne!(style.version(), version);
//! assert!(style.cached_bubble().is_none());
//! assert_ne!(style.bubble().anchor, anchor);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod geometry;
mod log;
mod style;

pub use geometry::{
    ArrowAlignment, Bubble, CalloutGeometry, Padding, arrow_offset, bubble_size, build_bubble,
};
pub use style::CalloutStyle;
