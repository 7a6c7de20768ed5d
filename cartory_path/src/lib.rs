// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Path: screen-space paths for map line strings and polygons.
//!
//! This crate turns world-space vertex sequences into [`PathDesc`] values
//! ready for an imaging backend:
//! - [`build_open_path`] for line strings: one subpath, never closed.
//! - [`build_polygon_path`] for polygons: the exterior ring and each
//!   non-empty interior ring as closed subpaths of one path.
//!
//! Every vertex goes through a single [`Projector`](cartory_view::Projector)
//! per call, so the rotation terms are computed once per path.
//!
//! Geometry is taken as-is. Ring winding is neither validated nor
//! normalized, holes are not checked for containment, and degenerate rings
//! produce degenerate subpaths. How holes render therefore depends on the
//! fill rule the caller draws with.
//!
//! A small [`Geometry`] model is provided for renderers that dispatch on the
//! kind of feature geometry.
//!
//! ```rust
//! use cartory_path::build_open_path;
//! use cartory_view::MapViewport;
//! use kurbo::Point;
//!
//! let viewport = MapViewport::new(100.0, 100.0, Point::ORIGIN, 1.0);
//! let path = build_open_path(&viewport, &[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
//! assert_eq!(path.subpath_count(), 1);
//! assert_eq!(path.closed_subpath_count(), 0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod builder;
mod geometry;

pub use builder::{build_open_path, build_polygon_path};
pub use geometry::{Geometry, GeometryKind, Polygon};

pub use cartory_imaging::{PathCmd, PathDesc};
