// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory View: map viewport snapshots and world-to-screen projection.
//!
//! This crate provides a small, headless model of the map window that a
//! renderer draws into for one frame. It focuses on:
//! - The viewport state (center, resolution, rotation, canvas size).
//! - Projecting world coordinates into screen pixels, singly or in batches.
//! - Mapping screen pixels back into world space and computing the visible
//!   world extent.
//! - The resolution range a style is drawn in ([`Visibility`]).
//!
//! It does **not** own any feature data or rendering backend. Callers are
//! expected to:
//! - Build a [`MapViewport`] snapshot per render call.
//! - Use a [`Projector`] to project whole vertex sequences so that the
//!   rotation terms are computed once per batch.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use cartory_view::MapViewport;
//!
//! // 512x512 canvas centered on the world origin, one world unit per pixel.
//! let viewport = MapViewport::new(512.0, 512.0, Point::ORIGIN, 1.0);
//!
//! let screen = viewport.world_to_screen(Point::new(100.0, 50.0));
//! assert_eq!((screen.x, screen.y), (356.0, 206.0));
//! ```
//!
//! ## Coordinate conventions
//!
//! - World Y grows upwards, screen Y grows downwards.
//! - Rotation is expressed in degrees; positive values rotate the map
//!   clockwise on screen.
//! - All projection math runs in `f64`. Results are narrowed to `f32` only in
//!   [`ScreenPoint`], which is what drawing backends consume.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod projector;
mod viewport;
mod visibility;

pub use projector::{Projector, ScreenPoint};
pub use viewport::MapViewport;
pub use visibility::Visibility;
