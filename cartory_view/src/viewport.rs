// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::projector::{Projector, ScreenPoint};

/// Snapshot of the map window for one render call.
///
/// `MapViewport` is an immutable value: it records the canvas size in pixels,
/// the world coordinate shown at the canvas center, the resolution (world
/// units per pixel) and the map rotation. Renderers read it; they never
/// mutate it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    width: f32,
    height: f32,
    center: Point,
    resolution: f64,
    rotation: f64,
}

impl MapViewport {
    /// Creates an unrotated viewport.
    ///
    /// `resolution` is the number of world units covered by one screen pixel
    /// and must be positive; smaller values mean more zoomed in.
    #[must_use]
    pub fn new(width: f32, height: f32, center: Point, resolution: f64) -> Self {
        debug_assert!(resolution > 0.0, "viewport resolution must be positive");
        Self {
            width,
            height,
            center,
            resolution,
            rotation: 0.0,
        }
    }

    /// Returns a copy of this viewport rotated by `degrees`.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// World coordinate shown at the canvas center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// World units per screen pixel.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Map rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Whether the map is rotated at all.
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// Returns a projector for this viewport.
    ///
    /// The projector caches the rotation terms, so prefer it over repeated
    /// [`MapViewport::world_to_screen`] calls when projecting many vertices.
    #[must_use]
    pub fn projector(&self) -> Projector {
        Projector::new(self)
    }

    /// Projects a single world coordinate into screen space.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> ScreenPoint {
        self.projector().project(world)
    }

    /// Maps a screen coordinate back into world space.
    ///
    /// This is the exact inverse of [`MapViewport::world_to_screen`] up to the
    /// `f32` narrowing of the screen point.
    #[must_use]
    pub fn screen_to_world(&self, screen: impl Into<Point>) -> Point {
        let screen = screen.into();
        let x = screen.x - f64::from(self.width) * 0.5;
        let y = screen.y - f64::from(self.height) * 0.5;
        let (dx, dy) = if self.is_rotated() {
            let projector = self.projector();
            let (sin, cos) = (projector.sin(), projector.cos());
            (x * cos + y * sin, y * cos - x * sin)
        } else {
            (x, y)
        };
        Point::new(
            self.center.x + dx * self.resolution,
            self.center.y - dy * self.resolution,
        )
    }

    /// Returns the axis-aligned world rectangle covering the whole canvas.
    ///
    /// When the map is rotated this is the bounding box of the rotated
    /// canvas, so it can be used for conservative culling.
    #[must_use]
    pub fn world_extent(&self) -> Rect {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let corners = [
            self.screen_to_world(Point::new(0.0, 0.0)),
            self.screen_to_world(Point::new(w, 0.0)),
            self.screen_to_world(Point::new(0.0, h)),
            self.screen_to_world(Point::new(w, h)),
        ];
        let mut extent = Rect::from_points(corners[0], corners[0]);
        for corner in &corners[1..] {
            extent = extent.union_pt(*corner);
        }
        extent
    }

    /// Returns the world-to-screen mapping as an affine transform.
    ///
    /// Backends that apply their own transform stack can draw world-space
    /// geometry with this matrix instead of pre-projecting vertices.
    #[must_use]
    pub fn world_to_screen_affine(&self) -> Affine {
        let scale = 1.0 / self.resolution;
        // World → screen: move the center to the origin, flip Y, scale to
        // pixels, rotate, then move the origin to the canvas center.
        let half = Vec2::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5);
        Affine::translate(half)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-self.center.to_vec2())
    }
}
