// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::MapViewport;

/// A projected screen coordinate in `f32` pixels.
///
/// This is the narrowing boundary of the projection pipeline: everything
/// upstream is computed in `f64`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate, growing to the right.
    pub x: f32,
    /// Vertical pixel coordinate, growing downwards.
    pub y: f32,
}

impl ScreenPoint {
    /// Creates a screen point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to kurbo's point type.
    #[inline]
    pub fn to_kurbo(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl From<ScreenPoint> for Point {
    #[inline]
    fn from(pt: ScreenPoint) -> Self {
        pt.to_kurbo()
    }
}

/// Batch world-to-screen projector for one [`MapViewport`].
///
/// The sine and cosine of the map rotation are evaluated once when the
/// projector is created and reused for every vertex.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    center: Point,
    resolution: f64,
    half_width: f64,
    half_height: f64,
    rotated: bool,
    sin: f64,
    cos: f64,
}

impl Projector {
    /// Creates a projector for `viewport`.
    #[must_use]
    pub fn new(viewport: &MapViewport) -> Self {
        let (sin, cos) = if viewport.is_rotated() {
            let theta = viewport.rotation().to_radians();
            (theta.sin(), theta.cos())
        } else {
            (0.0, 1.0)
        };
        Self {
            center: viewport.center(),
            resolution: viewport.resolution(),
            half_width: f64::from(viewport.width()) * 0.5,
            half_height: f64::from(viewport.height()) * 0.5,
            rotated: viewport.is_rotated(),
            sin,
            cos,
        }
    }

    /// Sine of the map rotation.
    #[must_use]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Cosine of the map rotation.
    #[must_use]
    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Projects a world coordinate without narrowing the result.
    #[must_use]
    #[inline]
    pub fn project_f64(&self, world: Point) -> Point {
        let mut x = (world.x - self.center.x) / self.resolution;
        let mut y = (self.center.y - world.y) / self.resolution;
        if self.rotated {
            let nx = x * self.cos - y * self.sin;
            let ny = x * self.sin + y * self.cos;
            x = nx;
            y = ny;
        }
        Point::new(x + self.half_width, y + self.half_height)
    }

    /// Projects a world coordinate into `f32` screen pixels.
    #[must_use]
    #[inline]
    pub fn project(&self, world: Point) -> ScreenPoint {
        let pt = self.project_f64(world);
        ScreenPoint::new(narrow(pt.x), narrow(pt.y))
    }

    /// Projects every vertex of `world` and appends the results to `out`.
    pub fn project_into(&self, world: &[Point], out: &mut Vec<ScreenPoint>) {
        out.reserve(world.len());
        out.extend(world.iter().map(|pt| self.project(*pt)));
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "screen coordinates are handed to backends as f32"
)]
#[inline]
fn narrow(v: f64) -> f32 {
    v as f32
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use kurbo::Point;

    use crate::{MapViewport, ScreenPoint};

    #[test]
    fn batch_matches_single_projection() {
        let vp = MapViewport::new(256.0, 256.0, Point::new(3.0, 4.0), 0.5).with_rotation(37.0);
        let world = [
            Point::new(0.0, 0.0),
            Point::new(10.0, -2.5),
            Point::new(-7.25, 19.0),
        ];
        let mut out = Vec::new();
        vp.projector().project_into(&world, &mut out);
        assert_eq!(out.len(), world.len());
        for (pt, screen) in world.iter().zip(&out) {
            assert_eq!(*screen, vp.world_to_screen(*pt));
        }
    }

    #[test]
    fn unrotated_projector_uses_identity_terms() {
        let vp = MapViewport::new(10.0, 10.0, Point::ORIGIN, 1.0);
        let projector = vp.projector();
        assert_eq!(projector.sin(), 0.0);
        assert_eq!(projector.cos(), 1.0);
        assert_eq!(projector.project(Point::ORIGIN), ScreenPoint::new(5.0, 5.0));
    }

    #[test]
    fn narrowing_happens_after_f64_math() {
        // Large world coordinates: narrowing before subtracting the center
        // would lose the sub-unit offset entirely.
        let center = Point::new(5_000_000.25, -3_000_000.75);
        let vp = MapViewport::new(2.0, 2.0, center, 0.5);
        let screen = vp.world_to_screen(Point::new(5_000_000.5, -3_000_000.5));
        assert_eq!(screen, ScreenPoint::new(1.5, 0.5));
    }
}
