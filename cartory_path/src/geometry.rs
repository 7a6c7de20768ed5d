// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use cartory_imaging::PathDesc;
use cartory_view::MapViewport;
use kurbo::{Point, Rect};

use crate::builder::{build_open_path, build_polygon_path};

/// A polygon: one exterior ring and any number of interior rings (holes).
///
/// Rings are implicitly closed; repeating the first vertex at the end is
/// allowed but not required.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Outer boundary.
    pub exterior: Vec<Point>,
    /// Holes, in drawing order.
    pub interiors: Vec<Vec<Point>>,
}

impl Polygon {
    /// Creates a polygon without holes.
    #[must_use]
    pub fn new(exterior: Vec<Point>) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Returns this polygon with an extra hole.
    #[must_use]
    pub fn with_interior(mut self, ring: Vec<Point>) -> Self {
        self.interiors.push(ring);
        self
    }

    /// Builds the screen path of this polygon.
    #[must_use]
    pub fn to_path(&self, viewport: &MapViewport) -> PathDesc {
        build_polygon_path(viewport, &self.exterior, &self.interiors)
    }
}

/// Kind of a [`Geometry`], used when matching styles to features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// A single position.
    Point,
    /// An open vertex sequence.
    LineString,
    /// A polygon with optional holes.
    Polygon,
}

impl GeometryKind {
    /// Human-readable name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::LineString => "line string",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// World-space feature geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A single position.
    Point(Point),
    /// An open vertex sequence.
    LineString(Vec<Point>),
    /// A polygon with optional holes.
    Polygon(Polygon),
}

impl Geometry {
    /// Kind of this geometry.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::LineString(_) => GeometryKind::LineString,
            Self::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// World-space bounds, or `None` when there are no vertices.
    ///
    /// Polygon bounds only consider the exterior ring.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        let vertices: &[Point] = match self {
            Self::Point(p) => core::slice::from_ref(p),
            Self::LineString(vertices) => vertices,
            Self::Polygon(polygon) => &polygon.exterior,
        };
        let (first, rest) = vertices.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
        )
    }

    /// Builds the screen path of a line string or polygon.
    ///
    /// Points have no path and yield an empty description.
    #[must_use]
    pub fn to_path(&self, viewport: &MapViewport) -> PathDesc {
        match self {
            Self::Point(_) => PathDesc::default(),
            Self::LineString(vertices) => build_open_path(viewport, vertices),
            Self::Polygon(polygon) => polygon.to_path(viewport),
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}
