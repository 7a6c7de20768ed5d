// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Arc, BezPath, PathEl, Point, Rect, Shape, Vec2};

/// Path command in `f32` screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    /// Begin a new subpath at the given point.
    MoveTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Straight line to the given point.
    LineTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// Elliptical arc segment.
    ///
    /// The arc is the part of the axis-aligned ellipse centred at `(cx, cy)`
    /// with radii `(rx, ry)` starting at `start_degrees` and sweeping
    /// `sweep_degrees` (positive is clockwise on a Y-down canvas). If a
    /// current point exists, a straight line joins it to the arc start;
    /// otherwise the arc start begins a new subpath.
    ArcTo {
        /// Ellipse center X.
        cx: f32,
        /// Ellipse center Y.
        cy: f32,
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
        /// Start angle in degrees.
        start_degrees: f32,
        /// Sweep angle in degrees.
        sweep_degrees: f32,
    },
    /// Close the current subpath.
    Close,
}

/// Path description consumed by [`ResourceBackend::create_path`](crate::ResourceBackend::create_path).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathDesc {
    /// Path commands in drawing order.
    pub commands: Box<[PathCmd]>,
}

impl PathDesc {
    /// Creates a path description from a command list.
    #[must_use]
    pub fn new(commands: Vec<PathCmd>) -> Self {
        Self {
            commands: commands.into_boxed_slice(),
        }
    }

    /// Whether the path has no commands at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of subpaths, counting each [`PathCmd::MoveTo`].
    #[must_use]
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::MoveTo { .. }))
            .count()
    }

    /// Number of explicitly closed subpaths.
    #[must_use]
    pub fn closed_subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PathCmd::Close))
            .count()
    }

    /// Flattens the description into a kurbo [`BezPath`].
    ///
    /// Arcs are approximated with cubic Béziers within `tolerance`. Arcs with
    /// a zero radius or sweep degrade to their connecting line.
    #[must_use]
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut out = BezPath::new();
        let mut current: Option<Point> = None;
        let mut subpath_start = Point::ORIGIN;
        for cmd in self.commands.iter() {
            match *cmd {
                PathCmd::MoveTo { x, y } => {
                    let p = point(x, y);
                    out.move_to(p);
                    subpath_start = p;
                    current = Some(p);
                }
                PathCmd::LineTo { x, y } => {
                    let p = point(x, y);
                    if current.is_none() {
                        out.move_to(p);
                        subpath_start = p;
                    } else {
                        out.line_to(p);
                    }
                    current = Some(p);
                }
                PathCmd::ArcTo {
                    cx,
                    cy,
                    rx,
                    ry,
                    start_degrees,
                    sweep_degrees,
                } => {
                    let center = point(cx, cy);
                    let radii = Vec2::new(f64::from(rx), f64::from(ry));
                    let start_angle = f64::from(start_degrees).to_radians();
                    let sweep_angle = f64::from(sweep_degrees).to_radians();
                    let start = center
                        + Vec2::new(radii.x * start_angle.cos(), radii.y * start_angle.sin());
                    match current {
                        None => {
                            out.move_to(start);
                            subpath_start = start;
                        }
                        Some(p) if p != start => out.line_to(start),
                        Some(_) => {}
                    }
                    if radii.x > 0.0 && radii.y > 0.0 && sweep_angle != 0.0 {
                        let arc = Arc {
                            center,
                            radii,
                            start_angle,
                            sweep_angle,
                            x_rotation: 0.0,
                        };
                        arc.append_iter(tolerance).for_each(|el| out.push(el));
                        current = Some(
                            center
                                + Vec2::new(
                                    radii.x * (start_angle + sweep_angle).cos(),
                                    radii.y * (start_angle + sweep_angle).sin(),
                                ),
                        );
                    } else {
                        current = Some(start);
                    }
                }
                PathCmd::Close => {
                    if current.is_some() {
                        out.push(PathEl::ClosePath);
                        current = Some(subpath_start);
                    }
                }
            }
        }
        out
    }

    /// Bounding box of the flattened path, or `None` for an empty path.
    #[must_use]
    pub fn bounds(&self, tolerance: f64) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_bez_path(tolerance).bounding_box())
    }
}

impl From<Vec<PathCmd>> for PathDesc {
    fn from(commands: Vec<PathCmd>) -> Self {
        Self::new(commands)
    }
}

#[inline]
fn point(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}
