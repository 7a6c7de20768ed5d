// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;

use cartory_imaging::{PathCmd, PathDesc};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::SymbolType;

/// Local symbol shape, centred on the origin and unscaled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SymbolShape {
    /// Circle around the origin.
    Circle {
        /// Radius in pixels.
        radius: f64,
    },
    /// Axis-aligned box centred on the origin.
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
    },
    /// Equilateral triangle pointing up, centred on its circumcenter.
    Triangle {
        /// Apex.
        top: Point,
        /// Bottom-left vertex.
        left: Point,
        /// Bottom-right vertex.
        right: Point,
    },
}

impl SymbolShape {
    /// Builds the local shape of `kind` for a nominal symbol size.
    #[must_use]
    pub fn new(kind: SymbolType, width: f64, height: f64) -> Self {
        match kind {
            SymbolType::Ellipse => Self::Circle { radius: width / 2.0 },
            SymbolType::Rectangle => Self::Rect { width, height },
            SymbolType::Triangle => Self::triangle(width),
        }
    }

    /// Equilateral triangle whose circumscribed circle has diameter `side`.
    #[must_use]
    pub fn triangle(side: f64) -> Self {
        let altitude = 3.0_f64.sqrt() / 2.0 * side;
        let inradius = altitude / 3.0;
        let circumradius = 2.0 * inradius;
        Self::Triangle {
            top: Point::new(0.0, -circumradius),
            left: Point::new(-side * 0.5, inradius),
            right: Point::new(side * 0.5, inradius),
        }
    }

    /// Path of the shape outline in local coordinates.
    #[must_use]
    pub fn to_path_desc(&self) -> PathDesc {
        match *self {
            Self::Circle { radius } => {
                let r = narrow(radius);
                PathDesc::new(vec![
                    PathCmd::ArcTo {
                        cx: 0.0,
                        cy: 0.0,
                        rx: r,
                        ry: r,
                        start_degrees: 0.0,
                        sweep_degrees: 360.0,
                    },
                    PathCmd::Close,
                ])
            }
            Self::Rect { width, height } => {
                let (hw, hh) = (narrow(width / 2.0), narrow(height / 2.0));
                PathDesc::new(vec![
                    PathCmd::MoveTo { x: -hw, y: -hh },
                    PathCmd::LineTo { x: hw, y: -hh },
                    PathCmd::LineTo { x: hw, y: hh },
                    PathCmd::LineTo { x: -hw, y: hh },
                    PathCmd::Close,
                ])
            }
            Self::Triangle { top, left, right } => PathDesc::new(vec![
                PathCmd::MoveTo {
                    x: narrow(top.x),
                    y: narrow(top.y),
                },
                PathCmd::LineTo {
                    x: narrow(left.x),
                    y: narrow(left.y),
                },
                PathCmd::LineTo {
                    x: narrow(right.x),
                    y: narrow(right.y),
                },
                PathCmd::Close,
            ]),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "path coordinates are handed to backends as f32"
)]
#[inline]
fn narrow(v: f64) -> f32 {
    v as f32
}
