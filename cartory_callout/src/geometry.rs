// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use cartory_imaging::{PathCmd, PathDesc};
use kurbo::{Point, Size};

/// Side of the bubble the arrow protrudes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArrowAlignment {
    /// Arrow below the bubble; the bubble sits above its anchor.
    #[default]
    Bottom,
    /// Arrow on the left edge.
    Left,
    /// Arrow above the bubble.
    Top,
    /// Arrow on the right edge.
    Right,
}

impl ArrowAlignment {
    /// Whether the arrow sits on a horizontal edge (top or bottom).
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Per-side padding between the bubble outline and its content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Left padding.
    pub left: f32,
    /// Top padding.
    pub top: f32,
    /// Right padding.
    pub right: f32,
    /// Bottom padding.
    pub bottom: f32,
}

impl Padding {
    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(v: f32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    /// Raises every side to at least `min`.
    #[must_use]
    pub fn at_least(self, min: f32) -> Self {
        Self {
            left: self.left.max(min),
            top: self.top.max(min),
            right: self.right.max(min),
            bottom: self.bottom.max(min),
        }
    }
}

/// Every input the bubble outline depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalloutGeometry {
    /// Side the arrow protrudes from.
    pub arrow_alignment: ArrowAlignment,
    /// Width of the arrow base.
    pub arrow_width: f32,
    /// Distance from the arrow base to its tip.
    pub arrow_height: f32,
    /// Arrow position along its edge, from 0 (start) to 1 (end).
    pub arrow_position: f32,
    /// Corner radius.
    pub rect_radius: f32,
    /// Content padding, raised to at least half the corner radius.
    pub padding: Padding,
    /// Shadow inset on every side.
    pub shadow_width: f32,
    /// Outline stroke width.
    pub stroke_width: f32,
    /// Content width and height.
    pub content_size: (f32, f32),
}

impl Default for CalloutGeometry {
    fn default() -> Self {
        Self {
            arrow_alignment: ArrowAlignment::Bottom,
            arrow_width: 8.0,
            arrow_height: 8.0,
            arrow_position: 0.5,
            rect_radius: 4.0,
            padding: Padding::uniform(3.0),
            shadow_width: 2.0,
            stroke_width: 1.0,
            content_size: (0.0, 0.0),
        }
    }
}

impl CalloutGeometry {
    /// Padding after the corner-radius clamp.
    #[must_use]
    pub fn effective_padding(&self) -> Padding {
        self.padding.at_least(self.rect_radius * 0.5)
    }

    /// Width and height of the rounded rectangle, without arrow and shadow.
    fn box_size(&self) -> (f32, f32) {
        let pad = self.effective_padding();
        let (cw, ch) = self.content_size;
        (cw + pad.left + pad.right, ch + pad.top + pad.bottom)
    }

    /// Top-left corner of the content inside the bubble.
    #[must_use]
    pub fn content_origin(&self) -> Point {
        let pad = self.effective_padding();
        let mut x = self.shadow_width + pad.left;
        let mut y = self.shadow_width + pad.top;
        match self.arrow_alignment {
            ArrowAlignment::Left => x += self.arrow_height,
            ArrowAlignment::Top => y += self.arrow_height,
            ArrowAlignment::Bottom | ArrowAlignment::Right => {}
        }
        Point::new(f64::from(x), f64::from(y))
    }
}

/// Computes the canvas size needed to draw a bubble around content of the
/// given size.
///
/// The result covers the padded content, the arrow, the outline stroke and
/// the shadow on every side.
#[must_use]
pub fn bubble_size(content_width: f32, content_height: f32, geometry: &CalloutGeometry) -> (f32, f32) {
    let pad = geometry.effective_padding();
    let mut width = content_width + pad.left + pad.right;
    let mut height = content_height + pad.top + pad.bottom;
    if geometry.arrow_alignment.is_horizontal() {
        height += geometry.arrow_height;
    } else {
        width += geometry.arrow_height;
    }
    width += geometry.stroke_width;
    height += geometry.stroke_width;
    width += geometry.shadow_width * 2.0;
    height += geometry.shadow_width * 2.0;
    (width, height)
}

/// A built bubble outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    /// Closed outline in bubble-local coordinates.
    pub path: PathDesc,
    /// Arrow tip; this point is placed on the target feature.
    pub anchor: Point,
    /// Canvas size, as computed by [`bubble_size`].
    pub size: Size,
}

/// Position of the arrow centre along its edge after keeping the arrow base
/// clear of the rounded corners.
#[must_use]
pub fn arrow_offset(geometry: &CalloutGeometry) -> f32 {
    let (width, height) = geometry.box_size();
    let half = geometry.arrow_width * 0.5;
    let r = geometry.rect_radius;
    let near = geometry.shadow_width;
    let far = if geometry.arrow_alignment.is_horizontal() {
        width
    } else {
        height
    };
    let along = far * geometry.arrow_position;
    if along - half - near < r {
        half + near + r
    } else if along + half > far - r {
        far - half - r
    } else {
        along
    }
}

/// Builds the bubble outline and its anchor.
///
/// The outline is a rounded rectangle inset by the shadow width, walked
/// clockwise from the end of the top-left corner arc. The arrow is spliced
/// into the edge named by the alignment. A top or left arrow shifts the
/// rectangle down or right so the tip stays inside the canvas.
#[must_use]
pub fn build_bubble(geometry: &CalloutGeometry) -> Bubble {
    let (width, height) = geometry.box_size();
    let s = geometry.shadow_width;
    let r = geometry.rect_radius;
    let half = geometry.arrow_width * 0.5;
    let ah = geometry.arrow_height;
    let along = arrow_offset(geometry);

    let (mut left, mut top) = (s, s);
    let (mut right, mut bottom) = (width + s, height + s);
    let arrow = match geometry.arrow_alignment {
        ArrowAlignment::Bottom => [
            (along + half, bottom),
            (along, bottom + ah),
            (along - half, bottom),
        ],
        ArrowAlignment::Top => {
            top += ah;
            bottom += ah;
            [(along - half, top), (along, top - ah), (along + half, top)]
        }
        ArrowAlignment::Left => {
            left += ah;
            right += ah;
            [(left, along + half), (left - ah, along), (left, along - half)]
        }
        ArrowAlignment::Right => [
            (right, along - half),
            (right + ah, along),
            (right, along + half),
        ],
    };

    let mut cmds = Vec::with_capacity(9);
    let splice = |cmds: &mut Vec<PathCmd>, side: ArrowAlignment| {
        if geometry.arrow_alignment == side {
            cmds.extend(arrow.iter().map(|&(x, y)| PathCmd::LineTo { x, y }));
        }
    };

    cmds.push(PathCmd::MoveTo { x: left + r, y: top });
    splice(&mut cmds, ArrowAlignment::Top);
    cmds.push(corner(right - r, top + r, r, 270.0));
    splice(&mut cmds, ArrowAlignment::Right);
    cmds.push(corner(right - r, bottom - r, r, 0.0));
    splice(&mut cmds, ArrowAlignment::Bottom);
    cmds.push(corner(left + r, bottom - r, r, 90.0));
    splice(&mut cmds, ArrowAlignment::Left);
    cmds.push(corner(left + r, top + r, r, 180.0));
    cmds.push(PathCmd::Close);

    let (tip_x, tip_y) = arrow[1];
    let (size_w, size_h) = bubble_size(geometry.content_size.0, geometry.content_size.1, geometry);
    Bubble {
        path: PathDesc::new(cmds),
        anchor: Point::new(f64::from(tip_x), f64::from(tip_y)),
        size: Size::new(f64::from(size_w), f64::from(size_h)),
    }
}

fn corner(cx: f32, cy: f32, r: f32, start_degrees: f32) -> PathCmd {
    PathCmd::ArcTo {
        cx,
        cy,
        rx: r,
        ry: r,
        start_degrees,
        sweep_degrees: 90.0,
    }
}
