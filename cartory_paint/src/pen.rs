// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Cap, Join, Stroke};
use peniko::Color;
use smallvec::SmallVec;

/// Dash pattern of a [`Pen`].
///
/// Built-in patterns are expressed in multiples of the pen width, so a wider
/// pen gets proportionally longer dashes and gaps.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PenStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dashes of 4 widths separated by 3.
    Dash,
    /// Dots of 1 width separated by 3.
    Dot,
    /// Dash, dot.
    DashDot,
    /// Dash, dot, dot.
    DashDotDot,
    /// Dashes of 8 widths separated by 3.
    LongDash,
    /// Long dash, dot.
    LongDashDot,
    /// Dashes of 2 widths separated by 3.
    ShortDash,
    /// Short dash, dot.
    ShortDashDot,
    /// Short dash, dot, dot.
    ShortDashDotDot,
    /// Dots of 1 width separated by 2.
    ShortDot,
    /// Caller-supplied on/off intervals, in multiples of the pen width.
    ///
    /// An empty list draws a solid line.
    UserDefined(SmallVec<[f32; 6]>),
}

impl PenStyle {
    /// Pattern intervals in multiples of the pen width.
    fn unit_intervals(&self) -> &[f32] {
        match self {
            Self::Solid => &[],
            Self::Dash => &[4.0, 3.0],
            Self::Dot => &[1.0, 3.0],
            Self::DashDot => &[4.0, 3.0, 1.0, 3.0],
            Self::DashDotDot => &[4.0, 3.0, 1.0, 3.0, 1.0, 3.0],
            Self::LongDash => &[8.0, 3.0],
            Self::LongDashDot => &[8.0, 3.0, 1.0, 3.0],
            Self::ShortDash => &[2.0, 3.0],
            Self::ShortDashDot => &[2.0, 3.0, 1.0, 3.0],
            Self::ShortDashDotDot => &[2.0, 3.0, 1.0, 3.0, 1.0, 3.0],
            Self::ShortDot => &[1.0, 2.0],
            Self::UserDefined(intervals) => intervals.as_slice(),
        }
    }
}

/// Stroke paint of a line or outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern.
    pub pen_style: PenStyle,
    /// Cap at the open ends of the stroke.
    pub cap: Cap,
    /// Join between stroke segments.
    pub join: Join,
    /// Miter limit for [`Join::Miter`].
    pub miter_limit: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            pen_style: PenStyle::Solid,
            cap: Cap::Butt,
            join: Join::Miter,
            miter_limit: 4.0,
        }
    }
}

impl Pen {
    /// Creates a solid pen with butt caps and miter joins.
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Returns this pen with a different dash pattern.
    #[must_use]
    pub fn with_style(mut self, pen_style: PenStyle) -> Self {
        self.pen_style = pen_style;
        self
    }

    /// Returns this pen with a different cap.
    #[must_use]
    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.cap = cap;
        self
    }

    /// Returns this pen with a different join.
    #[must_use]
    pub fn with_join(mut self, join: Join) -> Self {
        self.join = join;
        self
    }

    /// Returns this pen with a different miter limit.
    #[must_use]
    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = miter_limit;
        self
    }

    /// Dash intervals in pixels, empty for a solid pen.
    #[must_use]
    pub fn dash_pattern(&self) -> SmallVec<[f64; 6]> {
        self.pen_style
            .unit_intervals()
            .iter()
            .map(|unit| f64::from(*unit) * self.width)
            .collect()
    }

    /// Converts the pen to stroke parameters for an imaging backend.
    #[must_use]
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.width)
            .with_caps(self.cap)
            .with_join(self.join)
            .with_miter_limit(self.miter_limit)
            .with_dashes(0.0, self.dash_pattern())
    }
}
