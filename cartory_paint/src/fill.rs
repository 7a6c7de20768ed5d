// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Handle of a registered bitmap or sprite.
///
/// Renderers resolve it to a backend image through their bitmap lookup.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitmapId(pub u32);

/// How a [`Fill`] covers the interior of a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillStyle {
    /// Uniform color.
    #[default]
    Solid,
    /// Small upright crosses.
    Cross,
    /// Crossing diagonal lines.
    DiagonalCross,
    /// Diagonal lines rising to the right.
    BackwardDiagonal,
    /// Diagonal lines falling to the right.
    ForwardDiagonal,
    /// Filled dots on a grid.
    Dotted,
    /// Horizontal lines.
    Horizontal,
    /// Vertical lines.
    Vertical,
    /// A bitmap repeated across the shape, aligned with the screen.
    Bitmap(BitmapId),
    /// A bitmap repeated across the shape, turned with the map rotation.
    BitmapRotated(BitmapId),
}

impl FillStyle {
    /// Whether this style is drawn as a repeated hatch pattern.
    #[must_use]
    pub fn is_hatch(self) -> bool {
        matches!(
            self,
            Self::Cross
                | Self::DiagonalCross
                | Self::BackwardDiagonal
                | Self::ForwardDiagonal
                | Self::Dotted
                | Self::Horizontal
                | Self::Vertical
        )
    }

    /// The bitmap tiled by this style, if any.
    #[must_use]
    pub fn bitmap(self) -> Option<BitmapId> {
        match self {
            Self::Bitmap(id) | Self::BitmapRotated(id) => Some(id),
            _ => None,
        }
    }
}

/// Interior paint of a polygon or symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    /// Fill color; hatch patterns are drawn in this color and bitmap
    /// fills are only drawn while it is visible.
    pub color: Color,
    /// Fill style.
    pub fill_style: FillStyle,
}

impl Default for Fill {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Fill {
    /// Creates a solid fill.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            fill_style: FillStyle::Solid,
        }
    }

    /// Returns this fill with a different style.
    #[must_use]
    pub fn with_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = fill_style;
        self
    }
}
