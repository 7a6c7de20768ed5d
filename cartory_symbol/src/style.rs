// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;
use core::str::FromStr;

use cartory_paint::{Fill, Pen};
use cartory_view::Visibility;
use peniko::Color;
use peniko::color::palette::css::GRAY;

use crate::SymbolError;
use crate::bitmap::BitmapId;

/// Vector shape drawn for a point symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// Circle with a diameter of the nominal width.
    #[default]
    Ellipse,
    /// Box of the nominal width and height.
    Rectangle,
    /// Equilateral triangle inscribed in a circle of the nominal width.
    Triangle,
}

impl SymbolType {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ellipse => "ellipse",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
        }
    }
}

impl FromStr for SymbolType {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Ellipse, Self::Rectangle, Self::Triangle]
            .into_iter()
            .find(|kind| s.eq_ignore_ascii_case(kind.name()))
            .ok_or_else(|| SymbolError::UnsupportedSymbolShape(s.to_string()))
    }
}

impl TryFrom<u8> for SymbolType {
    type Error = SymbolError;

    /// Decodes the numeric shape codes used by style tables.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Ellipse),
            1 => Ok(Self::Rectangle),
            2 => Ok(Self::Triangle),
            other => Err(SymbolError::UnsupportedSymbolShape(other.to_string())),
        }
    }
}

/// Symbol offset from the feature's screen position.
///
/// `y` grows upwards, like world coordinates; composition flips it for the
/// Y-down screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset, positive is up.
    pub y: f64,
    /// Whether `x`/`y` are fractions of the symbol size rather than pixels.
    pub is_relative: bool,
}

impl Offset {
    /// Offset in pixels.
    #[must_use]
    pub const fn pixels(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_relative: false,
        }
    }

    /// Offset as fractions of the symbol width and height.
    #[must_use]
    pub const fn relative(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_relative: true,
        }
    }
}

/// Style of a point symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolStyle {
    /// Vector shape, used when no bitmap is set.
    pub symbol_type: SymbolType,
    /// Nominal width in pixels, before scaling.
    pub width: f32,
    /// Nominal height in pixels, before scaling.
    pub height: f32,
    /// Uniform scale factor.
    pub scale: f64,
    /// Offset from the feature position.
    pub offset: Offset,
    /// Rotation in degrees, clockwise.
    pub rotation: f64,
    /// Whether the map rotation is added to `rotation`.
    pub rotate_with_map: bool,
    /// Interior paint, if any.
    pub fill: Option<Fill>,
    /// Outline paint, if any.
    pub outline: Option<Pen>,
    /// Bitmap drawn instead of the vector shape.
    pub bitmap: Option<BitmapId>,
    /// Resolutions the symbol is drawn at.
    pub visibility: Visibility,
}

impl SymbolStyle {
    /// Default nominal width and height.
    pub const DEFAULT_SIZE: f32 = 32.0;
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            symbol_type: SymbolType::Ellipse,
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            scale: 1.0,
            offset: Offset::default(),
            rotation: 0.0,
            rotate_with_map: false,
            fill: Some(Fill::new(Color::WHITE)),
            outline: Some(Pen::new(GRAY, 1.0)),
            bitmap: None,
            visibility: Visibility::default(),
        }
    }
}
