// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use cartory_callout::CalloutStyle;
use cartory_paint::{Fill, Pen};
use cartory_symbol::{SymbolStyle, SymbolType};
use cartory_view::{MapViewport, Visibility};
use peniko::Color;
use peniko::color::palette::css::GRAY;

use crate::RenderError;

/// Generic vector style: a line pen, an outline pen and a fill.
///
/// Line strings use `line`; polygons use `outline` and `fill`; points are
/// drawn as the default ellipse symbol with `fill` and `outline`.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorStyle {
    /// Pen for line strings.
    pub line: Option<Pen>,
    /// Pen for polygon and point outlines.
    pub outline: Option<Pen>,
    /// Interior of polygons and points.
    pub fill: Option<Fill>,
    /// Resolutions the style is drawn at.
    pub visibility: Visibility,
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            line: Some(Pen::new(Color::BLACK, 1.0)),
            outline: Some(Pen::new(GRAY, 1.0)),
            fill: Some(Fill::new(Color::WHITE)),
            visibility: Visibility::default(),
        }
    }
}

/// Style of raster tile layers.
///
/// Raster imagery is drawn by the tile pipeline, not by the feature
/// renderer; every geometry rejects it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RasterStyle {
    /// Resolutions the imagery is drawn at.
    pub visibility: Visibility,
}

/// A feature style.
///
/// The set of kinds is closed; [`resolve`](crate::resolve) decides which
/// drawing each kind gets for each geometry kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    /// Pens and fills for lines, polygons and plain points.
    Vector(VectorStyle),
    /// Vector or bitmap point symbol.
    Symbol(SymbolStyle),
    /// Callout bubble pointing at a point.
    Callout(CalloutStyle),
    /// Raster imagery.
    Raster(RasterStyle),
    /// Several styles drawn in order.
    Collection(Vec<Style>),
}

impl Style {
    /// Name of the style kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Vector(_) => "vector",
            Self::Symbol(_) => "symbol",
            Self::Callout(_) => "callout",
            Self::Raster(_) => "raster",
            Self::Collection(_) => "collection",
        }
    }

    /// Visibility of a single style; collections have none of their own.
    #[must_use]
    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            Self::Vector(style) => Some(style.visibility),
            Self::Symbol(style) => Some(style.visibility),
            Self::Callout(style) => Some(style.visibility),
            Self::Raster(style) => Some(style.visibility),
            Self::Collection(_) => None,
        }
    }

    /// Whether the style is drawn in `viewport`.
    ///
    /// A collection is always drawn; its members are checked one by one.
    #[must_use]
    pub fn is_visible_in(&self, viewport: &MapViewport) -> bool {
        self.visibility().is_none_or(|v| v.admits(viewport))
    }

    /// A default symbol style with the shape named `kind`.
    ///
    /// Names are matched case-insensitively against
    /// [`SymbolType::name`].
    ///
    /// # Errors
    ///
    /// [`RenderError::UnsupportedSymbolShape`] for a name with no shape.
    pub fn symbol_of_kind(kind: &str) -> Result<Self, RenderError> {
        let symbol_type: SymbolType = kind.parse()?;
        Ok(Self::Symbol(SymbolStyle {
            symbol_type,
            ..SymbolStyle::default()
        }))
    }
}

impl From<VectorStyle> for Style {
    fn from(style: VectorStyle) -> Self {
        Self::Vector(style)
    }
}

impl From<SymbolStyle> for Style {
    fn from(style: SymbolStyle) -> Self {
        Self::Symbol(style)
    }
}

impl From<CalloutStyle> for Style {
    fn from(style: CalloutStyle) -> Self {
        Self::Callout(style)
    }
}

impl From<RasterStyle> for Style {
    fn from(style: RasterStyle) -> Self {
        Self::Raster(style)
    }
}

impl From<Vec<Self>> for Style {
    fn from(styles: Vec<Self>) -> Self {
        Self::Collection(styles)
    }
}
