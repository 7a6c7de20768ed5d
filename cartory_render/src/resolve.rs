// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_path::GeometryKind;

use crate::{RenderError, Style};

/// Drawing chosen for a style and geometry pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// Stroke an open path through the line string.
    OpenPath,
    /// Fill and outline the polygon, holes included.
    PolygonPath,
    /// Default ellipse symbol painted with the vector style.
    VectorPoint,
    /// Vector point symbol.
    Symbol,
    /// Bitmap point symbol.
    BitmapSymbol,
    /// Callout bubble anchored on the point.
    Callout,
    /// Draw each member style in turn.
    Collection,
}

/// Maps a style kind and a geometry kind to a drawing.
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedStyleKind`] for raster styles and for
/// symbol or callout styles on anything but a point.
pub fn resolve(style: &Style, geometry: GeometryKind) -> Result<DrawKind, RenderError> {
    let kind = match (style, geometry) {
        (Style::Collection(_), _) => DrawKind::Collection,
        (Style::Vector(_), GeometryKind::Point) => DrawKind::VectorPoint,
        (Style::Vector(_), GeometryKind::LineString) => DrawKind::OpenPath,
        (Style::Vector(_), GeometryKind::Polygon) => DrawKind::PolygonPath,
        (Style::Symbol(symbol), GeometryKind::Point) => {
            if symbol.bitmap.is_some() {
                DrawKind::BitmapSymbol
            } else {
                DrawKind::Symbol
            }
        }
        (Style::Callout(_), GeometryKind::Point) => DrawKind::Callout,
        (Style::Symbol(_) | Style::Callout(_) | Style::Raster(_), _) => {
            return Err(RenderError::UnsupportedStyleKind {
                style: style.kind_name(),
                geometry,
            });
        }
    };
    Ok(kind)
}
