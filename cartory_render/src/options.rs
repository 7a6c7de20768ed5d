// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_imaging::FillRule;
use peniko::Color;
use peniko::color::palette::css::GRAY;

/// Render-pass options shared by every feature.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Layer opacity in `[0, 1]`; multiplies the alpha of every paint.
    pub opacity: f32,
    /// Tolerance used when flattening arcs to measure path bounds.
    pub arc_tolerance: f64,
    /// Edge length of one hatch pattern tile, in pixels.
    pub hatch_tile_size: f64,
    /// Color of callout shadows.
    pub shadow_color: Color,
    /// Stroke width of callout shadows before blurring.
    pub shadow_stroke_width: f64,
    /// Fill rule for polygons and symbols.
    ///
    /// Holes rely on it: with [`FillRule::NonZero`] a hole only shows when
    /// its ring winds opposite to the exterior.
    pub fill_rule: FillRule,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            arc_tolerance: 0.1,
            hatch_tile_size: 10.0,
            shadow_color: GRAY,
            shadow_stroke_width: 1.5,
            fill_rule: FillRule::NonZero,
        }
    }
}
