// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use cartory_imaging::ImagingBackend;
use cartory_path::Geometry;

use crate::log::log_warn;
use crate::{RenderContext, RenderError, Style, render_feature};

/// A geometry and the styles it is drawn with, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// World-space geometry.
    pub geometry: Geometry,
    /// Styles applied one after another.
    pub styles: Vec<Style>,
}

impl Feature {
    /// Creates a feature without styles.
    #[must_use]
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            styles: Vec::new(),
        }
    }

    /// Returns this feature with `style` appended.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.styles.push(style.into());
        self
    }
}

/// Outcome of [`render_features`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSummary {
    /// Styles drawn without error.
    pub drawn: usize,
    /// Styles skipped after an error.
    pub skipped: usize,
    /// Styles not drawn because they are disabled or outside their
    /// resolution range.
    pub hidden: usize,
    /// The first error of the pass.
    pub first_error: Option<RenderError>,
}

/// Draws every style of every feature in order.
///
/// Styles that are disabled, or whose visible range does not include the
/// viewport resolution, are passed over and counted as hidden. A style that
/// fails is logged and skipped; the pass always completes.
pub fn render_features<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    features: &mut [Feature],
) -> RenderSummary {
    let mut summary = RenderSummary::default();
    for feature in features.iter_mut() {
        for style in &mut feature.styles {
            if !style.is_visible_in(ctx.viewport()) {
                summary.hidden += 1;
                continue;
            }
            match render_feature(backend, ctx, &feature.geometry, style) {
                Ok(()) => summary.drawn += 1,
                Err(err) => {
                    log_warn!(geometry = %feature.geometry.kind(), %err, "skipping feature style");
                    summary.skipped += 1;
                    summary.first_error.get_or_insert(err);
                }
            }
        }
    }
    summary
}
