// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::MapViewport;

/// Resolution range in which a style is drawn.
///
/// Both bounds are inclusive and in world units per pixel, like
/// [`MapViewport::resolution`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    /// Whether the style is drawn at all.
    pub enabled: bool,
    /// Smallest resolution the style is drawn at.
    pub min_visible: f64,
    /// Largest resolution the style is drawn at.
    pub max_visible: f64,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            enabled: true,
            min_visible: 0.0,
            max_visible: f64::INFINITY,
        }
    }
}

impl Visibility {
    /// Drawn only between `min_visible` and `max_visible`.
    #[must_use]
    pub fn between(min_visible: f64, max_visible: f64) -> Self {
        Self {
            enabled: true,
            min_visible,
            max_visible,
        }
    }

    /// Whether the style is drawn at `resolution`.
    #[must_use]
    pub fn includes(&self, resolution: f64) -> bool {
        self.enabled && self.min_visible <= resolution && resolution <= self.max_visible
    }

    /// Whether the style is drawn in `viewport`.
    #[must_use]
    pub fn admits(&self, viewport: &MapViewport) -> bool {
        self.includes(viewport.resolution())
    }
}
