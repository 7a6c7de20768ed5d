// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_symbol::BitmapId;
use cartory_view::{ScreenPoint, Visibility};
use kurbo::{Affine, Point, Vec2};
use peniko::Color;

use crate::geometry::{
    ArrowAlignment, Bubble, CalloutGeometry, Padding, bubble_size, build_bubble,
};
use crate::log::debug;

#[derive(Clone, Debug, PartialEq)]
struct CachedBubble {
    version: u64,
    bubble: Bubble,
}

/// Style of a callout bubble anchored on a point feature.
///
/// Geometry-affecting fields are private and changed through setters. A
/// setter that changes a value bumps [`CalloutStyle::version`], which marks
/// the cached bubble stale; [`CalloutStyle::bubble`] rebuilds it on the next
/// read. Colors, offset, rotation, content and visibility are plain fields
/// and never invalidate the cache.
#[derive(Clone, Debug, PartialEq)]
pub struct CalloutStyle {
    geometry: CalloutGeometry,
    version: u64,
    cache: Option<CachedBubble>,

    /// Outline color.
    pub color: Color,
    /// Fill color.
    pub background_color: Color,
    /// Pixel offset of the anchor from the feature; `y` grows upwards.
    pub offset: Vec2,
    /// Rotation in degrees about the anchor, clockwise.
    pub rotation: f64,
    /// Whether the map rotation is added to `rotation`.
    pub rotate_with_map: bool,
    /// Bitmap drawn inside the bubble.
    pub content: Option<BitmapId>,
    /// Resolutions the callout is drawn at.
    pub visibility: Visibility,
}

impl Default for CalloutStyle {
    fn default() -> Self {
        Self {
            geometry: CalloutGeometry::default(),
            version: 0,
            cache: None,
            color: Color::BLACK,
            background_color: Color::WHITE,
            offset: Vec2::ZERO,
            rotation: 0.0,
            rotate_with_map: false,
            content: None,
            visibility: Visibility::default(),
        }
    }
}

impl CalloutStyle {
    /// Creates a callout style with default geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry inputs of the bubble.
    #[must_use]
    pub fn geometry(&self) -> &CalloutGeometry {
        &self.geometry
    }

    /// Geometry version; bumped whenever a geometry input changes.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    fn update(&mut self, f: impl FnOnce(&mut CalloutGeometry)) {
        let before = self.geometry;
        f(&mut self.geometry);
        if self.geometry != before {
            self.version = self.version.wrapping_add(1);
        }
    }

    /// Sets the side the arrow protrudes from.
    pub fn set_arrow_alignment(&mut self, alignment: ArrowAlignment) {
        self.update(|g| g.arrow_alignment = alignment);
    }

    /// Sets the width of the arrow base.
    pub fn set_arrow_width(&mut self, width: f32) {
        self.update(|g| g.arrow_width = width);
    }

    /// Sets the distance from the arrow base to its tip.
    pub fn set_arrow_height(&mut self, height: f32) {
        self.update(|g| g.arrow_height = height);
    }

    /// Sets the arrow position along its edge, clamped to `[0, 1]`.
    pub fn set_arrow_position(&mut self, position: f32) {
        self.update(|g| g.arrow_position = position.clamp(0.0, 1.0));
    }

    /// Sets the corner radius.
    pub fn set_rect_radius(&mut self, radius: f32) {
        self.update(|g| g.rect_radius = radius.max(0.0));
    }

    /// Sets the content padding.
    pub fn set_padding(&mut self, padding: Padding) {
        self.update(|g| g.padding = padding);
    }

    /// Sets the shadow width.
    pub fn set_shadow_width(&mut self, width: f32) {
        self.update(|g| g.shadow_width = width.max(0.0));
    }

    /// Sets the outline stroke width.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.update(|g| g.stroke_width = width);
    }

    /// Sets the size of the content drawn inside the bubble.
    pub fn set_content_size(&mut self, width: f32, height: f32) {
        self.update(|g| g.content_size = (width, height));
    }

    /// Returns the bubble, rebuilding it if it is missing or stale.
    pub fn bubble(&mut self) -> &Bubble {
        let version = self.version;
        if self.cache.as_ref().is_some_and(|c| c.version != version) {
            self.cache = None;
        }
        let geometry = self.geometry;
        &self
            .cache
            .get_or_insert_with(|| {
                debug!(version, ?geometry.arrow_alignment, "rebuilding callout bubble");
                CachedBubble {
                    version,
                    bubble: build_bubble(&geometry),
                }
            })
            .bubble
    }

    /// Returns the cached bubble only if it matches the current geometry.
    #[must_use]
    pub fn cached_bubble(&self) -> Option<&Bubble> {
        self.cache
            .as_ref()
            .filter(|c| c.version == self.version)
            .map(|c| &c.bubble)
    }

    /// Canvas size of the bubble for the current content size.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        let (w, h) = self.geometry.content_size;
        bubble_size(w, h, &self.geometry)
    }

    /// Top-left corner of the content inside the bubble.
    #[must_use]
    pub fn content_origin(&self) -> Point {
        self.geometry.content_origin()
    }

    /// Total rotation in degrees for a map rotated by `map_rotation`.
    #[must_use]
    pub fn total_rotation(&self, map_rotation: f64) -> f64 {
        if self.rotate_with_map {
            self.rotation + map_rotation
        } else {
            self.rotation
        }
    }

    /// Transform from bubble-local coordinates to the screen.
    ///
    /// The anchor lands on `screen` moved by the style offset (Y flipped).
    /// Rotation turns the bubble about its anchor.
    pub fn placement(&mut self, screen: ScreenPoint, map_rotation: f64) -> Affine {
        let anchor = self.bubble().anchor;
        let target = screen.to_kurbo() + Vec2::new(self.offset.x, -self.offset.y);
        let mut affine = Affine::translate(target.to_vec2());
        let rotation = self.total_rotation(map_rotation);
        if rotation != 0.0 {
            affine *= Affine::rotate(rotation.to_radians());
        }
        affine * Affine::translate(-anchor.to_vec2())
    }
}

#[cfg(test)]
mod tests {
    use cartory_view::ScreenPoint;
    use kurbo::{Point, Vec2};
    use peniko::Color;

    use super::CalloutStyle;
    use crate::{ArrowAlignment, Padding};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn bubble_is_built_lazily_and_reused() {
        let mut style = CalloutStyle::new();
        style.set_content_size(40.0, 20.0);
        assert!(style.cached_bubble().is_none());

        let first = style.bubble().clone();
        assert_eq!(style.cached_bubble(), Some(&first));
        assert_eq!(style.bubble(), &first);
    }

    #[test]
    fn geometry_changes_invalidate_the_cache() {
        let mut style = CalloutStyle::new();
        style.set_content_size(40.0, 20.0);
        let before = style.bubble().clone();
        let version = style.version();

        style.set_arrow_alignment(ArrowAlignment::Top);
        assert_eq!(style.version(), version + 1);
        assert!(style.cached_bubble().is_none());
        assert_ne!(style.bubble(), &before);
        assert!(style.cached_bubble().is_some());
    }

    #[test]
    fn unchanged_values_keep_the_version() {
        let mut style = CalloutStyle::new();
        let version = style.version();
        style.set_padding(Padding::uniform(3.0));
        style.set_arrow_width(8.0);
        style.set_rect_radius(4.0);
        assert_eq!(style.version(), version);
    }

    #[test]
    fn paint_and_placement_fields_never_invalidate() {
        let mut style = CalloutStyle::new();
        style.bubble();
        let version = style.version();

        style.color = Color::WHITE;
        style.background_color = Color::BLACK;
        style.rotation = 30.0;
        style.offset = Vec2::new(5.0, 5.0);

        assert_eq!(style.version(), version);
        assert!(style.cached_bubble().is_some());
    }

    #[test]
    fn every_geometry_setter_bumps_the_version() {
        let mut style = CalloutStyle::new();
        let mut last = style.version();
        let mut check = |style: &mut CalloutStyle| {
            assert_eq!(style.version(), last.wrapping_add(1));
            last = style.version();
        };
        style.set_arrow_alignment(ArrowAlignment::Left);
        check(&mut style);
        style.set_arrow_width(10.0);
        check(&mut style);
        style.set_arrow_height(6.0);
        check(&mut style);
        style.set_arrow_position(0.25);
        check(&mut style);
        style.set_rect_radius(6.0);
        check(&mut style);
        style.set_padding(Padding::uniform(5.0));
        check(&mut style);
        style.set_shadow_width(0.0);
        check(&mut style);
        style.set_stroke_width(2.0);
        check(&mut style);
        style.set_content_size(1.0, 1.0);
        check(&mut style);
    }

    #[test]
    fn placement_puts_the_anchor_on_the_point() {
        let mut style = CalloutStyle::new();
        style.set_content_size(30.0, 10.0);
        let anchor = style.bubble().anchor;

        let affine = style.placement(ScreenPoint::new(200.0, 100.0), 0.0);
        assert!(close(affine * anchor, Point::new(200.0, 100.0)));

        style.offset = Vec2::new(4.0, 6.0);
        style.rotation = 90.0;
        let affine = style.placement(ScreenPoint::new(200.0, 100.0), 0.0);
        assert!(close(affine * anchor, Point::new(204.0, 94.0)));
        // A point left of the anchor ends up above it after a quarter turn.
        let left = affine * (anchor - Vec2::new(1.0, 0.0));
        assert!(close(left, Point::new(204.0, 93.0)), "left {left:?}");
    }

    #[test]
    fn map_rotation_only_applies_when_opted_in() {
        let mut style = CalloutStyle::new();
        style.rotation = 10.0;
        assert_eq!(style.total_rotation(20.0), 10.0);
        style.rotate_with_map = true;
        assert_eq!(style.total_rotation(20.0), 30.0);
    }
}
