// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_view::ScreenPoint;
use kurbo::Vec2;

use crate::bitmap::BitmapInfo;
use crate::placement::{Placement, TransformStep};
use crate::shape::SymbolShape;
use crate::style::SymbolStyle;

/// Total symbol rotation in degrees for a map rotated by `map_rotation`.
#[must_use]
pub fn symbol_rotation(style: &SymbolStyle, map_rotation: f64) -> f64 {
    if style.rotate_with_map {
        style.rotation + map_rotation
    } else {
        style.rotation
    }
}

/// Composes a vector point symbol.
///
/// The placement translates to `screen`, scales by `style.scale`, translates
/// by the style offset and finally rotates, in that order. Relative offsets
/// are fractions of the nominal width and height. Both offset kinds have
/// their Y flipped for the Y-down screen. The rotation step is only present
/// when the total rotation is non-zero.
#[must_use]
pub fn compose_symbol(
    screen: ScreenPoint,
    style: &SymbolStyle,
    map_rotation: f64,
) -> (SymbolShape, Placement) {
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let shape = SymbolShape::new(style.symbol_type, width, height);

    let offset = if style.offset.is_relative {
        Vec2::new(style.offset.x * width, -style.offset.y * height)
    } else {
        Vec2::new(style.offset.x, -style.offset.y)
    };

    let mut placement = Placement::default();
    placement.push(TransformStep::Translate(screen.to_kurbo().to_vec2()));
    placement.push(TransformStep::Scale(style.scale));
    placement.push(TransformStep::Translate(offset));
    let rotation = symbol_rotation(style, map_rotation);
    if rotation != 0.0 {
        placement.push(TransformStep::Rotate(rotation));
    }
    (shape, placement)
}

/// Composes a bitmap point symbol.
///
/// The image is drawn with its top-left corner at the local origin, so the
/// last step centres it on the point. Relative offsets are fractions of the
/// bitmap size. Rotation happens about the point and before scaling.
#[must_use]
pub fn compose_bitmap(
    screen: ScreenPoint,
    style: &SymbolStyle,
    bitmap: &BitmapInfo,
    map_rotation: f64,
) -> Placement {
    let width = f64::from(bitmap.width);
    let height = f64::from(bitmap.height);
    let (ox, oy) = if style.offset.is_relative {
        (style.offset.x * width, style.offset.y * height)
    } else {
        (style.offset.x, style.offset.y)
    };

    let mut placement = Placement::default();
    placement.push(TransformStep::Translate(screen.to_kurbo().to_vec2()));
    let rotation = symbol_rotation(style, map_rotation);
    if rotation != 0.0 {
        placement.push(TransformStep::Rotate(rotation));
    }
    placement.push(TransformStep::Scale(style.scale));
    placement.push(TransformStep::Translate(Vec2::new(
        ox - width * 0.5,
        -oy - height * 0.5,
    )));
    placement
}

#[cfg(test)]
mod tests {
    use cartory_imaging::ImageId;
    use cartory_view::ScreenPoint;
    use kurbo::{Point, Vec2};

    use super::{compose_bitmap, compose_symbol};
    use crate::{BitmapInfo, Offset, SymbolShape, SymbolStyle, SymbolType, TransformStep};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn steps_follow_fixed_order() {
        let style = SymbolStyle {
            scale: 2.0,
            offset: Offset::pixels(3.0, 4.0),
            rotation: 30.0,
            ..SymbolStyle::default()
        };
        let (_, placement) = compose_symbol(ScreenPoint::new(100.0, 50.0), &style, 0.0);
        assert_eq!(
            placement.steps(),
            &[
                TransformStep::Translate(Vec2::new(100.0, 50.0)),
                TransformStep::Scale(2.0),
                TransformStep::Translate(Vec2::new(3.0, -4.0)),
                TransformStep::Rotate(30.0),
            ]
        );
    }

    #[test]
    fn zero_rotation_adds_no_step() {
        let style = SymbolStyle {
            rotation: 10.0,
            rotate_with_map: true,
            ..SymbolStyle::default()
        };
        let (_, placement) = compose_symbol(ScreenPoint::new(0.0, 0.0), &style, -10.0);
        assert_eq!(placement.steps().len(), 3);

        // Map rotation is ignored unless the style opts in.
        let style = SymbolStyle::default();
        let (_, placement) = compose_symbol(ScreenPoint::new(0.0, 0.0), &style, 45.0);
        assert_eq!(placement.steps().len(), 3);
    }

    #[test]
    fn relative_offset_uses_nominal_size() {
        let style = SymbolStyle {
            width: 20.0,
            height: 10.0,
            scale: 3.0,
            offset: Offset::relative(0.5, 1.0),
            ..SymbolStyle::default()
        };
        let (_, placement) = compose_symbol(ScreenPoint::new(100.0, 100.0), &style, 0.0);
        // Local origin: offset (10, -10), then scaled by 3.
        let origin = placement.to_affine() * Point::ORIGIN;
        assert!(close(origin, Point::new(130.0, 70.0)), "origin {origin:?}");
    }

    #[test]
    fn rotation_happens_about_the_offset_point() {
        let style = SymbolStyle {
            symbol_type: SymbolType::Rectangle,
            offset: Offset::pixels(5.0, 0.0),
            rotation: 45.0,
            rotate_with_map: true,
            ..SymbolStyle::default()
        };
        let (shape, placement) = compose_symbol(ScreenPoint::new(10.0, 10.0), &style, 45.0);
        assert_eq!(
            shape,
            SymbolShape::Rect {
                width: 32.0,
                height: 32.0
            }
        );
        let affine = placement.to_affine();
        assert!(close(affine * Point::ORIGIN, Point::new(15.0, 10.0)));
        // 90 degrees in total: local +x points down the screen.
        assert!(close(affine * Point::new(1.0, 0.0), Point::new(15.0, 11.0)));
    }

    #[test]
    fn bitmap_is_centred_on_point() {
        let info = BitmapInfo {
            image: ImageId(3),
            width: 16.0,
            height: 8.0,
        };
        let style = SymbolStyle::default();
        let placement = compose_bitmap(ScreenPoint::new(40.0, 30.0), &style, &info, 0.0);
        let affine = placement.to_affine();
        assert!(close(affine * Point::ORIGIN, Point::new(32.0, 26.0)));
        assert!(close(affine * Point::new(16.0, 8.0), Point::new(48.0, 34.0)));
    }

    #[test]
    fn bitmap_relative_offset_uses_bitmap_size() {
        let info = BitmapInfo {
            image: ImageId(0),
            width: 10.0,
            height: 20.0,
        };
        let style = SymbolStyle {
            offset: Offset::relative(0.0, 0.5),
            scale: 2.0,
            ..SymbolStyle::default()
        };
        let placement = compose_bitmap(ScreenPoint::new(0.0, 0.0), &style, &info, 0.0);
        // Centre of the image: lifted by half its height, then scaled.
        let centre = placement.to_affine() * Point::new(5.0, 10.0);
        assert!(close(centre, Point::new(0.0, -20.0)), "centre {centre:?}");
    }
}
