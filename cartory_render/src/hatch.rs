// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hatch and bitmap fills as tiled patterns.
//!
//! A hatch covers its area with one motif per tile. Tiles sit on a grid
//! anchored at the screen origin, so neighbouring polygons with the same
//! hatch line up. Bitmap fills use the same grid with the bitmap size as
//! the tile. The renderer clips the pattern to the polygon.

use alloc::vec::Vec;

use cartory_imaging::{PathCmd, PathDesc};
use cartory_paint::FillStyle;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size};

/// Upper bound on the number of tiles in one pattern.
pub const MAX_HATCH_TILES: usize = 1 << 16;

/// Whether the pattern path is filled as well as stroked.
pub(crate) fn is_filled(style: FillStyle) -> bool {
    style == FillStyle::Dotted
}

/// Builds the hatch pattern covering `area`.
///
/// Returns `None` for solid and bitmap styles, for an empty area or a
/// non-positive tile size, and when the area would need more than
/// [`MAX_HATCH_TILES`] tiles.
#[must_use]
pub fn hatch_pattern(style: FillStyle, area: Rect, tile: f64) -> Option<PathDesc> {
    if !style.is_hatch() || tile.is_nan() || tile <= 0.0 || area.is_zero_area() {
        return None;
    }
    let x_start = (area.x0 / tile).floor();
    let y_start = (area.y0 / tile).floor();
    let columns = tile_count(x_start, (area.x1 / tile).ceil())?;
    let rows = tile_count(y_start, (area.y1 / tile).ceil())?;
    if columns.checked_mul(rows)? > MAX_HATCH_TILES {
        return None;
    }

    let mut cmds = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let tx = (x_start + index(column)) * tile;
            let ty = (y_start + index(row)) * tile;
            push_motif(&mut cmds, style, tx, ty, tile);
        }
    }
    Some(PathDesc::new(cmds))
}

/// Lays out bitmap tiles covering `area`.
///
/// Each transform maps a bitmap of size `tile`, drawn at the origin, to its
/// place in the grid. The grid is turned by `rotation_degrees` about the
/// center of the tile at the origin. Returns `None` for an empty area or a
/// non-positive tile size, and when the area would need more than
/// [`MAX_HATCH_TILES`] tiles.
#[must_use]
pub fn bitmap_tiles(area: Rect, tile: Size, rotation_degrees: f64) -> Option<Vec<Affine>> {
    if !(tile.width > 0.0 && tile.height > 0.0) || area.is_zero_area() {
        return None;
    }
    let turn = Affine::rotate_about(
        rotation_degrees.to_radians(),
        Point::new(tile.width / 2.0, tile.height / 2.0),
    );
    let cover = turn.inverse().transform_rect_bbox(area);
    let x_start = (cover.x0 / tile.width).floor();
    let y_start = (cover.y0 / tile.height).floor();
    let columns = tile_count(x_start, (cover.x1 / tile.width).ceil())?;
    let rows = tile_count(y_start, (cover.y1 / tile.height).ceil())?;
    if columns.checked_mul(rows)? > MAX_HATCH_TILES {
        return None;
    }

    let mut tiles = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let tx = (x_start + index(column)) * tile.width;
            let ty = (y_start + index(row)) * tile.height;
            tiles.push(turn * Affine::translate((tx, ty)));
        }
    }
    Some(tiles)
}

fn push_motif(cmds: &mut Vec<PathCmd>, style: FillStyle, tx: f64, ty: f64, s: f64) {
    let mut line = |x0: f64, y0: f64, x1: f64, y1: f64| {
        cmds.push(PathCmd::MoveTo {
            x: narrow(tx + x0 * s),
            y: narrow(ty + y0 * s),
        });
        cmds.push(PathCmd::LineTo {
            x: narrow(tx + x1 * s),
            y: narrow(ty + y1 * s),
        });
    };
    match style {
        FillStyle::Solid | FillStyle::Bitmap(_) | FillStyle::BitmapRotated(_) => {}
        FillStyle::Cross => {
            line(0.8, 0.8, 0.0, 0.0);
            line(0.0, 0.8, 0.8, 0.0);
        }
        FillStyle::DiagonalCross => {
            line(1.0, 1.0, 0.0, 0.0);
            line(0.0, 1.0, 1.0, 0.0);
        }
        FillStyle::BackwardDiagonal => line(0.0, 1.0, 1.0, 0.0),
        FillStyle::ForwardDiagonal => line(1.0, 1.0, 0.0, 0.0),
        FillStyle::Horizontal => line(0.0, 0.5, 1.0, 0.5),
        FillStyle::Vertical => line(0.5, 0.0, 0.5, 1.0),
        FillStyle::Dotted => {
            let r = narrow(0.35 * s);
            cmds.push(PathCmd::ArcTo {
                cx: narrow(tx + 0.5 * s),
                cy: narrow(ty + 0.5 * s),
                rx: r,
                ry: r,
                start_degrees: 0.0,
                sweep_degrees: 360.0,
            });
            cmds.push(PathCmd::Close);
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "tile counts are checked to be small and non-negative"
)]
fn tile_count(start: f64, end: f64) -> Option<usize> {
    let n = end - start;
    if n.is_nan() || n < 1.0 || n > MAX_HATCH_TILES as f64 {
        return None;
    }
    Some(n as usize)
}

#[allow(
    clippy::cast_precision_loss,
    reason = "tile indices are bounded by MAX_HATCH_TILES"
)]
fn index(i: usize) -> f64 {
    i as f64
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "path coordinates are handed to backends as f32"
)]
fn narrow(v: f64) -> f32 {
    v as f32
}

#[cfg(test)]
mod tests {
    use cartory_imaging::PathCmd;
    use cartory_paint::{BitmapId, FillStyle};
    use kurbo::{Affine, Point, Rect, Size};

    use super::{MAX_HATCH_TILES, bitmap_tiles, hatch_pattern};

    #[test]
    fn solid_has_no_pattern() {
        let area = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!(hatch_pattern(FillStyle::Solid, area, 10.0).is_none());
    }

    #[test]
    fn tiles_snap_to_the_grid() {
        let area = Rect::new(5.0, 5.0, 25.0, 12.0);
        let pattern = hatch_pattern(FillStyle::Horizontal, area, 10.0).expect("pattern");
        // Columns 0..3 and rows 0..2, one line each.
        assert_eq!(pattern.subpath_count(), 6);
        assert_eq!(pattern.commands[0], PathCmd::MoveTo { x: 0.0, y: 5.0 });
        assert_eq!(pattern.commands[1], PathCmd::LineTo { x: 10.0, y: 5.0 });
        assert_eq!(
            pattern.commands[pattern.commands.len() - 1],
            PathCmd::LineTo { x: 30.0, y: 15.0 }
        );
    }

    #[test]
    fn cross_motif_uses_the_inner_fraction() {
        let area = Rect::new(0.0, 0.0, 10.0, 10.0);
        let pattern = hatch_pattern(FillStyle::Cross, area, 10.0).expect("pattern");
        assert_eq!(
            &*pattern.commands,
            &[
                PathCmd::MoveTo { x: 8.0, y: 8.0 },
                PathCmd::LineTo { x: 0.0, y: 0.0 },
                PathCmd::MoveTo { x: 0.0, y: 8.0 },
                PathCmd::LineTo { x: 8.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn dots_are_closed_circles() {
        let area = Rect::new(0.0, 0.0, 20.0, 10.0);
        let pattern = hatch_pattern(FillStyle::Dotted, area, 10.0).expect("pattern");
        assert_eq!(pattern.closed_subpath_count(), 2);
        let PathCmd::ArcTo { cx, cy, rx, .. } = pattern.commands[2] else {
            panic!("expected the second dot");
        };
        assert_eq!((cx, cy, rx), (15.0, 5.0, 3.5));
    }

    #[test]
    fn oversized_areas_are_refused() {
        let side = 10.0 * (MAX_HATCH_TILES as f64);
        let area = Rect::new(0.0, 0.0, side, side);
        assert!(hatch_pattern(FillStyle::Vertical, area, 10.0).is_none());
        assert!(hatch_pattern(FillStyle::Vertical, Rect::ZERO, 10.0).is_none());
        assert!(hatch_pattern(FillStyle::Vertical, area, 0.0).is_none());
    }

    #[test]
    fn bitmap_styles_have_no_motif() {
        let area = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!(hatch_pattern(FillStyle::Bitmap(BitmapId(1)), area, 10.0).is_none());
    }

    #[test]
    fn bitmap_tiles_snap_to_the_grid() {
        let area = Rect::new(5.0, 5.0, 25.0, 12.0);
        let tiles = bitmap_tiles(area, Size::new(16.0, 8.0), 0.0).expect("tiles");
        // Columns 0..2 and rows 0..2.
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], Affine::translate((0.0, 0.0)));
        assert_eq!(tiles[3], Affine::translate((16.0, 8.0)));
    }

    #[test]
    fn rotated_bitmap_tiles_turn_about_the_tile_center() {
        let area = Rect::new(0.0, 0.0, 10.0, 10.0);
        let tiles = bitmap_tiles(area, Size::new(10.0, 10.0), 90.0).expect("tiles");
        let center = Point::new(5.0, 5.0);
        // The tile at the origin spins in place.
        assert!(tiles.iter().any(|t| (*t * center - center).hypot() < 1e-9));
        // The turned grid still covers every corner of the area.
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ] {
            let covered = tiles.iter().any(|t| {
                let local = t.inverse() * corner;
                (-1e-9..=10.0 + 1e-9).contains(&local.x) && (-1e-9..=10.0 + 1e-9).contains(&local.y)
            });
            assert!(covered, "{corner:?} is not covered");
        }
    }

    #[test]
    fn degenerate_bitmap_tiles_are_refused() {
        let area = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(bitmap_tiles(area, Size::new(0.0, 8.0), 0.0).is_none());
        assert!(bitmap_tiles(Rect::ZERO, Size::new(8.0, 8.0), 0.0).is_none());
        let side = 8.0 * (MAX_HATCH_TILES as f64);
        assert!(bitmap_tiles(Rect::new(0.0, 0.0, side, side), Size::new(8.0, 8.0), 0.0).is_none());
    }
}
