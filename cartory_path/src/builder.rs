// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use cartory_imaging::{PathCmd, PathDesc};
use cartory_view::{MapViewport, Projector};
use kurbo::Point;

/// Builds the screen path of a line string.
///
/// An empty vertex list yields an empty path. Otherwise the path moves to the
/// first projected vertex and draws lines through the rest. It is never
/// closed, even when the first and last vertices coincide.
#[must_use]
pub fn build_open_path(viewport: &MapViewport, vertices: &[Point]) -> PathDesc {
    let projector = viewport.projector();
    let mut commands = Vec::with_capacity(vertices.len());
    push_ring(&projector, vertices, &mut commands);
    PathDesc::new(commands)
}

/// Builds the screen path of a polygon with optional holes.
///
/// An empty exterior yields an empty path, whatever the interiors hold.
/// Otherwise the exterior and then each interior ring become closed subpaths
/// in input order. Empty interior rings are skipped.
#[must_use]
pub fn build_polygon_path(
    viewport: &MapViewport,
    exterior: &[Point],
    interiors: &[Vec<Point>],
) -> PathDesc {
    if exterior.is_empty() {
        return PathDesc::default();
    }
    let projector = viewport.projector();
    let capacity = exterior.len() + 1 + interiors.iter().map(|r| r.len() + 1).sum::<usize>();
    let mut commands = Vec::with_capacity(capacity);

    push_ring(&projector, exterior, &mut commands);
    commands.push(PathCmd::Close);
    for ring in interiors.iter().filter(|ring| !ring.is_empty()) {
        push_ring(&projector, ring, &mut commands);
        commands.push(PathCmd::Close);
    }
    PathDesc::new(commands)
}

fn push_ring(projector: &Projector, vertices: &[Point], out: &mut Vec<PathCmd>) {
    let mut iter = vertices.iter().map(|v| projector.project(*v));
    if let Some(first) = iter.next() {
        out.push(PathCmd::MoveTo {
            x: first.x,
            y: first.y,
        });
        out.extend(iter.map(|p| PathCmd::LineTo { x: p.x, y: p.y }));
    }
}
