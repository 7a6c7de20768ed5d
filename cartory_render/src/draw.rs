// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use cartory_callout::CalloutStyle;
use cartory_imaging::{
    Affine, Brush, ClipOp, DrawOp, FilterDesc, ImageId, ImagingBackend, ImagingBackendExt,
    LayerOp, PathDesc, PathId, StateOp, StrokeStyle,
};
use cartory_paint::{FillStyle, Pen, is_invisible, with_opacity};
use cartory_path::{Geometry, Polygon, build_open_path};
use cartory_symbol::{
    BitmapId, BitmapInfo, BitmapLookup, SymbolStyle, compose_bitmap, compose_symbol,
};
use cartory_view::{MapViewport, ScreenPoint};
use kurbo::{Point, Size, Stroke};
use peniko::Color;

use crate::hatch::{self, bitmap_tiles, hatch_pattern};
use crate::log::{log_debug, log_warn};
use crate::{DrawKind, RenderError, RenderOptions, Style, VectorStyle, resolve};

/// Stroke width of hatch pattern lines.
const HATCH_STROKE_WIDTH: f64 = 1.0;

#[derive(Debug)]
struct NoBitmaps;

impl BitmapLookup for NoBitmaps {
    fn bitmap(&self, _id: BitmapId) -> Option<BitmapInfo> {
        None
    }
}

static NO_BITMAPS: NoBitmaps = NoBitmaps;

/// Everything a render pass shares between features.
pub struct RenderContext<'a> {
    viewport: &'a MapViewport,
    options: RenderOptions,
    bitmaps: &'a dyn BitmapLookup,
    base_transform: Affine,
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("viewport", &self.viewport)
            .field("options", &self.options)
            .field("base_transform", &self.base_transform)
            .finish_non_exhaustive()
    }
}

impl<'a> RenderContext<'a> {
    /// Creates a context with default options and no bitmaps.
    #[must_use]
    pub fn new(viewport: &'a MapViewport) -> Self {
        Self {
            viewport,
            options: RenderOptions::default(),
            bitmaps: &NO_BITMAPS,
            base_transform: Affine::IDENTITY,
        }
    }

    /// Returns this context with different options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns this context resolving bitmaps through `bitmaps`.
    #[must_use]
    pub fn with_bitmaps(mut self, bitmaps: &'a dyn BitmapLookup) -> Self {
        self.bitmaps = bitmaps;
        self
    }

    /// Returns this context with a transform the backend is left in between
    /// draws.
    ///
    /// Paths are emitted in screen coordinates under this transform; symbol
    /// and callout placements are composed onto it.
    #[must_use]
    pub fn with_base_transform(mut self, transform: Affine) -> Self {
        self.base_transform = transform;
        self
    }

    /// Viewport of the pass.
    #[must_use]
    pub fn viewport(&self) -> &MapViewport {
        self.viewport
    }

    /// Options of the pass.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn visible(&self, color: Color) -> Option<Color> {
        let color = with_opacity(color, self.options.opacity);
        (!is_invisible(color)).then_some(color)
    }
}

/// Fill and stroke of one path after opacity and the alpha skip.
#[derive(Debug)]
struct Paint {
    fill: Option<Color>,
    stroke: Option<(Color, StrokeStyle)>,
}

impl Paint {
    /// Returns `None` when neither fill nor stroke would leave a mark.
    fn new(ctx: &RenderContext<'_>, fill: Option<Color>, outline: Option<&Pen>) -> Option<Self> {
        let fill = fill.and_then(|color| ctx.visible(color));
        let stroke = outline.and_then(|pen| ctx.visible(pen.color).map(|c| (c, pen.to_stroke())));
        (fill.is_some() || stroke.is_some()).then_some(Self { fill, stroke })
    }

    fn apply<B: ImagingBackend + ?Sized>(self, backend: &mut B, ctx: &RenderContext<'_>, path: PathId) {
        if let Some(color) = self.fill {
            fill_path(backend, ctx, path, color);
        }
        if let Some((color, stroke)) = self.stroke {
            stroke_path(backend, path, color, stroke);
        }
    }
}

fn fill_path<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    path: PathId,
    color: Color,
) {
    backend.state(StateOp::SetFillRule(ctx.options.fill_rule));
    backend.state(StateOp::SetBrush(Brush::Solid(color)));
    backend.draw(DrawOp::FillPath(path));
}

fn stroke_path<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    path: PathId,
    color: Color,
    stroke: StrokeStyle,
) {
    backend.state(StateOp::SetStroke(stroke));
    backend.state(StateOp::SetBrush(Brush::Solid(color)));
    backend.draw(DrawOp::StrokePath(path));
}

/// Registers `path`, paints it and releases it again.
fn paint_path<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    path: PathDesc,
    paint: Paint,
) {
    let id = backend.create_path(path);
    paint.apply(backend, ctx, id);
    backend.destroy_path(id);
}

fn draw_image<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    image: ImageId,
    transform: Affine,
) {
    let opacity = ctx.options.opacity;
    if opacity <= 0.0 {
        return;
    }
    let op = DrawOp::DrawImage { image, transform };
    if opacity < 1.0 {
        backend.with_layer(
            LayerOp {
                clip: None,
                filter: None,
                opacity: Some(opacity),
            },
            |b| b.draw(op),
        );
    } else {
        backend.draw(op);
    }
}

fn draw_line<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    vertices: &[Point],
    vector: &VectorStyle,
) {
    let Some(pen) = vector.line.as_ref() else {
        return;
    };
    let path = build_open_path(ctx.viewport, vertices);
    if path.is_empty() {
        return;
    }
    if let Some(paint) = Paint::new(ctx, None, Some(pen)) {
        paint_path(backend, ctx, path, paint);
    }
}

/// Interior of a polygon drawn as a pattern clipped to the polygon.
#[derive(Debug)]
enum Interior {
    Hatch {
        color: Color,
        style: FillStyle,
        pattern: PathDesc,
    },
    Bitmap {
        image: ImageId,
        tiles: Vec<Affine>,
    },
}

/// Builds the patterned interior for `style`, or `None` for a solid fill.
fn interior(
    ctx: &RenderContext<'_>,
    path: &PathDesc,
    color: Color,
    style: FillStyle,
) -> Result<Option<Interior>, RenderError> {
    let area = path.bounds(ctx.options.arc_tolerance);
    if let Some(id) = style.bitmap() {
        let info = lookup(ctx, id)?;
        let rotation = match style {
            FillStyle::BitmapRotated(_) => ctx.viewport.rotation(),
            _ => 0.0,
        };
        let size = Size::new(f64::from(info.width), f64::from(info.height));
        let tiles = area.and_then(|area| bitmap_tiles(area, size, rotation));
        if tiles.is_none() {
            log_debug!(?style, "no bitmap tiles for polygon, filling solid");
        }
        return Ok(tiles.map(|tiles| Interior::Bitmap {
            image: info.image,
            tiles,
        }));
    }
    if !style.is_hatch() {
        return Ok(None);
    }
    let pattern = area.and_then(|area| hatch_pattern(style, area, ctx.options.hatch_tile_size));
    if pattern.is_none() {
        log_debug!(?style, "no hatch pattern for polygon, filling solid");
    }
    Ok(pattern.map(|pattern| Interior::Hatch {
        color,
        style,
        pattern,
    }))
}

fn draw_polygon<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    polygon: &Polygon,
    vector: &VectorStyle,
) -> Result<(), RenderError> {
    let path = polygon.to_path(ctx.viewport);
    if path.is_empty() {
        return Ok(());
    }
    let fill = vector.fill.as_ref().map(|f| f.color);
    let Some(mut paint) = Paint::new(ctx, fill, vector.outline.as_ref()) else {
        return Ok(());
    };

    let patterned = match (paint.fill, vector.fill.as_ref()) {
        (Some(color), Some(fill)) => interior(ctx, &path, color, fill.fill_style)?,
        _ => None,
    };
    if patterned.is_some() {
        paint.fill = None;
    }

    let id = backend.create_path(path);
    match patterned {
        Some(Interior::Hatch {
            color,
            style,
            pattern,
        }) => draw_hatch(backend, ctx, id, color, style, pattern),
        Some(Interior::Bitmap { image, tiles }) => draw_bitmap_fill(backend, ctx, id, image, tiles),
        None => {}
    }
    paint.apply(backend, ctx, id);
    backend.destroy_path(id);
    Ok(())
}

/// Draws a hatch pattern clipped to the polygon `clip`.
fn draw_hatch<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    clip: PathId,
    color: Color,
    style: FillStyle,
    pattern: PathDesc,
) {
    backend.with_clip_path(clip, ctx.options.fill_rule, |b| {
        let id = b.create_path(pattern);
        if hatch::is_filled(style) {
            fill_path(b, ctx, id, color);
        }
        stroke_path(b, id, color, Stroke::new(HATCH_STROKE_WIDTH));
        b.destroy_path(id);
    });
}

/// Draws bitmap tiles clipped to the polygon `clip`.
///
/// The layer opacity goes on the clip layer rather than on each tile.
fn draw_bitmap_fill<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    clip: PathId,
    image: ImageId,
    tiles: Vec<Affine>,
) {
    let opacity = ctx.options.opacity;
    let layer = LayerOp {
        clip: Some(ClipOp {
            path: clip,
            fill_rule: ctx.options.fill_rule,
        }),
        filter: None,
        opacity: (opacity < 1.0).then_some(opacity),
    };
    backend.with_layer(layer, |b| {
        for transform in tiles {
            b.draw(DrawOp::DrawImage { image, transform });
        }
    });
}

fn draw_symbol<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    screen: ScreenPoint,
    symbol: &SymbolStyle,
) {
    let fill = symbol.fill.as_ref().map(|f| f.color);
    let Some(paint) = Paint::new(ctx, fill, symbol.outline.as_ref()) else {
        return;
    };
    let (shape, placement) = compose_symbol(screen, symbol, ctx.viewport.rotation());
    let base = ctx.base_transform;
    backend.with_transform(base * placement.to_affine(), base, |b| {
        paint_path(b, ctx, shape.to_path_desc(), paint);
    });
}

fn draw_vector_point<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    screen: ScreenPoint,
    vector: &VectorStyle,
) {
    let symbol = SymbolStyle {
        fill: vector.fill.clone(),
        outline: vector.outline.clone(),
        ..SymbolStyle::default()
    };
    draw_symbol(backend, ctx, screen, &symbol);
}

fn lookup(ctx: &RenderContext<'_>, id: BitmapId) -> Result<BitmapInfo, RenderError> {
    ctx.bitmaps.bitmap(id).ok_or(RenderError::UnknownBitmap(id))
}

fn draw_bitmap_symbol<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    screen: ScreenPoint,
    symbol: &SymbolStyle,
) -> Result<(), RenderError> {
    let Some(id) = symbol.bitmap else {
        draw_symbol(backend, ctx, screen, symbol);
        return Ok(());
    };
    let info = lookup(ctx, id)?;
    let placement = compose_bitmap(screen, symbol, &info, ctx.viewport.rotation());
    draw_image(backend, ctx, info.image, placement.to_affine());
    Ok(())
}

fn draw_callout<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    screen: ScreenPoint,
    callout: &mut CalloutStyle,
) -> Result<(), RenderError> {
    let content = callout.content.map(|id| lookup(ctx, id)).transpose()?;
    if let Some(info) = &content {
        callout.set_content_size(info.width, info.height);
    }

    let geometry = *callout.geometry();
    let shadow = (geometry.shadow_width > 0.0)
        .then(|| ctx.visible(ctx.options.shadow_color))
        .flatten();
    let background = ctx.visible(callout.background_color);
    let outline = (geometry.stroke_width > 0.0)
        .then(|| ctx.visible(callout.color))
        .flatten()
        .map(|color| (color, Stroke::new(f64::from(geometry.stroke_width))));
    let content_origin = callout.content_origin();

    let base = ctx.base_transform;
    let placement = base * callout.placement(screen, ctx.viewport.rotation());
    let path = callout.bubble().path.clone();

    backend.with_transform(placement, base, |b| {
        if shadow.is_some() || background.is_some() || outline.is_some() {
            let id = b.create_path(path);
            if let Some(color) = shadow {
                b.with_filter_layer(FilterDesc::blur(geometry.shadow_width), |b| {
                    stroke_path(b, id, color, Stroke::new(ctx.options.shadow_stroke_width));
                });
            }
            let paint = Paint {
                fill: background,
                stroke: outline,
            };
            paint.apply(b, ctx, id);
            b.destroy_path(id);
        }
        if let Some(info) = content {
            draw_image(b, ctx, info.image, Affine::translate(content_origin.to_vec2()));
        }
    });
    Ok(())
}

fn unsupported(style: &Style, geometry: &Geometry) -> RenderError {
    RenderError::UnsupportedStyleKind {
        style: style.kind_name(),
        geometry: geometry.kind(),
    }
}

/// Draws one style of one feature.
///
/// Paths are registered with the backend per draw and destroyed right after.
/// Paint is applied through state operations before each draw. Fills and
/// strokes whose color ends up fully transparent after the layer opacity
/// are skipped, and empty paths issue no operations at all.
///
/// A style that is disabled or outside its resolution range draws nothing
/// and succeeds; collection members are checked one by one.
///
/// Callout styles are taken mutably so their bubble cache can be rebuilt.
/// A collection draws every member style; a failing member does not stop
/// the others and the first failure is returned.
///
/// # Errors
///
/// - [`RenderError::UnsupportedStyleKind`] when the style has no drawing for
///   the geometry kind.
/// - [`RenderError::UnknownBitmap`] when a bitmap symbol, bitmap fill or
///   callout content is not known to the context's bitmap lookup.
pub fn render_feature<B: ImagingBackend + ?Sized>(
    backend: &mut B,
    ctx: &RenderContext<'_>,
    geometry: &Geometry,
    style: &mut Style,
) -> Result<(), RenderError> {
    if !style.is_visible_in(ctx.viewport) {
        log_debug!(
            style = style.kind_name(),
            resolution = ctx.viewport.resolution(),
            "style hidden at this resolution"
        );
        return Ok(());
    }
    let kind = resolve(style, geometry.kind())?;
    log_debug!(style = style.kind_name(), geometry = %geometry.kind(), ?kind, "drawing feature");

    match (kind, style, geometry) {
        (DrawKind::Collection, Style::Collection(styles), _) => {
            let mut first_error = None;
            for member in styles.iter_mut() {
                if let Err(err) = render_feature(backend, ctx, geometry, member) {
                    first_error.get_or_insert(err);
                }
            }
            first_error.map_or(Ok(()), Err)
        }
        (DrawKind::OpenPath, Style::Vector(vector), Geometry::LineString(vertices)) => {
            draw_line(backend, ctx, vertices, vector);
            Ok(())
        }
        (DrawKind::PolygonPath, Style::Vector(vector), Geometry::Polygon(polygon)) => {
            draw_polygon(backend, ctx, polygon, vector)
        }
        (DrawKind::VectorPoint, Style::Vector(vector), Geometry::Point(point)) => {
            draw_vector_point(backend, ctx, ctx.viewport.world_to_screen(*point), vector);
            Ok(())
        }
        (DrawKind::Symbol, Style::Symbol(symbol), Geometry::Point(point)) => {
            draw_symbol(backend, ctx, ctx.viewport.world_to_screen(*point), symbol);
            Ok(())
        }
        (DrawKind::BitmapSymbol, Style::Symbol(symbol), Geometry::Point(point)) => {
            draw_bitmap_symbol(backend, ctx, ctx.viewport.world_to_screen(*point), symbol)
        }
        (DrawKind::Callout, Style::Callout(callout), Geometry::Point(point)) => {
            draw_callout(backend, ctx, ctx.viewport.world_to_screen(*point), callout)
        }
        (_, style, geometry) => {
            let err = unsupported(style, geometry);
            log_warn!(%err, "style resolved to a drawing it cannot carry");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use cartory_imaging::{DrawOp, ImageId, ImagingOp, LayerOp, PathCmd, StateOp};
    use cartory_imaging_ref::RefBackend;
    use cartory_paint::{Fill, FillStyle, Pen};
    use cartory_path::{Geometry, Polygon};
    use cartory_symbol::{BitmapId, BitmapInfo, SymbolStyle};
    use cartory_view::MapViewport;
    use kurbo::{Affine, Point};
    use peniko::Color;

    use super::{RenderContext, render_feature};
    use crate::{RenderError, RenderOptions, Style, VectorStyle};

    fn viewport() -> MapViewport {
        MapViewport::new(100.0, 100.0, Point::ORIGIN, 1.0)
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(-10.0, -10.0),
            Point::new(10.0, -10.0),
            Point::new(10.0, 10.0),
            Point::new(-10.0, 10.0),
        ])
    }

    fn draw_ops(backend: &RefBackend) -> usize {
        backend
            .ops()
            .iter()
            .filter(|op| matches!(op, ImagingOp::Draw(_)))
            .count()
    }

    #[test]
    fn empty_geometry_issues_nothing() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle::default());

        render_feature(&mut backend, &ctx, &Geometry::LineString(vec![]), &mut style).unwrap();
        render_feature(
            &mut backend,
            &ctx,
            &Geometry::Polygon(Polygon::default()),
            &mut style,
        )
        .unwrap();

        assert!(backend.ops().is_empty());
        assert_eq!(backend.live_paths(), 0);
    }

    #[test]
    fn transparent_fill_skips_only_the_fill() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle {
            fill: Some(Fill::new(Color::TRANSPARENT)),
            ..VectorStyle::default()
        });

        render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();

        let draws: vec::Vec<_> = backend.draws().map(|(op, _, _)| op.clone()).collect();
        assert_eq!(draws.len(), 1);
        assert!(matches!(draws[0], DrawOp::StrokePath(_)));
        assert_eq!(backend.live_paths(), 0);
    }

    #[test]
    fn zero_opacity_skips_everything() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp).with_options(RenderOptions {
            opacity: 0.0,
            ..RenderOptions::default()
        });
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle::default());

        render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();
        render_feature(&mut backend, &ctx, &Geometry::Point(Point::ORIGIN), &mut style).unwrap();

        assert!(backend.ops().is_empty());
    }

    #[test]
    fn line_without_pen_draws_nothing() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle {
            line: None,
            ..VectorStyle::default()
        });
        let line = Geometry::LineString(vec![Point::ORIGIN, Point::new(5.0, 5.0)]);

        render_feature(&mut backend, &ctx, &line, &mut style).unwrap();
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn line_stroke_uses_pen() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle {
            line: Some(Pen::new(Color::BLACK, 3.0)),
            ..VectorStyle::default()
        });
        let line = Geometry::LineString(vec![Point::ORIGIN, Point::new(5.0, 5.0)]);

        render_feature(&mut backend, &ctx, &line, &mut style).unwrap();

        let (op, path, state) = backend.draws().next().expect("one draw");
        assert!(matches!(op, DrawOp::StrokePath(_)));
        assert_eq!(state.stroke.as_ref().map(|s| s.width), Some(3.0));
        assert_eq!(
            path.map(|p| &*p.commands),
            Some(
                &[
                    PathCmd::MoveTo { x: 50.0, y: 50.0 },
                    PathCmd::LineTo { x: 55.0, y: 45.0 },
                ][..]
            )
        );
    }

    #[test]
    fn hatch_fill_is_clipped_to_polygon() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(VectorStyle {
            fill: Some(Fill::new(Color::BLACK).with_style(FillStyle::Vertical)),
            outline: None,
            ..VectorStyle::default()
        });

        render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();

        let ops = backend.ops();
        assert!(matches!(
            ops.first(),
            Some(ImagingOp::State(StateOp::PushLayer(LayerOp { clip: Some(_), .. })))
        ));
        assert_eq!(ops.last(), Some(&ImagingOp::State(StateOp::PopLayer)));
        let (op, pattern, state) = backend.draws().next().expect("hatch draw");
        assert!(matches!(op, DrawOp::StrokePath(_)));
        assert_eq!(state.layer_stack_depth, 1);
        // Square spans 40..60 on screen: two columns and two rows of tiles.
        assert_eq!(pattern.map(|p| p.subpath_count()), Some(4));
        assert_eq!(backend.live_paths(), 0);
    }

    fn tile_lookup(id: BitmapId) -> Option<BitmapInfo> {
        (id == BitmapId(5)).then_some(BitmapInfo {
            image: ImageId(21),
            width: 16.0,
            height: 8.0,
        })
    }

    fn bitmap_fill(style: FillStyle) -> Style {
        Style::from(VectorStyle {
            fill: Some(Fill::new(Color::WHITE).with_style(style)),
            outline: None,
            ..VectorStyle::default()
        })
    }

    #[test]
    fn bitmap_fill_tiles_images_inside_a_clip_layer() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp).with_bitmaps(&tile_lookup);
        let mut backend = RefBackend::default();
        let mut style = bitmap_fill(FillStyle::Bitmap(BitmapId(5)));

        render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();

        let ops = backend.ops();
        let Some(ImagingOp::State(StateOp::PushLayer(layer))) = ops.first() else {
            panic!("expected a clip layer first");
        };
        assert!(layer.clip.is_some());
        assert_eq!(layer.opacity, None);
        assert_eq!(ops.last(), Some(&ImagingOp::State(StateOp::PopLayer)));

        // Square spans 40..60 on screen: two columns of 16 and three rows of 8.
        let draws: vec::Vec<_> = backend.draws().collect();
        assert_eq!(draws.len(), 6);
        for (op, _, state) in &draws {
            assert!(matches!(op, DrawOp::DrawImage { image: ImageId(21), .. }));
            assert_eq!(state.layer_stack_depth, 1);
        }
        assert_eq!(
            *draws[0].0,
            DrawOp::DrawImage {
                image: ImageId(21),
                transform: Affine::translate((32.0, 40.0)),
            }
        );
        assert_eq!(backend.live_paths(), 0);
    }

    #[test]
    fn rotated_bitmap_fill_follows_the_map_rotation() {
        let vp = viewport().with_rotation(90.0);
        let ctx = RenderContext::new(&vp).with_bitmaps(&tile_lookup);

        let mut upright = RefBackend::default();
        let mut style = bitmap_fill(FillStyle::Bitmap(BitmapId(5)));
        render_feature(&mut upright, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();
        for (op, _, _) in upright.draws() {
            let DrawOp::DrawImage { transform, .. } = op else {
                panic!("expected an image draw");
            };
            assert_eq!(transform.as_coeffs()[1], 0.0);
        }

        let mut turned = RefBackend::default();
        let mut style = bitmap_fill(FillStyle::BitmapRotated(BitmapId(5)));
        render_feature(&mut turned, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();
        assert!(turned.draws().count() > 0);
        for (op, _, state) in turned.draws() {
            let DrawOp::DrawImage { transform, .. } = op else {
                panic!("expected an image draw");
            };
            assert!((transform.as_coeffs()[1] - 1.0).abs() < 1e-9);
            assert!(state.layer_top.as_ref().is_some_and(|l| l.clip.is_some()));
        }
    }

    #[test]
    fn bitmap_fill_puts_opacity_on_the_clip_layer() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp)
            .with_bitmaps(&tile_lookup)
            .with_options(RenderOptions {
                opacity: 0.5,
                ..RenderOptions::default()
            });
        let mut backend = RefBackend::default();
        let mut style = bitmap_fill(FillStyle::Bitmap(BitmapId(5)));

        render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style).unwrap();

        for (_, _, state) in backend.draws() {
            assert_eq!(state.layer_stack_depth, 1);
            let layer = state.layer_top.as_ref().expect("clip layer");
            assert!(layer.clip.is_some());
            assert_eq!(layer.opacity, Some(0.5));
        }
    }

    #[test]
    fn unknown_fill_bitmap_is_reported() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp).with_bitmaps(&tile_lookup);
        let mut backend = RefBackend::default();
        let mut style = bitmap_fill(FillStyle::BitmapRotated(BitmapId(6)));

        let err = render_feature(&mut backend, &ctx, &Geometry::Polygon(square()), &mut style)
            .unwrap_err();
        assert_eq!(err, RenderError::UnknownBitmap(BitmapId(6)));
        assert!(backend.ops().is_empty());
        assert_eq!(backend.live_paths(), 0);
    }

    #[test]
    fn unknown_bitmap_is_reported() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(SymbolStyle {
            bitmap: Some(BitmapId(9)),
            ..SymbolStyle::default()
        });

        let err = render_feature(&mut backend, &ctx, &Geometry::Point(Point::ORIGIN), &mut style)
            .unwrap_err();
        assert_eq!(err, RenderError::UnknownBitmap(BitmapId(9)));
        assert!(backend.ops().is_empty());
    }

    #[test]
    fn bitmap_symbol_draws_image_under_layer_opacity() {
        let vp = viewport();
        let lookup = |id: BitmapId| {
            (id == BitmapId(1)).then_some(BitmapInfo {
                image: ImageId(11),
                width: 10.0,
                height: 6.0,
            })
        };
        let ctx = RenderContext::new(&vp)
            .with_bitmaps(&lookup)
            .with_options(RenderOptions {
                opacity: 0.5,
                ..RenderOptions::default()
            });
        let mut backend = RefBackend::default();
        let mut style = Style::from(SymbolStyle {
            bitmap: Some(BitmapId(1)),
            ..SymbolStyle::default()
        });

        render_feature(&mut backend, &ctx, &Geometry::Point(Point::ORIGIN), &mut style).unwrap();

        assert_eq!(backend.ops().len(), 3);
        let (op, _, state) = backend.draws().next().expect("image draw");
        assert_eq!(
            *op,
            DrawOp::DrawImage {
                image: ImageId(11),
                transform: Affine::translate((50.0, 50.0))
                    * Affine::scale(1.0)
                    * Affine::translate((-5.0, -3.0)),
            }
        );
        assert_eq!(
            state.layer_top.as_ref().and_then(|layer| layer.opacity),
            Some(0.5)
        );
    }

    #[test]
    fn collections_keep_drawing_after_a_failure() {
        let vp = viewport();
        let ctx = RenderContext::new(&vp);
        let mut backend = RefBackend::default();
        let mut style = Style::from(vec![
            Style::from(SymbolStyle::default()),
            Style::from(VectorStyle::default()),
        ]);
        let line = Geometry::LineString(vec![Point::ORIGIN, Point::new(1.0, 0.0)]);

        let err = render_feature(&mut backend, &ctx, &line, &mut style).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedStyleKind { style: "symbol", .. }));
        assert_eq!(draw_ops(&backend), 1);
    }
}
