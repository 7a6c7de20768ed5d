// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Imaging: the drawing vocabulary between map rendering and a
//! rasterizer.
//!
//! The map crates (`cartory_view`, `cartory_path`, `cartory_symbol`,
//! `cartory_callout`) produce screen-space geometry; `cartory_render` turns
//! styled features into the operations defined here; a backend (a canvas
//! binding, a GPU renderer, or the recording `cartory_imaging_ref`) carries
//! them out.
//!
//! - Paths are plain data ([`PathDesc`], a list of [`PathCmd`] with `f32`
//!   coordinates). A backend registers them through [`ResourceBackend`] and
//!   hands back a [`PathId`].
//! - Paint travels by value. [`StateOp::SetBrush`], [`StateOp::SetStroke`]
//!   and [`StateOp::SetFillRule`] describe the paint for the draws that
//!   follow; pooling paint objects is up to the backend.
//! - [`DrawOp`]s fill or stroke a registered path, or draw an image owned
//!   outside the IR by [`ImageId`].
//! - Layers ([`LayerOp`]) group draws under a clip path, a blur or a group
//!   opacity.
//!
//! [`ImagingOp`] wraps both operation kinds for recording and replay.
//!
//! ```rust
//! use cartory_imaging::{
//!     Brush, Color, DrawOp, ImagingBackend, ImagingOp, PathCmd, PathDesc, PathId,
//!     ResourceBackend, StateOp,
//! };
//!
//! #[derive(Default)]
//! struct Log(Vec<ImagingOp>, u32);
//!
//! impl ResourceBackend for Log {
//!     fn create_path(&mut self, _desc: PathDesc) -> PathId {
//!         self.1 += 1;
//!         PathId(self.1)
//!     }
//!     fn destroy_path(&mut self, _id: PathId) {}
//! }
//!
//! impl ImagingBackend for Log {
//!     fn state(&mut self, op: StateOp) {
//!         self.0.push(ImagingOp::State(op));
//!     }
//!     fn draw(&mut self, op: DrawOp) {
//!         self.0.push(ImagingOp::Draw(op));
//!     }
//! }
//!
//! let mut backend = Log::default();
//! let triangle = backend.create_path(PathDesc::new(vec![
//!     PathCmd::MoveTo { x: 0.0, y: 0.0 },
//!     PathCmd::LineTo { x: 10.0, y: 0.0 },
//!     PathCmd::LineTo { x: 0.0, y: 10.0 },
//!     PathCmd::Close,
//! ]));
//! backend.state(StateOp::SetBrush(Brush::Solid(Color::WHITE)));
//! backend.draw(DrawOp::FillPath(triangle));
//! backend.destroy_path(triangle);
//! assert_eq!(backend.0.len(), 2);
//! ```

#![no_std]

extern crate alloc;

mod path;

pub use path::{PathCmd, PathDesc};
pub use peniko::{Brush, Color, Fill as FillRule};

/// Handle of a path registered with a backend.
///
/// Valid from [`ResourceBackend::create_path`] until the matching
/// [`ResourceBackend::destroy_path`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathId(pub u32);

/// Handle of an image.
///
/// Bitmaps and sprites are loaded and owned outside of the imaging IR; the
/// renderer only ever refers to them by handle.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Filter applied to a layer's content when the layer is popped.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterDesc {
    /// Gaussian blur, in the units of the transform active at push time.
    Blur {
        /// Horizontal standard deviation.
        std_deviation_x: f32,
        /// Vertical standard deviation.
        std_deviation_y: f32,
    },
}

impl FilterDesc {
    /// Blur by `sigma` in both directions.
    #[inline]
    pub const fn blur(sigma: f32) -> Self {
        Self::Blur {
            std_deviation_x: sigma,
            std_deviation_y: sigma,
        }
    }
}

/// Affine transform of the IR.
pub type Affine = kurbo::Affine;

/// Clip to the inside of a registered path.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipOp {
    /// Clip path, in the coordinates of the current transform.
    pub path: PathId,
    /// Which points count as inside `path`.
    pub fill_rule: FillRule,
}

/// An isolated group of draws.
///
/// Every field is optional. Map rendering uses clip layers for hatch fills,
/// filter layers for callout shadows and opacity layers for images.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOp {
    /// Clip restricting the layer's content.
    pub clip: Option<ClipOp>,
    /// Filter applied to the content on pop.
    pub filter: Option<FilterDesc>,
    /// Group opacity in `[0, 1]`.
    pub opacity: Option<f32>,
}

/// Stroke parameters: width, caps, join, miter limit and dash pattern.
pub type StrokeStyle = kurbo::Stroke;

/// Operations that change backend state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Replace the current transform.
    SetTransform(Affine),
    /// Start a layer.
    PushLayer(LayerOp),
    /// End the innermost layer.
    PopLayer,
    /// Brush for following fills and strokes.
    SetBrush(Brush),
    /// Stroke parameters for following strokes.
    SetStroke(StrokeStyle),
    /// Fill rule for following fills.
    SetFillRule(FillRule),
}

/// Operations that put pixels down.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill a path with the current brush and fill rule.
    FillPath(PathId),
    /// Stroke a path with the current brush and stroke.
    StrokePath(PathId),
    /// Draw an image with its top-left corner at the local origin.
    DrawImage {
        /// Image to draw.
        image: ImageId,
        /// Image-local transform, composed with the current transform.
        transform: Affine,
    },
}

/// Either kind of operation, as recorded.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// A state change.
    State(StateOp),
    /// A draw.
    Draw(DrawOp),
}

/// Path registration.
///
/// Paths are registered per draw and released by the caller once the draws
/// using them have been issued.
pub trait ResourceBackend {
    /// Registers a path.
    fn create_path(&mut self, desc: PathDesc) -> PathId;
    /// Releases a path. Unknown handles are ignored.
    fn destroy_path(&mut self, id: PathId);
}

/// A consumer of imaging operations.
pub trait ImagingBackend: ResourceBackend {
    /// Applies a state change.
    fn state(&mut self, op: StateOp);

    /// Applies a draw.
    fn draw(&mut self, op: DrawOp);

    /// Starts a layer.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Ends the innermost layer.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }
}

/// Scoped helpers for any [`ImagingBackend`].
pub trait ImagingBackendExt: ImagingBackend {
    /// Runs `f` inside `layer`.
    #[inline]
    fn with_layer<R>(&mut self, layer: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(layer);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Runs `f` with its draws clipped to `path`.
    #[inline]
    fn with_clip_path<R>(
        &mut self,
        path: PathId,
        fill_rule: FillRule,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let layer = LayerOp {
            clip: Some(ClipOp { path, fill_rule }),
            filter: None,
            opacity: None,
        };
        self.with_layer(layer, f)
    }

    /// Runs `f` inside a layer that `filter` is applied to.
    #[inline]
    fn with_filter_layer<R>(&mut self, filter: FilterDesc, f: impl FnOnce(&mut Self) -> R) -> R {
        let layer = LayerOp {
            clip: None,
            filter: Some(filter),
            opacity: None,
        };
        self.with_layer(layer, f)
    }

    /// Runs `f` under `transform`, then sets `restore`.
    ///
    /// The IR has no transform stack, so the caller names the transform to
    /// return to.
    #[inline]
    fn with_transform<R>(
        &mut self,
        transform: Affine,
        restore: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.state(StateOp::SetTransform(transform));
        let out = f(self);
        self.state(StateOp::SetTransform(restore));
        out
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct Counting {
        created: u32,
        live: u32,
        ops: Vec<ImagingOp>,
    }

    impl ResourceBackend for Counting {
        fn create_path(&mut self, _desc: PathDesc) -> PathId {
            self.created += 1;
            self.live += 1;
            PathId(self.created)
        }

        fn destroy_path(&mut self, _id: PathId) {
            self.live -= 1;
        }
    }

    impl ImagingBackend for Counting {
        fn state(&mut self, op: StateOp) {
            self.ops.push(ImagingOp::State(op));
        }

        fn draw(&mut self, op: DrawOp) {
            self.ops.push(ImagingOp::Draw(op));
        }
    }

    fn unit_square() -> PathDesc {
        PathDesc::new(vec![
            PathCmd::MoveTo { x: 0.0, y: 0.0 },
            PathCmd::LineTo { x: 1.0, y: 0.0 },
            PathCmd::LineTo { x: 1.0, y: 1.0 },
            PathCmd::Close,
        ])
    }

    #[test]
    fn paths_live_between_create_and_destroy() {
        let mut backend = Counting::default();
        let path = backend.create_path(unit_square());
        assert_eq!(backend.live, 1);

        backend.state(StateOp::SetBrush(Brush::Solid(Color::BLACK)));
        backend.draw(DrawOp::StrokePath(path));
        backend.destroy_path(path);

        assert_eq!(backend.ops.len(), 2);
        assert_eq!(backend.live, 0);
    }

    #[test]
    fn clip_layer_brackets_its_draws() {
        let mut backend = Counting::default();
        let clip = backend.create_path(unit_square());

        let drawn = backend.with_clip_path(clip, FillRule::EvenOdd, |b| {
            b.draw(DrawOp::FillPath(clip));
            7
        });

        assert_eq!(drawn, 7);
        assert_eq!(
            backend.ops,
            [
                ImagingOp::State(StateOp::PushLayer(LayerOp {
                    clip: Some(ClipOp {
                        path: clip,
                        fill_rule: FillRule::EvenOdd,
                    }),
                    filter: None,
                    opacity: None,
                })),
                ImagingOp::Draw(DrawOp::FillPath(clip)),
                ImagingOp::State(StateOp::PopLayer),
            ]
        );
    }

    #[test]
    fn filter_layer_carries_the_blur() {
        let mut backend = Counting::default();
        backend.with_filter_layer(FilterDesc::blur(2.0), |_| {});
        let Some(ImagingOp::State(StateOp::PushLayer(layer))) = backend.ops.first() else {
            panic!("expected a pushed layer");
        };
        assert_eq!(
            layer.filter,
            Some(FilterDesc::Blur {
                std_deviation_x: 2.0,
                std_deviation_y: 2.0,
            })
        );
        assert!(layer.clip.is_none());
    }

    #[test]
    fn transform_is_restored_to_the_named_value() {
        let mut backend = Counting::default();
        let base = Affine::scale(2.0);
        let moved = base * Affine::translate((3.0, 4.0));
        backend.with_transform(moved, base, |b| {
            b.draw(DrawOp::DrawImage {
                image: ImageId(1),
                transform: Affine::IDENTITY,
            });
        });
        assert_eq!(
            backend.ops.first(),
            Some(&ImagingOp::State(StateOp::SetTransform(moved)))
        );
        assert_eq!(
            backend.ops.last(),
            Some(&ImagingOp::State(StateOp::SetTransform(base)))
        );
    }
}
