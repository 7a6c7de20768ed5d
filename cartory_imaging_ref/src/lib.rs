// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartory Imaging Ref: a recording [`ImagingBackend`].
//!
//! [`RefBackend`] rasterizes nothing. It logs each operation as an [`Event`]
//! together with the state it ran under, so tests can check what a map
//! render asked for: which paths, under which transform, with which paint,
//! inside which layers.
//!
//! Map rendering releases a path as soon as its draws are issued. Draw
//! events therefore keep a copy of the path they used, and
//! [`RefBackend::live_paths`] shows whether every path was released.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use cartory_imaging::{
    Affine, Brush, DrawOp, FillRule, ImagingBackend, ImagingOp, LayerOp, PathDesc, PathId,
    ResourceBackend, StateOp, StrokeStyle,
};

/// Backend state as seen by one operation.
#[derive(Clone, Debug)]
pub struct StateSnapshot {
    /// Transform set by the last [`StateOp::SetTransform`].
    pub transform: Affine,
    /// Open layers.
    pub layer_stack_depth: u32,
    /// Innermost open layer.
    pub layer_top: Option<LayerOp>,
    /// Brush set by the last [`StateOp::SetBrush`].
    pub brush: Option<Brush>,
    /// Stroke set by the last [`StateOp::SetStroke`].
    pub stroke: Option<StrokeStyle>,
    /// Fill rule for fills; starts as non-zero.
    pub fill_rule: FillRule,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            layer_stack_depth: 0,
            layer_top: None,
            brush: None,
            stroke: None,
            fill_rule: FillRule::NonZero,
        }
    }
}

/// One recorded operation.
#[derive(Clone, Debug)]
pub enum Event {
    /// A state change and the state right after it.
    State {
        /// The change.
        op: StateOp,
        /// State after the change.
        state: StateSnapshot,
    },
    /// A draw and the state it ran under.
    Draw {
        /// The draw.
        op: DrawOp,
        /// Copy of the filled or stroked path; `None` for images and for
        /// handles that were not live.
        path: Option<PathDesc>,
        /// State at the draw.
        state: StateSnapshot,
    },
}

/// Recording backend.
///
/// Paths live in slots indexed by [`PathId`]; released slots are handed out
/// again by later registrations.
#[derive(Default, Debug)]
pub struct RefBackend {
    paths: Vec<Option<PathDesc>>,
    free_paths: Vec<u32>,
    events: Vec<Event>,
    ops: Vec<ImagingOp>,
    state: StateSnapshot,
    layers: Vec<LayerOp>,
}

impl RefBackend {
    /// Everything recorded so far, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The recorded operations without state.
    pub fn ops(&self) -> &[ImagingOp] {
        &self.ops
    }

    /// The draw events as `(op, path, state)`.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, Option<&PathDesc>, &StateSnapshot)> {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, path, state } => Some((op, path.as_ref(), state)),
            Event::State { .. } => None,
        })
    }

    /// The path registered under `id`, while it is live.
    pub fn path(&self, id: PathId) -> Option<&PathDesc> {
        self.paths.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Paths registered and not yet released.
    pub fn live_paths(&self) -> usize {
        self.paths.iter().filter(|slot| slot.is_some()).count()
    }

    /// State after the last operation.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Forgets the recording; live paths and state stay.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }

    fn layers_changed(&mut self) {
        self.state.layer_stack_depth = u32::try_from(self.layers.len()).unwrap_or(u32::MAX);
        self.state.layer_top = self.layers.last().cloned();
    }
}

impl ResourceBackend for RefBackend {
    fn create_path(&mut self, desc: PathDesc) -> PathId {
        if let Some(id) = self.free_paths.pop() {
            self.paths[id as usize] = Some(desc);
            return PathId(id);
        }
        let id = u32::try_from(self.paths.len()).unwrap_or(u32::MAX);
        self.paths.push(Some(desc));
        PathId(id)
    }

    fn destroy_path(&mut self, id: PathId) {
        let released = self
            .paths
            .get_mut(id.0 as usize)
            .is_some_and(|slot| slot.take().is_some());
        if released {
            self.free_paths.push(id.0);
        }
    }
}

impl ImagingBackend for RefBackend {
    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::SetTransform(transform) => self.state.transform = *transform,
            StateOp::PushLayer(layer) => {
                self.layers.push(layer.clone());
                self.layers_changed();
            }
            StateOp::PopLayer => {
                self.layers.pop();
                self.layers_changed();
            }
            StateOp::SetBrush(brush) => self.state.brush = Some(brush.clone()),
            StateOp::SetStroke(stroke) => self.state.stroke = Some(stroke.clone()),
            StateOp::SetFillRule(rule) => self.state.fill_rule = *rule,
        }
        self.ops.push(ImagingOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        let path = match &op {
            DrawOp::FillPath(id) | DrawOp::StrokePath(id) => self.path(*id).cloned(),
            DrawOp::DrawImage { .. } => None,
        };
        self.ops.push(ImagingOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            path,
            state: self.state.clone(),
        });
    }
}
