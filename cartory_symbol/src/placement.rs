// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Vec2};
use smallvec::SmallVec;

/// One step of a symbol's placement transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformStep {
    /// Translate by a pixel offset.
    Translate(Vec2),
    /// Uniform scale.
    Scale(f64),
    /// Rotation in degrees, clockwise on screen.
    Rotate(f64),
}

impl TransformStep {
    /// The step as an affine transform.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        match self {
            Self::Translate(v) => Affine::translate(v),
            Self::Scale(s) => Affine::scale(s),
            Self::Rotate(degrees) => Affine::rotate(degrees.to_radians()),
        }
    }
}

/// Ordered transform stack placing a local symbol shape on screen.
///
/// Steps are applied the way a canvas applies them: each one is
/// post-multiplied onto the previous, so the last step acts on the local
/// shape first. Backends with their own transform stack can replay
/// [`Placement::steps`]; everyone else uses [`Placement::to_affine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
    steps: SmallVec<[TransformStep; 4]>,
}

impl Placement {
    pub(crate) fn push(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// Steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Composes the steps into a single affine transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        self.steps
            .iter()
            .fold(Affine::IDENTITY, |acc, step| acc * step.to_affine())
    }
}
