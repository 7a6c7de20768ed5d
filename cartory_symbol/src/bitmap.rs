// Copyright 2026 the Cartory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cartory_imaging::ImageId;
pub use cartory_paint::BitmapId;

/// A loaded bitmap as known to the rendering backend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BitmapInfo {
    /// Backend image handle.
    pub image: ImageId,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// External bitmap cache.
///
/// Loading, decoding and sprite slicing live outside this crate; the
/// composer only needs the backend handle and the pixel size.
pub trait BitmapLookup {
    /// Resolves `id`, or returns `None` if nothing is registered under it.
    fn bitmap(&self, id: BitmapId) -> Option<BitmapInfo>;
}

impl<F> BitmapLookup for F
where
    F: Fn(BitmapId) -> Option<BitmapInfo>,
{
    fn bitmap(&self, id: BitmapId) -> Option<BitmapInfo> {
        self(id)
    }
}
