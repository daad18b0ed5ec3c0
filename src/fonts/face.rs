// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face handles

use super::{FaceId, FaceStore};
use crate::conv::DPU;
use std::sync::Arc;

/// Rasterizer face: the shared face plus its active pixel size
///
/// The pixel size is changed for each measure or render call.
#[derive(Clone, Debug)]
pub struct RasterFace {
    store: Arc<FaceStore>,
    dpem: f32,
}

impl RasterFace {
    pub(crate) fn new(store: Arc<FaceStore>, pixel_size: u32) -> Self {
        RasterFace {
            store,
            dpem: pixel_size as f32,
        }
    }

    /// The font data
    #[inline]
    pub fn store(&self) -> &Arc<FaceStore> {
        &self.store
    }

    /// Set the pixel size (pixels per em)
    #[inline]
    pub fn set_pixel_size(&mut self, dpem: f32) {
        self.dpem = dpem;
    }

    /// Active pixel size (pixels per em)
    #[inline]
    pub fn dpem(&self) -> f32 {
        self.dpem
    }

    /// Pixels per font unit at the active size
    #[inline]
    pub fn dpu(&self) -> DPU {
        DPU::new(self.dpem, self.store.metrics().units_per_em)
    }

    /// Ascender
    #[inline]
    pub fn ascent(&self) -> f32 {
        self.dpu().i16_to_px(self.store.metrics().ascender)
    }

    /// Descender
    ///
    /// This is negative for fonts descending below the baseline.
    #[inline]
    pub fn descent(&self) -> f32 {
        self.dpu().i16_to_px(self.store.metrics().descender)
    }

    /// Extent from ascender to descender
    #[inline]
    pub fn height(&self) -> f32 {
        self.ascent() - self.descent()
    }
}

/// Handle to the face for use by a drawing context
///
/// Cloning is cheap; clones share the font data of the [`RasterFace`] they
/// were derived from.
#[derive(Clone, Debug)]
pub struct DrawFace {
    store: Arc<FaceStore>,
}

impl DrawFace {
    pub(crate) fn new(raster: &RasterFace) -> Self {
        DrawFace {
            store: raster.store().clone(),
        }
    }

    /// Identifier
    #[inline]
    pub fn id(&self) -> FaceId {
        self.store.id()
    }

    /// The font data
    #[inline]
    pub fn store(&self) -> &FaceStore {
        &self.store
    }

    /// True if both handles refer to the same loaded font
    #[inline]
    pub fn same_face(&self, raster: &RasterFace) -> bool {
        Arc::ptr_eq(&self.store, raster.store())
    }
}

impl PartialEq for DrawFace {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}
