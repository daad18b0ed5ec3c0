// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Glyph and cluster counts are represented as `u32` (matching the shaping
//! engine's cluster type and GDI+'s `INT` outputs). Text handled here is a
//! single GDI+ string, never close to `u32::MAX` code units long.

use easy_cast::Cast;

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Scale factor: pixels per font unit
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DPU(pub f32);

impl DPU {
    /// Construct from pixels-per-em and the face's units-per-em
    ///
    /// A zero `units_per_em` (invalid font) yields a zero scale.
    pub(crate) fn new(dpem: f32, units_per_em: u16) -> Self {
        if units_per_em == 0 {
            return DPU(0.0);
        }
        DPU(dpem / f32::from(units_per_em))
    }

    pub(crate) fn i32_to_px(self, x: i32) -> f32 {
        x as f32 * self.0
    }
    pub(crate) fn i16_to_px(self, x: i16) -> f32 {
        f32::from(x) * self.0
    }
}
