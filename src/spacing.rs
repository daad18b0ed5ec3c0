// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Inter-cluster spacing with width compensation
//!
//! Extra spacing `S` is inserted between each pair of adjacent clusters,
//! never before the first or after the last. To keep the string's footprint
//! unchanged, every advance is scaled by
//!
//! ```none
//! scale = (A - E) / A      where A = Σ advance, E = (C - 1) × S
//! ```
//!
//! so that `scale × A + E == A`. When `E ≥ A` (or `A ≤ 0`) the scale is 1 and
//! the width grows to `A + E`.

use crate::env::CallOptions;
use crate::shaper::GlyphRun;

/// Calibration overrides for the computed scale
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Replaces the computed scale
    pub scale: Option<f32>,
    /// Multiplies the scale in effect (after `scale`)
    pub multiplier: Option<f32>,
}

impl From<&CallOptions> for Overrides {
    fn from(opts: &CallOptions) -> Self {
        Overrides {
            scale: opts.scale,
            multiplier: opts.scale_multiplier,
        }
    }
}

fn usable(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl Overrides {
    /// Apply to `scale`
    ///
    /// Values which are not finite and positive are ignored.
    pub fn apply(&self, mut scale: f32) -> f32 {
        if let Some(value) = usable(self.scale) {
            scale = value;
        }
        if let Some(factor) = usable(self.multiplier) {
            scale *= factor;
        }
        scale
    }
}

/// Spacing and scale for one glyph run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacingPolicy {
    /// Spacing inserted at each cluster boundary
    pub spacing: f32,
    /// Factor applied to each glyph advance
    pub scale: f32,
    /// Raw total advance `A`
    pub advance: f32,
    /// Number of clusters `C`
    pub clusters: u32,
}

impl SpacingPolicy {
    /// Policy for an empty run
    pub const EMPTY: SpacingPolicy = SpacingPolicy {
        spacing: 0.0,
        scale: 1.0,
        advance: 0.0,
        clusters: 0,
    };

    /// Compute the policy for `run` with per-cluster spacing `spacing`
    pub fn compute(run: &GlyphRun, spacing: f32, overrides: &Overrides) -> Self {
        if run.is_empty() {
            return SpacingPolicy::EMPTY;
        }

        let advance = run.total_advance();
        let clusters = run.num_clusters();
        let injected = (clusters - 1) as f32 * spacing;

        let scale = if advance > 0.0 && advance > injected {
            (advance - injected) / advance
        } else {
            1.0
        };

        SpacingPolicy {
            spacing,
            scale: overrides.apply(scale),
            advance,
            clusters,
        }
    }

    /// Total spacing injected: `(C - 1) × S`
    #[inline]
    pub fn injected(&self) -> f32 {
        if self.clusters == 0 {
            return 0.0;
        }
        (self.clusters - 1) as f32 * self.spacing
    }

    /// Final width: `scale × A + E`
    ///
    /// This is the width reported by measurement and produced by rendering.
    #[inline]
    pub fn width(&self) -> f32 {
        self.scale * self.advance + self.injected()
    }
}
