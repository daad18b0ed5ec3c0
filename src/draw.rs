// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing context interface
//!
//! [`DrawContext`] is the subset of a 2D drawing context (in the manner of
//! Cairo) used to draw shaped text: a font matrix, a font face and glyph
//! emission. [`GlyphRecorder`] is an implementation which records what was
//! drawn.

use crate::fonts::DrawFace;
use crate::shaper::GlyphRun;
use crate::spacing::SpacingPolicy;
use crate::Vec2;

/// Font matrix (affine, without translation)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMatrix {
    /// Horizontal scale (the font size for an unskewed matrix)
    pub xx: f32,
    /// Vertical shear
    pub yx: f32,
    /// Horizontal shear
    pub xy: f32,
    /// Vertical scale
    pub yy: f32,
}

impl FontMatrix {
    /// Uniform scale by `size`
    pub fn scale(size: f32) -> Self {
        FontMatrix {
            xx: size,
            yx: 0.0,
            xy: 0.0,
            yy: size,
        }
    }
}

impl Default for FontMatrix {
    /// A 10 pixel font, matching Cairo's default
    fn default() -> Self {
        FontMatrix::scale(10.0)
    }
}

/// A glyph at an absolute position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph identifier in font
    pub id: u16,
    /// Position of the glyph origin on the baseline
    pub position: Vec2,
}

/// A 2D drawing context able to show glyphs
pub trait DrawContext {
    /// Get the font matrix
    fn font_matrix(&self) -> FontMatrix;

    /// Set the font matrix
    fn set_font_matrix(&mut self, matrix: FontMatrix);

    /// Select the font face used by [`Self::show_glyphs`]
    fn set_font_face(&mut self, face: &DrawFace);

    /// Draw glyphs using the current font face and matrix
    fn show_glyphs(&mut self, glyphs: &[PositionedGlyph]);

    /// Current font size
    ///
    /// This assumes uniform scaling.
    fn font_size(&self) -> f32 {
        self.font_matrix().xx
    }

    /// Set the font matrix to a uniform scale
    fn set_font_size(&mut self, size: f32) {
        self.set_font_matrix(FontMatrix::scale(size));
    }
}

/// Place the glyphs of `run` from `origin`
///
/// Glyph `i` is placed at `(x + offset.x, y - offset.y)`. The pen then moves
/// by `scale × advance.x` (and `-advance.y`), plus `policy.spacing` when glyph
/// `i + 1` begins a new cluster. Returns the glyphs and the final pen
/// position.
pub fn place_glyphs(
    run: &GlyphRun,
    policy: &SpacingPolicy,
    origin: Vec2,
) -> (Vec<PositionedGlyph>, Vec2) {
    let mut pen = origin;
    let mut glyphs = Vec::with_capacity(run.len());

    for (i, glyph) in run.glyphs.iter().enumerate() {
        glyphs.push(PositionedGlyph {
            id: glyph.id,
            position: Vec2(pen.0 + glyph.offset.0, pen.1 - glyph.offset.1),
        });

        pen.0 += policy.scale * glyph.advance.0;
        pen.1 -= glyph.advance.1;
        if run.is_cluster_boundary(i + 1) {
            pen.0 += policy.spacing;
        }
    }

    (glyphs, pen)
}

/// A [`DrawContext`] which records drawing operations
///
/// Useful for testing, and for computing layout without drawing.
#[derive(Clone, Debug, Default)]
pub struct GlyphRecorder {
    matrix: FontMatrix,
    face: Option<DrawFace>,
    calls: Vec<Vec<PositionedGlyph>>,
}

impl GlyphRecorder {
    /// Construct with the default font matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// The last face set
    pub fn face(&self) -> Option<&DrawFace> {
        self.face.as_ref()
    }

    /// Glyph arrays passed to each `show_glyphs` call, in order
    pub fn calls(&self) -> &[Vec<PositionedGlyph>] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawContext for GlyphRecorder {
    fn font_matrix(&self) -> FontMatrix {
        self.matrix
    }

    fn set_font_matrix(&mut self, matrix: FontMatrix) {
        self.matrix = matrix;
    }

    fn set_font_face(&mut self, face: &DrawFace) {
        self.face = Some(face.clone());
    }

    fn show_glyphs(&mut self, glyphs: &[PositionedGlyph]) {
        self.calls.push(glyphs.to_vec());
    }
}
