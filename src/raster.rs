// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rastering glyphs onto a coverage canvas
//!
//! This module is only available with the `raster` feature. [`Canvas`] is a
//! [`DrawContext`] which rasters glyphs with `ab_glyph` into an 8-bit
//! grayscale buffer.
//!
//! # Example
//!
//! ```no_run
//! use gdip_text::raster::Canvas;
//! use gdip_text::{Direction, ShapingContext, Vec2};
//!
//! let mut ctx = ShapingContext::new();
//! let mut canvas = Canvas::new(200, 40);
//! ctx.render(&mut canvas, "Hello", Direction::LeftToRight, Vec2(4.0, 28.0), 20.0)?;
//! // canvas.data() now holds coverage values, row-major
//! # Ok::<(), gdip_text::TextError>(())
//! ```

use crate::draw::{DrawContext, FontMatrix, PositionedGlyph};
use crate::fonts::DrawFace;
use ab_glyph::{Font, FontRef};
use easy_cast::*;

/// An 8-bit coverage canvas
///
/// Overlapping glyphs combine by taking the maximum coverage.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
    matrix: FontMatrix,
    face: Option<DrawFace>,
}

impl Canvas {
    /// Construct a blank canvas
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            width,
            height,
            data: vec![0; usize::conv(width) * usize::conv(height)],
            matrix: FontMatrix::default(),
            face: None,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage values, row major order, length `width * height`
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`, or `None` if outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[usize::conv(y * self.width + x)])
        } else {
            None
        }
    }

    /// Reset all pixels to zero
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    fn blend(&mut self, x: i32, y: i32, c: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (u32::conv(x), u32::conv(y));
        if x >= self.width || y >= self.height {
            return;
        }
        let index = usize::conv(y * self.width + x);
        // Saturating conversion, rounding down
        let value = (c * 256.0) as u8;
        self.data[index] = self.data[index].max(value);
    }
}

impl DrawContext for Canvas {
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
        let Some(face) = self.face.clone() else {
            log::warn!("show_glyphs: no font face set");
            return;
        };
        let store = face.store();
        let font = match FontRef::try_from_slice_and_index(store.data(), store.index()) {
            Ok(font) => font,
            Err(err) => {
                log::warn!("show_glyphs: {err}");
                return;
            }
        };

        let dpem = self.font_size();
        let Some(units_per_em) = font.units_per_em() else {
            return;
        };
        let scale = dpem * font.height_unscaled() / units_per_em;

        for glyph in glyphs {
            let glyph = ab_glyph::Glyph {
                id: ab_glyph::GlyphId(glyph.id),
                scale: scale.into(),
                position: ab_glyph::point(glyph.position.0, glyph.position.1),
            };
            let Some(outline) = font.outline_glyph(glyph) else {
                continue; // e.g. space
            };

            let bounds = outline.px_bounds();
            if bounds.max.x <= 0.0
                || bounds.max.y <= 0.0
                || bounds.min.x >= self.width as f32
                || bounds.min.y >= self.height as f32
            {
                continue; // off canvas
            }
            let x0: core::result::Result<i32, _> = bounds.min.x.try_cast_trunc();
            let y0: core::result::Result<i32, _> = bounds.min.y.try_cast_trunc();
            let (Ok(x0), Ok(y0)) = (x0, y0) else {
                continue;
            };
            outline.draw(|x, y, c| {
                self.blend(x0 + i32::conv(x), y0 + i32::conv(y), c);
            });
        }
    }
}
