// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Drawing shaped text

use crate::draw::{place_glyphs, DrawContext};
use crate::shaper::{TextError, TextInput};
use crate::{Direction, ShapingContext, Vec2};

impl ShapingContext {
    /// Draw `text` with its baseline starting at `origin`
    ///
    /// Glyphs are shaped at `font_size` pixels per em, spaced and scaled as
    /// for [`Self::measure`], and passed to `draw` in a single
    /// [`DrawContext::show_glyphs`] call. For the drawn width to equal the
    /// measured width, both calls must use the same text, pixel size,
    /// direction and configuration.
    ///
    /// The font face of `draw` is set; its font matrix is restored before
    /// returning.
    pub fn render(
        &mut self,
        draw: &mut dyn DrawContext,
        text: &str,
        direction: Direction,
        origin: Vec2,
        font_size: f32,
    ) -> Result<(), TextError> {
        let state = self.state_mut()?;
        let saved = draw.font_matrix();
        draw.set_font_face(&state.draw_face);
        draw.set_font_size(font_size);

        let result = self.layout(TextInput::Utf8(text), font_size, direction);
        let layout = match result {
            Ok(layout) => layout,
            Err(err) => {
                draw.set_font_matrix(saved);
                return Err(err);
            }
        };

        let (glyphs, _) = place_glyphs(&layout.run, &layout.policy, origin);
        draw.show_glyphs(&glyphs);
        draw.set_font_matrix(saved);
        Ok(())
    }
}
