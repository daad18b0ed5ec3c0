// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! String measurement

use crate::draw::DrawContext;
use crate::shaper::{TextError, TextInput};
use crate::{FontDesc, Measurement, ShapingContext, Status, StringFormat};

/// Base pixel size corresponding to a 12pt font
const BASE_POINTS: f32 = 12.0;

/// Pixel size used to measure `font`
///
/// `base_px` is the configured size of a 12pt font. The result is truncated
/// to a whole pixel size of at least 1.
pub fn pixel_size(base_px: u32, font: &FontDesc) -> u32 {
    let size = base_px as f32 * font.size_in_points() / BASE_POINTS;
    // `as` saturates; NaN becomes 0
    (size as u32).max(1)
}

impl ShapingContext {
    /// Measure a string
    ///
    /// The result has the width the same string would occupy if drawn by
    /// [`Self::render`] at the same pixel size and direction, and the
    /// ascent-to-descent height of the font. No line breaking is done:
    /// `lines_filled` is always 1.
    ///
    /// `draw` receives the font face and size for the duration of the call;
    /// its font matrix is restored before returning. If `text` is not valid
    /// UTF-16 the call fails with [`TextError::Transcode`] before anything is
    /// modified.
    pub fn measure(
        &mut self,
        draw: &mut dyn DrawContext,
        text: &[u16],
        font: &FontDesc,
        format: Option<&StringFormat>,
    ) -> Result<Measurement, TextError> {
        let text = TextInput::Utf16(text).to_utf8()?;
        let format = format.copied().unwrap_or_else(StringFormat::generic_default);
        let opts = self.call_options();
        let dpem = pixel_size(opts.pixel_size, font) as f32;

        let state = self.state_mut()?;
        let saved = draw.font_matrix();
        draw.set_font_face(&state.draw_face);
        draw.set_font_size(dpem);

        let result = self.layout_with(TextInput::Utf8(&text), dpem, format.direction(), &opts);
        draw.set_font_matrix(saved);
        let layout = result?;

        let height = match self.raster_face() {
            Some(raster) => raster.height(),
            None => 0.0,
        };

        Ok(Measurement {
            x: 0.0,
            y: 0.0,
            width: layout.policy.width(),
            height,
            codepoints_fitted: layout.run.num_glyphs(),
            lines_filled: 1,
        })
    }

    /// Measure a string, reporting a GDI+ status
    ///
    /// On failure no measurement is returned.
    pub fn measure_status(
        &mut self,
        draw: &mut dyn DrawContext,
        text: &[u16],
        font: &FontDesc,
        format: Option<&StringFormat>,
    ) -> (Status, Option<Measurement>) {
        match self.measure(draw, text, font, format) {
            Ok(m) => (Status::Ok, Some(m)),
            Err(err) => {
                log::debug!("measure failed: {err}");
                (err.status(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::GlyphRecorder;
    use crate::env::Config;
    use crate::Unit;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn pixel_size_from_font() {
        assert_eq!(pixel_size(12, &FontDesc::new(12.0, Unit::Point)), 12);
        assert_eq!(pixel_size(16, &FontDesc::new(12.0, Unit::Point)), 16);
        assert_eq!(pixel_size(12, &FontDesc::new(24.0, Unit::Point)), 24);
        assert_eq!(pixel_size(12, &FontDesc::new(16.0, Unit::Pixel)), 12);
        assert_eq!(pixel_size(12, &FontDesc::new(10.5, Unit::Point)), 10);
    }

    #[test]
    fn pixel_size_is_at_least_one() {
        assert_eq!(pixel_size(12, &FontDesc::new(0.0, Unit::Point)), 1);
        assert_eq!(pixel_size(12, &FontDesc::new(-3.0, Unit::Point)), 1);
        assert_eq!(pixel_size(12, &FontDesc::new(f32::NAN, Unit::Point)), 1);
    }

    fn missing_font_context() -> ShapingContext {
        let config = Config {
            font_path: PathBuf::from("/nonexistent/gdip-text/NoSuchFont.ttf"),
            system_fallback: false,
            ..Config::default()
        };
        ShapingContext::with_config(config, HashMap::<String, String>::new())
    }

    #[test]
    fn transcode_failure_has_no_side_effects() {
        let mut ctx = missing_font_context();
        let mut draw = GlyphRecorder::new();
        let before = draw.font_matrix();

        let (status, m) =
            ctx.measure_status(&mut draw, &[0xDC00], &FontDesc::default(), None);
        assert_eq!(status, Status::OutOfMemory);
        assert!(m.is_none());
        assert_eq!(draw.font_matrix(), before);
        assert!(draw.face().is_none());
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn init_failure_is_reported() {
        let mut ctx = missing_font_context();
        let mut draw = GlyphRecorder::new();
        let text: Vec<u16> = "abc".encode_utf16().collect();
        let (status, m) = ctx.measure_status(&mut draw, &text, &FontDesc::default(), None);
        assert_eq!(status, Status::FileNotFound);
        assert!(m.is_none());
        assert!(draw.calls().is_empty());
    }
}
