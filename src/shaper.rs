// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text shaping
//!
//! To quote the HarfBuzz manual:
//!
//! > Text shaping is the process of translating a string of character codes
//! > (such as Unicode codepoints) into a properly arranged sequence of glyphs
//! > that can be rendered onto a screen or into final output form for
//! > inclusion in a document.
//!
//! This module provides the [`shape`] function, which produces a
//! [`GlyphRun`] from text via `rustybuzz`. Output is the engine's, converted
//! to pixels: no spacing or scaling is applied here.

use crate::conv::{to_u32, DPU};
use crate::fonts::{FaceStore, FontError};
use crate::lang::Profile;
use crate::{Direction, Vec2};
use rustybuzz::ttf_parser::Tag;
use rustybuzz::{Feature, UnicodeBuffer};
use smallvec::SmallVec;
use std::borrow::Cow;
use thiserror::Error;

/// Per-call text errors
#[derive(Error, Debug)]
pub enum TextError {
    /// Input is not valid UTF-16
    #[error("text transcoding failed")]
    Transcode(#[from] std::string::FromUtf16Error),
    /// The shaping context failed to initialize
    #[error("shaping context unavailable")]
    Init(#[from] crate::InitError),
    /// The shaping face could not be derived from the loaded font
    #[error("shaping failed")]
    Shaping(#[from] FontError),
}

impl TextError {
    /// The GDI+ status reported for this error
    pub fn status(&self) -> crate::Status {
        use crate::Status;
        match self {
            TextError::Transcode(_) => Status::OutOfMemory,
            TextError::Init(_) => Status::FileNotFound,
            TextError::Shaping(_) => Status::GenericError,
        }
    }
}

/// Input text
#[derive(Copy, Clone, Debug)]
pub enum TextInput<'a> {
    /// UTF-8 text
    Utf8(&'a str),
    /// UTF-16 code units, as passed to GDI+
    Utf16(&'a [u16]),
}

impl<'a> TextInput<'a> {
    /// Get as UTF-8
    ///
    /// Fails on an unpaired surrogate.
    pub fn to_utf8(self) -> Result<Cow<'a, str>, TextError> {
        Ok(match self {
            TextInput::Utf8(s) => Cow::Borrowed(s),
            TextInput::Utf16(units) => Cow::Owned(String::from_utf16(units)?),
        })
    }
}

impl<'a> From<&'a str> for TextInput<'a> {
    fn from(s: &'a str) -> Self {
        TextInput::Utf8(s)
    }
}

impl<'a> From<&'a [u16]> for TextInput<'a> {
    fn from(units: &'a [u16]) -> Self {
        TextInput::Utf16(units)
    }
}

/// A shaped glyph
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// Glyph identifier in font
    pub id: u16,
    /// Cluster: index of the first source byte this glyph maps to
    pub cluster: u32,
    /// Advance, in pixels
    pub advance: Vec2,
    /// Offset from the pen position, in pixels (y up)
    pub offset: Vec2,
}

/// Glyphs output by a single shaping call
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphRun {
    /// Glyphs in shaping order
    pub glyphs: SmallVec<[Glyph; 16]>,
    /// Pixel size used
    pub dpem: f32,
}

impl GlyphRun {
    /// Construct from glyphs
    pub fn new(glyphs: impl IntoIterator<Item = Glyph>, dpem: f32) -> Self {
        GlyphRun {
            glyphs: glyphs.into_iter().collect(),
            dpem,
        }
    }

    /// Number of glyphs
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True if there are no glyphs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Number of glyphs, as `u32`
    #[inline]
    pub fn num_glyphs(&self) -> u32 {
        to_u32(self.glyphs.len())
    }

    /// True if glyph `index` begins a new cluster
    ///
    /// Glyph 0 does not count as a boundary.
    #[inline]
    pub fn is_cluster_boundary(&self, index: usize) -> bool {
        index > 0
            && index < self.glyphs.len()
            && self.glyphs[index].cluster != self.glyphs[index - 1].cluster
    }

    /// Number of clusters
    ///
    /// This is 0 for an empty run, otherwise one more than the number of
    /// cluster boundaries.
    pub fn num_clusters(&self) -> u32 {
        if self.glyphs.is_empty() {
            return 0;
        }
        let boundaries = self
            .glyphs
            .windows(2)
            .filter(|pair| pair[0].cluster != pair[1].cluster)
            .count();
        to_u32(boundaries) + 1
    }

    /// Sum of horizontal advances
    pub fn total_advance(&self) -> f32 {
        self.glyphs.iter().map(|glyph| glyph.advance.0).sum()
    }
}

/// Shape `text`
///
/// The shaping face is derived from `store` for this call only. Kerning is
/// the only feature requested; the language and script are taken from
/// `profile`. Positions are converted from font units at `dpem`.
pub fn shape(
    store: &FaceStore,
    text: TextInput<'_>,
    profile: &Profile,
    direction: Direction,
    dpem: f32,
) -> Result<GlyphRun, TextError> {
    let text = text.to_utf8()?;
    let face = store.rustybuzz()?;
    let dpu = DPU::new(dpem, store.metrics().units_per_em);

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(&text);
    buffer.set_direction(direction.into());
    if let Some(language) = profile.shaping_language() {
        buffer.set_language(language);
    }
    buffer.set_script(profile.script);

    let features = [Feature::new(Tag::from_bytes(b"kern"), 1, ..)];
    let output = rustybuzz::shape(&face, &features, buffer);

    let glyphs = output
        .glyph_infos()
        .iter()
        .zip(output.glyph_positions())
        .map(|(info, pos)| Glyph {
            // Glyph identifiers from a TrueType/OpenType face fit u16
            id: info.glyph_id as u16,
            cluster: info.cluster,
            advance: Vec2(dpu.i32_to_px(pos.x_advance), dpu.i32_to_px(pos.y_advance)),
            offset: Vec2(dpu.i32_to_px(pos.x_offset), dpu.i32_to_px(pos.y_offset)),
        });

    Ok(GlyphRun::new(glyphs, dpem))
}
