// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Shaped text measurement and rendering for a GDI+-compatible graphics API
//!
//! Text is shaped with `rustybuzz` into a [`GlyphRun`]. Extra spacing is
//! then inserted between clusters while glyph advances are compressed so
//! that the overall width is unchanged (see [`spacing`]). Both
//! [`ShapingContext::measure`] and [`ShapingContext::render`] use the same
//! [`ShapingContext::layout`], hence a string measures exactly as wide as it
//! draws.
//!
//! ```no_run
//! use gdip_text::draw::GlyphRecorder;
//! use gdip_text::{FontDesc, ShapingContext, Unit};
//!
//! let mut ctx = ShapingContext::new();
//! let mut draw = GlyphRecorder::new();
//! let text: Vec<u16> = "வணக்கம்".encode_utf16().collect();
//! let m = ctx.measure(&mut draw, &text, &FontDesc::new(12.0, Unit::Point), None)?;
//! println!("{} × {}", m.width, m.height);
//! # Ok::<(), gdip_text::TextError>(())
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod conv;

mod data;
pub use data::*;

pub mod env;
pub use env::Config;

pub mod draw;
pub mod fonts;
pub mod lang;

mod context;
pub use context::{InitError, Layout, ShapingContext};

mod measure;
pub use measure::pixel_size;
mod render;

pub mod shaper;
pub use shaper::{Glyph, GlyphRun, TextError, TextInput};

pub mod spacing;
pub use spacing::{Overrides, SpacingPolicy};

#[cfg_attr(doc_cfg, doc(cfg(feature = "raster")))]
#[cfg(feature = "raster")]
pub mod raster;
