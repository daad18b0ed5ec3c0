// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font loading and face handles
//!
//! A single font resource is loaded into a [`FaceStore`]. From it derive:
//!
//! -   a [`RasterFace`], carrying the active pixel size and scaled metrics
//! -   a [`DrawFace`], handed to the drawing context
//! -   a `rustybuzz::Face`, created for each shaping call
//!
//! ### Font sizes
//!
//! GDI+ fonts carry an em size in some [`Unit`](crate::Unit). This is
//! converted to points (1/72 inch, at 96 DPI for pixel-like units), then to a
//! pixel size. We use:
//!
//! -   DPEM (Dots Per Em): the pixel size of the font
//! -   [`crate::conv::DPU`]: pixels per font unit, `dpem / units_per_em`

mod face;
mod library;
mod resolver;

pub use face::{DrawFace, RasterFace};
pub use library::{FaceId, FaceMetrics, FaceStore, FontError, FontSource};
pub use resolver::{load_font, load_system_font};
