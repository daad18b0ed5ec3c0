// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Simple data types

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector (or point) in pixels
///
/// The y axis points down, matching the drawing context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    /// Zero
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);
}

/// Horizontal shaping direction
///
/// Vertical layout is not supported: spacing and scaling act on the x axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right (default)
    #[default]
    LeftToRight,
    /// Right-to-left
    RightToLeft,
}

impl From<Direction> for rustybuzz::Direction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
        }
    }
}

/// GDI+ measurement unit
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    /// World coordinates (treated as pixels on a memory bitmap)
    World,
    /// Display units (treated as pixels on a memory bitmap)
    Display,
    /// Device pixels
    Pixel,
    /// Points (1/72 inch)
    #[default]
    Point,
    /// Inches
    Inch,
    /// Document units (1/300 inch)
    Document,
    /// Millimeters
    Millimeter,
}

impl Unit {
    /// Convert `value` in this unit into points, given `dpi`
    pub fn to_points(self, value: f32, dpi: f32) -> f32 {
        match self {
            Unit::World | Unit::Display | Unit::Pixel => value * 72.0 / dpi,
            Unit::Point => value,
            Unit::Inch => value * 72.0,
            Unit::Document => value * 72.0 / 300.0,
            Unit::Millimeter => value * 72.0 / 25.4,
        }
    }
}

/// Resolution assumed for unit conversion
pub const DISPLAY_DPI: f32 = 96.0;

/// GDI+ font descriptor
///
/// Only the size is used: the face itself is configured once for the
/// [`ShapingContext`](crate::ShapingContext).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontDesc {
    /// Size of an em, in `unit`
    pub em_size: f32,
    /// Unit of `em_size`
    pub unit: Unit,
}

impl FontDesc {
    /// Construct
    pub fn new(em_size: f32, unit: Unit) -> Self {
        FontDesc { em_size, unit }
    }

    /// Size in points
    pub fn size_in_points(&self) -> f32 {
        self.unit.to_points(self.em_size, DISPLAY_DPI)
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        FontDesc::new(12.0, Unit::Point)
    }
}

bitflags! {
    /// GDI+ `StringFormatFlags`
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct FormatFlags: u32 {
        /// Text is read right-to-left
        const DIRECTION_RIGHT_TO_LEFT = 0x0001;
        /// Text is laid out vertically
        const DIRECTION_VERTICAL = 0x0002;
        /// Parts of characters may overhang the layout rectangle
        const NO_FIT_BLACK_BOX = 0x0004;
        /// Control characters are displayed
        const DISPLAY_FORMAT_CONTROL = 0x0020;
        /// Fallback fonts are not used for missing characters
        const NO_FONT_FALLBACK = 0x0400;
        /// Trailing spaces are included in measurement
        const MEASURE_TRAILING_SPACES = 0x0800;
        /// Text wrapping is disabled
        const NO_WRAP = 0x1000;
        /// Only whole lines are laid out
        const LINE_LIMIT = 0x2000;
        /// Overhanging parts are not clipped
        const NO_CLIP = 0x4000;
    }
}

/// GDI+ string format
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StringFormat {
    pub flags: FormatFlags,
}

impl StringFormat {
    /// The generic default format, used when the caller supplies none
    pub fn generic_default() -> Self {
        StringFormat::default()
    }

    /// Shaping direction implied by the format flags
    pub fn direction(&self) -> Direction {
        if self.flags.contains(FormatFlags::DIRECTION_RIGHT_TO_LEFT) {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }
}

/// GDI+ status code
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    #[default]
    Ok = 0,
    GenericError = 1,
    InvalidParameter = 2,
    OutOfMemory = 3,
    FileNotFound = 10,
    FontFamilyNotFound = 14,
}

/// Result of measuring a string
///
/// The box is always anchored at the origin and covers a single line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Left edge (always 0)
    pub x: f32,
    /// Top edge (always 0)
    pub y: f32,
    /// Width after spacing and scaling
    pub width: f32,
    /// Ascent to descent at the active pixel size
    pub height: f32,
    /// Number of glyphs produced
    pub codepoints_fitted: u32,
    /// Number of lines laid out (always 1)
    pub lines_filled: u32,
}
