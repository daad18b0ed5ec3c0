// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Configuration environment
//!
//! Settings are read from environment-style variables through a
//! [`VarSource`]. Those which configure the loaded font are read once, when
//! the [`ShapingContext`](crate::ShapingContext) initializes ([`Config`]);
//! the remainder are read for every measure or render call
//! ([`CallOptions`]).

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Font file to load
pub const FONT_PATH: &str = "GDIPLUS_FONT_PATH";
/// Base pixel size
pub const FONT_SIZE: &str = "GDIPLUS_FONT_SIZE";
/// Per-cluster spacing, as a multiple of the font size
pub const EXTRA_CHAR_SPACING_FACTOR: &str = "GDIPLUS_EXTRA_CHAR_SPACING_FACTOR";
/// Language used to select the shaping profile
pub const LANGUAGE: &str = "GDIPLUS_HARFBUZZ_LANGUAGE";
/// Absolute horizontal scale override
pub const HSCALE: &str = "GDIPLUS_HSCALE";
/// Horizontal scale multiplier
pub const HSCALE_MULTIPLIER: &str = "GDIPLUS_HSCALE_MULTIPLIER";
/// Set to `0`, `false` or `off` to disable the system font fallback
pub const FONT_FALLBACK: &str = "GDIPLUS_FONT_FALLBACK";

/// Default font file
pub const DEFAULT_FONT_PATH: &str = "NotoSans-Regular.ttf";
/// Default base pixel size
pub const DEFAULT_PIXEL_SIZE: u32 = 12;
/// Default spacing factor
pub const DEFAULT_SPACING_FACTOR: f32 = 0.15;

/// A source of configuration variables
///
/// Implemented for the process environment ([`ProcessEnv`]) and for maps,
/// which are convenient in tests and for embedding.
pub trait VarSource {
    /// Get a variable
    ///
    /// Empty values are treated as unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

impl VarSource for HashMap<&'static str, &'static str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}

fn parse_var<T: FromStr>(vars: &dyn VarSource, name: &str) -> Option<T> {
    let value = vars.var(name)?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid value of {name}: {value:?}");
            None
        }
    }
}

/// Settings read when the shaping context initializes
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Path of the font file
    pub font_path: PathBuf,
    /// Per-cluster spacing as a multiple of the font size
    pub spacing_factor: f32,
    /// Language identifier, resolved via [`crate::lang::resolve`]
    ///
    /// `None` selects the fallback profile.
    pub language: Option<String>,
    /// Whether a system font may be used if `font_path` fails to load
    pub system_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            spacing_factor: DEFAULT_SPACING_FACTOR,
            language: None,
            system_fallback: true,
        }
    }
}

impl Config {
    /// Read from `vars`, using defaults for anything unset or invalid
    pub fn from_vars(vars: &dyn VarSource) -> Self {
        let mut config = Config::default();
        if let Some(path) = vars.var(FONT_PATH) {
            config.font_path = PathBuf::from(path);
        }
        if let Some(factor) = parse_var::<f32>(vars, EXTRA_CHAR_SPACING_FACTOR) {
            if factor.is_finite() {
                config.spacing_factor = factor;
            } else {
                warn!("ignoring non-finite {EXTRA_CHAR_SPACING_FACTOR}");
            }
        }
        config.language = vars.var(LANGUAGE);
        if let Some(value) = vars.var(FONT_FALLBACK) {
            let value = value.trim().to_ascii_lowercase();
            config.system_fallback = !matches!(value.as_str(), "0" | "false" | "off" | "no");
        }
        config
    }
}

/// Settings read for each measure or render call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CallOptions {
    /// Base pixel size
    pub pixel_size: u32,
    /// Absolute scale override
    pub scale: Option<f32>,
    /// Scale multiplier
    pub scale_multiplier: Option<f32>,
}

impl Default for CallOptions {
    fn default() -> Self {
        CallOptions {
            pixel_size: DEFAULT_PIXEL_SIZE,
            scale: None,
            scale_multiplier: None,
        }
    }
}

impl CallOptions {
    /// Read from `vars`
    ///
    /// A non-positive or invalid pixel size selects the default.
    pub fn from_vars(vars: &dyn VarSource) -> Self {
        let pixel_size = parse_var::<i64>(vars, FONT_SIZE)
            .filter(|size| *size > 0)
            .and_then(|size| u32::try_from(size).ok())
            .unwrap_or(DEFAULT_PIXEL_SIZE);
        CallOptions {
            pixel_size,
            scale: parse_var(vars, HSCALE),
            scale_multiplier: parse_var(vars, HSCALE_MULTIPLIER),
        }
    }
}
