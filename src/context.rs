// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Shaping context
//!
//! A [`ShapingContext`] owns the loaded font and everything derived from it.
//! It is passed explicitly to each measure and render call; nothing here is
//! global.

use crate::env::{CallOptions, Config, ProcessEnv, VarSource, DEFAULT_PIXEL_SIZE};
use crate::fonts::{self, DrawFace, FontError, RasterFace};
use crate::lang::{self, Profile};
use crate::shaper::{self, GlyphRun, TextError, TextInput};
use crate::spacing::{Overrides, SpacingPolicy};
use crate::Direction;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Shaping context initialization failure
#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to load font {}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: FontError,
    },
}

/// Resources held while initialized
///
/// Field order is acquisition order.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) config: Config,
    pub(crate) raster: RasterFace,
    pub(crate) draw_face: DrawFace,
    pub(crate) profile: Profile,
}

/// Output of the shaping pipeline for one string
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Shaped glyphs, positions in pixels
    pub run: GlyphRun,
    /// Spacing and scale applied when placing `run`
    pub policy: SpacingPolicy,
}

/// Shaping context
///
/// Construction does not load anything. Resources are acquired by
/// [`Self::ensure_initialized`], which measure and render calls invoke
/// implicitly, and released by [`Self::teardown`] (or on drop).
///
/// Measure and render take `&mut self` since they change the pixel size of
/// the shared face. To share a context between threads, wrap it in a lock.
pub struct ShapingContext {
    vars: Box<dyn VarSource + Send>,
    config: Option<Config>,
    state: Option<State>,
}

impl std::fmt::Debug for ShapingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapingContext")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for ShapingContext {
    fn default() -> Self {
        ShapingContext::new()
    }
}

impl ShapingContext {
    /// Construct, reading configuration from the process environment
    pub fn new() -> Self {
        Self::with_vars(ProcessEnv)
    }

    /// Construct, reading configuration from `vars`
    ///
    /// [`Config`] is read from `vars` on initialization; [`CallOptions`] are
    /// read on each call.
    pub fn with_vars(vars: impl VarSource + Send + 'static) -> Self {
        ShapingContext {
            vars: Box::new(vars),
            config: None,
            state: None,
        }
    }

    /// Construct with a fixed `config`, reading [`CallOptions`] from `vars`
    pub fn with_config(config: Config, vars: impl VarSource + Send + 'static) -> Self {
        ShapingContext {
            vars: Box::new(vars),
            config: Some(config),
            state: None,
        }
    }

    /// Load resources if not already loaded
    ///
    /// On failure the context remains uninitialized; a later call retries.
    pub fn ensure_initialized(&mut self) -> Result<(), InitError> {
        self.state_mut().map(|_| ())
    }

    /// True if resources are loaded
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Release all resources
    ///
    /// Handles are released in reverse order of acquisition. A subsequent
    /// [`Self::ensure_initialized`] loads them again.
    pub fn teardown(&mut self) {
        if let Some(state) = self.state.take() {
            let State {
                config,
                raster,
                draw_face,
                profile,
            } = state;
            drop(profile);
            drop(draw_face);
            drop(raster);
            debug!("released shaping context for {}", config.font_path.display());
        }
    }

    /// The configuration in use, if initialized
    pub fn config(&self) -> Option<&Config> {
        self.state.as_ref().map(|state| &state.config)
    }

    /// The language profile in use, if initialized
    pub fn profile(&self) -> Option<&Profile> {
        self.state.as_ref().map(|state| &state.profile)
    }

    /// The rasterizer face, if initialized
    pub fn raster_face(&self) -> Option<&RasterFace> {
        self.state.as_ref().map(|state| &state.raster)
    }

    /// The drawing font face, if initialized
    pub fn draw_face(&self) -> Option<&DrawFace> {
        self.state.as_ref().map(|state| &state.draw_face)
    }

    /// Read per-call options
    pub fn call_options(&self) -> CallOptions {
        CallOptions::from_vars(&*self.vars)
    }

    /// Shape `text` at `dpem` and compute its spacing policy
    ///
    /// Measurement and rendering both use this; identical inputs and
    /// configuration give identical results.
    pub fn layout(
        &mut self,
        text: TextInput<'_>,
        dpem: f32,
        direction: Direction,
    ) -> Result<Layout, TextError> {
        let opts = self.call_options();
        self.layout_with(text, dpem, direction, &opts)
    }

    pub(crate) fn layout_with(
        &mut self,
        text: TextInput<'_>,
        dpem: f32,
        direction: Direction,
        opts: &CallOptions,
    ) -> Result<Layout, TextError> {
        // Transcode before touching any state
        let text = text.to_utf8()?;
        let state = self.state_mut()?;
        state.raster.set_pixel_size(dpem);

        let run = shaper::shape(
            state.raster.store(),
            TextInput::Utf8(&text),
            &state.profile,
            direction,
            dpem,
        )?;
        let spacing = dpem * state.config.spacing_factor;
        let policy = SpacingPolicy::compute(&run, spacing, &Overrides::from(opts));
        Ok(Layout { run, policy })
    }

    pub(crate) fn state_mut(&mut self) -> Result<&mut State, InitError> {
        let state = match self.state.take() {
            Some(state) => state,
            None => self.load()?,
        };
        Ok(self.state.insert(state))
    }

    fn load(&self) -> Result<State, InitError> {
        let config = match self.config {
            Some(ref config) => config.clone(),
            None => Config::from_vars(&*self.vars),
        };

        let store = fonts::load_font(&config.font_path, config.system_fallback).map_err(
            |source| InitError::Font {
                path: config.font_path.clone(),
                source,
            },
        )?;
        let raster = RasterFace::new(Arc::new(store), DEFAULT_PIXEL_SIZE);
        let draw_face = DrawFace::new(&raster);
        let profile = lang::resolve(config.language.as_deref());

        info!("Initialized text shaping");
        info!("Using font: {}", raster.store().source());
        info!("Using extra char spacing factor: {}", config.spacing_factor);
        debug!(
            "Using language {} (tag {}, script {:?})",
            profile.language.name(),
            profile.tag,
            profile.script
        );

        Ok(State {
            config,
            raster,
            draw_face,
            profile,
        })
    }
}
