// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Loaded font data

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;
use ttf_parser::Face;

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font file")]
    Io(#[from] std::io::Error),
    #[error("font parse error")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("font has no shaping support")]
    Shaping,
    #[error("no system font available")]
    NoSystemFont,
}

/// Font face identifier
///
/// Each loaded [`FaceStore`] receives a new identifier, allowing drawing
/// contexts to detect a change of face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub(crate) u32);

impl FaceId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        FaceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get as `u32`
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Where font data was loaded from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// A font file
    Path(PathBuf),
    /// A system font, by PostScript name
    System(String),
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Path(path) => write!(f, "{}", path.display()),
            FontSource::System(name) => write!(f, "system font {name}"),
        }
    }
}

/// Font face metrics, in font units
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
}

/// The font resource: owned font data plus the face index within it
///
/// All handles used for shaping, metrics and drawing refer back to one
/// `FaceStore`, thus they always agree on the face in use.
pub struct FaceStore {
    id: FaceId,
    data: Vec<u8>,
    index: u32,
    source: FontSource,
    metrics: FaceMetrics,
}

impl fmt::Debug for FaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceStore")
            .field("id", &self.id)
            .field("len", &self.data.len())
            .field("index", &self.index)
            .field("source", &self.source)
            .finish()
    }
}

impl FaceStore {
    /// Construct from font data
    ///
    /// The data is parsed once to validate it and read metrics.
    pub fn from_data(data: Vec<u8>, index: u32, source: FontSource) -> Result<Self, FontError> {
        let metrics = {
            let face = Face::parse(&data, index)?;
            FaceMetrics {
                units_per_em: face.units_per_em(),
                ascender: face.ascender(),
                descender: face.descender(),
            }
        };

        Ok(FaceStore {
            id: FaceId::next(),
            data,
            index,
            source,
            metrics,
        })
    }

    /// Load the first face of the font file at `path`
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::from_data(data, 0, FontSource::Path(path.to_path_buf()))
    }

    /// Identifier
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// Raw font data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within [`Self::data`]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Origin of the data
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Metrics in font units
    pub fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    /// Construct a shaping face over this data
    ///
    /// This is cheap and intended to be called for each shaping operation.
    pub fn rustybuzz(&self) -> Result<rustybuzz::Face<'_>, FontError> {
        rustybuzz::Face::from_slice(&self.data, self.index).ok_or(FontError::Shaping)
    }
}
