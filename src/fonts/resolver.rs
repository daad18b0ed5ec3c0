// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font resource resolution
//!
//! Loads the configured font file, with an optional fallback to a system
//! font found through [`fontdb`].

use super::{FaceStore, FontError, FontSource};
use fontdb::{Database, Family, Query};
use log::{debug, info, warn};
use std::path::Path;

/// Load the font at `path`, or a system font if that fails and
/// `system_fallback` is true
///
/// On failure the error from loading `path` is returned.
pub fn load_font(path: &Path, system_fallback: bool) -> Result<FaceStore, FontError> {
    match FaceStore::load(path) {
        Ok(store) => Ok(store),
        Err(err) if system_fallback => {
            warn!("failed to load font {}: {err}", path.display());
            match load_system_font() {
                Ok(store) => {
                    info!("using fallback font: {}", store.source());
                    Ok(store)
                }
                Err(fallback_err) => {
                    debug!("system font fallback failed: {fallback_err}");
                    Err(err)
                }
            }
        }
        Err(err) => Err(err),
    }
}

/// Load a sans-serif system font
///
/// If the database has no sans-serif match the first usable face is taken.
pub fn load_system_font() -> Result<FaceStore, FontError> {
    let mut db = Database::new();
    db.load_system_fonts();
    info!("Found {} fonts", db.len());

    let query = Query {
        families: &[Family::SansSerif],
        ..Default::default()
    };
    let preferred = db.query(&query);
    let candidates = preferred
        .into_iter()
        .chain(db.faces().map(|info| info.id));

    for id in candidates {
        let name = db
            .face(id)
            .map(|info| info.post_script_name.clone())
            .unwrap_or_default();
        let Some((data, index)) = db.with_face_data(id, |data, index| (data.to_vec(), index))
        else {
            continue;
        };
        match FaceStore::from_data(data, index, FontSource::System(name)) {
            Ok(store) => return Ok(store),
            Err(err) => debug!("skipping system face {id:?}: {err}"),
        }
    }

    Err(FontError::NoSystemFont)
}
