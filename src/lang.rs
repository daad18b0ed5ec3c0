// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Language and script resolution
//!
//! Maps a configured language identifier to the language and script set on
//! every shaping buffer. Lookup is a case-insensitive exact match against a
//! fixed alias table; anything else resolves to [`Profile::fallback`].

use rustybuzz::{script, Script};
use std::str::FromStr;

/// A recognised language
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Unknown,
    English,
    French,
    German,
    Spanish,
    Portuguese,
    Russian,
    Chinese,
    Japanese,
    Korean,
    Arabic,
    Tamil,
    Sinhalese,
    Hindi,
}

const ALIASES: &[(&str, Language)] = &[
    ("en", Language::English),
    ("eng", Language::English),
    ("english", Language::English),
    ("fr", Language::French),
    ("fra", Language::French),
    ("french", Language::French),
    ("de", Language::German),
    ("ger", Language::German),
    ("german", Language::German),
    ("es", Language::Spanish),
    ("spa", Language::Spanish),
    ("spanish", Language::Spanish),
    ("pt", Language::Portuguese),
    ("por", Language::Portuguese),
    ("portuguese", Language::Portuguese),
    ("ru", Language::Russian),
    ("rus", Language::Russian),
    ("russian", Language::Russian),
    ("zh", Language::Chinese),
    ("chi", Language::Chinese),
    ("chinese", Language::Chinese),
    ("ja", Language::Japanese),
    ("jpn", Language::Japanese),
    ("japanese", Language::Japanese),
    ("ko", Language::Korean),
    ("kor", Language::Korean),
    ("korean", Language::Korean),
    ("ar", Language::Arabic),
    ("ara", Language::Arabic),
    ("arabic", Language::Arabic),
    ("ta", Language::Tamil),
    ("tam", Language::Tamil),
    ("tamil", Language::Tamil),
    ("si", Language::Sinhalese),
    ("sin", Language::Sinhalese),
    ("sinhala", Language::Sinhalese),
    ("sinhalese", Language::Sinhalese),
    ("hi", Language::Hindi),
    ("hin", Language::Hindi),
    ("hindi", Language::Hindi),
];

impl Language {
    /// Look up an alias (full name, 2- or 3-letter code; case-insensitive)
    pub fn from_alias(alias: &str) -> Language {
        ALIASES
            .iter()
            .find(|(a, _)| a.eq_ignore_ascii_case(alias))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Language::Unknown => "Unknown",
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
            Language::Tamil => "Tamil",
            Language::Sinhalese => "Sinhalese",
            Language::Hindi => "Hindi",
        }
    }

    /// Shaping language tag and script
    ///
    /// Latin-script languages all shape as `en`.
    fn tags(self) -> (&'static str, Script) {
        match self {
            Language::English
            | Language::French
            | Language::German
            | Language::Spanish
            | Language::Portuguese => ("en", script::LATIN),
            Language::Russian => ("ru", script::CYRILLIC),
            Language::Chinese => ("zh", script::HAN),
            Language::Japanese => ("ja", script::HIRAGANA),
            Language::Korean => ("ko", script::HAN),
            Language::Arabic => ("ar", script::ARABIC),
            Language::Tamil | Language::Unknown => ("ta", script::TAMIL),
            Language::Sinhalese => ("si", script::SINHALA),
            Language::Hindi => ("hi", script::DEVANAGARI),
        }
    }
}

/// Language and script applied to shaping buffers
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Profile {
    /// The recognised language, which may be [`Language::Unknown`]
    pub language: Language,
    /// Shaping language tag
    pub tag: &'static str,
    /// Shaping script
    pub script: Script,
}

impl Profile {
    fn of(language: Language) -> Self {
        let (tag, script) = language.tags();
        Profile {
            language,
            tag,
            script,
        }
    }

    /// The profile used for unknown or unset languages: Tamil
    pub fn fallback() -> Self {
        Profile::of(Language::Unknown)
    }

    /// The language as a `rustybuzz` value
    pub fn shaping_language(&self) -> Option<rustybuzz::Language> {
        rustybuzz::Language::from_str(self.tag).ok()
    }
}

/// Resolve a language identifier
///
/// `None` (unconfigured) and unrecognised identifiers both yield
/// [`Profile::fallback`].
pub fn resolve(id: Option<&str>) -> Profile {
    match id {
        Some(id) => Profile::of(Language::from_alias(id.trim())),
        None => Profile::fallback(),
    }
}
