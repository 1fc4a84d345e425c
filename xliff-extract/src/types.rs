//! Core, format-agnostic types for xliff-extract.
//! The parser and extractors produce these; the aggregator assembles them
//! into the final document handed to platform-specific generators.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// One normalized translation entry, keyed by resource key in the locale map.
///
/// Serialized with an explicit `type` tag so downstream generators can
/// dispatch without guessing:
///
/// ```json
/// { "type": "string", "value": "Hello" }
/// { "type": "plural", "forms": { "one": "1 item", "other": "%d items" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranslationEntry {
    /// A single text value.
    String { value: String },

    /// A mapping from plural-form label ("one", "few", "other", ...) to text.
    Plural { forms: BTreeMap<String, String> },
}

impl TranslationEntry {
    pub fn is_plural(&self) -> bool {
        matches!(self, TranslationEntry::Plural { .. })
    }

    /// The text of a singular entry, if this is one.
    pub fn value(&self) -> Option<&str> {
        match self {
            TranslationEntry::String { value } => Some(value),
            TranslationEntry::Plural { .. } => None,
        }
    }

    /// The form map of a plural entry, if this is one.
    pub fn forms(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            TranslationEntry::String { .. } => None,
            TranslationEntry::Plural { forms } => Some(forms),
        }
    }
}

/// A language descriptor from the project configuration.
///
/// Only `locale` is interpreted; everything else the configuration carries
/// (display name, Crowdin identifiers, plural rule names, ...) passes through
/// unchanged into the aggregated result as `language_info`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Language {
    /// The locale code identifying this language (e.g. "en", "pt-BR").
    pub locale: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Language {
    pub fn new(locale: impl Into<String>) -> Self {
        Language {
            locale: locale.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.locale.parse().ok()
    }
}

/// The result of parsing and extracting one locale's interchange document.
/// Constructed once per input file and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDocument {
    /// Language code from the document's `target-language` attribute.
    pub target_language: String,

    /// Resource key → normalized entry.
    pub entries: BTreeMap<String, TranslationEntry>,
}

/// An informational finding attached to one locale. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationWarning {
    pub locale: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationWarning {
            locale: locale.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.locale, self.message)
    }
}

/// One locale's slice of the aggregated result.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocaleTranslations {
    /// Language code as declared by the locale's own document.
    pub target_language: String,

    /// Resource key → normalized entry.
    pub translations: BTreeMap<String, TranslationEntry>,

    /// The configuration descriptor for this language, passed through.
    pub language_info: Language,
}

/// The combined output document: everything downstream generators need for
/// one run, across all configured locales.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AggregatedResult {
    pub source_language: Language,

    /// Target language descriptors in their configured order.
    pub target_languages: Vec<Language>,

    /// Locale codes written right-to-left.
    pub rtl_languages: BTreeSet<String>,

    /// Non-translatable term → replacement marker/value.
    pub glossary: BTreeMap<String, String>,

    /// Locale code → that locale's translations. Holds exactly one entry per
    /// configured source+target language; partial results are never built.
    pub locales: BTreeMap<String, LocaleTranslations>,
}

impl AggregatedResult {
    /// Serialize as pretty-printed JSON to any writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }

    /// Write as pretty-printed JSON to a file path, creating parent
    /// directories as needed.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        let file = File::create(path).map_err(Error::Io)?;
        self.to_writer(BufWriter::new(file))
    }
}
