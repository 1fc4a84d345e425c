#![forbid(unsafe_code)]
//! Extraction and normalization of XLIFF 1.2 translations.
//!
//! Parses one bilingual interchange document per configured locale,
//! reconciles plural-form groups, falls back to source text (with a warning)
//! when a translation is missing, and aggregates everything into a single
//! structured document for downstream platform-specific generators.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xliff_extract::Aggregator;
//!
//! let aggregation = Aggregator::new().aggregate("raw_translations")?;
//! aggregation.result.write_to("build/translations.json")?;
//! for warning in &aggregation.warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), xliff_extract::Error>(())
//! ```
//!
//! # Pipeline
//!
//! - [`xliff::Document`] parses one interchange file into an in-memory tree.
//! - [`extract`] runs the plural-group and singular passes over that tree,
//!   applying the shared source-text fallback policy.
//! - [`Aggregator`] drives both across every locale the project
//!   configuration names, fail-fast: one bad locale aborts the whole run.
//!
//! Configuration resolution, glossary loading, progress reporting, and
//! validation are trait seams with file-based/no-op defaults.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod traits;
pub mod types;
pub mod validate;
pub mod xliff;

// Re-export most used types for easy consumption
pub use crate::{
    aggregate::{Aggregation, Aggregator, Reporter, SilentReporter},
    config::{ConfigResolver, FileConfigResolver, GlossaryLoader, JsonGlossaryLoader, ProjectConfig},
    error::Error,
    extract::{ExtractOptions, Extraction, extract},
    traits::Parser,
    types::{
        AggregatedResult, Language, LocaleDocument, LocaleTranslations, TranslationEntry,
        ValidationWarning,
    },
    validate::{NoopValidator, Validator},
};
