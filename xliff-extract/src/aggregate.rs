//! Multi-locale aggregation: drives extraction across every configured
//! language and assembles the combined result.
//!
//! Locales are processed strictly in order (source language first, then
//! targets as configured) so warning ordering is reproducible. The first
//! failing locale aborts the whole run; partial results are never produced.

use std::{collections::BTreeMap, path::Path};

use crate::{
    config::{ConfigResolver, FileConfigResolver, GlossaryLoader, JsonGlossaryLoader},
    error::Error,
    extract::{ExtractOptions, Extraction, extract},
    traits::Parser,
    types::{AggregatedResult, LocaleDocument, LocaleTranslations, ValidationWarning},
    validate::{NoopValidator, Validator},
    xliff::Document,
};

/// Receives human-readable progress notifications. Purely observational; the
/// aggregator never consumes a return value.
pub trait Reporter {
    /// Called before a locale's document is parsed.
    fn locale_started(&self, _locale: &str) {}

    /// Called once after every locale has been processed successfully.
    fn run_finished(&self, _locale_count: usize) {}
}

/// A reporter that says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// A successful aggregation run: the combined result plus the run-wide
/// warning list (fallback warnings and validator findings, in locale order).
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub result: AggregatedResult,
    pub warnings: Vec<ValidationWarning>,
}

/// Drives extraction across all locales of one raw translations directory.
pub struct Aggregator {
    config_resolver: Box<dyn ConfigResolver>,
    glossary_loader: Box<dyn GlossaryLoader>,
    reporter: Box<dyn Reporter>,
    validator: Box<dyn Validator>,
    options: ExtractOptions,
}

impl Aggregator {
    /// An aggregator with the file-based defaults: `project.json`
    /// configuration, JSON glossary, silent reporter, no-op validator.
    pub fn new() -> Self {
        Aggregator {
            config_resolver: Box::new(FileConfigResolver::new()),
            glossary_loader: Box::new(JsonGlossaryLoader),
            reporter: Box::new(SilentReporter),
            validator: Box::new(NoopValidator),
            options: ExtractOptions::default(),
        }
    }

    pub fn with_config_resolver(mut self, resolver: impl ConfigResolver + 'static) -> Self {
        self.config_resolver = Box::new(resolver);
        self
    }

    pub fn with_glossary_loader(mut self, loader: impl GlossaryLoader + 'static) -> Self {
        self.glossary_loader = Box::new(loader);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Processes every configured locale of `input_dir` and returns the
    /// combined result.
    ///
    /// Fails with `Error::MissingFile` when a required locale document does
    /// not exist and with `Error::Locale` when parsing or extraction fails
    /// for one locale. Processing stops at the first failure.
    pub fn aggregate<P: AsRef<Path>>(&self, input_dir: P) -> Result<Aggregation, Error> {
        let input_dir = input_dir.as_ref();
        let config = self.config_resolver.resolve(input_dir)?;
        let glossary = self
            .glossary_loader
            .load(&config.non_translatable_strings_file)?;

        let mut locales = BTreeMap::new();
        let mut warnings = Vec::new();

        for language in config.all_languages() {
            let locale = language.locale.clone();
            let input_file = input_dir.join(format!("{locale}.xliff"));
            if !input_file.exists() {
                return Err(Error::MissingFile(input_file));
            }

            self.reporter.locale_started(&locale);

            let extraction = self
                .process_locale(&input_file)
                .map_err(|e| Error::locale(&locale, e))?;

            warnings.extend(
                extraction
                    .warnings
                    .iter()
                    .map(|message| ValidationWarning::new(&locale, message)),
            );
            warnings.extend(self.validator.validate(&extraction.document, &locale));

            let LocaleDocument {
                target_language,
                entries,
            } = extraction.document;
            locales.insert(
                locale,
                LocaleTranslations {
                    target_language,
                    translations: entries,
                    language_info: language.clone(),
                },
            );
        }

        self.reporter.run_finished(locales.len());

        Ok(Aggregation {
            result: AggregatedResult {
                source_language: config.source_language,
                target_languages: config.target_languages,
                rtl_languages: config.rtl_languages,
                glossary,
                locales,
            },
            warnings,
        })
    }

    fn process_locale(&self, path: &Path) -> Result<Extraction, Error> {
        let document = Document::read_from(path)?;
        Ok(extract(&document, &self.options))
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
