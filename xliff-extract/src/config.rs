//! Project configuration and glossary loading.
//!
//! Both are external collaborators of the extraction core: the aggregator
//! consumes them through the `ConfigResolver` and `GlossaryLoader` traits
//! and passes their outputs through unchanged into the result. The default
//! implementations read JSON files from the raw translations directory.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, types::Language};

/// The resolved project language configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub source_language: Language,

    /// Target language descriptors in processing order.
    pub target_languages: Vec<Language>,

    /// Locale codes written right-to-left.
    #[serde(default)]
    pub rtl_languages: BTreeSet<String>,

    /// Where the non-translatable-terms glossary lives. Relative paths are
    /// resolved against the raw translations directory.
    pub non_translatable_strings_file: PathBuf,
}

impl ProjectConfig {
    /// All configured languages in processing order: source first, then
    /// targets as configured.
    pub fn all_languages(&self) -> impl Iterator<Item = &Language> {
        std::iter::once(&self.source_language).chain(self.target_languages.iter())
    }
}

/// Resolves the project language configuration for an input directory.
pub trait ConfigResolver {
    fn resolve(&self, input_dir: &Path) -> Result<ProjectConfig, Error>;
}

/// Reads the configuration from a JSON file inside the input directory
/// (`project.json` by default).
#[derive(Debug, Clone)]
pub struct FileConfigResolver {
    file_name: String,
}

impl FileConfigResolver {
    pub fn new() -> Self {
        FileConfigResolver {
            file_name: "project.json".to_string(),
        }
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        FileConfigResolver {
            file_name: file_name.into(),
        }
    }
}

impl Default for FileConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver for FileConfigResolver {
    fn resolve(&self, input_dir: &Path) -> Result<ProjectConfig, Error> {
        let path = input_dir.join(&self.file_name);
        if !path.exists() {
            return Err(Error::MissingFile(path));
        }

        let file = File::open(&path).map_err(Error::Io)?;
        let mut config: ProjectConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(Error::Parse)?;

        for language in config.all_languages() {
            if language.parse_language_identifier().is_none() {
                return Err(Error::InvalidConfig(format!(
                    "'{}' is not a valid BCP 47 language identifier",
                    language.locale
                )));
            }
        }

        if config.non_translatable_strings_file.is_relative() {
            config.non_translatable_strings_file =
                input_dir.join(&config.non_translatable_strings_file);
        }

        Ok(config)
    }
}

/// Loads the non-translatable-terms glossary from the path the configuration
/// names.
pub trait GlossaryLoader {
    fn load(&self, path: &Path) -> Result<BTreeMap<String, String>, Error>;
}

/// Reads the glossary as a JSON map of term to replacement value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGlossaryLoader;

impl GlossaryLoader for JsonGlossaryLoader {
    fn load(&self, path: &Path) -> Result<BTreeMap<String, String>, Error> {
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let file = File::open(path).map_err(Error::Io)?;
        serde_json::from_reader(BufReader::new(file)).map_err(Error::Parse)
    }
}
