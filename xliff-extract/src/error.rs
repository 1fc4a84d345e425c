//! All error types for the xliff-extract crate.
//!
//! These are returned from all fallible operations (parsing, extraction,
//! aggregation, configuration resolution).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The document has no recognizable top-level `<file>` container.
    #[error("invalid XLIFF structure: {0}")]
    Structure(String),

    /// The `<file>` element lacks the required `target-language` attribute.
    #[error("missing target-language attribute on <file> element")]
    MissingTargetLanguage,

    /// An expected input file (locale document, project config, glossary)
    /// does not exist.
    #[error("could not find '{0}' in raw translations directory")]
    MissingFile(PathBuf),

    /// A failure while parsing or extracting a single locale, wrapping the
    /// underlying cause. Aborts the whole aggregation run.
    #[error("error processing locale {locale}: {source}")]
    Locale {
        locale: String,
        #[source]
        source: Box<Error>,
    },

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid project configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wraps an error with the locale it occurred in.
    pub fn locale(locale: impl Into<String>, source: Error) -> Self {
        Error::Locale {
            locale: locale.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_structure_error() {
        let error = Error::Structure("no <file> element found".to_string());
        assert_eq!(
            error.to_string(),
            "invalid XLIFF structure: no <file> element found"
        );
    }

    #[test]
    fn test_missing_target_language_error() {
        let error = Error::MissingTargetLanguage;
        assert!(error.to_string().contains("target-language"));
    }

    #[test]
    fn test_missing_file_error() {
        let error = Error::MissingFile(PathBuf::from("translations/de.xliff"));
        assert!(error.to_string().contains("de.xliff"));
        assert!(error.to_string().contains("raw translations directory"));
    }

    #[test]
    fn test_locale_error_wraps_cause() {
        let error = Error::locale("fr", Error::MissingTargetLanguage);
        assert!(error.to_string().contains("error processing locale fr"));
        assert!(error.to_string().contains("target-language"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_config_error() {
        let error = Error::InvalidConfig("empty target language list".to_string());
        assert_eq!(
            error.to_string(),
            "invalid project configuration: empty target language list"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::DataMismatch("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("DataMismatch"));
        assert!(debug.contains("test"));
    }
}
