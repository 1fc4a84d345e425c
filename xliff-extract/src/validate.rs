//! Validation extension point for parsed locale documents.
//!
//! Findings are informational only and never fail a run. The default
//! validator has no rules; candidate rules for future implementations
//! include placeholder consistency, plural-form coverage per locale, and
//! empty-translation detection.

use crate::types::{LocaleDocument, ValidationWarning};

/// Inspects one parsed locale and reports findings.
pub trait Validator {
    fn validate(&self, document: &LocaleDocument, locale: &str) -> Vec<ValidationWarning>;
}

/// The default validator: no rules, zero findings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate(&self, _document: &LocaleDocument, _locale: &str) -> Vec<ValidationWarning> {
        Vec::new()
    }
}
