//! Extraction of normalized translation entries from a parsed document.
//!
//! Two passes share one fallback policy: plural groups are resolved first,
//! then the singular pass walks every unit in document order, skipping keys
//! the plural pass already claimed.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    types::{LocaleDocument, TranslationEntry},
    xliff::{Document, TransUnit},
};

/// Options controlling extraction behavior.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Record a warning whenever source text is substituted for a missing or
    /// empty translation.
    pub warn_on_missing_target: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            warn_on_missing_target: true,
        }
    }
}

/// The outcome of extracting one document: the normalized locale document
/// plus any fallback warnings recorded along the way.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: LocaleDocument,
    pub warnings: Vec<String>,
}

/// Runs both extraction passes over a parsed document.
pub fn extract(document: &Document, options: &ExtractOptions) -> Extraction {
    let mut warnings = Vec::new();

    let plural_entries = extract_plural_groups(document, options, &mut warnings);
    let claimed: BTreeSet<String> = plural_entries.keys().cloned().collect();
    let singular_entries = extract_singular_entries(document, &claimed, options, &mut warnings);

    let mut entries = plural_entries;
    entries.extend(singular_entries);

    Extraction {
        document: LocaleDocument {
            target_language: document.target_language.clone(),
            entries,
        },
        warnings,
    }
}

/// Resolves a unit's resource key: `resname` when present and non-empty,
/// else `id`.
fn resolve_key(unit: &TransUnit) -> Option<&str> {
    unit.resname
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| unit.id.as_deref().filter(|s| !s.is_empty()))
}

/// Derives the plural-form label from a context annotation: the substring
/// after the final `:` separator, trimmed and lowercased.
fn plural_form_label(context: &str) -> String {
    context
        .rsplit(':')
        .next()
        .unwrap_or(context)
        .trim()
        .to_lowercase()
}

/// The shared fallback policy: target text when present and non-empty, else
/// source text when present and non-empty, else nothing. The flag reports
/// whether fallback occurred. Identical for the plural and singular paths.
fn choose_text<'a>(target: Option<&'a str>, source: Option<&'a str>) -> Option<(&'a str, bool)> {
    match target {
        Some(target) if !target.is_empty() => Some((target, false)),
        _ => match source {
            Some(source) if !source.is_empty() => Some((source, true)),
            _ => None,
        },
    }
}

/// First pass: resolve every plural-variant group into a `Plural` entry.
/// Groups with no resolvable key or zero resolved forms are silently dropped.
fn extract_plural_groups(
    document: &Document,
    options: &ExtractOptions,
    warnings: &mut Vec<String>,
) -> BTreeMap<String, TranslationEntry> {
    let mut entries = BTreeMap::new();

    for group in &document.groups {
        let mut key: Option<&str> = None;
        let mut forms = BTreeMap::new();

        for unit in &group.units {
            if key.is_none() {
                key = resolve_key(unit);
            }

            let Some(context) = unit.plural_context.as_deref() else {
                continue;
            };
            let form = plural_form_label(context);

            let Some((text, fell_back)) =
                choose_text(unit.target.as_deref(), unit.source.as_deref())
            else {
                continue;
            };
            if fell_back && options.warn_on_missing_target {
                warnings.push(format!(
                    "using source text for plural form '{}' of '{}' in '{}' as target is missing or empty",
                    form,
                    key.unwrap_or("?"),
                    document.target_language
                ));
            }
            forms.insert(form, text.to_string());
        }

        if let Some(key) = key {
            if !forms.is_empty() {
                entries.insert(key.to_string(), TranslationEntry::Plural { forms });
            }
        }
    }

    entries
}

/// Second pass: every remaining unit becomes a `String` entry. Units with no
/// resolvable key, keys claimed as plurals, and keys already emitted by an
/// earlier unit are skipped.
fn extract_singular_entries(
    document: &Document,
    claimed: &BTreeSet<String>,
    options: &ExtractOptions,
    warnings: &mut Vec<String>,
) -> BTreeMap<String, TranslationEntry> {
    let mut entries = BTreeMap::new();

    for unit in &document.units {
        let Some(key) = resolve_key(unit) else {
            continue;
        };
        if claimed.contains(key) || entries.contains_key(key) {
            continue;
        }

        let Some((text, fell_back)) = choose_text(unit.target.as_deref(), unit.source.as_deref())
        else {
            continue;
        };
        if fell_back && options.warn_on_missing_target {
            warnings.push(format!(
                "using source text for '{}' in '{}' as target is missing or empty",
                key, document.target_language
            ));
        }
        entries.insert(
            key.to_string(),
            TranslationEntry::String {
                value: text.to_string(),
            },
        );
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use indoc::indoc;
    use proptest::prelude::*;

    fn parse(xml: &str) -> Document {
        Document::from_str(xml).unwrap()
    }

    fn extract_default(xml: &str) -> Extraction {
        extract(&parse(xml), &ExtractOptions::default())
    }

    #[test]
    fn test_translated_unit_never_falls_back() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="greeting">
                    <source>Hello</source>
                    <target>Hallo</target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert_eq!(
            extraction.document.entries.get("greeting"),
            Some(&TranslationEntry::String {
                value: "Hallo".to_string()
            })
        );
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_empty_target_falls_back_with_one_warning() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="greeting">
                    <source>Hello</source>
                    <target></target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert_eq!(
            extraction.document.entries.get("greeting"),
            Some(&TranslationEntry::String {
                value: "Hello".to_string()
            })
        );
        assert_eq!(extraction.warnings.len(), 1);
        assert!(extraction.warnings[0].contains("greeting"));
        assert!(extraction.warnings[0].contains("'de'"));
    }

    #[test]
    fn test_warnings_can_be_disabled() {
        let document = parse(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="greeting">
                    <source>Hello</source>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        let extraction = extract(
            &document,
            &ExtractOptions {
                warn_on_missing_target: false,
            },
        );
        assert_eq!(extraction.document.entries.len(), 1);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_unit_with_neither_text_is_omitted() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="ghost">
                    <source></source>
                    <target></target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert!(extraction.document.entries.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_unit_without_key_is_skipped() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit>
                    <source>Orphan</source>
                    <target>Waise</target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert!(extraction.document.entries.is_empty());
    }

    #[test]
    fn test_plural_group_round_trip_with_zero_warnings() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <group restype="x-gettext-plurals">
                    <trans-unit id="cart.count[0]" resname="cart.count">
                      <source>1 item</source>
                      <target>1 item</target>
                      <context-group purpose="x-info">
                        <context context-type="x-plural-form">plural-form: one</context>
                      </context-group>
                    </trans-unit>
                    <trans-unit id="cart.count[1]" resname="cart.count">
                      <source>%d items</source>
                      <target>%d items</target>
                      <context-group purpose="x-info">
                        <context context-type="x-plural-form">plural-form: other</context>
                      </context-group>
                    </trans-unit>
                  </group>
                </body>
              </file>
            </xliff>
        "#});
        let entry = extraction.document.entries.get("cart.count").unwrap();
        let forms = entry.forms().unwrap();
        assert_eq!(forms.get("one").map(String::as_str), Some("1 item"));
        assert_eq!(forms.get("other").map(String::as_str), Some("%d items"));
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_plural_fallback_warning_names_form_and_key() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="cs">
                <body>
                  <group restype="x-gettext-plurals">
                    <trans-unit id="cart.count[0]" resname="cart.count">
                      <source>%d items</source>
                      <context-group purpose="x-info">
                        <context context-type="x-plural-form">plural-form: few</context>
                      </context-group>
                    </trans-unit>
                  </group>
                </body>
              </file>
            </xliff>
        "#});
        assert_eq!(extraction.warnings.len(), 1);
        assert!(extraction.warnings[0].contains("'few'"));
        assert!(extraction.warnings[0].contains("'cart.count'"));
        assert!(extraction.warnings[0].contains("'cs'"));
    }

    #[test]
    fn test_plural_key_falls_back_to_id_of_first_member() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <group restype="x-gettext-plurals">
                    <trans-unit id="apples[0]">
                      <source>1 apple</source>
                      <target>1 Apfel</target>
                      <context-group purpose="x-info">
                        <context context-type="x-plural-form">plural-form: one</context>
                      </context-group>
                    </trans-unit>
                  </group>
                </body>
              </file>
            </xliff>
        "#});
        assert!(extraction.document.entries.contains_key("apples[0]"));
    }

    #[test]
    fn test_group_member_without_context_contributes_no_form() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <group restype="x-gettext-plurals">
                    <trans-unit id="apples" resname="apples">
                      <source>1 apple</source>
                      <target>1 Apfel</target>
                    </trans-unit>
                  </group>
                </body>
              </file>
            </xliff>
        "#});
        // Zero resolved forms: the group is silently dropped, and the member
        // then surfaces through the singular pass instead.
        let entry = extraction.document.entries.get("apples").unwrap();
        assert!(!entry.is_plural());
        assert_eq!(entry.value(), Some("1 Apfel"));
    }

    #[test]
    fn test_plural_key_is_never_overwritten_by_singular_unit() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <group restype="x-gettext-plurals">
                    <trans-unit id="cart.count[0]" resname="cart.count">
                      <source>1 item</source>
                      <target>1 Artikel</target>
                      <context-group purpose="x-info">
                        <context context-type="x-plural-form">plural-form: one</context>
                      </context-group>
                    </trans-unit>
                  </group>
                  <trans-unit id="cart.count">
                    <source>shadowing singular</source>
                    <target>shadowing singular</target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        let entry = extraction.document.entries.get("cart.count").unwrap();
        assert!(entry.is_plural());
    }

    #[test]
    fn test_first_singular_unit_wins_on_duplicate_keys() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="dup">
                    <source>first</source>
                    <target>first</target>
                  </trans-unit>
                  <trans-unit id="dup">
                    <source>second</source>
                    <target>second</target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert_eq!(
            extraction.document.entries.get("dup").unwrap().value(),
            Some("first")
        );
    }

    #[test]
    fn test_resname_takes_precedence_over_id() {
        let extraction = extract_default(indoc! {r#"
            <xliff version="1.2">
              <file target-language="de">
                <body>
                  <trans-unit id="unit_42" resname="settings.title">
                    <source>Settings</source>
                    <target>Einstellungen</target>
                  </trans-unit>
                </body>
              </file>
            </xliff>
        "#});
        assert!(extraction.document.entries.contains_key("settings.title"));
        assert!(!extraction.document.entries.contains_key("unit_42"));
    }

    #[test]
    fn test_plural_form_label_normalization() {
        assert_eq!(plural_form_label("plural-form: one"), "one");
        assert_eq!(plural_form_label("x-plural: gettext: FEW "), "few");
        assert_eq!(plural_form_label("other"), "other");
        assert_eq!(plural_form_label(""), "");
    }

    #[test]
    fn test_choose_text_policy() {
        assert_eq!(choose_text(Some("t"), Some("s")), Some(("t", false)));
        assert_eq!(choose_text(Some(""), Some("s")), Some(("s", true)));
        assert_eq!(choose_text(None, Some("s")), Some(("s", true)));
        assert_eq!(choose_text(Some("t"), None), Some(("t", false)));
        assert_eq!(choose_text(None, None), None);
        assert_eq!(choose_text(Some(""), Some("")), None);
    }

    proptest! {
        /// A non-empty target is always chosen verbatim, never as fallback.
        #[test]
        fn prop_non_empty_target_never_falls_back(
            target in ".{1,40}",
            source in proptest::option::of(".{0,40}"),
        ) {
            prop_assume!(!target.is_empty());
            let chosen = choose_text(Some(&target), source.as_deref());
            prop_assert_eq!(chosen, Some((target.as_str(), false)));
        }

        /// Fallback happens exactly when the target is missing or empty and
        /// the source is non-empty.
        #[test]
        fn prop_fallback_condition(
            target in proptest::option::of(".{0,40}"),
            source in ".{1,40}",
        ) {
            let chosen = choose_text(target.as_deref(), Some(&source));
            let target_usable = target.as_deref().is_some_and(|t| !t.is_empty());
            if target_usable {
                prop_assert_eq!(chosen.map(|(_, fb)| fb), Some(false));
            } else {
                prop_assert_eq!(chosen, Some((source.as_str(), true)));
            }
        }
    }
}
