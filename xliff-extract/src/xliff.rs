//! Parser for XLIFF 1.2 bilingual interchange documents.
//!
//! Builds the in-memory tree the extraction passes walk: every `<trans-unit>`
//! in document order, plus the `<group restype="x-gettext-plurals">` groups
//! with their member units. Element matching goes through `local_name()` so
//! both namespaced (`urn:oasis:names:tc:xliff:document:1.2`) and plain
//! documents parse the same way.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::io::BufRead;

use crate::{error::Error, traits::Parser};

/// One parsed interchange document, before extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Required `target-language` attribute of the `<file>` element.
    pub target_language: String,

    /// Optional `source-language` attribute of the `<file>` element.
    pub source_language: Option<String>,

    /// Plural-variant groups, in document order.
    pub groups: Vec<PluralGroup>,

    /// Every translation unit in document order, including plural-group
    /// members. The singular pass walks this list and relies on the
    /// claimed-key set to skip units already consumed as plurals.
    pub units: Vec<TransUnit>,
}

/// A `<group restype="x-gettext-plurals">` element and its member units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralGroup {
    pub units: Vec<TransUnit>,
}

/// One `<trans-unit>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransUnit {
    /// The `id` attribute.
    pub id: Option<String>,

    /// The `resname` attribute.
    pub resname: Option<String>,

    /// Text of the `<source>` child, if present. `Some("")` for an empty
    /// element, which the fallback policy treats the same as absent.
    pub source: Option<String>,

    /// Text of the `<target>` child, if present.
    pub target: Option<String>,

    /// Raw text of a nested `<context context-type="x-plural-form">`
    /// annotation. The extractor derives the form label from it.
    pub plural_context: Option<String>,
}

impl Parser for Document {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut target_language = None;
        let mut source_language = None;
        let mut seen_file = false;
        let mut groups = Vec::new();
        let mut units = Vec::new();
        // One flag per open <group>: did this group open the plural group
        // currently being collected?
        let mut group_stack: Vec<bool> = Vec::new();
        let mut open_plural: Option<Vec<TransUnit>> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"file" => {
                        if !seen_file {
                            seen_file = true;
                            let (target, source) = parse_file_attributes(e)?;
                            target_language = Some(target);
                            source_language = source;
                        }
                    }
                    b"group" => {
                        let restype = attribute_value(e, b"restype")?;
                        let opens_plural = restype.as_deref() == Some("x-gettext-plurals")
                            && open_plural.is_none();
                        if opens_plural {
                            open_plural = Some(Vec::new());
                        }
                        group_stack.push(opens_plural);
                    }
                    b"trans-unit" => {
                        let unit = parse_trans_unit(e, &mut xml_reader)?;
                        if let Some(members) = open_plural.as_mut() {
                            members.push(unit.clone());
                        }
                        units.push(unit);
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => {
                    if e.local_name().as_ref() == b"file" && !seen_file {
                        seen_file = true;
                        let (target, source) = parse_file_attributes(e)?;
                        target_language = Some(target);
                        source_language = source;
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"group" && group_stack.pop() == Some(true) {
                        let members = open_plural.take().unwrap_or_default();
                        groups.push(PluralGroup { units: members });
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        if !seen_file {
            return Err(Error::Structure("no <file> element found".to_string()));
        }
        let target_language = target_language.ok_or(Error::MissingTargetLanguage)?;

        Ok(Document {
            target_language,
            source_language,
            groups,
            units,
        })
    }
}

/// Reads `target-language` (required) and `source-language` (optional) from a
/// `<file>` element.
fn parse_file_attributes(e: &BytesStart) -> Result<(String, Option<String>), Error> {
    let target = attribute_value(e, b"target-language")?.ok_or(Error::MissingTargetLanguage)?;
    let source = attribute_value(e, b"source-language")?;
    Ok((target, source))
}

fn attribute_value(e: &BytesStart, name: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn parse_trans_unit<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<TransUnit, Error> {
    let mut unit = TransUnit {
        id: attribute_value(e, b"id")?,
        resname: attribute_value(e, b"resname")?,
        ..TransUnit::default()
    };

    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"source" => unit.source = Some(read_element_text(xml_reader, b"source")?),
                b"target" => unit.target = Some(read_element_text(xml_reader, b"target")?),
                b"context" => {
                    let context_type = attribute_value(e, b"context-type")?;
                    let text = read_element_text(xml_reader, b"context")?;
                    if context_type.as_deref() == Some("x-plural-form") {
                        unit.plural_context = Some(text);
                    }
                }
                // <context-group>, <note>, etc. are descended transparently.
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"source" => unit.source = Some(String::new()),
                b"target" => unit.target = Some(String::new()),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"trans-unit" => break,
            Ok(Event::Eof) => {
                return Err(Error::Structure(
                    "unexpected EOF inside <trans-unit>".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    Ok(unit)
}

/// Collects all text content up to the matching end tag, descending through
/// nested inline markup (`<x/>`, `<g>`, ...).
fn read_element_text<R: BufRead>(xml_reader: &mut Reader<R>, end: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::Text(ref e)) => text.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(ref e)) => text.push_str(&String::from_utf8_lossy(e)),
            Ok(Event::End(ref e)) => {
                if depth == 0 && e.local_name().as_ref() == end {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => {
                return Err(Error::Structure(format!(
                    "unexpected EOF inside <{}>",
                    String::from_utf8_lossy(end)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(text)
}
