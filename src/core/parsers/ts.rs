use std::{fmt, fs, path::Path};

use anyhow::{Context as _, Result};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use thiserror::Error;

use crate::core::{
    plural::PluralRule,
    data::{
        Catalog, Context, LineRef, LocationRef, Message, Translation, TranslationState,
        TranslationValue,
    },
};

/// Error raised while reading a TS document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TsError {
    #[error("XML error at line {line}: {message}")]
    Xml { line: usize, message: String },

    #[error("root element is <{found}>, expected <TS>")]
    NotTs { found: String },

    #[error("document has no <TS> element")]
    Empty,

    #[error("unexpected <{element}> inside <{parent}> at line {line}")]
    UnexpectedElement {
        element: String,
        parent: String,
        line: usize,
    },

    #[error("<{parent}> at line {line} has no <{element}>")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        line: usize,
    },

    #[error("invalid {attribute} attribute \"{value}\" at line {line}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
        line: usize,
    },

    #[error("text mixed with <numerusform> elements in <translation> at line {line}")]
    MixedContent { line: usize },

    #[error("unexpected end of document inside <{parent}>")]
    UnexpectedEof { parent: &'static str },
}

impl TsError {
    /// Line the error points at, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            TsError::Xml { line, .. }
            | TsError::UnexpectedElement { line, .. }
            | TsError::MissingElement { line, .. }
            | TsError::InvalidAttribute { line, .. }
            | TsError::MixedContent { line } => Some(*line),
            TsError::NotTs { .. } | TsError::Empty | TsError::UnexpectedEof { .. } => None,
        }
    }
}

/// Line numbers of contexts and messages, indexed like the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSpans {
    pub contexts: Vec<ContextSpan>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSpan {
    /// Line of the `<context>` start tag.
    pub line: usize,
    /// Line of each `<message>` start tag.
    pub messages: Vec<usize>,
}

impl CatalogSpans {
    pub fn context_line(&self, context: usize) -> usize {
        self.contexts.get(context).map_or(1, |c| c.line)
    }

    pub fn message_line(&self, context: usize, message: usize) -> usize {
        self.contexts
            .get(context)
            .and_then(|c| c.messages.get(message))
            .copied()
            .unwrap_or(1)
    }
}

/// A catalogue together with where its pieces were found.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub catalog: Catalog,
    pub spans: CatalogSpans,
}

/// Parse a TS document from a string.
pub fn parse_ts_str(content: &str) -> Result<ParsedCatalog, TsError> {
    TsReader::new(content).read_document()
}

/// Read and parse a TS file.
pub fn parse_ts_file(path: &Path) -> Result<ParsedCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read TS file: {:?}", path))?;
    parse_ts_str(&content).with_context(|| format!("Failed to parse TS file: {:?}", path))
}

/// Guess the locale from a catalogue file name.
///
/// Picks the longest `_`-separated suffix shaped like a known locale:
/// - "drawpile_it.ts" -> Some("it")
/// - "drawpile_pt_BR.ts" -> Some("pt_BR")
/// - "it.ts" -> Some("it")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    std::iter::once(stem)
        .chain(
            stem.char_indices()
                .filter(|(_, c)| *c == '_')
                .map(|(i, _)| &stem[i + 1..]),
        )
        .find(|candidate| looks_like_locale(candidate))
        .map(str::to_string)
}

/// `ll`, `ll_CC`, `ll_Ssss_CC` or `ll_NNN` with a known language `ll`.
fn looks_like_locale(candidate: &str) -> bool {
    let mut parts = candidate.split('_');
    let Some(language) = parts.next() else {
        return false;
    };
    let language_ok = (2..=3).contains(&language.len())
        && language.chars().all(|c| c.is_ascii_lowercase())
        && PluralRule::for_language(language).is_some();

    language_ok
        && parts.all(|part| {
            let mut chars = part.chars();
            match part.len() {
                2 => part.chars().all(|c| c.is_ascii_uppercase()),
                3 => part.chars().all(|c| c.is_ascii_digit()),
                4 => {
                    chars.next().is_some_and(|c| c.is_ascii_uppercase())
                        && chars.all(|c| c.is_ascii_lowercase())
                }
                _ => false,
            }
        })
}

/// Build an index of line start byte offsets for O(log n) line lookups.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

struct TsReader<'a> {
    reader: Reader<&'a [u8]>,
    line_index: Vec<usize>,
}

impl<'a> TsReader<'a> {
    fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            line_index: build_line_index(content),
        }
    }

    fn current_line(&self) -> usize {
        offset_to_line(&self.line_index, self.reader.buffer_position() as usize)
    }

    fn xml_error(&self, err: impl fmt::Display) -> TsError {
        TsError::Xml {
            line: self.current_line(),
            message: err.to_string(),
        }
    }

    fn unexpected(&self, e: &BytesStart<'_>, parent: &str, line: usize) -> TsError {
        TsError::UnexpectedElement {
            element: element_name(e),
            parent: parent.to_string(),
            line,
        }
    }

    /// Next event and the line it starts on.
    fn next(&mut self) -> Result<(Event<'a>, usize), TsError> {
        let line = self.current_line();
        match self.reader.read_event() {
            Ok(event) => Ok((event, line)),
            Err(err) => Err(self.xml_error(err)),
        }
    }

    fn attribute(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>, TsError> {
        match e.try_get_attribute(name) {
            Ok(Some(attr)) => attr
                .unescape_value()
                .map(|value| Some(value.into_owned()))
                .map_err(|err| self.xml_error(err)),
            Ok(None) => Ok(None),
            Err(err) => Err(self.xml_error(err)),
        }
    }

    fn read_document(mut self) -> Result<ParsedCatalog, TsError> {
        loop {
            let (event, _) = self.next()?;
            match event {
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let catalog = self.read_ts_attributes(&e)?;
                    return self.read_ts(catalog);
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    return Ok(ParsedCatalog {
                        catalog: self.read_ts_attributes(&e)?,
                        spans: CatalogSpans::default(),
                    });
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(TsError::NotTs {
                        found: element_name(&e),
                    });
                }
                Event::Eof => return Err(TsError::Empty),
                _ => {}
            }
        }
    }

    fn read_ts_attributes(&self, e: &BytesStart<'_>) -> Result<Catalog, TsError> {
        Ok(Catalog {
            version: self.attribute(e, "version")?,
            language: self.attribute(e, "language")?,
            source_language: self.attribute(e, "sourcelanguage")?,
            contexts: Vec::new(),
        })
    }

    fn read_ts(&mut self, mut catalog: Catalog) -> Result<ParsedCatalog, TsError> {
        let mut spans = CatalogSpans::default();
        loop {
            let (event, line) = self.next()?;
            match event {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    let (context, span) = self.read_context(line)?;
                    catalog.contexts.push(context);
                    spans.contexts.push(span);
                }
                Event::Start(e) | Event::Empty(e) => return Err(self.unexpected(&e, "TS", line)),
                Event::End(_) => break,
                Event::Eof => return Err(TsError::UnexpectedEof { parent: "TS" }),
                _ => {}
            }
        }
        Ok(ParsedCatalog { catalog, spans })
    }

    fn read_context(&mut self, line: usize) -> Result<(Context, ContextSpan), TsError> {
        let mut context = Context::default();
        let mut span = ContextSpan {
            line,
            messages: Vec::new(),
        };
        let mut name = None;

        loop {
            let (event, event_line) = self.next()?;
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_text("name")?),
                    b"comment" => context.comment = Some(self.read_text("comment")?),
                    b"message" => {
                        context.messages.push(self.read_message(&e, event_line)?);
                        span.messages.push(event_line);
                    }
                    _ => return Err(self.unexpected(&e, "context", event_line)),
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => context.comment = Some(String::new()),
                    b"message" => {
                        return Err(TsError::MissingElement {
                            element: "source",
                            parent: "message",
                            line: event_line,
                        });
                    }
                    _ => return Err(self.unexpected(&e, "context", event_line)),
                },
                Event::End(_) => break,
                Event::Eof => return Err(TsError::UnexpectedEof { parent: "context" }),
                _ => {}
            }
        }

        context.name = name.ok_or(TsError::MissingElement {
            element: "name",
            parent: "context",
            line,
        })?;
        Ok((context, span))
    }

    fn read_message(&mut self, start: &BytesStart<'_>, line: usize) -> Result<Message, TsError> {
        let mut message = Message {
            id: self.attribute(start, "id")?,
            ..Default::default()
        };
        let numerus = self.attribute(start, "numerus")?.as_deref() == Some("yes");
        let mut source = None;
        let mut translation = None;

        loop {
            let (event, event_line) = self.next()?;
            let (e, empty) = match event {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(_) => break,
                Event::Eof => return Err(TsError::UnexpectedEof { parent: "message" }),
                _ => continue,
            };

            match e.name().as_ref() {
                b"location" => {
                    message.locations.push(self.read_location(&e, event_line)?);
                    if !empty {
                        self.read_text("location")?;
                    }
                }
                b"source" => source = Some(self.read_optional_text(empty, "source")?),
                b"oldsource" => {
                    message.old_source = Some(self.read_optional_text(empty, "oldsource")?)
                }
                b"comment" => message.comment = Some(self.read_optional_text(empty, "comment")?),
                b"oldcomment" => {
                    message.old_comment = Some(self.read_optional_text(empty, "oldcomment")?)
                }
                b"extracomment" => {
                    message.extra_comment = Some(self.read_optional_text(empty, "extracomment")?)
                }
                b"translatorcomment" => {
                    message.translator_comment =
                        Some(self.read_optional_text(empty, "translatorcomment")?)
                }
                b"translation" => {
                    translation = Some(self.read_translation(&e, numerus, empty, event_line)?)
                }
                name if name.starts_with(b"extra-") => {
                    let name = element_name(&e);
                    let value = self.read_optional_text(empty, "extra")?;
                    message.extras.push((name, value));
                }
                _ => return Err(self.unexpected(&e, "message", event_line)),
            }
        }

        message.source = source.ok_or(TsError::MissingElement {
            element: "source",
            parent: "message",
            line,
        })?;
        message.translation = translation.unwrap_or_else(|| Translation {
            state: TranslationState::Unfinished,
            value: if numerus {
                TranslationValue::Numerus(Vec::new())
            } else {
                TranslationValue::Single(String::new())
            },
        });
        Ok(message)
    }

    fn read_location(&self, e: &BytesStart<'_>, line: usize) -> Result<LocationRef, TsError> {
        let filename = self.attribute(e, "filename")?;
        let line_ref = match self.attribute(e, "line")? {
            Some(value) => Some(value.parse::<LineRef>().map_err(|_| {
                TsError::InvalidAttribute {
                    attribute: "line",
                    value,
                    line,
                }
            })?),
            None => None,
        };
        Ok(LocationRef {
            filename,
            line: line_ref,
        })
    }

    fn read_translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
        empty: bool,
        line: usize,
    ) -> Result<Translation, TsError> {
        let state = match self.attribute(start, "type")? {
            Some(value) => value
                .parse::<TranslationState>()
                .map_err(|_| TsError::InvalidAttribute {
                    attribute: "type",
                    value,
                    line,
                })?,
            None => TranslationState::Finished,
        };

        let mut text = String::new();
        let mut forms: Option<Vec<String>> = None;

        if !empty {
            loop {
                let (event, event_line) = self.next()?;
                match event {
                    Event::Text(t) => {
                        text.push_str(&t.unescape().map_err(|err| self.xml_error(err))?)
                    }
                    Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                    Event::Empty(e) if e.name().as_ref() == b"byte" => {
                        text.push(self.read_byte(&e, event_line)?)
                    }
                    Event::Start(e) if numerus && e.name().as_ref() == b"numerusform" => forms
                        .get_or_insert_with(Vec::new)
                        .push(self.read_text("numerusform")?),
                    Event::Empty(e) if numerus && e.name().as_ref() == b"numerusform" => {
                        forms.get_or_insert_with(Vec::new).push(String::new())
                    }
                    Event::Start(e) | Event::Empty(e) => {
                        return Err(self.unexpected(&e, "translation", event_line));
                    }
                    Event::End(_) => break,
                    Event::Eof => {
                        return Err(TsError::UnexpectedEof {
                            parent: "translation",
                        });
                    }
                    _ => {}
                }
            }
        }

        let value = match forms {
            Some(_) if !text.trim().is_empty() => return Err(TsError::MixedContent { line }),
            Some(forms) => TranslationValue::Numerus(forms),
            None if numerus && text.trim().is_empty() => TranslationValue::Numerus(Vec::new()),
            None if numerus => TranslationValue::Numerus(vec![text]),
            None => TranslationValue::Single(text),
        };
        Ok(Translation { state, value })
    }

    /// Decode `<byte value="x1b"/>`, lupdate's spelling of characters XML
    /// cannot carry. The value is hexadecimal with an `x` prefix, decimal
    /// otherwise.
    fn read_byte(&self, e: &BytesStart<'_>, line: usize) -> Result<char, TsError> {
        let value = self.attribute(e, "value")?.unwrap_or_default();
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => value.parse::<u32>(),
        };
        code.ok()
            .and_then(char::from_u32)
            .ok_or(TsError::InvalidAttribute {
                attribute: "value",
                value,
                line,
            })
    }

    fn read_optional_text(&mut self, empty: bool, parent: &str) -> Result<String, TsError> {
        if empty {
            Ok(String::new())
        } else {
            self.read_text(parent)
        }
    }

    /// Collect the text content up to the closing tag of the current element.
    fn read_text(&mut self, parent: &str) -> Result<String, TsError> {
        let mut text = String::new();
        loop {
            let (event, line) = self.next()?;
            match event {
                Event::Text(t) => {
                    text.push_str(&t.unescape().map_err(|err| self.xml_error(err))?)
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => {
                    text.push(self.read_byte(&e, line)?)
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(self.unexpected(&e, parent, line));
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(TsError::UnexpectedEof { parent: "element" }),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NAVIGATOR_TS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="it_IT">
<context>
    <name>docks::Navigator</name>
    <message>
        <location filename="../src/desktop/docks/navigator.cpp" line="354"/>
        <source>Navigator</source>
        <translation>Navigatore</translation>
    </message>
    <message>
        <location filename="../src/desktop/docks/navigator.cpp" line="385"/>
        <source>Show Cursors</source>
        <translation type="unfinished"></translation>
    </message>
</context>
<context>
    <name>docks::LayerList</name>
    <message numerus="yes">
        <source>%n layer(s)</source>
        <comment>layer count</comment>
        <extracomment>Shown in the dock title</extracomment>
        <translation>
            <numerusform>%n livello</numerusform>
            <numerusform>%n livelli</numerusform>
        </translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn test_parse_header_attributes() {
        let parsed = parse_ts_str(NAVIGATOR_TS).unwrap();
        assert_eq!(parsed.catalog.version.as_deref(), Some("2.1"));
        assert_eq!(parsed.catalog.language.as_deref(), Some("it_IT"));
        assert_eq!(parsed.catalog.source_language, None);
        assert_eq!(parsed.catalog.contexts.len(), 2);
    }

    #[test]
    fn test_parse_messages() {
        let parsed = parse_ts_str(NAVIGATOR_TS).unwrap();
        let navigator = &parsed.catalog.contexts[0];
        assert_eq!(navigator.name, "docks::Navigator");
        assert_eq!(navigator.messages.len(), 2);

        let first = &navigator.messages[0];
        assert_eq!(first.source, "Navigator");
        assert_eq!(first.translation, Translation::finished("Navigatore"));
        assert_eq!(
            first.locations,
            vec![LocationRef::new("../src/desktop/docks/navigator.cpp", 354)]
        );

        let second = &navigator.messages[1];
        assert_eq!(second.translation, Translation::unfinished(""));
    }

    #[test]
    fn test_parse_numerus_message() {
        let parsed = parse_ts_str(NAVIGATOR_TS).unwrap();
        let message = &parsed.catalog.contexts[1].messages[0];
        assert!(message.is_numerus());
        assert_eq!(message.comment.as_deref(), Some("layer count"));
        assert_eq!(message.extra_comment.as_deref(), Some("Shown in the dock title"));
        assert_eq!(
            message.translation,
            Translation::numerus(TranslationState::Finished, ["%n livello", "%n livelli"])
        );
    }

    #[test]
    fn test_parse_spans() {
        let parsed = parse_ts_str(NAVIGATOR_TS).unwrap();
        assert_eq!(parsed.spans.context_line(0), 4);
        assert_eq!(parsed.spans.message_line(0, 0), 6);
        assert_eq!(parsed.spans.message_line(0, 1), 11);
        assert_eq!(parsed.spans.context_line(1), 17);
        assert_eq!(parsed.spans.message_line(1, 0), 19);
        assert_eq!(parsed.spans.message_line(5, 5), 1);
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let content = r#"<TS language="it"><context><name>A&amp;B</name>
<message><source>&lt;b&gt;Bold&lt;/b&gt; &quot;x&quot; &apos;y&apos;</source>
<translation>Tab&#x9;here</translation></message></context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let context = &parsed.catalog.contexts[0];
        assert_eq!(context.name, "A&B");
        assert_eq!(context.messages[0].source, "<b>Bold</b> \"x\" 'y'");
        assert_eq!(
            context.messages[0].translation,
            Translation::finished("Tab\there")
        );
    }

    #[test]
    fn test_parse_preserves_whitespace_in_text() {
        let content = "<TS><context><name>C</name><message>\n<source>  Padded\n</source>\n<translation> Spazio </translation>\n</message></context></TS>";
        let parsed = parse_ts_str(content).unwrap();
        let message = &parsed.catalog.contexts[0].messages[0];
        assert_eq!(message.source, "  Padded\n");
        assert_eq!(message.translation, Translation::finished(" Spazio "));
    }

    #[test]
    fn test_parse_cdata() {
        let content =
            "<TS><context><name>C</name><message><source><![CDATA[a < b]]></source></message></context></TS>";
        let parsed = parse_ts_str(content).unwrap();
        assert_eq!(parsed.catalog.contexts[0].messages[0].source, "a < b");
    }

    #[test]
    fn test_parse_vanished_and_obsolete() {
        let content = r#"<TS><context><name>C</name>
<message><source>Old</source><translation type="vanished">Vecchio</translation></message>
<message><source>Older</source><translation type="obsolete">Antico</translation></message>
</context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let messages = &parsed.catalog.contexts[0].messages;
        assert_eq!(messages[0].translation.state, TranslationState::Vanished);
        assert_eq!(messages[1].translation.state, TranslationState::Obsolete);
        assert!(!messages[0].is_active());
    }

    #[test]
    fn test_parse_empty_translation_element() {
        let content = r#"<TS><context><name>C</name>
<message><source>A</source><translation type="unfinished"/></message>
<message numerus="yes"><source>%n item(s)</source><translation type="unfinished"/></message>
</context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let messages = &parsed.catalog.contexts[0].messages;
        assert_eq!(messages[0].translation, Translation::unfinished(""));
        assert_eq!(
            messages[1].translation.value,
            TranslationValue::Numerus(Vec::new())
        );
    }

    #[test]
    fn test_parse_message_without_translation_is_unfinished() {
        let content = "<TS><context><name>C</name><message><source>A</source></message></context></TS>";
        let parsed = parse_ts_str(content).unwrap();
        assert_eq!(
            parsed.catalog.contexts[0].messages[0].translation,
            Translation::unfinished("")
        );
    }

    #[test]
    fn test_parse_relative_locations_and_extras() {
        let content = r#"<TS><context><name>C</name><message id="msg.id">
<location line="+3"/><location filename="a.cpp"/>
<source>A</source><oldsource>Old A</oldsource><oldcomment>was</oldcomment>
<translatorcomment>check tone</translatorcomment>
<translation>B</translation>
<extra-po-flags>c-format</extra-po-flags>
</message></context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let message = &parsed.catalog.contexts[0].messages[0];
        assert_eq!(message.id.as_deref(), Some("msg.id"));
        assert_eq!(
            message.locations,
            vec![
                LocationRef {
                    filename: None,
                    line: Some(LineRef::Relative(3)),
                },
                LocationRef {
                    filename: Some("a.cpp".to_string()),
                    line: None,
                },
            ]
        );
        assert_eq!(message.old_source.as_deref(), Some("Old A"));
        assert_eq!(message.old_comment.as_deref(), Some("was"));
        assert_eq!(message.translator_comment.as_deref(), Some("check tone"));
        assert_eq!(
            message.extras,
            vec![("extra-po-flags".to_string(), "c-format".to_string())]
        );
    }

    #[test]
    fn test_parse_byte_elements() {
        let content = r#"<TS><context><name>C</name><message>
<source>Bell<byte value="x7"/></source>
<translation>Campanella<byte value="x0"/><byte value="13"/></translation>
</message></context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let message = &parsed.catalog.contexts[0].messages[0];
        assert_eq!(message.source, "Bell\u{7}");
        assert_eq!(message.translation, Translation::finished("Campanella\0\r"));
    }

    #[test]
    fn test_parse_rejects_invalid_byte_value() {
        let content = "<TS><context><name>C</name><message>\n<source>A<byte value=\"xzz\"/></source></message></context></TS>";
        assert_eq!(
            parse_ts_str(content).unwrap_err(),
            TsError::InvalidAttribute {
                attribute: "value",
                value: "xzz".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_parse_rejects_text_mixed_with_numerus_forms() {
        let content = r#"<TS><context><name>C</name><message numerus="yes"><source>%n item(s)</source>
<translation>stray<numerusform>%n elemento</numerusform></translation>
</message></context></TS>"#;
        assert_eq!(
            parse_ts_str(content).unwrap_err(),
            TsError::MixedContent { line: 2 }
        );
    }

    #[test]
    fn test_parse_rejects_numerus_forms_in_plain_message() {
        let content = "<TS><context><name>C</name><message><source>A</source>\n<translation><numerusform>B</numerusform></translation></message></context></TS>";
        assert!(matches!(
            parse_ts_str(content).unwrap_err(),
            TsError::UnexpectedElement { ref element, .. } if element == "numerusform"
        ));
    }

    #[test]
    fn test_parse_numerus_message_without_translation() {
        let content = r#"<TS><context><name>C</name><message numerus="yes"><source>%n item(s)</source></message></context></TS>"#;
        let parsed = parse_ts_str(content).unwrap();
        let message = &parsed.catalog.contexts[0].messages[0];
        assert!(message.is_numerus());
        assert_eq!(
            message.translation,
            Translation::numerus(TranslationState::Unfinished, Vec::<String>::new())
        );
    }

    #[test]
    fn test_parse_rejects_non_ts_root() {
        let err = parse_ts_str("<html><body/></html>").unwrap_err();
        assert_eq!(
            err,
            TsError::NotTs {
                found: "html".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_document() {
        assert_eq!(parse_ts_str("").unwrap_err(), TsError::Empty);
    }

    #[test]
    fn test_parse_rejects_unknown_message_child() {
        let content = "<TS><context><name>C</name><message>\n<source>A</source>\n<lengthvariant>x</lengthvariant></message></context></TS>";
        let err = parse_ts_str(content).unwrap_err();
        assert_eq!(
            err,
            TsError::UnexpectedElement {
                element: "lengthvariant".to_string(),
                parent: "message".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn test_error_line() {
        let err = parse_ts_str("<TS>\n<context>\n<foo/></context></TS>").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert_eq!(TsError::Empty.line(), None);
    }

    #[test]
    fn test_parse_rejects_message_without_source() {
        let content = "<TS><context><name>C</name>\n<message><translation>x</translation></message></context></TS>";
        let err = parse_ts_str(content).unwrap_err();
        assert_eq!(
            err,
            TsError::MissingElement {
                element: "source",
                parent: "message",
                line: 2,
            }
        );
    }

    #[test]
    fn test_parse_rejects_context_without_name() {
        let content = "<TS><context><message><source>A</source></message></context></TS>";
        let err = parse_ts_str(content).unwrap_err();
        assert!(matches!(
            err,
            TsError::MissingElement {
                element: "name",
                parent: "context",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_translation_type() {
        let content = r#"<TS><context><name>C</name><message><source>A</source><translation type="done">B</translation></message></context></TS>"#;
        let err = parse_ts_str(content).unwrap_err();
        assert!(matches!(
            err,
            TsError::InvalidAttribute {
                attribute: "type",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        let content = "<TS><context><name>C</context></TS>";
        assert!(matches!(
            parse_ts_str(content).unwrap_err(),
            TsError::Xml { .. }
        ));
    }

    #[test]
    fn test_parse_ts_file() {
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let path = dir.path().join("drawpile_it.ts");
        fs::write(&path, NAVIGATOR_TS).unwrap();

        let parsed = parse_ts_file(&path).unwrap();
        assert_eq!(parsed.catalog.contexts.len(), 2);

        let missing = parse_ts_file(&dir.path().join("missing.ts"));
        assert!(missing.unwrap_err().to_string().contains("Failed to read TS file"));
    }

    #[test]
    fn test_extract_locale() {
        assert_eq!(extract_locale("drawpile_it.ts"), Some("it".to_string()));
        assert_eq!(extract_locale("drawpile_pt_BR.ts"), Some("pt_BR".to_string()));
        assert_eq!(extract_locale("my_app_de.ts"), Some("de".to_string()));
        assert_eq!(extract_locale("/path/to/ja.ts"), Some("ja".to_string()));
        assert_eq!(extract_locale("app_zh_Hans_CN.ts"), Some("zh_Hans_CN".to_string()));
        assert_eq!(extract_locale("drawpile.ts"), None);
    }

    #[test]
    fn test_build_line_index() {
        let index = build_line_index("line1\nline2\nline3");
        assert_eq!(index, vec![0, 6, 12]);
        assert_eq!(offset_to_line(&index, 0), 1);
        assert_eq!(offset_to_line(&index, 3), 1);
        assert_eq!(offset_to_line(&index, 6), 2);
        assert_eq!(offset_to_line(&index, 12), 3);
    }
}
