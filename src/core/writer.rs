//! Canonical TS serialization.
//!
//! Output follows the lupdate layout, so a catalogue that was produced by the
//! Qt tools and parsed by [`crate::core::parsers::ts`] is written back byte for
//! byte, and any catalogue survives `write -> parse` unchanged. Characters XML
//! cannot hold literally are spelled the lupdate way: control characters in
//! text become `<byte value="x1b"/>` elements, non-ASCII whitespace becomes a
//! character reference.

use std::io;

use quick_xml::{
    Writer,
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use thiserror::Error;

use crate::core::data::{Catalog, Context, LocationRef, Message, Translation, TranslationValue};

const MESSAGE_INDENT: &str = "    ";
const CHILD_INDENT: &str = "        ";
const FORM_INDENT: &str = "            ";

#[derive(Debug, Error)]
pub enum WriteError {
    /// XML has no spelling for U+0000 inside an attribute value.
    #[error("{attribute} attribute contains a NUL character")]
    NulInAttribute { attribute: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Serialize a catalogue to TS XML.
///
/// # Errors
///
/// Fails only when an attribute value (language, id, location file name, ...)
/// contains a NUL character.
pub fn write_ts(catalog: &Catalog) -> Result<String, WriteError> {
    let mut w = TsWriter {
        writer: Writer::new(Vec::new()),
    };

    w.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    w.raw("\n")?;
    w.event(Event::DocType(BytesText::from_escaped("TS")))?;
    w.raw("\n")?;

    let mut ts = BytesStart::new("TS");
    push_attr(&mut ts, "version", catalog.version.as_deref())?;
    push_attr(&mut ts, "language", catalog.language.as_deref())?;
    push_attr(&mut ts, "sourcelanguage", catalog.source_language.as_deref())?;
    w.event(Event::Start(ts))?;
    w.raw("\n")?;

    for context in &catalog.contexts {
        w.context(context)?;
    }

    w.event(Event::End(BytesEnd::new("TS")))?;
    w.raw("\n")?;

    String::from_utf8(w.writer.into_inner())
        .map_err(|err| WriteError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

struct TsWriter {
    writer: Writer<Vec<u8>>,
}

impl TsWriter {
    fn event<'a>(&mut self, event: Event<'a>) -> io::Result<()> {
        self.writer.write_event(event)
    }

    /// Layout whitespace between elements.
    fn raw(&mut self, text: &str) -> io::Result<()> {
        self.event(Event::Text(BytesText::from_escaped(text)))
    }

    fn context(&mut self, context: &Context) -> Result<(), WriteError> {
        self.event(Event::Start(BytesStart::new("context")))?;
        self.raw("\n")?;
        self.element(MESSAGE_INDENT, "name", &context.name)?;
        if let Some(comment) = &context.comment {
            self.element(MESSAGE_INDENT, "comment", comment)?;
        }
        for message in &context.messages {
            self.message(message)?;
        }
        self.event(Event::End(BytesEnd::new("context")))?;
        self.raw("\n")?;
        Ok(())
    }

    fn message(&mut self, message: &Message) -> Result<(), WriteError> {
        let mut start = BytesStart::new("message");
        push_attr(&mut start, "id", message.id.as_deref())?;
        if message.is_numerus() {
            start.push_attribute(("numerus", "yes"));
        }
        self.raw(MESSAGE_INDENT)?;
        self.event(Event::Start(start))?;
        self.raw("\n")?;

        for location in &message.locations {
            self.location(location)?;
        }
        self.element(CHILD_INDENT, "source", &message.source)?;

        let optional = [
            ("oldsource", &message.old_source),
            ("comment", &message.comment),
            ("oldcomment", &message.old_comment),
            ("extracomment", &message.extra_comment),
            ("translatorcomment", &message.translator_comment),
        ];
        for (tag, value) in optional {
            if let Some(value) = value {
                self.element(CHILD_INDENT, tag, value)?;
            }
        }

        self.translation(&message.translation)?;

        for (tag, value) in &message.extras {
            self.element(CHILD_INDENT, tag, value)?;
        }

        self.raw(MESSAGE_INDENT)?;
        self.event(Event::End(BytesEnd::new("message")))?;
        self.raw("\n")?;
        Ok(())
    }

    fn location(&mut self, location: &LocationRef) -> Result<(), WriteError> {
        let mut start = BytesStart::new("location");
        push_attr(&mut start, "filename", location.filename.as_deref())?;
        if let Some(line) = location.line {
            start.push_attribute(("line", line.to_string().as_str()));
        }
        self.raw(CHILD_INDENT)?;
        self.event(Event::Empty(start))?;
        self.raw("\n")?;
        Ok(())
    }

    fn translation(&mut self, translation: &Translation) -> Result<(), WriteError> {
        let mut start = BytesStart::new("translation");
        if let Some(state) = translation.state.type_attr() {
            start.push_attribute(("type", state));
        }
        self.raw(CHILD_INDENT)?;
        self.event(Event::Start(start))?;

        match &translation.value {
            TranslationValue::Single(text) => self.text(text)?,
            TranslationValue::Numerus(forms) if forms.is_empty() => {}
            TranslationValue::Numerus(forms) => {
                self.raw("\n")?;
                for form in forms {
                    self.element(FORM_INDENT, "numerusform", form)?;
                }
                self.raw(CHILD_INDENT)?;
            }
        }

        self.event(Event::End(BytesEnd::new("translation")))?;
        self.raw("\n")?;
        Ok(())
    }

    /// `<tag>text</tag>` on its own line.
    fn element(&mut self, indent: &str, tag: &str, text: &str) -> Result<(), WriteError> {
        self.raw(indent)?;
        self.event(Event::Start(BytesStart::new(tag)))?;
        self.text(text)?;
        self.event(Event::End(BytesEnd::new(tag)))?;
        self.raw("\n")?;
        Ok(())
    }

    /// Element content: plain runs go through quick-xml escaping, protected
    /// characters are written one by one.
    fn text(&mut self, text: &str) -> io::Result<()> {
        let mut run_start = 0;
        for (i, c) in text.char_indices().filter(|(_, c)| is_protected(*c)) {
            if run_start < i {
                self.event(Event::Text(BytesText::new(&text[run_start..i])))?;
            }
            if c < ' ' {
                let value = format!("x{:x}", u32::from(c));
                let byte = BytesStart::new("byte").with_attributes([("value", value.as_str())]);
                self.event(Event::Empty(byte))?;
            } else {
                self.event(Event::Text(BytesText::from_escaped(char_ref(c))))?;
            }
            run_start = i + c.len_utf8();
        }
        if run_start < text.len() {
            self.event(Event::Text(BytesText::new(&text[run_start..])))?;
        }
        Ok(())
    }
}

/// Control characters other than tab and newline, and non-ASCII whitespace.
fn is_protected(c: char) -> bool {
    (c < ' ' && c != '\t' && c != '\n') || (!c.is_ascii() && c.is_whitespace())
}

fn char_ref(c: char) -> String {
    format!("&#x{:x};", u32::from(c))
}

fn push_attr(
    start: &mut BytesStart<'_>,
    name: &'static str,
    value: Option<&str>,
) -> Result<(), WriteError> {
    if let Some(value) = value {
        let escaped = escape_attr(name, value)?;
        start.push_attribute((name.as_bytes(), escaped.as_bytes()));
    }
    Ok(())
}

/// Escape an attribute value. Attributes cannot hold `<byte>` elements, so
/// every protected character becomes a character reference.
fn escape_attr(name: &'static str, value: &str) -> Result<String, WriteError> {
    let mut escaped = String::with_capacity(value.len());
    let mut run_start = 0;
    for (i, c) in value.char_indices().filter(|(_, c)| is_protected(*c)) {
        if c == '\0' {
            return Err(WriteError::NulInAttribute { attribute: name });
        }
        escaped.push_str(&escape(&value[run_start..i]));
        escaped.push_str(&char_ref(c));
        run_start = i + c.len_utf8();
    }
    escaped.push_str(&escape(&value[run_start..]));
    Ok(escaped)
}
