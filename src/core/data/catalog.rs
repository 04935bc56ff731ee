use std::{fmt, str::FromStr};

use crate::core::plural::PluralRule;

/// Completion state of a translation, from the `type` attribute.
///
/// A missing attribute means the translation is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationState {
    Finished,
    #[default]
    Unfinished,
    /// The source string disappeared from the code (lupdate 5+).
    Vanished,
    /// Legacy marker for removed strings.
    Obsolete,
}

impl TranslationState {
    /// Value of the `type` attribute, `None` for finished translations.
    pub fn type_attr(self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Vanished => Some("vanished"),
            TranslationState::Obsolete => Some("obsolete"),
        }
    }

    /// Vanished and obsolete messages are kept for translator memory only.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            TranslationState::Finished | TranslationState::Unfinished
        )
    }
}

impl FromStr for TranslationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(TranslationState::Finished),
            "unfinished" => Ok(TranslationState::Unfinished),
            "vanished" => Ok(TranslationState::Vanished),
            "obsolete" => Ok(TranslationState::Obsolete),
            other => Err(format!("unknown translation type '{}'", other)),
        }
    }
}

impl fmt::Display for TranslationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationState::Finished => write!(f, "finished"),
            TranslationState::Unfinished => write!(f, "unfinished"),
            TranslationState::Vanished => write!(f, "vanished"),
            TranslationState::Obsolete => write!(f, "obsolete"),
        }
    }
}

/// Translated text of a message.
///
/// `Numerus` holds one entry per plural form. A message is a numerus message
/// (`numerus="yes"`) exactly when its value is `Numerus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Single(String),
    Numerus(Vec<String>),
}

impl Default for TranslationValue {
    fn default() -> Self {
        TranslationValue::Single(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    pub state: TranslationState,
    pub value: TranslationValue,
}

impl Translation {
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Finished,
            value: TranslationValue::Single(text.into()),
        }
    }

    pub fn unfinished(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Unfinished,
            value: TranslationValue::Single(text.into()),
        }
    }

    pub fn numerus<I, S>(state: TranslationState, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state,
            value: TranslationValue::Numerus(forms.into_iter().map(Into::into).collect()),
        }
    }

    /// All translated strings: the single text, or every numerus form.
    pub fn forms(&self) -> Vec<&str> {
        match &self.value {
            TranslationValue::Single(text) => vec![text.as_str()],
            TranslationValue::Numerus(forms) => forms.iter().map(String::as_str).collect(),
        }
    }

    /// True when there is no text at all, or any numerus form is empty.
    pub fn has_empty_form(&self) -> bool {
        match &self.value {
            TranslationValue::Single(text) => text.is_empty(),
            TranslationValue::Numerus(forms) => {
                forms.is_empty() || forms.iter().any(|f| f.is_empty())
            }
        }
    }

    /// Display form used in reports.
    pub fn display(&self) -> String {
        self.forms().join(" | ")
    }
}

/// Line attribute of a `<location>` element.
///
/// lupdate writes either absolute lines or, in relative mode, offsets
/// from the previous location (`+3`, `-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Absolute(u32),
    Relative(i32),
}

impl FromStr for LineRef {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('+') || s.starts_with('-') {
            s.parse::<i32>().map(LineRef::Relative)
        } else {
            s.parse::<u32>().map(LineRef::Absolute)
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{}", line),
            LineRef::Relative(offset) => write!(f, "{:+}", offset),
        }
    }
}

/// Pointer back to the UI source that uses a message.
///
/// Maintenance metadata for translators; never consulted for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationRef {
    pub filename: Option<String>,
    pub line: Option<LineRef>,
}

impl LocationRef {
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: Some(filename.into()),
            line: Some(LineRef::Absolute(line)),
        }
    }
}

/// A single translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub id: Option<String>,
    /// Original-language text; the lookup key within a context.
    pub source: String,
    pub old_source: Option<String>,
    /// Disambiguating comment, part of the lookup key.
    pub comment: Option<String>,
    pub old_comment: Option<String>,
    /// Developer comment shown to translators.
    pub extra_comment: Option<String>,
    pub translator_comment: Option<String>,
    pub locations: Vec<LocationRef>,
    pub translation: Translation,
    /// `extra-*` elements, preserved in document order.
    pub extras: Vec<(String, String)>,
}

impl Message {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_location(mut self, location: LocationRef) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translation = translation;
        self
    }

    /// Quantity-dependent message (`numerus="yes"`), decided by the value shape.
    pub fn is_numerus(&self) -> bool {
        matches!(self.translation.value, TranslationValue::Numerus(_))
    }

    /// Disambiguation text, empty when absent.
    pub fn disambiguation(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.translation.state.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.translation.state == TranslationState::Finished
    }
}

/// Group of messages belonging to one UI class or dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// A parsed `<TS>` document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub version: Option<String>,
    /// Target locale, e.g. "it_IT".
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: Some("2.1".to_string()),
            language: Some(language.into()),
            source_language: None,
            contexts: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// First context with the given name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Every message paired with its context, in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    pub fn plural_rule(&self) -> Option<PluralRule> {
        self.language.as_deref().and_then(PluralRule::for_language)
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats::default();
        for (_, msg) in self.messages() {
            match msg.translation.state {
                TranslationState::Finished => stats.finished += 1,
                TranslationState::Unfinished => stats.unfinished += 1,
                TranslationState::Vanished | TranslationState::Obsolete => stats.obsolete += 1,
            }
        }
        stats
    }
}

/// Completeness counters for one catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub finished: usize,
    pub unfinished: usize,
    /// Vanished and obsolete messages.
    pub obsolete: usize,
}

impl CatalogStats {
    /// Messages a complete localization must translate.
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Percentage of active messages that are finished (100 when empty).
    pub fn percent_complete(&self) -> f64 {
        if self.active() == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / self.active() as f64
        }
    }
}
