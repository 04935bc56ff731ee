//! Issue types for catalogue checks.
//!
//! Each issue is self-contained with everything the reporter needs to show
//! it: location, the offending message and rule-specific details.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, MessageLocation};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    EmptyTranslation,
    Unfinished,
    NumerusMismatch,
    DuplicateContext,
    DuplicateMessage,
    Identical,
    PlaceholderMismatch,
    UnknownLanguage,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::EmptyTranslation => write!(f, "empty-translation"),
            Rule::Unfinished => write!(f, "unfinished"),
            Rule::NumerusMismatch => write!(f, "numerus-mismatch"),
            Rule::DuplicateContext => write!(f, "duplicate-context"),
            Rule::DuplicateMessage => write!(f, "duplicate-message"),
            Rule::Identical => write!(f, "identical"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
            Rule::UnknownLanguage => write!(f, "unknown-language"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Messages (MessageContext)
// ============================================================

/// Finished message whose translation (or one of its forms) is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyTranslationIssue {
    pub context: MessageContext,
    /// Indices of empty numerus forms; empty for single translations.
    pub empty_forms: Vec<usize>,
}

impl EmptyTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EmptyTranslation
    }
}

/// Active message still flagged unfinished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfinishedIssue {
    pub context: MessageContext,
}

impl UnfinishedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unfinished
    }
}

/// Numerus translation with the wrong number of forms for its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumerusMismatchIssue {
    pub context: MessageContext,
    pub language: String,
    pub expected: usize,
    pub found: usize,
}

impl NumerusMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::NumerusMismatch
    }
}

/// Same (source, disambiguation) defined twice in one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMessageIssue {
    pub context: MessageContext,
    pub disambiguation: Option<String>,
    /// Line of the first definition.
    pub first_line: usize,
}

impl DuplicateMessageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateMessage
    }
}

/// Finished translation identical to its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdenticalIssue {
    pub context: MessageContext,
}

impl IdenticalIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Identical
    }
}

/// `%1`..`%99` markers differ between source and translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    pub context: MessageContext,
    /// Markers in the source that the translation lacks.
    pub missing: Vec<String>,
    /// Markers in the translation that the source lacks.
    pub extra: Vec<String>,
    /// Numerus form index, `None` for single translations.
    pub form: Option<usize>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

// ============================================================
// Issue Types - Contexts and Files
// ============================================================

/// Context name defined twice in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateContextIssue {
    pub location: MessageLocation,
    pub name: String,
    /// Line of the first definition.
    pub first_line: usize,
}

impl DuplicateContextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateContext
    }
}

/// Catalogue with numerus messages but no usable `language` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguageIssue {
    pub file_path: String,
    /// The `language` attribute, if present.
    pub language: Option<String>,
    /// Locale guessed from the file name.
    pub file_locale: Option<String>,
}

impl UnknownLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownLanguage
    }
}

/// File could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub line: Option<usize>,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A catalogue issue found during checking.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    EmptyTranslation(EmptyTranslationIssue),
    Unfinished(UnfinishedIssue),
    NumerusMismatch(NumerusMismatchIssue),
    DuplicateContext(DuplicateContextIssue),
    DuplicateMessage(DuplicateMessageIssue),
    Identical(IdenticalIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    UnknownLanguage(UnknownLanguageIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A message, shown with its context and translation.
    Message(&'a MessageContext),
    /// A line in a catalogue without message details.
    Line(&'a MessageLocation),
    /// File-level, optionally with the line an error points at.
    File { path: &'a str, line: Option<usize> },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Message(ctx) => ctx.file_path(),
            ReportLocation::Line(loc) => &loc.file_path,
            ReportLocation::File { path, .. } => path,
        }
    }

    /// 1-based line, 0 for whole-file issues.
    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Message(ctx) => ctx.line(),
            ReportLocation::Line(loc) => loc.line,
            ReportLocation::File { line, .. } => line.unwrap_or(0),
        }
    }

    /// 1-based column, 0 for whole-file issues.
    pub fn col(&self) -> usize {
        match self {
            ReportLocation::Message(ctx) => ctx.col(),
            ReportLocation::Line(loc) => loc.col,
            ReportLocation::File { line, .. } => usize::from(line.is_some()),
        }
    }
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards it through
/// the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (source text, context name, error, ...).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for EmptyTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.empty_forms.is_empty() {
            Some("translation is marked finished but empty".to_string())
        } else {
            let forms: Vec<String> = self.empty_forms.iter().map(|i| i.to_string()).collect();
            Some(format!("empty numerus form(s): {}", forms.join(", ")))
        }
    }

    fn hint(&self) -> Option<String> {
        Some("translate it or mark it type=\"unfinished\"".to_string())
    }
}

impl Report for UnfinishedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.context.translation.is_empty() {
            None
        } else {
            Some(format!("(\"{}\")", self.context.translation))
        }
    }
}

impl Report for NumerusMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} needs {} numerus form(s), found {}",
            self.language, self.expected, self.found
        ))
    }
}

impl Report for DuplicateMessageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(match &self.disambiguation {
            Some(comment) => format!(
                "comment \"{}\" first defined at line {}",
                comment, self.first_line
            ),
            None => format!("first defined at line {}", self.first_line),
        })
    }
}

impl Report for IdenticalIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("add the text to \"ignoreTexts\" if it needs no translation".to_string())
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.source.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {}", self.missing.join(", ")));
        }
        if !self.extra.is_empty() {
            parts.push(format!("unexpected {}", self.extra.join(", ")));
        }
        let detail = parts.join("; ");
        Some(match self.form {
            Some(form) => format!("{} in numerus form {}", detail, form),
            None => detail,
        })
    }
}

impl Report for DuplicateContextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Line(&self.location)
    }

    fn message(&self) -> String {
        self.name.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("first defined at line {}", self.first_line))
    }
}

impl Report for UnknownLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            line: None,
        }
    }

    fn message(&self) -> String {
        match &self.language {
            Some(language) => format!("unsupported language '{}'", language),
            None => "missing language attribute".to_string(),
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("numerus forms cannot be checked".to_string())
    }

    fn hint(&self) -> Option<String> {
        self.file_locale
            .as_ref()
            .map(|locale| format!("the file name suggests language=\"{}\"", locale))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
            line: self.line,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| a.col().cmp(&b.col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
