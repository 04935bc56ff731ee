use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        data::{Catalog, Context, Message, MessageContext, MessageLocation},
        file_scanner::scan_files,
        parsers::ts::{ParsedCatalog, extract_locale, parse_ts_str},
        plural::PluralRule,
    },
    issues::ParseErrorIssue,
};

/// A catalogue file that parsed successfully.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub file_path: String,
    pub parsed: ParsedCatalog,
    /// Locale guessed from the file name (e.g. "it" for `drawpile_it.ts`).
    pub file_locale: Option<String>,
}

impl LoadedCatalog {
    pub fn new(file_path: impl Into<String>, parsed: ParsedCatalog) -> Self {
        let file_path = file_path.into();
        let file_locale = extract_locale(&file_path);
        Self {
            file_path,
            parsed,
            file_locale,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.parsed.catalog
    }

    /// Plural rule from the `language` attribute, or from the file name when
    /// the attribute is missing.
    pub fn plural_rule(&self) -> Option<PluralRule> {
        match self.catalog().language.as_deref() {
            Some(language) => PluralRule::for_language(language),
            None => self.file_locale.as_deref().and_then(PluralRule::for_language),
        }
    }

    pub fn context_location(&self, context: usize) -> MessageLocation {
        MessageLocation::with_line(&self.file_path, self.parsed.spans.context_line(context))
    }

    pub fn message_location(&self, context: usize, message: usize) -> MessageLocation {
        MessageLocation::with_line(
            &self.file_path,
            self.parsed.spans.message_line(context, message),
        )
    }

    /// Every message with its indices, skipping inactive ones unless asked.
    pub fn messages(&self, include_obsolete: bool) -> impl Iterator<Item = MessageRef<'_>> {
        self.catalog()
            .contexts
            .iter()
            .enumerate()
            .flat_map(move |(context_index, context)| {
                context
                    .messages
                    .iter()
                    .enumerate()
                    .filter(move |(_, message)| include_obsolete || message.is_active())
                    .map(move |(message_index, message)| MessageRef {
                        catalog: self,
                        context_index,
                        message_index,
                        context,
                        message,
                    })
            })
    }
}

/// A message as seen by the rules, with its indices in the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct MessageRef<'a> {
    pub catalog: &'a LoadedCatalog,
    pub context_index: usize,
    pub message_index: usize,
    pub context: &'a Context,
    pub message: &'a Message,
}

impl MessageRef<'_> {
    pub fn report_context(&self) -> MessageContext {
        MessageContext::new(
            self.catalog
                .message_location(self.context_index, self.message_index),
            &self.context.name,
            &self.message.source,
            self.message.translation.display(),
        )
    }
}

/// Everything a command needs: merged configuration plus parsed catalogues.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--translations-root`)
/// 2. `.tsglotrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Directory scanned for `.ts` files.
    pub translations_dir: PathBuf,

    /// All catalogue files found, sorted.
    pub files: Vec<String>,

    /// Catalogues that parsed, in file order.
    pub catalogs: Vec<LoadedCatalog>,

    /// Sources allowed to stay identical (from config `ignoreTexts`).
    pub ignore_texts: HashSet<String>,

    parse_errors: Vec<ParseErrorIssue>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if config_result.path.is_none() {
            tracing::debug!("No config file found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref translations_root) = common_args.translations_root {
            config.translations_root = translations_root.to_string_lossy().to_string();
        }

        Ok(Self::from_config(root_dir, config))
    }

    /// Scan and parse catalogues for an already merged configuration.
    pub fn from_config(root_dir: PathBuf, config: Config) -> Self {
        let translations_dir = resolve_dir(&root_dir, &config.translations_root);
        let scan_result = scan_files(&translations_dir, &config.ignores);

        if scan_result.skipped_count > 0 {
            tracing::warn!(
                "{} path(s) skipped due to access errors",
                scan_result.skipped_count
            );
        }
        tracing::debug!(
            "Found {} catalogue file(s) in {}",
            scan_result.files.len(),
            translations_dir.display()
        );

        let results: Vec<(String, Result<ParsedCatalog, ParseErrorIssue>)> = scan_result
            .files
            .par_iter()
            .map(|file_path| (file_path.clone(), load_catalog(file_path)))
            .collect();

        let mut catalogs = Vec::new();
        let mut parse_errors = Vec::new();
        for (file_path, result) in results {
            match result {
                Ok(parsed) => catalogs.push(LoadedCatalog::new(file_path, parsed)),
                Err(issue) => {
                    tracing::debug!("{} - {}", file_path, issue.error);
                    parse_errors.push(issue);
                }
            }
        }

        let ignore_texts = config.ignore_texts.iter().cloned().collect();

        Self {
            config,
            root_dir,
            translations_dir,
            files: scan_result.files,
            catalogs,
            ignore_texts,
            parse_errors,
        }
    }

    /// Files that could not be read or parsed.
    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        &self.parse_errors
    }

    /// Messages the rules should look at, in file and document order.
    ///
    /// Vanished and obsolete messages are included only with `checkObsolete`.
    pub fn messages(&self) -> impl Iterator<Item = MessageRef<'_>> {
        let include_obsolete = self.config.check_obsolete;
        self.catalogs
            .iter()
            .flat_map(move |catalog| catalog.messages(include_obsolete))
    }
}

fn load_catalog(file_path: &str) -> Result<ParsedCatalog, ParseErrorIssue> {
    let content = fs::read_to_string(file_path).map_err(|e| ParseErrorIssue {
        file_path: file_path.to_string(),
        line: None,
        error: format!("Failed to read file: {}", e),
    })?;
    parse_ts_str(&content).map_err(|e| ParseErrorIssue {
        file_path: file_path.to_string(),
        line: e.line(),
        error: e.to_string(),
    })
}

/// Resolve a configured directory against the project root.
fn resolve_dir(root_dir: &Path, dir: &str) -> PathBuf {
    let p = Path::new(dir);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
