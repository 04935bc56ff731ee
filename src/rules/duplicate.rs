//! Duplicate context and message detection.
//!
//! Lookups use the first match, so a second context with the same name or a
//! second message with the same source and disambiguation is never served.

use std::collections::HashMap;

use crate::{
    core::{CheckContext, LoadedCatalog},
    issues::{DuplicateContextIssue, DuplicateMessageIssue},
};

pub fn check_duplicate_context_issues(ctx: &CheckContext) -> Vec<DuplicateContextIssue> {
    ctx.catalogs
        .iter()
        .flat_map(check_duplicate_contexts)
        .collect()
}

pub fn check_duplicate_message_issues(ctx: &CheckContext) -> Vec<DuplicateMessageIssue> {
    ctx.catalogs
        .iter()
        .flat_map(|catalog| check_duplicate_messages(catalog, ctx.config.check_obsolete))
        .collect()
}

/// Context names defined more than once in a catalogue.
pub fn check_duplicate_contexts(catalog: &LoadedCatalog) -> Vec<DuplicateContextIssue> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut issues = Vec::new();

    for (index, context) in catalog.catalog().contexts.iter().enumerate() {
        match first_seen.get(context.name.as_str()) {
            Some(&first) => issues.push(DuplicateContextIssue {
                location: catalog.context_location(index),
                name: context.name.clone(),
                first_line: catalog.parsed.spans.context_line(first),
            }),
            None => {
                first_seen.insert(&context.name, index);
            }
        }
    }

    issues
}

/// Messages sharing source and disambiguation within one context.
pub fn check_duplicate_messages(
    catalog: &LoadedCatalog,
    include_obsolete: bool,
) -> Vec<DuplicateMessageIssue> {
    let mut first_seen: HashMap<(usize, &str, &str), usize> = HashMap::new();
    let mut issues = Vec::new();

    for m in catalog.messages(include_obsolete) {
        let key = (m.context_index, m.message.source.as_str(), m.message.disambiguation());
        match first_seen.get(&key) {
            Some(&first) => issues.push(DuplicateMessageIssue {
                context: m.report_context(),
                disambiguation: m.message.comment.clone().filter(|c| !c.is_empty()),
                first_line: catalog.parsed.spans.message_line(m.context_index, first),
            }),
            None => {
                first_seen.insert(key, m.message_index);
            }
        }
    }

    issues
}
