use std::fs;

use anyhow::{Context, Result};

use super::super::args::FmtCommand;
use super::{CommandResult, CommandSummary, FmtSummary, helper::finish};
use crate::{
    core::{CheckContext, LoadedCatalog, writer::write_ts},
    issues::Issue,
};

pub fn fmt(cmd: FmtCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let mut changed_files = Vec::new();
    let mut unchanged_count = 0;

    for catalog in &ctx.catalogs {
        if format_catalog(catalog, cmd.apply)? {
            changed_files.push(catalog.file_path.clone());
        } else {
            unchanged_count += 1;
        }
    }

    let issues = ctx
        .parse_errors()
        .iter()
        .cloned()
        .map(Issue::ParseError)
        .collect();

    Ok(finish(
        CommandSummary::Fmt(FmtSummary {
            changed_files,
            unchanged_count,
            is_apply: cmd.apply,
        }),
        issues,
        ctx.files.len(),
        true,
    ))
}

/// Compare a catalogue file with its canonical form, rewriting it when
/// `apply` is set. Returns whether the file differs.
fn format_catalog(catalog: &LoadedCatalog, apply: bool) -> Result<bool> {
    let current = fs::read_to_string(&catalog.file_path)
        .with_context(|| format!("Failed to read file: {}", catalog.file_path))?;
    let formatted = write_ts(catalog.catalog())
        .with_context(|| format!("Failed to format file: {}", catalog.file_path))?;

    if current == formatted {
        return Ok(false);
    }

    if apply {
        fs::write(&catalog.file_path, &formatted)
            .with_context(|| format!("Failed to write file: {}", catalog.file_path))?;
        tracing::debug!("Rewrote {}", catalog.file_path);
    }
    Ok(true)
}
