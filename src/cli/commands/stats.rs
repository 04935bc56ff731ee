use anyhow::Result;

use super::super::args::StatsCommand;
use super::{CommandResult, CommandSummary, StatsRow, StatsSummary, helper::finish};
use crate::{
    core::{CheckContext, LoadedCatalog},
    issues::Issue,
};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;

    let summary = StatsSummary {
        rows: ctx.catalogs.iter().map(stats_row).collect(),
    };
    let issues = ctx
        .parse_errors()
        .iter()
        .cloned()
        .map(Issue::ParseError)
        .collect();

    Ok(finish(
        CommandSummary::Stats(summary),
        issues,
        ctx.files.len(),
        true,
    ))
}

fn stats_row(catalog: &LoadedCatalog) -> StatsRow {
    StatsRow {
        file_path: catalog.file_path.clone(),
        language: catalog
            .catalog()
            .language
            .clone()
            .or_else(|| catalog.file_locale.clone()),
        stats: catalog.catalog().stats(),
    }
}
