use crate::{core::CatalogStats, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Stats(StatsSummary),
    Lookup(LookupSummary),
    Fmt(FmtSummary),
    Init(InitSummary),
}

/// Completeness of one catalogue.
#[derive(Debug)]
pub struct StatsRow {
    pub file_path: String,
    pub language: Option<String>,
    pub stats: CatalogStats,
}

#[derive(Debug)]
pub struct StatsSummary {
    pub rows: Vec<StatsRow>,
}

impl StatsSummary {
    pub fn total(&self) -> CatalogStats {
        self.rows
            .iter()
            .fold(CatalogStats::default(), |mut total, row| {
                total.finished += row.stats.finished;
                total.unfinished += row.stats.unfinished;
                total.obsolete += row.stats.obsolete;
                total
            })
    }
}

#[derive(Debug)]
pub struct LookupSummary {
    /// Text the application would display.
    pub text: String,
    /// False when the source text was used as fallback.
    pub translated: bool,
}

#[derive(Debug)]
pub struct FmtSummary {
    /// Files whose content differs from the canonical layout.
    pub changed_files: Vec<String>,
    pub unchanged_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running tsglot commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found while checking or loading catalogues.
    pub issues: Vec<Issue>,
    /// Number of catalogue files that failed to parse.
    pub parse_error_count: usize,
    /// Number of catalogue files that were scanned.
    pub files_checked: usize,
}
