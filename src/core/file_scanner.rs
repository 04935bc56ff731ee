use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning for catalogue files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Catalogue paths, sorted.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Find every `.ts` file under `base_dir`, minus the ignored ones.
///
/// Ignore entries with wildcards are glob patterns matched against the full
/// path; other entries are paths relative to `base_dir` and skip everything
/// beneath them.
pub fn scan_files(base_dir: &Path, ignore_patterns: &[String]) -> ScanResult {
    let mut result = ScanResult::default();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    if !base_dir.is_dir() {
        tracing::warn!("Translations root does not exist: {}", base_dir.display());
        return result;
    }

    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            tracing::debug!("Ignoring {}", path_str);
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            tracing::debug!("Ignoring {}", path_str);
            continue;
        }

        if entry.file_type().is_file() && is_catalog_file(path) {
            result.files.push(path_str.into_owned());
        }
    }

    result.files.sort();
    result
}

fn is_catalog_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("ts"))
}
