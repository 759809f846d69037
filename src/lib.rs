use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use itertools::Itertools;
use theme_tokens_core::{build_token_set, Registry, TokenError};
use tracing::{error, info};

/// Outcome of building several token sets; one failure does not stop the rest.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, TokenError)>,
}
impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Every `*.json` file in `tokens_dir`, by stem, sorted.
pub fn discover_token_sets(tokens_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(tokens_dir)
        .with_context(|| format!("reading token directory {}", tokens_dir.display()))?;
    let mut sets = vec![];
    for entry in entries {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            if let Some(stem) = path.file_stem() {
                sets.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    Ok(sets.into_iter().sorted().collect())
}

pub fn build_token_sets(
    registry: &Registry,
    sets: &[String],
    tokens_dir: &Path,
    build_path: &Path,
) -> BuildReport {
    let mut report = BuildReport::default();
    for set in sets {
        info!(set = %set, "processing token set");
        match build_token_set(registry, set, tokens_dir, build_path) {
            Ok(written) => report.written.extend(written),
            Err(err) => {
                error!(set = %set, error = %err, "token set failed");
                report.failed.push((set.clone(), err));
            }
        }
    }
    report
}
