use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    config::{BuildConfig, FileConfig},
    dictionary::{Dictionary, TokenOrGroup},
    error::{Result, TokenError},
    registry::Registry,
};

/// Reads and deep-merges the source files in order.
pub fn load_sources(sources: &[PathBuf]) -> Result<Dictionary> {
    let mut tree: Option<TokenOrGroup> = None;
    for path in sources {
        debug!(path = %path.display(), "reading token source");
        let text = fs::read_to_string(path).map_err(|source| TokenError::Read {
            path: path.clone(),
            source,
        })?;
        let node = TokenOrGroup::from_json(&path.display().to_string(), &text)?;
        tree = Some(match tree.take() {
            Some(mut base) => {
                base.merge(node);
                base
            }
            None => node,
        });
    }
    match tree {
        Some(tree) => Dictionary::from_tree(&tree),
        None => Ok(Dictionary::default()),
    }
}

/// The platform's dictionary after transforms and reference resolution.
pub fn export_platform(registry: &Registry, config: &BuildConfig, platform: &str) -> Result<Dictionary> {
    let platform_config = config.platform(platform)?;
    let transforms = registry.resolve_transforms(platform_config)?;
    let mut dictionary = load_sources(&config.source)?;
    dictionary.apply_transforms(&transforms, platform_config)?;
    dictionary.resolve_references()?;
    Ok(dictionary)
}

/// Formats one file from the tokens its filter selects.
pub fn format_file(registry: &Registry, dictionary: &Dictionary, file: &FileConfig) -> Result<String> {
    let formatter = registry.format(&file.format)?;
    match &file.filter {
        Some(filter) => formatter(&dictionary.filter(|token| filter.matches(token)), file),
        None => formatter(dictionary, file),
    }
}

/// Builds every file of `platform` and returns the written paths.
///
/// All files are formatted before any is written, so a failing token leaves
/// no partial output for the platform.
pub fn build_platform(registry: &Registry, config: &BuildConfig, platform: &str) -> Result<Vec<PathBuf>> {
    info!(platform = %platform, "building platform");
    let platform_config = config.platform(platform)?;
    let dictionary = export_platform(registry, config, platform)?;

    let outputs = platform_config
        .files
        .iter()
        .map(|file| -> Result<(PathBuf, String)> {
            let output = format_file(registry, &dictionary, file)?;
            Ok((platform_config.build_path.join(&file.destination), output))
        })
        .collect::<Result<Vec<_>>>()?;

    create_dir(&platform_config.build_path)?;
    let mut written = vec![];
    for (path, output) in outputs {
        fs::write(&path, output).map_err(|source| TokenError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote file");
        written.push(path);
    }
    info!(platform = %platform, files = written.len(), "platform built");
    Ok(written)
}

fn create_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| TokenError::Write {
        path: path.to_path_buf(),
        source,
    })
}
