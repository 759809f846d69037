use std::path::{Path, PathBuf};

pub mod config;
pub mod dictionary;
pub mod error;
pub mod expression;
pub mod format;
pub mod platform;
pub mod registry;
pub mod token;
pub mod transform;

pub use config::{BuildConfig, FileConfig, PlatformConfig, TokenFilter, WEB_PLATFORM};
pub use dictionary::{Dictionary, TokenOrGroup};
pub use error::{Result, TokenError};
pub use platform::{build_platform, export_platform, format_file, load_sources};
pub use registry::{Registry, Transform, TransformKind};
pub use token::{
    Attributes, NestedValue, Scalar, ShadowValue, Token, TokenValue, TransitionValue,
    TypographyValue,
};

/// Builds `<tokens_dir>/<name>.json` with the default per-set configuration.
pub fn build_token_set(
    registry: &Registry,
    name: &str,
    tokens_dir: &Path,
    build_path: &Path,
) -> Result<Vec<PathBuf>> {
    let config = BuildConfig::for_token_set(name, tokens_dir, build_path);
    build_platform(registry, &config, WEB_PLATFORM)
}
