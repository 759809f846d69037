use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TokenError},
    token::{Attributes, Token},
};

/// Platform name used by [`BuildConfig::for_token_set`].
pub const WEB_PLATFORM: &str = "web";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Token files, merged in order; later files override earlier ones.
    #[serde(default)]
    pub source: Vec<PathBuf>,
    #[serde(default)]
    pub platforms: IndexMap<String, PlatformConfig>,
}
impl BuildConfig {
    pub fn from_json(origin: &str, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| TokenError::Json {
            origin: origin.to_string(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TokenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }

    /// The configuration every token set gets by default: a `web` platform
    /// writing `<name>.css`, `<name>.scss` and `<name>.transition.css`.
    pub fn for_token_set(name: &str, tokens_dir: &Path, build_path: &Path) -> Self {
        let selector = Some(format!(".{name}"));
        let platform = PlatformConfig {
            transform_group: Some("web".to_string()),
            transforms: vec![],
            build_path: build_path.to_path_buf(),
            prefix: None,
            files: vec![
                FileConfig {
                    selector: selector.clone(),
                    filter: Some(TokenFilter {
                        exclude_types: vec!["typography".to_string()],
                        ..Default::default()
                    }),
                    ..FileConfig::new(format!("{name}.css"), "css/variables")
                },
                FileConfig {
                    filter: Some(TokenFilter {
                        types: vec!["typography".to_string()],
                        ..Default::default()
                    }),
                    ..FileConfig::new(format!("{name}.scss"), "scss/fontsMixin")
                },
                FileConfig {
                    selector,
                    ..FileConfig::new(format!("{name}.transition.css"), "css/transition")
                },
            ],
        };
        let mut platforms = IndexMap::new();
        platforms.insert(WEB_PLATFORM.to_string(), platform);
        Self {
            source: vec![tokens_dir.join(format!("{name}.json"))],
            platforms,
        }
    }

    pub fn platform(&self, name: &str) -> Result<&PlatformConfig> {
        self.platforms
            .get(name)
            .ok_or_else(|| TokenError::UnknownPlatform(name.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    #[serde(default)]
    pub transform_group: Option<String>,
    /// Applied after the group's transforms, in order.
    #[serde(default)]
    pub transforms: Vec<String>,
    #[serde(default)]
    pub build_path: PathBuf,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub destination: String,
    pub format: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub filter: Option<TokenFilter>,
}
impl FileConfig {
    pub fn new(destination: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            format: format.into(),
            selector: None,
            filter: None,
        }
    }
}

/// Selects the tokens written to one file. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenFilter {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub exclude_types: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
}
impl TokenFilter {
    pub fn matches(&self, token: &Token) -> bool {
        let type_ = token.type_.as_deref().unwrap_or_default();
        (self.types.is_empty() || self.types.iter().any(|x| x == type_))
            && !self.exclude_types.iter().any(|x| x == type_)
            && self
                .attributes
                .iter()
                .all(|(role, value)| token.attribute(role) == Some(value.as_str()))
    }
}
