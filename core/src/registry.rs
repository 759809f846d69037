use indexmap::IndexMap;

use crate::{
    config::{FileConfig, PlatformConfig},
    dictionary::Dictionary,
    error::{Result, TokenError},
    format,
    token::{Attributes, Token, TokenValue},
    transform,
};

pub type Matcher = Box<dyn Fn(&Token) -> bool>;
pub type ValueTransformer = Box<dyn Fn(&Token) -> Result<TokenValue>>;
pub type AttributeTransformer = Box<dyn Fn(&Token) -> Attributes>;
pub type NameTransformer = Box<dyn Fn(&Token, &PlatformConfig) -> String>;
pub type Formatter = Box<dyn Fn(&Dictionary, &FileConfig) -> Result<String>>;

/// Transforms every built-in platform chains by default.
pub const WEB_TRANSFORM_GROUP: &[&str] = &[
    "attribute/extendedCti",
    "name/cti/kebab",
    "sizes/px",
    "color/css",
    "sizes/fonts",
    "shadows/dropShadowCss",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Value,
    Attribute,
    Name,
}

pub enum TransformAction {
    Value(ValueTransformer),
    Attribute(AttributeTransformer),
    Name(NameTransformer),
}

pub struct Transform {
    matcher: Matcher,
    pub action: TransformAction,
}
impl Transform {
    pub fn value(
        matcher: impl Fn(&Token) -> bool + 'static,
        transformer: impl Fn(&Token) -> Result<TokenValue> + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            action: TransformAction::Value(Box::new(transformer)),
        }
    }
    pub fn attribute(
        matcher: impl Fn(&Token) -> bool + 'static,
        transformer: impl Fn(&Token) -> Attributes + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            action: TransformAction::Attribute(Box::new(transformer)),
        }
    }
    pub fn name(
        matcher: impl Fn(&Token) -> bool + 'static,
        transformer: impl Fn(&Token, &PlatformConfig) -> String + 'static,
    ) -> Self {
        Self {
            matcher: Box::new(matcher),
            action: TransformAction::Name(Box::new(transformer)),
        }
    }
    pub fn kind(&self) -> TransformKind {
        match self.action {
            TransformAction::Value(_) => TransformKind::Value,
            TransformAction::Attribute(_) => TransformKind::Attribute,
            TransformAction::Name(_) => TransformKind::Name,
        }
    }
    pub fn matches(&self, token: &Token) -> bool {
        (self.matcher)(token)
    }
}

#[derive(Default)]
pub struct Registry {
    transforms: IndexMap<String, Transform>,
    transform_groups: IndexMap<String, Vec<String>>,
    formats: IndexMap<String, Formatter>,
}
impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every transform, format and group this crate ships.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        transform::register_builtins(&mut registry);
        format::register_builtins(&mut registry);
        registry.register_transform_group("web", WEB_TRANSFORM_GROUP);
        registry
    }

    /// Registers `transform` under `name`, replacing any previous entry.
    pub fn register_transform(&mut self, name: impl Into<String>, transform: Transform) -> &mut Self {
        self.transforms.insert(name.into(), transform);
        self
    }

    pub fn register_transform_group(&mut self, name: impl Into<String>, transforms: &[&str]) -> &mut Self {
        self.transform_groups.insert(
            name.into(),
            transforms.iter().map(|x| x.to_string()).collect(),
        );
        self
    }

    pub fn register_format(
        &mut self,
        name: impl Into<String>,
        formatter: impl Fn(&Dictionary, &FileConfig) -> Result<String> + 'static,
    ) -> &mut Self {
        self.formats.insert(name.into(), Box::new(formatter));
        self
    }

    pub fn transform(&self, name: &str) -> Result<&Transform> {
        self.transforms
            .get(name)
            .ok_or_else(|| TokenError::UnknownTransform(name.to_string()))
    }

    pub fn transform_group(&self, name: &str) -> Result<&[String]> {
        self.transform_groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TokenError::UnknownTransformGroup(name.to_string()))
    }

    pub fn format(&self, name: &str) -> Result<&Formatter> {
        self.formats
            .get(name)
            .ok_or_else(|| TokenError::UnknownFormat(name.to_string()))
    }

    /// The platform's transform chain: its group first, then its own list.
    pub fn resolve_transforms<'a>(
        &'a self,
        platform: &'a PlatformConfig,
    ) -> Result<Vec<(&'a str, &'a Transform)>> {
        let group: &[String] = match &platform.transform_group {
            Some(group) => self.transform_group(group)?,
            None => &[],
        };
        group
            .iter()
            .chain(platform.transforms.iter())
            .map(|name| {
                self.transform(name)
                    .map(|transform| (name.as_str(), transform))
            })
            .collect()
    }

    pub fn transform_names(&self) -> impl Iterator<Item = &str> {
        self.transforms.keys().map(String::as_str)
    }

    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered_by_name() {
        let registry = Registry::with_builtins();
        for name in [
            "attribute/cti",
            "attribute/extendedCti",
            "name/cti/kebab",
            "sizes/px",
            "sizes/pxToRem",
            "sizes/rem",
            "sizes/fonts",
            "color/css",
            "shadows/dropShadowCss",
            "motion/css",
        ] {
            assert!(registry.transform(name).is_ok(), "{name}");
        }
        for name in [
            "css/variables",
            "css/transition",
            "scss/fontsMixin",
            "scss/fontsMixinJson",
        ] {
            assert!(registry.format(name).is_ok(), "{name}");
        }
        assert_eq!(
            registry.transform("attribute/extendedCti").unwrap().kind(),
            TransformKind::Attribute
        );
        assert_eq!(
            registry.transform("name/cti/kebab").unwrap().kind(),
            TransformKind::Name
        );
    }

    #[test]
    fn fresh_registries_do_not_share_entries() {
        let mut first = Registry::new();
        first.register_format("custom", |_, _| Ok(String::new()));
        let second = Registry::new();
        assert!(first.format("custom").is_ok());
        assert!(matches!(
            second.format("custom"),
            Err(TokenError::UnknownFormat(name)) if name == "custom"
        ));
    }

    #[test]
    fn chain_puts_group_before_explicit_transforms() {
        let registry = Registry::with_builtins();
        let platform = PlatformConfig {
            transform_group: Some("web".to_string()),
            transforms: vec!["sizes/pxToRem".to_string()],
            ..Default::default()
        };
        let names = registry
            .resolve_transforms(&platform)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names.first(), Some(&"attribute/extendedCti"));
        assert_eq!(names.last(), Some(&"sizes/pxToRem"));
        assert_eq!(names.len(), WEB_TRANSFORM_GROUP.len() + 1);
    }

    #[test]
    fn unknown_names_are_errors() {
        let registry = Registry::with_builtins();
        let platform = PlatformConfig {
            transforms: vec!["sizes/nope".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            registry.resolve_transforms(&platform),
            Err(TokenError::UnknownTransform(name)) if name == "sizes/nope"
        ));
        assert!(matches!(
            registry.transform_group("android"),
            Err(TokenError::UnknownTransformGroup(_))
        ));
    }
}
