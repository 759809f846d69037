//! Token trees and the flat dictionary built from them.
//!
//! Value transforms skip tokens whose authored value is a reference; those
//! take the already-transformed value of their target when references are
//! resolved afterwards. Composite values with referencing fields are the
//! exception: the fields are filled from the targets' authored values first
//! and the composite is transformed like any other.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{
    config::PlatformConfig,
    error::{Result, TokenError},
    expression::{parse_template, Segment},
    registry::{Transform, TransformAction, TransformKind},
    token::{Attributes, Scalar, Token, TokenValue},
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token {
        value: serde_json::Value,
        #[serde(rename = "type", default)]
        type_: Option<String>,
        #[serde(default)]
        attributes: Attributes,
    },
    Group(IndexMap<String, TokenOrGroup>),
    /// Anything else, e.g. `$themes` metadata arrays. Skipped.
    Other(serde_json::Value),
}
impl TokenOrGroup {
    pub fn from_json(origin: &str, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| TokenError::Json {
            origin: origin.to_string(),
            source,
        })
    }

    /// Deep-merges `other` into `self`; on conflicts `other` wins.
    pub fn merge(&mut self, other: TokenOrGroup) {
        match (self, other) {
            (TokenOrGroup::Group(base), TokenOrGroup::Group(overlay)) => {
                for (key, value) in overlay {
                    match base.get_mut(&key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            base.insert(key, value);
                        }
                    }
                }
            }
            (slot, other) => *slot = other,
        }
    }

    fn flatten_into(&self, path: &[String], tokens: &mut Vec<Token>) -> Result<()> {
        match self {
            TokenOrGroup::Token {
                value,
                type_,
                attributes,
            } => {
                let value = TokenValue::from_json(&path.join("."), type_.as_deref(), value.clone())?;
                tokens.push(
                    Token::new(path.to_vec(), type_.as_deref(), value)
                        .with_attributes(attributes.clone()),
                );
            }
            TokenOrGroup::Group(group) => {
                for (key, child) in group {
                    let mut child_path = path.to_vec();
                    child_path.push(key.clone());
                    child.flatten_into(&child_path, tokens)?;
                }
            }
            TokenOrGroup::Other(_) => match path.last() {
                Some(key) if key.starts_with('$') => {
                    debug!(path = %path.join("."), "skipping metadata entry")
                }
                _ => warn!(path = %path.join("."), "ignoring entry that is neither a token nor a group"),
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolution {
    Pending,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    tokens: Vec<Token>,
}
impl Dictionary {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn from_tree(tree: &TokenOrGroup) -> Result<Self> {
        let mut tokens = vec![];
        tree.flatten_into(&[], &mut tokens)?;
        Ok(Self { tokens })
    }

    pub fn from_json(origin: &str, text: &str) -> Result<Self> {
        Self::from_tree(&TokenOrGroup::from_json(origin, text)?)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Looks a token up by its dotted path, e.g. `color.base.red`.
    pub fn get(&self, path: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| token.dotted_path() == path)
    }

    pub fn filter(&self, predicate: impl Fn(&Token) -> bool) -> Dictionary {
        Dictionary::new(
            self.tokens
                .iter()
                .filter(|token| predicate(token))
                .cloned()
                .collect(),
        )
    }

    /// Runs the transform chain over every token, in chain order.
    pub fn apply_transforms(
        &mut self,
        transforms: &[(&str, &Transform)],
        platform: &PlatformConfig,
    ) -> Result<()> {
        let composites = self.authored_composites()?;
        for (i, token) in self.tokens.iter_mut().enumerate() {
            let authored = composites.get(&i);
            let mut unresolved = authored;
            let deferred = authored.is_none() && !references(&token.original).is_empty();
            for (name, transform) in transforms {
                if deferred && transform.kind() == TransformKind::Value {
                    continue;
                }
                if !transform.matches(token) {
                    continue;
                }
                trace!(transform = %name, token = %token.dotted_path(), "applying transform");
                match &transform.action {
                    TransformAction::Value(transformer) => {
                        if let Some(resolved) = unresolved.take() {
                            token.value = resolved.clone();
                        }
                        token.value = match authored {
                            Some(resolved) => transformer(&Token {
                                original: resolved.clone(),
                                ..token.clone()
                            })?,
                            None => transformer(token)?,
                        };
                    }
                    TransformAction::Attribute(transformer) => {
                        token.attributes = transformer(token)
                    }
                    TransformAction::Name(transformer) => token.name = transformer(token, platform),
                }
            }
        }
        Ok(())
    }

    /// Composite values whose fields reference other tokens, resolved against
    /// the authored values of those targets, keyed by token index.
    fn authored_composites(&self) -> Result<HashMap<usize, TokenValue>> {
        let pending = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| {
                token.original.as_scalar().is_none() && !references(&token.original).is_empty()
            })
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if pending.is_empty() {
            return Ok(HashMap::new());
        }
        let mut authored = Dictionary::new(
            self.tokens
                .iter()
                .map(|token| Token {
                    value: token.original.clone(),
                    ..token.clone()
                })
                .collect(),
        );
        authored.resolve_references()?;
        Ok(pending
            .into_iter()
            .map(|i| (i, authored.tokens[i].value.clone()))
            .collect())
    }

    /// Replaces every `{path}` reference with the target's current value.
    pub fn resolve_references(&mut self) -> Result<()> {
        let index = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (token.dotted_path(), i))
            .collect::<HashMap<_, _>>();
        let mut state = vec![Resolution::Pending; self.tokens.len()];
        for i in 0..self.tokens.len() {
            self.resolve(i, &index, &mut state, &mut vec![])?;
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        i: usize,
        index: &HashMap<String, usize>,
        state: &mut [Resolution],
        chain: &mut Vec<String>,
    ) -> Result<()> {
        match state[i] {
            Resolution::Done => return Ok(()),
            Resolution::InProgress => {
                chain.push(self.tokens[i].dotted_path());
                return Err(TokenError::CircularReference {
                    chain: chain.clone(),
                });
            }
            Resolution::Pending => {}
        }
        let targets = references(&self.tokens[i].value);
        if targets.is_empty() {
            state[i] = Resolution::Done;
            return Ok(());
        }

        state[i] = Resolution::InProgress;
        chain.push(self.tokens[i].dotted_path());
        for target in &targets {
            let j = *index
                .get(target)
                .ok_or_else(|| TokenError::UndefinedReference {
                    token: self.tokens[i].dotted_path(),
                    reference: target.clone(),
                })?;
            self.resolve(j, index, state, chain)?;
        }
        let resolved = substitute(&self.tokens[i], &self.tokens, index)?;
        self.tokens[i].value = resolved;
        chain.pop();
        state[i] = Resolution::Done;
        Ok(())
    }
}

/// Dotted paths referenced anywhere in `value`.
fn references(value: &TokenValue) -> Vec<String> {
    let texts = match value {
        TokenValue::Text(text) => vec![text.as_str()],
        TokenValue::Number(_) => vec![],
        composite => composite
            .scalars()
            .into_iter()
            .filter_map(|scalar| match scalar {
                Scalar::Text(text) => Some(text.as_str()),
                Scalar::Number(_) => None,
            })
            .collect(),
    };
    texts
        .into_iter()
        .flat_map(parse_template)
        .filter_map(|segment| segment.reference_path())
        .collect()
}

fn lookup<'a>(
    owner: &Token,
    tokens: &'a [Token],
    index: &HashMap<String, usize>,
    path: &str,
) -> Result<&'a TokenValue> {
    index
        .get(path)
        .map(|&j| &tokens[j].value)
        .ok_or_else(|| TokenError::UndefinedReference {
            token: owner.dotted_path(),
            reference: path.to_string(),
        })
}

/// A lone reference takes the target's value as is; references inside
/// longer text are rendered into it and must point at scalars.
fn interpolate(
    owner: &Token,
    text: &str,
    tokens: &[Token],
    index: &HashMap<String, usize>,
) -> Result<TokenValue> {
    let segments = parse_template(text);
    if let [segment] = segments.as_slice() {
        if let Some(path) = segment.reference_path() {
            return Ok(lookup(owner, tokens, index, &path)?.clone());
        }
    }
    let mut out = String::new();
    for segment in &segments {
        match segment {
            Segment::Literal(literal) => out.push_str(literal),
            Segment::Ref(_) => {
                let path = segment.reference_path().unwrap_or_default();
                let target = lookup(owner, tokens, index, &path)?;
                if target.as_scalar().is_none() {
                    return Err(TokenError::CompositeInterpolation {
                        token: owner.dotted_path(),
                        reference: path,
                    });
                }
                out.push_str(&target.to_string());
            }
        }
    }
    Ok(TokenValue::Text(out))
}

fn substitute(owner: &Token, tokens: &[Token], index: &HashMap<String, usize>) -> Result<TokenValue> {
    match &owner.value {
        TokenValue::Text(text) => interpolate(owner, text, tokens, index),
        TokenValue::Number(_) => Ok(owner.value.clone()),
        composite => composite.try_map_composite(|scalar| match scalar {
            Scalar::Number(_) => Ok(scalar.clone()),
            Scalar::Text(text) => {
                let resolved = interpolate(owner, text, tokens, index)?;
                resolved
                    .as_scalar()
                    .ok_or_else(|| TokenError::CompositeInterpolation {
                        token: owner.dotted_path(),
                        reference: text.clone(),
                    })
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    const TOKENS: &str = r##"{
        "color": {
            "base": {
                "red": { "value": "#ff0000", "type": "color" },
                "brand": { "value": "{color.base.red}", "type": "color" }
            }
        },
        "spacing": {
            "base": {
                "small": { "value": "8" },
                "medium": { "value": 16, "attributes": { "category": "sizing" } },
                "border": { "value": "{spacing.base.small} solid {color.base.red}" }
            }
        },
        "$themes": []
    }"##;

    #[test]
    fn flattens_in_document_order() {
        let dictionary = Dictionary::from_json("tokens.json", TOKENS).unwrap();
        let paths = dictionary
            .tokens()
            .iter()
            .map(Token::dotted_path)
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            [
                "color.base.red",
                "color.base.brand",
                "spacing.base.small",
                "spacing.base.medium",
                "spacing.base.border"
            ]
        );
        let medium = dictionary.get("spacing.base.medium").unwrap();
        assert_eq!(medium.value, TokenValue::Number(16.0));
        assert_eq!(medium.attribute("category"), Some("sizing"));
        assert_eq!(medium.name, "spacing-base-medium");
    }

    #[test]
    fn resolves_whole_and_embedded_references() {
        let mut dictionary = Dictionary::from_json("tokens.json", TOKENS).unwrap();
        dictionary.resolve_references().unwrap();
        assert_eq!(
            dictionary.get("color.base.brand").unwrap().value,
            TokenValue::Text("#ff0000".to_string())
        );
        assert_eq!(
            dictionary.get("spacing.base.border").unwrap().value,
            TokenValue::Text("8 solid #ff0000".to_string())
        );
        assert_eq!(
            dictionary.get("color.base.brand").unwrap().original,
            TokenValue::Text("{color.base.red}".to_string())
        );
    }

    #[test]
    fn references_take_transformed_targets() {
        let registry = Registry::with_builtins();
        let platform = PlatformConfig {
            transform_group: Some("web".to_string()),
            ..Default::default()
        };
        let transforms = registry.resolve_transforms(&platform).unwrap();
        let mut dictionary = Dictionary::from_json(
            "tokens.json",
            r#"{ "spacing": { "base": {
                "small": { "value": "8" },
                "alias": { "value": "{spacing.base.small}" }
            } } }"#,
        )
        .unwrap();
        dictionary.apply_transforms(&transforms, &platform).unwrap();
        dictionary.resolve_references().unwrap();
        let alias = dictionary.get("spacing.base.alias").unwrap();
        assert_eq!(alias.value, TokenValue::Text("8px".to_string()));
        assert_eq!(alias.name, "spacing-base-alias");
        assert_eq!(alias.attribute("category"), Some("spacing"));
    }

    #[test]
    fn undefined_and_circular_references_fail() {
        let mut dictionary = Dictionary::from_json(
            "tokens.json",
            r#"{ "a": { "value": "{missing}" } }"#,
        )
        .unwrap();
        assert!(matches!(
            dictionary.resolve_references(),
            Err(TokenError::UndefinedReference { token, reference }) if token == "a" && reference == "missing"
        ));

        let mut dictionary = Dictionary::from_json(
            "tokens.json",
            r#"{ "a": { "value": "{b}" }, "b": { "value": "{a}" } }"#,
        )
        .unwrap();
        match dictionary.resolve_references() {
            Err(TokenError::CircularReference { chain }) => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn composite_fields_resolve_to_scalars() {
        let mut dictionary = Dictionary::from_json(
            "tokens.json",
            r##"{
                "alpha": { "value": "#00000080" },
                "shadow": { "type": "dropShadow", "value": {
                    "x": 0, "y": 1, "blur": 2, "spread": 0, "color": "{alpha}"
                } },
                "label": { "value": "shadow: {shadow}" }
            }"##,
        )
        .unwrap();
        assert!(matches!(
            dictionary.resolve_references(),
            Err(TokenError::CompositeInterpolation { token, .. }) if token == "label"
        ));

        let mut dictionary = Dictionary::new(
            dictionary
                .into_tokens()
                .into_iter()
                .filter(|token| token.dotted_path() != "label")
                .collect(),
        );
        dictionary.resolve_references().unwrap();
        let TokenValue::Shadow(shadow) = &dictionary.get("shadow").unwrap().value else {
            panic!("expected shadow");
        };
        assert_eq!(shadow.color, Scalar::Text("#00000080".to_string()));
    }

    #[test]
    fn later_sources_override_earlier_ones() {
        let mut tree = TokenOrGroup::from_json(
            "base.json",
            r##"{ "color": { "a": { "value": "#000" }, "b": { "value": "#111" } } }"##,
        )
        .unwrap();
        tree.merge(
            TokenOrGroup::from_json(
                "theme.json",
                r##"{ "color": { "b": { "value": "#222" }, "c": { "value": "#333" } } }"##,
            )
            .unwrap(),
        );
        let dictionary = Dictionary::from_tree(&tree).unwrap();
        let values = dictionary
            .tokens()
            .iter()
            .map(|token| token.value.to_string())
            .collect::<Vec<_>>();
        assert_eq!(values, ["#000", "#222", "#333"]);
    }

    #[test]
    fn bad_json_names_its_origin() {
        let err = Dictionary::from_json("broken.json", "{ nope").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
