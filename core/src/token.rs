use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TokenError},
    expression::{format_number, parse_float},
};

/// Role name to value, e.g. `category -> "color"`.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub name: String,
    pub path: Vec<String>,
    pub attributes: Attributes,
    pub type_: Option<String>,
    /// The value as authored, before references or transforms.
    pub original: TokenValue,
    pub value: TokenValue,
}
impl Token {
    pub fn new(path: Vec<String>, type_: Option<&str>, value: TokenValue) -> Self {
        Self {
            name: path.join("-"),
            path,
            attributes: Attributes::new(),
            type_: type_.map(str::to_string),
            original: value.clone(),
            value,
        }
    }
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
    pub fn attribute(&self, role: &str) -> Option<&str> {
        self.attributes.get(role).map(String::as_str)
    }
    pub fn is_type(&self, type_: &str) -> bool {
        self.type_.as_deref() == Some(type_)
    }
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// A number or a string, the leaves of every token value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}
impl Scalar {
    /// Numeric reading of the scalar; text goes through `parseFloat` rules.
    pub fn to_number(&self) -> f64 {
        match self {
            Scalar::Number(n) => *n,
            Scalar::Text(s) => parse_float(s),
        }
    }
}
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => f.write_str(&format_number(*n)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}
impl From<Scalar> for TokenValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Number(n) => TokenValue::Number(n),
            Scalar::Text(s) => TokenValue::Text(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowValue {
    pub x: Scalar,
    pub y: Scalar,
    pub blur: Scalar,
    pub spread: Scalar,
    /// `#RRGGBBAA`
    pub color: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_case: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<Scalar>,
}
impl TypographyValue {
    /// Sub-fields keyed by their authored name, in a fixed order.
    pub fn fields(&self) -> [(&'static str, Option<&Scalar>); 7] {
        [
            ("fontFamily", self.font_family.as_ref()),
            ("fontWeight", self.font_weight.as_ref()),
            ("lineHeight", self.line_height.as_ref()),
            ("fontSize", self.font_size.as_ref()),
            ("letterSpacing", self.letter_spacing.as_ref()),
            ("textCase", self.text_case.as_ref()),
            ("textDecoration", self.text_decoration.as_ref()),
        ]
    }
    fn fields_mut(&mut self) -> [&mut Option<Scalar>; 7] {
        [
            &mut self.font_family,
            &mut self.font_weight,
            &mut self.line_height,
            &mut self.font_size,
            &mut self.letter_spacing,
            &mut self.text_case,
            &mut self.text_decoration,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedValue {
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionValue {
    pub cubic_bezier: NestedValue,
    pub duration: NestedValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Number(f64),
    Text(String),
    Shadow(ShadowValue),
    Typography(TypographyValue),
    Transition(TransitionValue),
}
impl TokenValue {
    /// Picks the variant from the declared type and the JSON shape.
    pub fn from_json(token: &str, type_: Option<&str>, value: serde_json::Value) -> Result<Self> {
        let unsupported = |message: String| TokenError::UnsupportedValue {
            token: token.to_string(),
            message,
        };
        let composite = |err: serde_json::Error| unsupported(err.to_string());
        match value {
            serde_json::Value::String(s) => Ok(TokenValue::Text(s)),
            serde_json::Value::Number(n) => Ok(TokenValue::Number(n.as_f64().unwrap_or(f64::NAN))),
            value @ serde_json::Value::Object(_) => match type_ {
                Some("dropShadow") | Some("boxShadow") => serde_json::from_value(value)
                    .map(TokenValue::Shadow)
                    .map_err(composite),
                Some("typography") => serde_json::from_value(value)
                    .map(TokenValue::Typography)
                    .map_err(composite),
                Some("transition") => serde_json::from_value(value)
                    .map(TokenValue::Transition)
                    .map_err(composite),
                other => Err(unsupported(format!(
                    "object value for type '{}'",
                    other.unwrap_or("<none>")
                ))),
            },
            other => Err(unsupported(format!("expected string, number or object, got {other}"))),
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            TokenValue::Number(n) => Some(Scalar::Number(*n)),
            TokenValue::Text(s) => Some(Scalar::Text(s.clone())),
            _ => None,
        }
    }

    /// Every scalar leaf, including those nested in composites.
    pub fn scalars(&self) -> Vec<&Scalar> {
        match self {
            TokenValue::Number(_) | TokenValue::Text(_) => vec![],
            TokenValue::Shadow(shadow) => vec![
                &shadow.x,
                &shadow.y,
                &shadow.blur,
                &shadow.spread,
                &shadow.color,
            ],
            TokenValue::Typography(typography) => typography
                .fields()
                .into_iter()
                .filter_map(|(_, scalar)| scalar)
                .collect(),
            TokenValue::Transition(transition) => {
                vec![&transition.cubic_bezier.value, &transition.duration.value]
            }
        }
    }

    /// Rebuilds a composite with each nested scalar replaced by `f`.
    /// Scalar values are handed back unchanged.
    pub fn try_map_composite<F>(&self, mut f: F) -> Result<TokenValue>
    where
        F: FnMut(&Scalar) -> Result<Scalar>,
    {
        Ok(match self {
            TokenValue::Number(_) | TokenValue::Text(_) => self.clone(),
            TokenValue::Shadow(shadow) => TokenValue::Shadow(ShadowValue {
                x: f(&shadow.x)?,
                y: f(&shadow.y)?,
                blur: f(&shadow.blur)?,
                spread: f(&shadow.spread)?,
                color: f(&shadow.color)?,
            }),
            TokenValue::Typography(typography) => {
                let mut mapped = typography.clone();
                for field in mapped.fields_mut() {
                    if let Some(scalar) = field.as_ref() {
                        let next = f(scalar)?;
                        *field = Some(next);
                    }
                }
                TokenValue::Typography(mapped)
            }
            TokenValue::Transition(transition) => TokenValue::Transition(TransitionValue {
                cubic_bezier: NestedValue {
                    value: f(&transition.cubic_bezier.value)?,
                },
                duration: NestedValue {
                    value: f(&transition.duration.value)?,
                },
            }),
        })
    }
}
impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => f.write_str(&format_number(*n)),
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Shadow(shadow) => write!(
                f,
                "{} {} {} {} {}",
                shadow.x, shadow.y, shadow.blur, shadow.spread, shadow.color
            ),
            TokenValue::Typography(typography) => {
                f.write_str(&serde_json::to_string(typography).map_err(|_| fmt::Error)?)
            }
            TokenValue::Transition(transition) => write!(
                f,
                "cubic-bezier({}) {}ms",
                transition.cubic_bezier.value, transition.duration.value
            ),
        }
    }
}
