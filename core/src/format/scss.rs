use convert_case::{Case, Casing};
use itertools::Itertools;

use crate::{
    config::FileConfig,
    dictionary::Dictionary,
    error::{Result, TokenError},
    token::{Token, TokenValue},
};

fn css_property(key: &str) -> String {
    match key {
        "textCase" => "text-transform".to_string(),
        _ => key.to_case(Case::Kebab),
    }
}

fn mixin(token: &Token, body: &[String]) -> String {
    let body = body.iter().map(|line| format!("  {line}\n")).join("");
    format!("@mixin {} {{\n{body}}}\n", token.name)
}

/// A mixin per token declaring the typography fields it carries.
///
/// Declarations follow the fixed field table (family, weight, line height,
/// size, letter spacing, case, decoration), not the authored key order.
pub fn fonts_mixin(dictionary: &Dictionary, _file: &FileConfig) -> Result<String> {
    Ok(dictionary
        .tokens()
        .iter()
        .map(|token| {
            let declarations: Vec<String> = match &token.value {
                TokenValue::Typography(typography) => typography
                    .fields()
                    .into_iter()
                    .filter_map(|(key, value)| {
                        value.map(|value| format!("{}: {value};", css_property(key)))
                    })
                    .collect(),
                _ => vec![],
            };
            mixin(token, &declarations)
        })
        .join("\n"))
}

/// Debug variant of [`fonts_mixin`] that dumps each value as JSON.
pub fn fonts_mixin_json(dictionary: &Dictionary, _file: &FileConfig) -> Result<String> {
    Ok(dictionary
        .tokens()
        .iter()
        .map(|token| -> Result<String> {
            let json = serde_json::to_string(&token.value).map_err(|source| TokenError::Json {
                origin: token.name.clone(),
                source,
            })?;
            Ok(mixin(token, &[format!("/* {json} */")]))
        })
        .collect::<Result<Vec<_>>>()?
        .join("\n"))
}
