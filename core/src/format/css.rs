use itertools::Itertools;

use crate::{config::FileConfig, dictionary::Dictionary, error::Result};

/// One custom property per token, in dictionary order, inside the selector.
pub fn variables(dictionary: &Dictionary, file: &FileConfig) -> Result<String> {
    let body = dictionary
        .tokens()
        .iter()
        .map(|token| format!("  --{}: {};\n", token.name, token.value))
        .join("");
    Ok(format!("{} {{\n{body}}}\n", super::selector(file)))
}
