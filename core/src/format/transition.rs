use itertools::Itertools;
use tracing::warn;

use crate::{config::FileConfig, dictionary::Dictionary, error::Result, token::Token};

const NAME_ROLES: [&str; 6] = ["category", "tier", "device", "type", "item", "subitem"];

/// Declared `transition`, or classified under the `transition` type role.
fn is_transition(token: &Token) -> bool {
    token.is_type("transition") || token.attribute("type") == Some("transition")
}

fn custom_property_name(token: &Token) -> String {
    NAME_ROLES
        .iter()
        .filter_map(|role| token.attribute(role))
        .join("-")
}

pub fn transition(dictionary: &Dictionary, file: &FileConfig) -> Result<String> {
    let transitions = dictionary
        .tokens()
        .iter()
        .filter(|token| is_transition(token))
        .collect::<Vec<_>>();
    let sibling = |item: &str, state: &str| {
        transitions
            .iter()
            .find(|token| token.attribute("item") == Some(item) && token.attribute("state") == Some(state))
    };

    let body = transitions
        .iter()
        .filter_map(|token| token.attribute("item").map(|item| (item, *token)))
        .unique_by(|(item, _)| *item)
        .filter_map(|(item, first)| match (sibling(item, "function"), sibling(item, "duration")) {
            (Some(function), Some(duration)) => Some(format!(
                "  --{}: cubic-bezier({}) {}ms;\n",
                custom_property_name(first),
                function.value,
                duration.value
            )),
            _ => {
                warn!(item = %item, "transition is missing its function or duration token");
                None
            }
        })
        .join("");
    Ok(format!("{} {{\n{body}}}\n", super::selector(file)))
}
