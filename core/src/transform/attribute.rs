use crate::token::{Attributes, Token};

pub const CTI_ROLES: [&str; 5] = ["category", "type", "item", "subitem", "state"];
pub const EXTENDED_CTI_ROLES: [&str; 7] = [
    "category", "tier", "device", "type", "item", "subitem", "state",
];

/// Assigns `roles` from the path by position; authored attributes win.
fn positional(token: &Token, roles: &[&str]) -> Attributes {
    let mut attributes = roles
        .iter()
        .zip(&token.path)
        .map(|(role, segment)| (role.to_string(), segment.clone()))
        .collect::<Attributes>();
    attributes.extend(
        token
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    attributes
}

pub fn cti(token: &Token) -> Attributes {
    positional(token, &CTI_ROLES)
}

pub fn extended_cti(token: &Token) -> Attributes {
    positional(token, &EXTENDED_CTI_ROLES)
}
