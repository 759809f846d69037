use convert_case::{Case, Casing};
use itertools::Itertools;

use crate::{config::PlatformConfig, token::Token};

/// Makes a path segment safe for an identifier before casing.
pub(crate) fn slugify(segment: &str) -> String {
    deunicode::deunicode(
        &segment
            .replace(',', "c")
            .replace('+', "p")
            .replace('.', "d")
            .replace(['(', ')'], " "),
    )
}

/// Kebab-case of the platform prefix followed by the token path.
pub fn cti_kebab(token: &Token, platform: &PlatformConfig) -> String {
    platform
        .prefix
        .iter()
        .chain(token.path.iter())
        .map(|segment| slugify(segment))
        .join(" ")
        .to_case(Case::Kebab)
}
