pub mod css;
pub mod scss;
pub mod transition;

use crate::{config::FileConfig, registry::Registry};

/// Selector used when a file does not configure one.
pub const DEFAULT_SELECTOR: &str = ":root";

pub(crate) fn selector(file: &FileConfig) -> &str {
    file.selector.as_deref().unwrap_or(DEFAULT_SELECTOR)
}

pub(crate) fn register_builtins(registry: &mut Registry) {
    registry
        .register_format("css/variables", css::variables)
        .register_format("css/transition", transition::transition)
        .register_format("scss/fontsMixin", scss::fonts_mixin)
        .register_format("scss/fontsMixinJson", scss::fonts_mixin_json);
}
