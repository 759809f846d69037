//! Built-in value, attribute and name transforms.
//!
//! Each transform pairs a matcher with a pure function of the token. None of
//! them mutate the token they are given; the dictionary stores what they
//! return.

pub mod attribute;
pub mod color;
pub mod motion;
pub mod name;
pub mod shadow;
pub mod size;

use crate::registry::{Registry, Transform};

pub(crate) fn register_builtins(registry: &mut Registry) {
    registry
        .register_transform("attribute/cti", Transform::attribute(|_| true, attribute::cti))
        .register_transform(
            "attribute/extendedCti",
            Transform::attribute(|_| true, attribute::extended_cti),
        )
        .register_transform("name/cti/kebab", Transform::name(|_| true, name::cti_kebab))
        .register_transform("sizes/px", Transform::value(size::is_size, size::px))
        .register_transform("sizes/pxToRem", Transform::value(size::is_size, size::px_to_rem))
        .register_transform("sizes/rem", Transform::value(size::is_size, size::px_to_rem))
        .register_transform("sizes/fonts", Transform::value(size::is_typography, size::fonts))
        .register_transform("color/css", Transform::value(color::is_color, color::css))
        .register_transform(
            "shadows/dropShadowCss",
            Transform::value(shadow::is_drop_shadow, shadow::drop_shadow_css),
        )
        .register_transform("motion/css", Transform::value(motion::is_transition, motion::css));
}
