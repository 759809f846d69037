use crate::{
    error::Result,
    token::{Token, TokenValue},
};

pub fn is_transition(token: &Token) -> bool {
    token.is_type("transition") && matches!(token.value, TokenValue::Transition(_))
}

/// Legacy single-token rendering of a `{cubicBezier, duration}` value.
///
/// The output keeps the property name inside the value, exactly as older
/// stylesheets expect it. New builds use the `css/transition` format.
pub fn css(token: &Token) -> Result<TokenValue> {
    let TokenValue::Transition(transition) = &token.value else {
        return Ok(token.value.clone());
    };
    Ok(TokenValue::Text(format!(
        "cubic-bezier: ({}) {}ms",
        transition.cubic_bezier.value, transition.duration.value
    )))
}
