use crate::{
    error::{Result, TokenError},
    token::{Token, TokenValue},
};

pub fn is_color(token: &Token) -> bool {
    token.attribute("category") == Some("color") && token.value.as_scalar().is_some()
}

/// Hex when opaque, `rgba()` with alpha rounded to two decimals otherwise.
pub fn css(token: &Token) -> Result<TokenValue> {
    let text = token.value.to_string();
    let color = csscolorparser::parse(&text).map_err(|_| TokenError::InvalidColor {
        token: token.name.clone(),
        color: text.clone(),
    })?;
    if color.a >= 1.0 {
        return Ok(TokenValue::Text(color.to_hex_string()));
    }
    let [r, g, b, _] = color.to_rgba8();
    let alpha = (color.a * 100.0).round() / 100.0;
    Ok(TokenValue::Text(format!("rgba({r}, {g}, {b}, {alpha})")))
}
