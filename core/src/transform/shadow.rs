use crate::{
    error::{Result, TokenError},
    expression::format_number,
    token::{Scalar, Token, TokenValue},
};

pub fn is_drop_shadow(token: &Token) -> bool {
    token.is_type("dropShadow") && matches!(token.original, TokenValue::Shadow(_))
}

/// Splits `#RRGGBBAA` into its four channels; any other shape fails with
/// the token's name.
fn decode_rgba(token: &Token, color: &Scalar) -> Result<[u8; 4]> {
    let color = color.to_string();
    let malformed = || TokenError::MalformedShadowColor {
        token: token.name.clone(),
        color: color.clone(),
    };
    let hex = color.strip_prefix('#').unwrap_or(&color);
    let channels = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            Some(pair)
                .filter(|pair| pair.len() == 2 && pair.iter().all(u8::is_ascii_hexdigit))
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(malformed)
        })
        .collect::<Result<Vec<_>>>()?;
    channels.try_into().map_err(|_| malformed())
}

/// `<x>px <y>px <blur>px <spread>px rgba(r, g, b, a)`, alpha truncated to
/// two decimals.
pub fn drop_shadow_css(token: &Token) -> Result<TokenValue> {
    let TokenValue::Shadow(shadow) = &token.original else {
        return Ok(token.value.clone());
    };
    let [r, g, b, a] = decode_rgba(token, &shadow.color)?;
    let alpha = (a as f64 / 255.0 * 100.0).floor() / 100.0;
    let px = |scalar: &Scalar| format!("{}px", format_number(scalar.to_number()));
    Ok(TokenValue::Text(format!(
        "{} {} {} {} rgba({r}, {g}, {b}, {})",
        px(&shadow.x),
        px(&shadow.y),
        px(&shadow.blur),
        px(&shadow.spread),
        format_number(alpha)
    )))
}
