use crate::{
    error::Result,
    expression::format_number,
    token::{Scalar, Token, TokenValue, TypographyValue},
};

pub const SIZE_CATEGORIES: [&str; 4] = ["spacing", "borderRadius", "borderWidth", "sizing"];
pub const BASE_FONT_SIZE: f64 = 16.0;

pub fn is_size(token: &Token) -> bool {
    token
        .attribute("category")
        .map_or(false, |category| SIZE_CATEGORIES.contains(&category))
}

pub fn is_typography(token: &Token) -> bool {
    token.is_type("typography") && matches!(token.original, TokenValue::Typography(_))
}

fn original_number(token: &Token) -> f64 {
    token
        .original
        .as_scalar()
        .map_or(f64::NAN, |scalar| scalar.to_number())
}

fn rem(scalar: &Scalar) -> Scalar {
    Scalar::Text(format!("{}rem", format_number(scalar.to_number() / BASE_FONT_SIZE)))
}

pub fn px(token: &Token) -> Result<TokenValue> {
    Ok(TokenValue::Text(format!(
        "{}px",
        format_number(original_number(token))
    )))
}

pub fn px_to_rem(token: &Token) -> Result<TokenValue> {
    Ok(TokenValue::Text(format!(
        "{}rem",
        format_number(original_number(token) / BASE_FONT_SIZE)
    )))
}

/// Converts the size fields of a typography value to rem, quotes the family
/// with a `sans-serif` fallback and lower-cases the weight.
pub fn fonts(token: &Token) -> Result<TokenValue> {
    let TokenValue::Typography(typography) = &token.original else {
        return Ok(token.value.clone());
    };
    Ok(TokenValue::Typography(TypographyValue {
        font_family: typography
            .font_family
            .as_ref()
            .map(|family| Scalar::Text(format!("\"{family}\", sans-serif"))),
        font_weight: typography
            .font_weight
            .as_ref()
            .map(|weight| Scalar::Text(weight.to_string().to_lowercase())),
        line_height: typography.line_height.as_ref().map(rem),
        font_size: typography.font_size.as_ref().map(rem),
        letter_spacing: typography.letter_spacing.as_ref().map(rem),
        text_case: typography.text_case.clone(),
        text_decoration: typography.text_decoration.clone(),
    }))
}
