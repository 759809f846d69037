use itertools::Itertools;

/// A piece of an authored string value.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    /// `{a.b.c}` reference to another token by path.
    Ref(Vec<String>),
}
impl Segment {
    pub fn reference_path(&self) -> Option<String> {
        match self {
            Segment::Ref(path) => Some(path.iter().join(".")),
            Segment::Literal(_) => None,
        }
    }
}

peg::parser! {
  grammar expr_parser() for str {
    rule _ = quiet!{[' ' | '\n' | '\t' | '\r']*}

    rule reference() -> Segment
        = "{" v:($((!['}' | '.' | '{'] [_])+) ++ ".") "}" { Segment::Ref(v.iter().map(|x| x.to_string()).collect()) }
    rule literal() -> Segment
        = v:$((!"{" [_])+) { Segment::Literal(v.to_string()) }
    rule brace() -> Segment
        = "{" { Segment::Literal("{".to_string()) }

    pub(crate) rule template() -> Vec<Segment>
        = (reference() / literal() / brace())*

    rule digits() = ['0'..='9']+
    rule exponent() = ['e' | 'E'] ['+' | '-']? digits()
    rule decimal() = digits() ("." ['0'..='9']*)? / "." digits()

    pub(crate) rule float_prefix() -> f64
        = _ n:$(['+' | '-']? ("Infinity" / decimal() exponent()?)) [_]* {? n.parse().or(Err("number")) }
  }
}

/// Splits a string into literal text and references.
pub fn parse_template(input: &str) -> Vec<Segment> {
    expr_parser::template(input).unwrap_or_else(|_| vec![Segment::Literal(input.to_string())])
}

pub fn has_reference(input: &str) -> bool {
    parse_template(input)
        .iter()
        .any(|segment| matches!(segment, Segment::Ref(_)))
}

/// Parses the longest numeric prefix of `input`, `NaN` when there is none.
pub fn parse_float(input: &str) -> f64 {
    expr_parser::float_prefix(input).unwrap_or(f64::NAN)
}

/// Renders a number the way a JavaScript template literal would.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let exponent = format!("{value:e}");
        match exponent.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => exponent,
        }
    } else {
        value.to_string()
    }
}

#[test]
fn test() {
    assert_eq!(
        parse_template("{hello.world}"),
        vec![Segment::Ref(vec!["hello".to_string(), "world".to_string()])]
    );
    assert_eq!(
        parse_template("1px solid {color.base.border}"),
        vec![
            Segment::Literal("1px solid ".to_string()),
            Segment::Ref(vec![
                "color".to_string(),
                "base".to_string(),
                "border".to_string()
            ]),
        ]
    );
    assert_eq!(
        parse_template("ABC Diatype Variable"),
        vec![Segment::Literal("ABC Diatype Variable".to_string())]
    );
    assert_eq!(
        parse_template("a{b"),
        vec![
            Segment::Literal("a".to_string()),
            Segment::Literal("{".to_string()),
            Segment::Literal("b".to_string()),
        ]
    );
    assert_eq!(parse_template(""), vec![]);
    assert!(has_reference("{x} * 2"));
    assert!(!has_reference("#ff00ff"));
}

#[test]
fn parse_float_takes_numeric_prefix() {
    assert_eq!(parse_float("16"), 16.0);
    assert_eq!(parse_float("  1.5rem"), 1.5);
    assert_eq!(parse_float("-2px"), -2.0);
    assert_eq!(parse_float(".25"), 0.25);
    assert_eq!(parse_float("1e3"), 1000.0);
    assert_eq!(parse_float("1e"), 1.0);
    assert_eq!(parse_float("150%"), 150.0);
    assert_eq!(parse_float("Infinity"), f64::INFINITY);
    assert!(parse_float("auto").is_nan());
    assert!(parse_float("{size.base}").is_nan());
    assert!(parse_float("").is_nan());
}

#[test]
fn format_number_matches_javascript() {
    assert_eq!(format_number(16.0), "16");
    assert_eq!(format_number(0.0625), "0.0625");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(format_number(0.000001), "0.000001");
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(-2.5e-8), "-2.5e-8");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(1.5e22), "1.5e+22");
    assert_eq!(format_number(1e20), "100000000000000000000");
}
