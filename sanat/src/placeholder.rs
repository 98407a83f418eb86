//! Parsing of placeholder specifier bodies.
//!
//! A specifier is written between braces in a value, e.g. `{1:f.2}`:
//!
//! ```text
//! [<orderIndex>:]<typeChar>[.<decimalDigits>]
//! ```
//!
//! `typeChar` is one of `@`, `f`, `d`, `s` (case-insensitive). Anything else,
//! or nothing at all, means an untyped object placeholder.

use crate::types::{DataType, Placeholder};

/// Parses a specifier body into a [`Placeholder`], ignoring malformed numbers.
///
/// Never fails: an unparsable order index or decimal count is treated as 0.
/// Use [`parse_placeholder_with`] to be told about those.
///
/// ```rust
/// use sanat::placeholder::parse_placeholder;
/// use sanat::types::DataType;
///
/// let p = parse_placeholder("2:f.1");
/// assert_eq!(p.data_type, DataType::Float);
/// assert_eq!(p.order_index, Some(2));
/// assert_eq!(p.decimal_count, Some(1));
/// ```
pub fn parse_placeholder(body: &str) -> Placeholder {
    parse_placeholder_with(body, &mut |_| {})
}

/// Like [`parse_placeholder`], but calls `report` with a message for every
/// number that could not be parsed.
pub fn parse_placeholder_with(body: &str, report: &mut dyn FnMut(String)) -> Placeholder {
    let mut s = body.trim_start_matches('{').trim_end_matches('}');

    // {a:xxx}
    //  ~
    let mut order_index = 0;
    if let Some((prefix, rest)) = s.split_once(':') {
        if !prefix.is_empty() {
            order_index = parse_number(prefix, "order index", report);
        }
        s = rest;
    }

    let mut chars = s.chars();
    let Some(type_char) = chars.next() else {
        return Placeholder::new(DataType::Object).with_order_index(order_index);
    };
    let data_type = data_type_for_char(type_char);
    let rest = chars.as_str();

    let mut placeholder = Placeholder::new(data_type).with_order_index(order_index);

    if data_type == DataType::Float {
        if let Some((_, digits)) = rest.split_once('.') {
            if !digits.is_empty() {
                placeholder =
                    placeholder.with_decimal_count(parse_number(digits, "decimal count", report));
            }
        }
    }

    placeholder
}

fn data_type_for_char(c: char) -> DataType {
    match c.to_ascii_lowercase() {
        '@' => DataType::Object,
        'f' => DataType::Float,
        'd' => DataType::Integer,
        's' => DataType::String,
        _ => DataType::Object,
    }
}

fn parse_number(text: &str, what: &str, report: &mut dyn FnMut(String)) -> usize {
    text.parse::<usize>().unwrap_or_else(|e| {
        report(format!(
            "Invalid {} '{}' in format specifier: {}",
            what, text, e
        ));
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(data_type: DataType, decimals: Option<usize>, order: Option<usize>) -> Placeholder {
        Placeholder {
            data_type,
            order_index: order,
            decimal_count: decimals,
        }
    }

    #[test]
    fn test_data_types() {
        assert_eq!(parse_placeholder("@"), seg(DataType::Object, None, None));
        assert_eq!(parse_placeholder("d"), seg(DataType::Integer, None, None));
        assert_eq!(parse_placeholder("f"), seg(DataType::Float, None, None));
        assert_eq!(parse_placeholder("s"), seg(DataType::String, None, None));
        assert_eq!(parse_placeholder("D"), seg(DataType::Integer, None, None));
        assert_eq!(parse_placeholder("S"), seg(DataType::String, None, None));
    }

    #[test]
    fn test_default_is_object() {
        assert_eq!(parse_placeholder(""), seg(DataType::Object, None, None));
        assert_eq!(parse_placeholder("x"), seg(DataType::Object, None, None));
        assert_eq!(parse_placeholder("ä"), seg(DataType::Object, None, None));
    }

    #[test]
    fn test_braces_are_tolerated() {
        assert_eq!(parse_placeholder("{d}"), seg(DataType::Integer, None, None));
        assert_eq!(parse_placeholder("{}"), seg(DataType::Object, None, None));
    }

    #[test]
    fn test_order_index() {
        assert_eq!(
            parse_placeholder("0:@"),
            seg(DataType::Object, None, None),
            "Order index 0 = none at all"
        );
        assert_eq!(parse_placeholder("1:@"), seg(DataType::Object, None, Some(1)));
        assert_eq!(parse_placeholder("72:@"), seg(DataType::Object, None, Some(72)));
        assert_eq!(parse_placeholder(":d"), seg(DataType::Integer, None, None));
        assert_eq!(parse_placeholder("3:"), seg(DataType::Object, None, Some(3)));
    }

    #[test]
    fn test_decimal_count() {
        assert_eq!(parse_placeholder("f."), seg(DataType::Float, None, None));
        assert_eq!(parse_placeholder("f.0"), seg(DataType::Float, Some(0), None));
        assert_eq!(parse_placeholder("f.2"), seg(DataType::Float, Some(2), None));
        assert_eq!(parse_placeholder("F.34"), seg(DataType::Float, Some(34), None));
    }

    #[test]
    fn test_decimal_count_is_only_for_floats() {
        assert_eq!(parse_placeholder("d.2"), seg(DataType::Integer, None, None));
        assert_eq!(parse_placeholder("s.2"), seg(DataType::String, None, None));
        assert_eq!(parse_placeholder("@.2"), seg(DataType::Object, None, None));
    }

    #[test]
    fn test_combination() {
        assert_eq!(parse_placeholder("1:f.2"), seg(DataType::Float, Some(2), Some(1)));
        assert_eq!(parse_placeholder("3:f.2"), seg(DataType::Float, Some(2), Some(3)));
    }

    #[test]
    fn test_bad_order_index_is_reported_and_ignored() {
        let mut messages = Vec::new();
        let placeholder = parse_placeholder_with("x:d", &mut |m| messages.push(m));
        assert_eq!(placeholder, seg(DataType::Integer, None, None));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("order index 'x'"));
    }

    #[test]
    fn test_bad_decimal_count_is_reported_as_zero() {
        let mut messages = Vec::new();
        let placeholder = parse_placeholder_with("f.two", &mut |m| messages.push(m));
        assert_eq!(placeholder, seg(DataType::Float, Some(0), None));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("decimal count 'two'"));
    }

    #[test]
    fn test_silent_variant_never_fails() {
        for body in ["", ":", "::", "-1:f", "1:f.-", "99999999999999999999999:s", "f.ä"] {
            let _ = parse_placeholder(body);
        }
    }
}
