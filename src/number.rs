//! Decimal text as carried by `N`/`NS` payloads.

use serde_json::Number;

/// Parse decimal text into a JSON number.
///
/// Integers stay exact when they fit `i64`/`u64`; anything else goes through `f64`.
/// Empty text and non-finite results are rejected.
pub fn parse(text: &str) -> Option<Number> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(n.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Canonical decimal text for `n`.
pub fn format(n: &Number) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        format(&parse(text).unwrap())
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse("25").unwrap().as_i64(), Some(25));
        assert_eq!(parse("-7").unwrap().as_i64(), Some(-7));
        assert_eq!(
            parse("18446744073709551615").unwrap().as_u64(),
            Some(u64::MAX)
        );
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse("12.75").unwrap().as_f64(), Some(12.75));
        assert_eq!(parse("-0.5").unwrap().as_f64(), Some(-0.5));
        assert_eq!(parse("1e3").unwrap().as_f64(), Some(1000.0));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse(" 42 ").unwrap().as_i64(), Some(42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "   ", "not-a-number", "12abc", "0x10", "NaN", "inf", "1e400"] {
            assert!(parse(text).is_none(), "{text:?} should not parse");
        }
    }

    #[test]
    fn test_text_is_stable_across_round_trips() {
        for text in ["0", "25", "-7", "12.75", "-0.5", "100.25", "18446744073709551615"] {
            assert_eq!(round_trip(text), text);
        }
    }

    #[test]
    fn test_exponent_value_is_stable_across_round_trips() {
        // Exponent spelling may change ("1e21" vs "1e+21"); the value may not.
        for text in ["1e21", "2.5e-8", "-6.02E23"] {
            assert_eq!(parse(&round_trip(text)), parse(text), "{text}");
        }
    }

    #[test]
    fn test_format_integers_without_fraction() {
        assert_eq!(format(&Number::from(95)), "95");
        assert_eq!(format(&Number::from(-3)), "-3");
    }
}
