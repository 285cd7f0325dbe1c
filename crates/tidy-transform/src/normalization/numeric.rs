//! Numeric parsing for cast rules.

/// Parse a string value to a finite float.
///
/// Accepts plain decimal or scientific notation after trimming, and
/// thousands separators only in well-formed three-digit groups
/// (`"1,234.5"`). Text such as `"1,5"`, `"NaN"` or `"inf"` is rejected so
/// that a cast never turns it into a different number.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let parsed: f64 = if trimmed.contains(',') {
        ungroup(trimmed)?.parse().ok()?
    } else {
        trimmed.parse().ok()?
    };
    parsed.is_finite().then_some(parsed)
}

/// Strip thousands separators from `[+-]d{1,3}(,ddd)+[.d*]`.
fn ungroup(value: &str) -> Option<String> {
    let (sign, unsigned) = match value.strip_prefix(['+', '-']) {
        Some(rest) => (&value[..1], rest),
        None => ("", value),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut groups = whole.split(',');
    let head = groups.next()?;
    if !(1..=3).contains(&head.len()) || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut out = format!("{sign}{head}");
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push_str(group);
    }
    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

/// Parse a string value to an integer.
///
/// Surrounding whitespace and a leading `+` are accepted; decimals are not,
/// so `"29616-0759"` and `"3.5"` both fail.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperatures() {
        assert_eq!(parse_float("-3.9"), Some(-3.9));
        assert_eq!(parse_float(" 21.5 "), Some(21.5));
        assert_eq!(parse_float("+0.4"), Some(0.4));
        assert_eq!(parse_float("12"), Some(12.0));
        assert_eq!(parse_float("1.5e-3"), Some(0.0015));
    }

    #[test]
    fn test_grouped_request_counts() {
        assert_eq!(parse_float("1,234"), Some(1234.0));
        assert_eq!(parse_float("12,345,678"), Some(12_345_678.0));
        assert_eq!(parse_float("-1,234.5"), Some(-1234.5));
    }

    #[test]
    fn test_malformed_groups_are_rejected() {
        assert_eq!(parse_float("1,5"), None);
        assert_eq!(parse_float("1234,567"), None);
        assert_eq!(parse_float(",123"), None);
        assert_eq!(parse_float("1,234,"), None);
        assert_eq!(parse_float("1,234.5e3"), None);
        assert_eq!(parse_float("1 234"), None);
    }

    #[test]
    fn test_non_finite_text_is_rejected() {
        for text in ["NaN", "nan", "inf", "-inf", "Infinity", "1e400"] {
            assert_eq!(parse_float(text), None, "{text}");
        }
    }

    #[test]
    fn test_blank_and_words_are_rejected() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("   "), None);
        assert_eq!(parse_float("NO CLUE"), None);
        assert_eq!(parse_float("12.3.4"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("10001"), Some(10001));
        assert_eq!(parse_integer(" +7 "), Some(7));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("00000"), Some(0));
        assert_eq!(parse_integer("29616-0759"), None);
        assert_eq!(parse_integer("3.5"), None);
        assert_eq!(parse_integer("+"), None);
        assert_eq!(parse_integer(""), None);
    }
}
