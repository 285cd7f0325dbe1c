//! Mis-decoding artifacts.
//!
//! When UTF-8 bytes are read as windows-1252 every multi-byte character
//! turns into two or three Latin-1 characters. Only a fixed set of common
//! sequences is repaired here; other encodings are left untouched.

use std::borrow::Cow;

/// UTF-8 byte-order mark read as windows-1252.
const MISREAD_BOM: &str = "\u{ef}\u{bb}\u{bf}";

/// Lead character of a misread two-byte sequence in the U+0080..U+00BF range.
const STRAY_LEAD: char = '\u{c2}';

/// Known misread sequences and their intended text, longest first.
pub const ENCODING_ARTIFACTS: &[(&str, &str)] = &[
    (MISREAD_BOM, ""),
    ("\u{feff}", ""),
    ("â€™", "\u{2019}"),
    ("â€˜", "\u{2018}"),
    ("â€œ", "\u{201c}"),
    ("â€\u{9d}", "\u{201d}"),
    ("â€“", "\u{2013}"),
    ("â€”", "\u{2014}"),
    ("â€¦", "\u{2026}"),
    ("Ã©", "é"),
    ("Ã¨", "è"),
    ("Ã§", "ç"),
    ("Ã´", "ô"),
    ("Ã‰", "É"),
];

/// Returns true if `value` contains any sequence [`strip_artifacts`] would change.
pub fn has_artifacts(value: &str) -> bool {
    ENCODING_ARTIFACTS.iter().any(|(bad, _)| value.contains(bad)) || has_stray_lead(value)
}

/// Replace known artifacts in `value`.
///
/// A misread BOM in front of a quoted CSV header also leaves the header's
/// quote pair in place (`ï»¿"Longitude (x)"`); that pair is removed together
/// with the BOM. A lone `Â` is removed only when it precedes a character in
/// U+00A0..U+00BF, which is exactly the shape of a misread `°`, `±` or
/// non-breaking space.
///
/// # Examples
///
/// ```
/// use tidy_transform::normalization::strip_artifacts;
///
/// assert_eq!(strip_artifacts("ï»¿\"Longitude (x)\""), "Longitude (x)");
/// assert_eq!(strip_artifacts("Temp (Â°C)"), "Temp (°C)");
/// assert_eq!(strip_artifacts("Station Name"), "Station Name");
/// ```
pub fn strip_artifacts(value: &str) -> Cow<'_, str> {
    if !has_artifacts(value) {
        return Cow::Borrowed(value);
    }

    let had_bom = value.starts_with(MISREAD_BOM) || value.starts_with('\u{feff}');
    // Every substitution shortens the text, so this reaches a fixed point.
    let mut out = value.to_string();
    while has_artifacts(&out) {
        out = replace_once(&out);
    }
    if had_bom && out.len() >= 2 && out.starts_with('"') && out.ends_with('"') {
        out = out[1..out.len() - 1].to_string();
    }
    Cow::Owned(out)
}

/// One pass over the substitution table followed by stray-lead removal.
fn replace_once(value: &str) -> String {
    let mut out = value.to_string();
    for (bad, good) in ENCODING_ARTIFACTS {
        if out.contains(bad) {
            out = out.replace(bad, good);
        }
    }
    if has_stray_lead(&out) {
        out = remove_stray_leads(&out);
    }
    out
}

fn is_latin1_tail(c: char) -> bool {
    ('\u{a0}'..='\u{bf}').contains(&c)
}

fn has_stray_lead(value: &str) -> bool {
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == STRAY_LEAD && chars.peek().copied().is_some_and(is_latin1_tail) {
            return true;
        }
    }
    false
}

fn remove_stray_leads(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == STRAY_LEAD && chars.peek().copied().is_some_and(is_latin1_tail) {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_and_quotes() {
        assert_eq!(strip_artifacts("ï»¿\"Longitude (x)\""), "Longitude (x)");
        assert_eq!(strip_artifacts("ï»¿Longitude (x)"), "Longitude (x)");
        assert_eq!(strip_artifacts("\u{feff}Year"), "Year");
    }

    #[test]
    fn test_quotes_without_bom_are_kept() {
        assert_eq!(strip_artifacts("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_degree_sign() {
        assert_eq!(strip_artifacts("Dew Point Temp (Â°C)"), "Dew Point Temp (°C)");
    }

    #[test]
    fn test_capital_a_circumflex_is_kept_elsewhere() {
        assert_eq!(strip_artifacts("CÂBLE"), "CÂBLE");
        assert!(!has_artifacts("CÂBLE"));
    }

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(strip_artifacts("Macyâ€™s"), "Macy\u{2019}s");
        assert_eq!(strip_artifacts("Montrâ€“al"), "Montr\u{2013}al");
        assert_eq!(strip_artifacts("MontrÃ©al"), "Montréal");
    }

    #[test]
    fn test_clean_input_is_borrowed() {
        assert!(matches!(strip_artifacts("Weather"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_nested_artifacts_collapse_in_one_call() {
        assert_eq!(strip_artifacts("ÂÂ°C"), "°C");
        assert_eq!(strip_artifacts("ÃÂ§a"), "ça");
        assert_eq!(strip_artifacts("ïï»¿»¿Year"), "Year");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "ï»¿\"Longitude (x)\"",
            "Temp (Â°C)",
            "MontrÃ©al",
            "ÂÂ°C",
            "ÃÂ§a",
        ] {
            let once = strip_artifacts(input).into_owned();
            assert_eq!(strip_artifacts(&once), once);
        }
    }
}
