//! Helpers for the contents of optional arguments
//!
//! These are used by renderers for arguments like `[width=0.5\textwidth]`.

use latextree_stdext::collections::orderedmap::OrderedMap;

/// Width of the paper in millimetres used when converting absolute lengths.
pub const PAPER_WIDTH_MM: f64 = 210.0;

const SCALE_FACTOR_MM: [(&str, f64); 10] = [
    ("px", 0.26),
    ("pt", 0.35),
    ("mm", 1.0),
    ("cm", 10.0),
    ("ex", 1.5),
    ("em", 3.5),
    ("bp", 0.35),
    ("dd", 0.38),
    ("pc", 4.22),
    ("in", 25.4),
];

/// Splits a simple optional argument into positional items and key-value pairs.
///
/// Surrounding brackets are removed if present. Items and keys are trimmed.
///
/// ```
/// # use latextree::options::parse_key_values;
/// let (args, kwargs) = parse_key_values("[draft, width=3cm]");
/// assert_eq!(args, vec!["draft"]);
/// assert_eq!(kwargs.get("width").map(String::as_str), Some("3cm"));
/// ```
pub fn parse_key_values(text: &str) -> (Vec<String>, OrderedMap<String, String>) {
    let text = text.trim();
    let text = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    let mut args = Vec::new();
    let mut kwargs = OrderedMap::new();
    for item in text.split(',') {
        match item.split_once('=') {
            None => {
                let item = item.trim();
                if !item.is_empty() {
                    args.push(item.to_string());
                }
            }
            Some((key, value)) => {
                kwargs.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }
    (args, kwargs)
}

/// Converts a LaTeX length into a percentage of the text width.
///
/// Lengths relative to `\textwidth` or `\linewidth` are scaled by 99%.
/// Absolute lengths are converted to millimetres and divided by the paper width.
/// Returns [None] if the length cannot be interpreted.
pub fn parse_length(text: &str) -> Option<String> {
    let text = text.trim();
    for relative in ["\\textwidth", "\\linewidth"] {
        if let Some(i) = text.find(relative) {
            let factor = text[..i].trim();
            let factor: f64 = if factor.is_empty() {
                1.0
            } else {
                factor.parse().ok()?
            };
            return Some(format!("{}%", (99.0 * factor) as i64));
        }
    }
    for (unit, scale) in SCALE_FACTOR_MM {
        if let Some(length) = text.strip_suffix(unit) {
            let length: f64 = length.trim().parse().ok()?;
            let percent = 100.0 * length * scale / PAPER_WIDTH_MM;
            return Some(format!("{}%", percent as i64));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_values_mixed() {
        let (args, kwargs) = parse_key_values("a, b , k1=v1, k2 = v2");
        assert_eq!(args, vec!["a", "b"]);
        let pairs: Vec<(&str, &str)> = kwargs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("k1", "v1"), ("k2", "v2")]);
    }

    #[test]
    fn key_values_empty() {
        let (args, kwargs) = parse_key_values("[]");
        assert!(args.is_empty());
        assert!(kwargs.is_empty());
    }

    macro_rules! length_tests {
        ($( ($name: ident, $input: expr, $expected: expr),)+) => {
            $(
            #[test]
            fn $name() {
                assert_eq!(parse_length($input).as_deref(), $expected);
            }
            )+
        };
    }

    length_tests![
        (half_textwidth, "0.5\\textwidth", Some("49%")),
        (linewidth, "\\linewidth", Some("99%")),
        (millimetres, "105mm", Some("50%")),
        (centimetres, "2.1cm", Some("10%")),
        (inches, "1in", Some("12%")),
        (garbage, "wide", None),
        (bad_number, "x.5cm", None),
    ];
}
