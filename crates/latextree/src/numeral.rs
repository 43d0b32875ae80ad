//! Rendering counter values as numerals.

const ROMAN: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Largest number written in Roman numerals; larger numbers are written in arabic numerals.
pub const MAX_ROMAN: i64 = 3999;

const FOOTNOTE_SYMBOLS: [&str; 9] = ["*", "†", "‡", "§", "¶", "‖", "**", "††", "‡‡"];

/// Returns the upper case Roman numeral for the number.
///
/// Zero and negative numbers give the empty string.
/// Numbers above [MAX_ROMAN] are written in arabic numerals.
pub fn write_roman(mut n: i64) -> String {
    if n > MAX_ROMAN {
        return n.to_string();
    }
    let mut s = String::new();
    for (value, numeral) in ROMAN {
        while n >= value {
            s.push_str(numeral);
            n -= value;
        }
    }
    s
}

/// Renders a counter value in the style of the LaTeX numeral command with the given name.
///
/// Values that the style cannot represent fall back to arabic numerals.
/// Returns [None] if the style is not known.
pub fn format(style: &str, n: i64) -> Option<String> {
    let letter = |base: u8| match n {
        1..=26 => char::from(base + (n as u8) - 1).to_string(),
        _ => n.to_string(),
    };
    let s = match style {
        "arabic" => n.to_string(),
        "alph" => letter(b'a'),
        "Alph" => letter(b'A'),
        "roman" if n >= 0 => write_roman(n).to_lowercase(),
        "Roman" if n >= 0 => write_roman(n),
        "roman" | "Roman" => n.to_string(),
        "fnsymbol" => match n {
            1..=9 => FOOTNOTE_SYMBOLS[(n - 1) as usize].to_string(),
            _ => n.to_string(),
        },
        _ => return None,
    };
    Some(s)
}

/// Names of the numeral styles understood by [format].
pub const STYLES: [&str; 6] = ["arabic", "alph", "Alph", "roman", "Roman", "fnsymbol"];
