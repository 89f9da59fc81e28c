//! Intent value parsing
//!
//! Form controls hand their values over as strings. Two readings exist:
//!
//! - [`parse_int`] follows the browser's `parseInt`: leading integer prefix,
//!   everything after the first non-digit ignored. `"0.7"` reads as `0`.
//! - [`coerce_number`] follows the numeric conversion a media element applies
//!   when a string is assigned to one of its numeric properties. `"0.7"` reads
//!   as `0.7`, and an empty string reads as `0`.
//!
//! Both return `None` where the browser would produce `NaN`.

/// Parse the leading integer of `input`, browser `parseInt` style.
pub fn parse_int(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value = 0.0f64;
    let mut seen = false;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                value = value * radix as f64 + d as f64;
                seen = true;
            }
            None => break,
        }
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Convert `input` to a number the way a string assigned to a numeric media
/// property is converted.
pub fn coerce_number(input: &str) -> Option<f64> {
    let s = input.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|v| v as f64);
    }

    // Rust accepts "inf" and "nan" spellings that the browser does not
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}
