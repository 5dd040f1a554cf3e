use std::fmt;

use crate::media::MediaType;

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `min > max` the result is `max`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let lower = if value < min { min } else { value };
    if lower > max {
        max
    } else {
        lower
    }
}

/// Human-readable byte count using 1024-based units, e.g. `1.5 KB`, `12 MB`.
///
/// One decimal is kept below 10 units; whole bytes never show decimals.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut index = 0;
    while value >= 1024.0 && index < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    if value >= 10.0 || index == 0 {
        format!("{value:.0} {}", BYTE_UNITS[index])
    } else {
        format!("{value:.1} {}", BYTE_UNITS[index])
    }
}

/// Byte count that displays through [`format_bytes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bytes(self.0))
    }
}

/// Short labels for a list of media types, e.g. `PNG / JPG / WEBP`.
pub fn format_types(types: &[MediaType]) -> String {
    types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// `#RRGGBB` with uppercase hex digits.
pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// CSS-style `rgba(r, g, b, a)` where alpha is in [0, 1] rounded to 2 decimals.
pub fn format_rgba(r: u8, g: u8, b: u8, a: u8) -> String {
    let alpha = (a as f64 / 255.0 * 100.0).round() / 100.0;
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Integer with `,` thousands separators, e.g. `2,097,152`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
