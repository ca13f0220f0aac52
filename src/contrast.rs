//! WCAG relative luminance and black/white label colour selection.

use crate::errors::BudgetError;

pub const DARK_TEXT: &str = "#000000";
pub const LIGHT_TEXT: &str = "#FFFFFF";

const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Picks black or white text for a background colour given as hex.
pub fn contrast_color_for(hex: &str) -> Result<&'static str, BudgetError> {
    let luminance = relative_luminance(hex)?;
    Ok(if luminance > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    })
}

pub fn relative_luminance(hex: &str) -> Result<f64, BudgetError> {
    let [r, g, b] = parse_hex(hex)?;
    Ok(0.2126 * linear_channel(r) + 0.7152 * linear_channel(g) + 0.0722 * linear_channel(b))
}

fn linear_channel(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Accepts `#RRGGBB`, `RRGGBB` and the `#RGB` shorthand.
fn parse_hex(input: &str) -> Result<[u8; 3], BudgetError> {
    let digits = input.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(BudgetError::invalid_color(
            input,
            format!("unexpected character {bad:?}"),
        ));
    }

    let nibbles: Vec<u8> = digits
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            _ => b - b'A' + 10,
        })
        .collect();

    match nibbles.as_slice() {
        [r, g, b] => Ok([r * 17, g * 17, b * 17]),
        [r1, r2, g1, g2, b1, b2] => Ok([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2]),
        other => Err(BudgetError::invalid_color(
            input,
            format!("expected 3 or 6 hex digits, found {}", other.len()),
        )),
    }
}
