use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a bid quantity into a decimal.
///
/// Handles formats like:
/// - "1" -> 1
/// - "2,500" -> 2500 (thousands separators)
/// - "1,234.50" -> 1234.50
/// - "LS", "" or "-" -> None
pub fn parse_quantity(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return None;
    }

    let digits = s.replace(',', "");
    Decimal::from_str(&digits).ok()
}

/// Render a quantity for display.
///
/// Numeric quantities get thousands separators and keep their scale;
/// anything else is returned verbatim.
pub fn format_quantity(s: &str) -> String {
    match parse_quantity(s) {
        Some(value) => format_decimal(value),
        None => s.trim().to_string(),
    }
}

fn format_decimal(value: Decimal) -> String {
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if value.is_sign_negative() && !value.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
