/// Placeholder shown for values that cannot be formatted.
pub const NOT_AVAILABLE: &str = "n/a";

/// Format a value as currency: symbol, thousands separators, two decimals.
///
/// `1234567.891` with `"$"` becomes `"$1,234,567.89"`; negatives become
/// `"-$12.50"`. Non-finite values render as [`NOT_AVAILABLE`].
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    // Float-to-int `as` saturates, which is fine for display purposes.
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}{symbol}{whole}.{fraction:02}")
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
