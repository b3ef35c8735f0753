use crate::ValuationError;

/// Parses a user-typed price such as `"1,250,000"` or `"$ 66 000"`.
pub fn parse_price(raw: &str) -> Result<f64, ValuationError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_') && !ch.is_whitespace())
        .collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| ValuationError::InvalidInput(format!("not a number: {raw:?}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValuationError::InvalidInput(format!(
            "target price must be positive, got {raw:?}"
        )));
    }
    Ok(value)
}

/// Formats a price with `,` between thousands.
pub fn format_sheckles(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Mass with at most three decimals and no trailing zeros.
pub fn format_mass(mass: f64) -> String {
    let text = format!("{mass:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
