//! Human-readable duration strings such as `90s`, `15m`, `12h` or `3d`

/// Parse a duration into seconds; a bare number is taken as seconds
pub fn parse_duration_secs(raw: &str) -> Result<u64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(String::from("empty duration"));
    }

    let (digits, multiplier) = match raw.chars().last() {
        Some('s') => (&raw[..raw.len() - 1], 1),
        Some('m') => (&raw[..raw.len() - 1], 60),
        Some('h') => (&raw[..raw.len() - 1], 3_600),
        Some('d') => (&raw[..raw.len() - 1], 86_400),
        Some(c) if c.is_ascii_digit() => (raw, 1),
        _ => return Err(format!("unknown duration unit in '{}'", raw)),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{}'", raw))?;

    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration '{}' is too large", raw))
}
