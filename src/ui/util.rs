use rust_decimal::Decimal;

/// Format an amount in hryvnias to two decimal places, e.g.
/// `120.5` → `"120.50 грн"`.
pub(crate) fn format_uah(val: Decimal) -> String {
    format!("{val:.2} грн")
}

/// Truncate a string to `max` visible characters, appending "…" if
/// truncated. Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
