//! Money, area, and bar formatting helpers.

/// Format a dollar amount with thousands separators (e.g., "$2,500,000").
pub fn fmt_money(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact dollar amount for tight columns (e.g., "$2.5M", "$450K").
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn fmt_money_short(value: u64) -> String {
    if value >= 1_000_000_000 {
        format!("${:.1}B", value as f64 / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("${:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("${}K", value / 1_000)
    } else {
        format!("${value}")
    }
}

/// Format a floor area in square meters.
pub fn fmt_area(sqm: u32) -> String {
    format!("{sqm} m²")
}

/// Render a percentage bar split into filled and empty portions.
///
/// Returns `(filled, empty)` strings of `█` and `░` characters that together
/// span `width` character positions. Caller applies styling per segment.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::as_conversions
)]
pub fn fmt_pct_bar(pct: f64, width: u16) -> (String, String) {
    let clamped = pct.clamp(0.0, 100.0);
    let filled_count = ((clamped / 100.0) * f64::from(width)).round() as u16;
    let empty_count = width.saturating_sub(filled_count);
    (
        "█".repeat(usize::from(filled_count)),
        "░".repeat(usize::from(empty_count)),
    )
}

/// Render a proportional chart bar using fractional block characters.
///
/// Uses ▏▎▍▌▋▊▉█ for sub-character precision across `max_chars` positions.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::as_conversions
)]
pub fn fmt_scaled_bar(value: u64, max_value: u64, max_chars: u16) -> String {
    const FRACTIONAL: &[char] = &[' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

    if max_value == 0 || max_chars == 0 {
        return " ".repeat(usize::from(max_chars));
    }
    // How many eighth-blocks to fill
    let fraction = (value as f64 / max_value as f64).min(1.0);
    let total_eighths = (fraction * f64::from(max_chars) * 8.0).round() as u32;
    let full_blocks = total_eighths / 8;
    let remainder = total_eighths % 8;

    let mut bar = "█".repeat(full_blocks as usize);
    if remainder > 0 {
        bar.push(FRACTIONAL[remainder as usize]);
    }
    // Pad to max_chars
    let bar_len = full_blocks + u32::from(remainder > 0);
    let padding = u32::from(max_chars).saturating_sub(bar_len);
    bar.push_str(&" ".repeat(padding as usize));
    bar
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(fmt_money(0), "$0");
        assert_eq!(fmt_money(950), "$950");
        assert_eq!(fmt_money(8_500), "$8,500");
        assert_eq!(fmt_money(2_500_000), "$2,500,000");
        assert_eq!(fmt_money(120_000_000), "$120,000,000");
    }

    #[test]
    fn short_money_scales_units() {
        assert_eq!(fmt_money_short(850), "$850");
        assert_eq!(fmt_money_short(450_000), "$450K");
        assert_eq!(fmt_money_short(2_500_000), "$2.5M");
        assert_eq!(fmt_money_short(1_200_000_000), "$1.2B");
    }

    #[test]
    fn scaled_bar_fills_proportionally() {
        assert_eq!(fmt_scaled_bar(10, 10, 4), "████");
        assert_eq!(fmt_scaled_bar(5, 10, 4), "██  ");
        assert_eq!(fmt_scaled_bar(0, 10, 4), "    ");
        // Zero max never divides
        assert_eq!(fmt_scaled_bar(5, 0, 4), "    ");
    }

    #[test]
    fn pct_bar_splits_on_width() {
        assert_eq!(fmt_pct_bar(50.0, 10), ("█████".into(), "░░░░░".into()));
        assert_eq!(fmt_pct_bar(200.0, 4), ("████".into(), String::new()));
    }
}
