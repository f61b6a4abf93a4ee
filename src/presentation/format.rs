//! Display formatting for values shown in the UI.

/// Whole US dollars with thousands separators, e.g. `$1,234,567` or `-$500`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Black or white, whichever reads better on the `#rrggbb` background.
pub fn contrast_color(hex: &str) -> &'static str {
    let Some(digits) = hex.strip_prefix('#').filter(|d| d.len() == 6 && d.is_ascii()) else {
        return "#ffffff";
    };
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    let (Some(r), Some(g), Some(b)) = (channel(0..2), channel(2..4), channel(4..6)) else {
        return "#ffffff";
    };
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#ffffff" }
}

/// Numeric value from the digits of `input`, ignoring everything else.
pub fn parse_threshold_value(input: &str) -> Option<f64> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok().map(|v| v as f64)
}

/// Trimmed threshold name, `None` when blank.
pub fn normalize_threshold_name(input: &str) -> Option<String> {
    let name = input.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Hover text of a threshold handle, e.g. `Target: $575,000 (Locked)`.
pub fn threshold_caption(name: &str, value: f64, is_locked: bool) -> String {
    let suffix = if is_locked { " (Locked)" } else { "" };
    format!("{}: {}{}", name, format_currency(value), suffix)
}
