//! Formatting utilities (byte counts, quota gauges, flag emoji, report text).

use crate::domain::{LocationInfo, UsageReport};

/// Bytes per GiB.
pub const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Width of the quota progress bar, in cells.
pub const BAR_WIDTH: usize = 20;

/// Distance from an ASCII uppercase letter to its regional-indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Render a byte count as binary gigabytes with one decimal, e.g. `"1.0 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / GIB)
}

/// Share of the transmit quota used, in percent. Not clamped.
pub fn percent_used(tx_bytes: u64, limit_gib: f64) -> f64 {
    (tx_bytes as f64 / GIB) / limit_gib * 100.0
}

pub fn usage_emoji(percent: f64) -> &'static str {
    if percent < 50.0 {
        "🟢"
    } else if percent < 80.0 {
        "🟡"
    } else {
        "🔴"
    }
}

/// `[████░░░…]` gauge. The filled count is clamped to `0..=width`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    // Float-to-int `as` saturates (and maps NaN to 0), so inf/NaN percentages are safe here.
    let filled = (percent / 100.0 * width as f64).floor() as i64;
    let filled = filled.clamp(0, width as i64) as usize;

    let mut out = String::with_capacity(2 + width * 3);
    out.push('[');
    out.push_str(&"█".repeat(filled));
    out.push_str(&"░".repeat(width - filled));
    out.push(']');
    out
}

/// Two-letter ISO country code to flag emoji (`"us"` -> 🇺🇸). Anything else yields `""`.
pub fn country_flag_emoji(code: &str) -> String {
    let upper = code.to_uppercase();
    let mut chars = upper.chars();
    let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
        return String::new();
    };
    if !a.is_ascii_uppercase() || !b.is_ascii_uppercase() {
        return String::new();
    }

    [a, b]
        .into_iter()
        .filter_map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

/// Compose the report text sent to the chat.
pub fn render_message(report: &UsageReport, location: &LocationInfo, limit_gib: f64) -> String {
    let percent = percent_used(report.tx_bytes, limit_gib);
    let emoji = usage_emoji(percent);
    let bar = progress_bar(percent, BAR_WIDTH);
    let flag = country_flag_emoji(&location.country);

    let lines = [
        "📊 VNSTAT".to_string(),
        format!("Usage on {} in {}:", report.interface, report.period),
        String::new(),
        format!("⬇️ RX: {}", format_bytes(report.rx_bytes)),
        format!(
            "⬆️ TX: {} (limit: {limit_gib:.0} GiB)",
            format_bytes(report.tx_bytes)
        ),
        format!("Total: {}", format_bytes(report.total_bytes())),
        String::new(),
        format!("TX Limit: {emoji} {percent:.2}% used"),
        bar,
        format!("🌐 Public IP: {} {flag}", location.ip),
        format!("📍 Location: {}, {}", location.city, location.region),
        format!("🏢 ISP: {}", location.org),
    ];
    lines.join("\n")
}
