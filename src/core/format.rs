//! Display helpers shared by the panel command replies.

/// Embed colors used across PyroBot replies.
pub mod colors {
    /// Informational replies
    pub const INFO: u32 = 0x0099_ff;
    /// Successful actions and running servers
    pub const SUCCESS: u32 = 0x00ff_00;
    /// Deletions and servers that are not running
    pub const DANGER: u32 = 0xff00_00;
    /// Servers shutting down
    pub const WARNING: u32 = 0xff99_00;
}

/// Formats a byte count with binary units, e.g. `1536` → `1.5 KB`.
///
/// Trailing zeros are dropped, matching how the panel itself shows sizes.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    #[allow(clippy::cast_precision_loss)] // display only
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Formats a byte counter as megabytes with two decimals, or `N/A` when the panel
/// reported nothing (zero).
#[must_use]
pub fn format_megabytes(bytes: u64) -> String {
    if bytes == 0 {
        return "N/A".to_string();
    }
    #[allow(clippy::cast_precision_loss)] // display only
    let megabytes = bytes as f64 / 1024.0 / 1024.0;
    format!("{megabytes:.2} MB")
}

/// Formats an absolute CPU reading, `N/A` when zero.
#[must_use]
pub fn format_cpu(cpu_absolute: f64) -> String {
    if cpu_absolute == 0.0 {
        "N/A".to_string()
    } else {
        format!("{cpu_absolute:.2}%")
    }
}

/// Status emoji for a server power state.
#[must_use]
pub fn state_emoji(state: &str) -> &'static str {
    match state {
        "running" => "🟢",
        "starting" => "🟡",
        "stopping" => "🟠",
        "offline" => "🔴",
        _ => "⚪",
    }
}

/// `🟢 RUNNING` style status line.
#[must_use]
pub fn state_label(state: &str) -> String {
    format!("{} {}", state_emoji(state), state.to_uppercase())
}

/// Embed color for a server power state.
#[must_use]
pub fn state_color(state: &str) -> u32 {
    if state == "running" {
        colors::SUCCESS
    } else {
        colors::DANGER
    }
}

/// Shows only the first eight characters of an API key.
#[must_use]
pub fn mask_api_key(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(8).collect();
    format!("{prefix}...")
}

/// `✅ Yes` / `❌ No`
#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "✅ Yes" } else { "❌ No" }
}

/// Discord's limit for an embed description.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

/// Joins `lines` with `separator`, stopping before the text would exceed `limit`
/// characters and noting how many entries were left out.
#[must_use]
pub fn join_limited(lines: &[String], separator: &str, limit: usize) -> String {
    // Room for the "…and N more" note
    const NOTE_RESERVE: usize = 24;

    let mut joined = String::new();
    let mut length = 0;
    for (shown, line) in lines.iter().enumerate() {
        let separator_len = if shown == 0 { 0 } else { separator.chars().count() };
        let line_len = line.chars().count();
        if length + separator_len + line_len > limit.saturating_sub(NOTE_RESERVE) {
            joined.push_str(&format!("\n…and {} more", lines.len() - shown));
            break;
        }
        if shown > 0 {
            joined.push_str(separator);
        }
        joined.push_str(line);
        length += separator_len + line_len;
    }
    joined
}
