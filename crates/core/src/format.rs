//! Small display formatting helpers shared by the diagnostic surfaces.

/// Characters of the token kept visible at the start when masking.
const MASK_PREFIX: usize = 6;
/// Characters of the token kept visible at the end when masking.
const MASK_SUFFIX: usize = 4;

/// Format a byte count for display: `"0 Bytes"`, `"1.5 KB"`, `"2 MB"`.
/// Two decimal places with trailing zeros trimmed; anything at or above
/// the GB scale stays in GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut formatted = format!("{value:.2}");
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }

    format!("{formatted} {}", UNITS[exponent])
}

/// Mask an access token for diagnostic display, keeping the first six and
/// last four characters visible. Tokens too short to mask meaningfully are
/// fully redacted.
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= MASK_PREFIX + MASK_SUFFIX {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(MASK_PREFIX).collect();
    let suffix: String = token
        .chars()
        .skip(token.chars().count() - MASK_SUFFIX)
        .collect();
    format!("{prefix}...{suffix}")
}

/// Format the time remaining until an expiry instant, given the remaining
/// milliseconds: `"Expired"`, `"12 minute(s) remaining"`, or
/// `"2 hour(s) 5 minute(s) remaining"`.
pub fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms < 0 {
        return "Expired".to_string();
    }

    let minutes = remaining_ms / 60_000;
    if minutes < 60 {
        format!("{minutes} minute(s) remaining")
    } else {
        let hours = minutes / 60;
        let rest = minutes % 60;
        format!("{hours} hour(s) {rest} minute(s) remaining")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
