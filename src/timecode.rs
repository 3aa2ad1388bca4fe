//! Conversions between seconds and display timestamps.

use anyhow::{ensure, Context, Result};

/// Render seconds as `MM:SS`, or `H:MM:SS` once a full hour has elapsed.
///
/// Fractional seconds are floored. Negative and non-finite input renders as `00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parse `SS`, `MM:SS` or `H:MM:SS` (fractional seconds allowed) into seconds.
pub fn parse_timestamp(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if !raw.contains(':') {
        let seconds: f64 = raw
            .parse()
            .with_context(|| format!("Failed to parse seconds value '{}'", raw))?;
        ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "Time values must be non-negative"
        );
        return Ok(seconds);
    }

    let parts: Vec<&str> = raw.split(':').collect();
    ensure!(
        (2..=3).contains(&parts.len()),
        "Time format must be MM:SS or H:MM:SS"
    );

    let seconds_raw = parts[parts.len() - 1];
    let minutes_raw = parts[parts.len() - 2];
    let seconds = seconds_raw
        .parse::<f64>()
        .with_context(|| format!("Invalid seconds component '{}'", seconds_raw))?;
    let minutes = minutes_raw
        .parse::<u64>()
        .with_context(|| format!("Invalid minutes component '{}'", minutes_raw))?;
    ensure!(
        seconds.is_finite() && seconds >= 0.0,
        "Seconds must be non-negative"
    );

    let hours = if parts.len() == 3 {
        parts[0]
            .parse::<u64>()
            .with_context(|| format!("Invalid hours component '{}'", parts[0]))?
    } else {
        0
    };

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}
