// Minute duration parsing and formatting

use anyhow::Result;

/// Parse a duration expression and return whole minutes
/// Accepts a bare number of minutes (90) or unit forms: 45m, 2h, 1h30m
pub fn parse_minutes(expr: &str) -> Result<u32> {
    let expr = expr.trim();
    if let Ok(minutes) = expr.parse::<u32>() {
        if minutes == 0 {
            anyhow::bail!("Duration must be greater than 0");
        }
        return Ok(minutes);
    }

    let mut total = 0u32;
    let mut remaining = expr;

    while !remaining.is_empty() {
        let unit_pos = remaining
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| anyhow::anyhow!("Invalid duration format: {}", expr))?;
        let value: u32 = remaining[..unit_pos]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration format: {}", expr))?;
        let unit = remaining[unit_pos..].chars().next().unwrap_or(' ');
        let minutes = match unit {
            'h' => value.checked_mul(60),
            'm' => Some(value),
            _ => anyhow::bail!("Invalid duration format: {}", expr),
        };
        total = minutes
            .and_then(|minutes| total.checked_add(minutes))
            .ok_or_else(|| anyhow::anyhow!("Invalid duration: {} is too large", expr))?;
        remaining = &remaining[unit_pos + unit.len_utf8()..];
    }

    if total == 0 {
        anyhow::bail!("Duration must be greater than 0");
    }

    Ok(total)
}

/// Format minutes for display (e.g., "45m", "2h", "1h 30m")
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    let remaining = minutes % 60;
    if remaining == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, remaining)
    }
}
