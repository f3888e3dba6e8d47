// Date expression parsing

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

/// The local calendar date right now
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a date expression relative to `today`
///
/// Supports absolute dates (2026-01-10), `today`, `tomorrow`, `yesterday`
/// and offsets such as `+3d`, `-1d`, `+2w`.
pub fn parse_date_expr(expr: &str, today: NaiveDate) -> Result<NaiveDate> {
    let expr = expr.trim();

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Ok(date);
    }

    match expr.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return offset_days(today, 1, expr),
        "yesterday" => return offset_days(today, -1, expr),
        _ => {}
    }

    if let Some(sign) = expr.chars().next().filter(|c| *c == '+' || *c == '-') {
        let body = &expr[1..];
        let unit = body.chars().last().unwrap_or(' ');
        let count: i64 = body[..body.len() - unit.len_utf8().min(body.len())]
            .parse()
            .with_context(|| format!("Invalid date offset: {}", expr))?;
        let days = match unit {
            'd' => Some(count),
            'w' => count.checked_mul(7),
            _ => anyhow::bail!("Invalid date offset unit in '{}'. Use d (days) or w (weeks).", expr),
        };
        let days = days
            .and_then(|days| if sign == '-' { days.checked_neg() } else { Some(days) })
            .ok_or_else(|| anyhow::anyhow!("Invalid date offset: {}", expr))?;
        return offset_days(today, days, expr);
    }

    anyhow::bail!(
        "Unsupported date expression: {}. Use YYYY-MM-DD, today, tomorrow, or +Nd.",
        expr
    )
}

fn offset_days(today: NaiveDate, days: i64, expr: &str) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|offset| today.checked_add_signed(offset))
        .ok_or_else(|| anyhow::anyhow!("Invalid date offset: {} is out of range", expr))
}

/// Parse a stored ISO date, `None` if the value is malformed
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
