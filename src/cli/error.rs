// Error handling utilities for consistent error messages and exit codes

use std::process;

use crate::planner::RatingScale;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a task or note ID (positive integer)
pub fn validate_id(id_str: &str, kind: &str) -> Result<i64, String> {
    id_str.parse::<i64>()
        .map_err(|_| format!("Invalid {} ID: '{}'. {} ID must be a number.", kind, id_str, capitalize(kind)))
        .and_then(|id| {
            if id > 0 {
                Ok(id)
            } else {
                Err(format!("Invalid {} ID: {}. {} ID must be positive.", kind, id, capitalize(kind)))
            }
        })
}

/// Parse a rating argument and check it against the active scale
pub fn parse_rating(value: &str, field_name: &str, scale: RatingScale) -> Result<u32, String> {
    let rating = value.trim().parse::<u32>()
        .map_err(|_| format!("Invalid {}: '{}'. Use a whole number from 0 to {}.", field_name, value, scale.max()))?;
    if rating > scale.max() {
        return Err(format!("{} must be between 0 and {} (got {})", field_name, scale.max(), rating));
    }
    Ok(rating)
}

/// Validate a resource URL (http or https)
pub fn validate_url(url: &str) -> Result<(), String> {
    let lower = url.trim().to_lowercase();
    let rest = lower.strip_prefix("https://").or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => Err(format!("Invalid URL: '{}'. Links must start with http:// or https://.", url)),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
