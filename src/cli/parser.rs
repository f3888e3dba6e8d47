// CLI parsing utilities for task and note commands

use thiserror::Error;

use crate::utils::fuzzy::closest_match;

/// Parsed task arguments from command line
/// Field values are kept as raw strings; the command handler interprets them.
#[derive(Debug, Default)]
pub struct ParsedTaskArgs {
    pub title: Vec<String>,
    pub course: Option<String>,
    pub due: Option<String>,
    pub minutes: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub urgency: Option<String>,
    pub importance: Option<String>,
}

/// Field token errors
#[derive(Debug, Error)]
pub enum FieldParseError {
    #[error("Unrecognized field name '{field}'\n  Did you mean '{suggestion}'?")]
    InvalidFieldName {
        field: String,
        suggestion: String,
    },
    #[error("Field '{field}' cannot be set directly.\n  {hint}")]
    ReadOnlyField {
        field: String,
        hint: String,
    },
    #[error("Unrecognized field token '{token}'\n  If this is meant to be part of the title, remove the equals sign or quote the entire title.")]
    UnknownFieldToken {
        token: String,
    },
    #[error("Field '{field}' needs a value")]
    EmptyValue {
        field: String,
    },
}

/// Valid field names (exact match only, no abbreviations)
const FIELD_NAMES: &[&str] = &[
    "course",
    "due",
    "minutes",
    "type",
    "priority",
    "urgency",
    "importance",
];

/// Fields users may try to set but cannot
/// These exist to give helpful error messages
const READ_ONLY_FIELDS: &[&str] = &[
    "id",
    "uuid",
    "created",
    "completed",
];

fn get_read_only_hint(field: &str) -> String {
    match field.to_lowercase().as_str() {
        "completed" => "Use 'studypulse done <id>' to toggle completion.".to_string(),
        "created" => "Created timestamp is set automatically and cannot be changed.".to_string(),
        "id" | "uuid" => "Task IDs are assigned automatically and cannot be changed.".to_string(),
        _ => "This field is read-only.".to_string(),
    }
}

/// Split a `field=value` token; `None` if the token is title text
fn parse_field_token(token: &str) -> Result<Option<(String, String)>, FieldParseError> {
    let Some((field, value)) = token.split_once('=') else {
        return Ok(None);
    };

    if READ_ONLY_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(field)) {
        return Err(FieldParseError::ReadOnlyField {
            field: field.to_string(),
            hint: get_read_only_hint(field),
        });
    }

    if FIELD_NAMES.contains(&field) {
        if value.trim().is_empty() {
            return Err(FieldParseError::EmptyValue { field: field.to_string() });
        }
        return Ok(Some((field.to_string(), value.to_string())));
    }

    // Only word-like names are treated as attempted fields; "1+1=2" stays title text
    let looks_like_field = field.len() >= 2
        && field.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '.');
    if !looks_like_field {
        return Ok(None);
    }

    if let Some(suggestion) = closest_match(field, FIELD_NAMES, 2) {
        return Err(FieldParseError::InvalidFieldName {
            field: field.to_string(),
            suggestion: suggestion.to_string(),
        });
    }

    Err(FieldParseError::UnknownFieldToken { token: token.to_string() })
}

/// Parse task add arguments
/// Title is every token that is not a field token; fields can appear anywhere.
pub fn parse_task_args(args: Vec<String>) -> Result<ParsedTaskArgs, FieldParseError> {
    let mut parsed = ParsedTaskArgs::default();

    for arg in args {
        match parse_field_token(&arg)? {
            Some((field, value)) => match field.as_str() {
                "course" => parsed.course = Some(value),
                "due" => parsed.due = Some(value),
                "minutes" => parsed.minutes = Some(value),
                "type" => parsed.kind = Some(value),
                "priority" => parsed.priority = Some(value),
                "urgency" => parsed.urgency = Some(value),
                "importance" => parsed.importance = Some(value),
                _ => unreachable!("field list and match arms out of sync"),
            },
            None => parsed.title.push(arg),
        }
    }

    Ok(parsed)
}

/// Parsed `notes edit` arguments
#[derive(Debug, Default, PartialEq)]
pub struct ParsedNoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// `title=<text>` sets the title; remaining words replace the content
pub fn parse_note_edit_args(args: &[String]) -> ParsedNoteEdit {
    let mut edit = ParsedNoteEdit::default();
    let mut content_parts = Vec::new();

    for arg in args {
        match arg.strip_prefix("title=") {
            Some(title) => edit.title = Some(title.to_string()),
            None => content_parts.push(arg.as_str()),
        }
    }

    if !content_parts.is_empty() {
        edit.content = Some(join_words(&content_parts));
    }
    edit
}

/// Join words into a single string
pub fn join_words<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|p| p.as_ref()).collect::<Vec<_>>().join(" ")
}
