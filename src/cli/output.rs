// Output formatting utilities

use chrono::{Local, NaiveDate, TimeZone};
use std::io::IsTerminal;

use crate::models::{FocusSession, MoodEnergy, Note, Task};
use crate::planner::{
    daily_capacity, mood_label, priority_score, quadrant, score_breakdown, DailyPlan, Quadrant,
    QuadrantBuckets, RatingScale,
};
use crate::utils::format_minutes;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn quadrant_color(q: Quadrant) -> &'static str {
    match q {
        Quadrant::DoFirst => ANSI_FG_RED,
        Quadrant::Schedule => ANSI_FG_BLUE,
        Quadrant::Delegate => ANSI_FG_YELLOW,
        Quadrant::Later => ANSI_FG_GREEN,
    }
}

fn paint(text: &str, color: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", color, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept)
}

/// Format timestamp for display
pub fn format_timestamp(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Due date relative to today (e.g., "today", "in 3 days", "2 days ago")
pub fn format_relative_due(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return "-".to_string();
    };
    let days_diff = (due - today).num_days();

    match days_diff {
        d if d < -30 => "overdue".to_string(),
        -1 => "yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        d if d <= 365 => format!("in {} days", d),
        _ => due.format("%Y-%m-%d").to_string(),
    }
}

fn format_due_date(due: Option<NaiveDate>) -> String {
    due.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "(invalid)".to_string())
}

/// Task as a JSON object, with derived quadrant and score
pub fn task_json(task: &Task, today: NaiveDate, scale: RatingScale) -> serde_json::Value {
    serde_json::json!({
        "id": task.id,
        "uuid": task.uuid,
        "course": task.course,
        "title": task.title,
        "due_date": task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        "minutes": task.minutes,
        "type": task.kind.as_str(),
        "priority": task.priority.as_str(),
        "urgency": task.urgency,
        "importance": task.importance,
        "completed": task.completed,
        "quadrant": quadrant(task, scale).code(),
        "score": priority_score(task, today, scale),
    })
}

/// Task table for `list`
pub fn format_task_table(tasks: &[&Task], today: NaiveDate, scale: RatingScale) -> String {
    render_task_table(tasks, today, scale, get_terminal_width(), is_tty())
}

fn render_task_table(
    tasks: &[&Task],
    today: NaiveDate,
    scale: RatingScale,
    width: usize,
    is_tty: bool,
) -> String {
    let id_width = tasks
        .iter()
        .map(|t| t.id.unwrap_or(0).to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let course_width = tasks
        .iter()
        .map(|t| t.course.chars().count())
        .max()
        .unwrap_or(6)
        .clamp(6, 12);
    // Fixed columns: ID, Course, Due(12), Time(7), Priority(9), Q(2), Score(5), Done(4) and gaps
    let fixed = id_width + course_width + 12 + 7 + 9 + 2 + 5 + 4 + 8 * 2;
    let title_width = width.saturating_sub(fixed).max(12);

    let mut output = String::new();
    let header = format!(
        "{:<id_w$}  {:<course_w$}  {:<title_w$}  {:<12}  {:>7}  {:<9}  {:<2}  {:>5}  {:<4}",
        "ID", "Course", "Title", "Due", "Time", "Priority", "Q", "Score", "Done",
        id_w = id_width,
        course_w = course_width,
        title_w = title_width,
    );
    output.push_str(&bold_if_tty(header.trim_end(), is_tty));
    output.push('\n');

    for task in tasks {
        let q = quadrant(task, scale);
        let line = format!(
            "{:<id_w$}  {:<course_w$}  {:<title_w$}  {:<12}  {:>7}  {:<9}  {:<2}  {:>5.1}  {:<4}",
            task.id.unwrap_or(0),
            truncate(&task.course, course_width),
            truncate(&task.title, title_width),
            format_relative_due(task.due_date, today),
            format_minutes(task.minutes),
            task.priority.as_str(),
            q.code(),
            priority_score(task, today, scale),
            if task.completed { "x" } else { "" },
            id_w = id_width,
            course_w = course_width,
            title_w = title_width,
        );
        let line = line.trim_end();
        if task.completed {
            output.push_str(&paint(line, ANSI_DIM, is_tty));
        } else {
            output.push_str(&paint(line, quadrant_color(q), is_tty));
        }
        output.push('\n');
    }

    output
}

/// Detailed view of one task, including how its score is made up
pub fn format_task_summary(task: &Task, today: NaiveDate, scale: RatingScale) -> String {
    let mut output = String::new();

    let header = format!(
        "Task {}: {}",
        task.id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string()),
        task.title
    );
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"=".repeat(header.chars().count().max(40)));
    output.push_str("\n\n");

    output.push_str(&format!("Status:      {}\n", if task.completed { "completed" } else { "open" }));
    output.push_str(&format!("Created:     {}\n\n", format_timestamp(task.created_ts)));

    output.push_str("Attributes:\n");
    output.push_str(&format!("  Course:      {}\n", task.course));
    output.push_str(&format!(
        "  Due:         {} ({})\n",
        format_due_date(task.due_date),
        format_relative_due(task.due_date, today)
    ));
    output.push_str(&format!("  Estimate:    {}\n", format_minutes(task.minutes)));
    output.push_str(&format!("  Type:        {}\n", task.kind.as_str()));
    output.push_str(&format!("  Priority:    {}\n", task.priority.label()));
    output.push_str(&format!("  Urgency:     {}/{}\n", task.urgency, scale.max()));
    output.push_str(&format!("  Importance:  {}/{}\n", task.importance, scale.max()));

    let q = quadrant(task, scale);
    output.push_str(&format!("  Quadrant:    {} {} ({})\n\n", q.code(), q.title(), q.description()));

    let breakdown = score_breakdown(task, today, scale);
    output.push_str("Score:\n");
    output.push_str(&format!("  Priority:    {:>5.1}\n", breakdown.priority_part));
    output.push_str(&format!("  Urgency:     {:>5.1}\n", breakdown.urgency_level));
    output.push_str(&format!("  Importance:  {:>5.1}\n", breakdown.importance_level));
    output.push_str(&format!("  Deadline:    {:>5.1}\n", breakdown.deadline_factor as f64));
    output.push_str(&format!("  Total:       {:>5.1}\n", breakdown.total()));

    output
}

fn plan_line(index: usize, task: &Task, today: NaiveDate, scale: RatingScale, is_tty: bool) -> String {
    let q = quadrant(task, scale);
    let line = format!(
        "{:>2}. [{}] {} ({}) - {}, due {}",
        index + 1,
        q.code(),
        task.title,
        task.course,
        format_minutes(task.minutes),
        format_relative_due(task.due_date, today)
    );
    paint(&line, quadrant_color(q), is_tty)
}

/// Today's plan
pub fn format_plan(plan: &DailyPlan, scale: RatingScale) -> String {
    let is_tty = is_tty();
    let mut output = String::new();
    let (emoji, label) = mood_label(plan.mood, scale);

    output.push_str(&bold_if_tty(&format!("Plan for {}", plan.date.format("%Y-%m-%d")), is_tty));
    output.push('\n');
    output.push_str(&format!(
        "Mood {} / Energy {} {} {}\n",
        plan.mood, plan.energy, emoji, label
    ));
    output.push_str(&format!("Capacity: {}\n\n", format_minutes(plan.capacity_minutes)));

    if plan.tasks.is_empty() {
        output.push_str("Nothing to plan today.\n");
        return output;
    }

    for (index, task) in plan.tasks.iter().enumerate() {
        output.push_str(&plan_line(index, task, plan.date, scale, is_tty));
        output.push('\n');
    }
    output.push_str(&format!(
        "\nScheduled: {} of {}\n",
        format_minutes(plan.scheduled_minutes),
        format_minutes(plan.capacity_minutes)
    ));

    output
}

/// Four quadrant buckets, each sorted by score
pub fn format_matrix(buckets: &QuadrantBuckets, today: NaiveDate, scale: RatingScale) -> String {
    let is_tty = is_tty();
    let mut output = String::new();

    for (q, tasks) in buckets.iter() {
        let heading = format!("{} {} ({}) [{}]", q.code(), q.title(), q.description(), tasks.len());
        output.push_str(&paint(&bold_if_tty(&heading, is_tty), quadrant_color(q), is_tty));
        output.push('\n');

        if tasks.is_empty() {
            output.push_str("  (none)\n");
        }
        for task in sorted_by_score(tasks, today, scale) {
            output.push_str(&format!(
                "  {:>3}  {:<30}  {:<10}  {:>5.1}\n",
                task.id.unwrap_or(0),
                truncate(&task.title, 30),
                truncate(&task.course, 10),
                priority_score(task, today, scale)
            ));
        }
        output.push('\n');
    }

    output
}

/// Bucket contents in descending score order, equal scores keep input order
pub fn sorted_by_score<'a>(tasks: &[&'a Task], today: NaiveDate, scale: RatingScale) -> Vec<&'a Task> {
    let mut scored: Vec<(f64, &'a Task)> = tasks
        .iter()
        .map(|t| (priority_score(t, today, scale), *t))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, t)| t).collect()
}

/// Mood check-in and the capacity it implies
pub fn format_mood(record: &MoodEnergy, logged: bool, scale: RatingScale) -> String {
    let (emoji, label) = mood_label(record.mood, scale);
    let capacity = daily_capacity(record.mood, record.energy, scale);
    let mut output = format!(
        "{}: mood {} / energy {} {} {}\nCapacity: {}\n",
        record.date.format("%Y-%m-%d"),
        record.mood,
        record.energy,
        emoji,
        label,
        format_minutes(capacity)
    );
    if !logged {
        output.push_str("(no check-in for this date, using neutral defaults)\n");
    }
    output
}

/// Break coin balance and recent sessions
pub fn format_focus_stats(total_coins: u32, sessions: &[FocusSession], recent: &[FocusSession]) -> String {
    let total_minutes = sessions.iter().fold(0u32, |total, s| total.saturating_add(s.minutes));
    let mut output = String::new();
    output.push_str(&format!("Break coins: {}\n", total_coins));
    output.push_str(&format!(
        "Sessions:    {} ({} focused)\n",
        sessions.len(),
        format_minutes(total_minutes)
    ));

    if !recent.is_empty() {
        output.push_str("\nRecent:\n");
        for session in recent {
            output.push_str(&format!(
                "  {}  {:>7}  +{} coins\n",
                format_timestamp(session.completed_ts),
                format_minutes(session.minutes),
                session.break_coins
            ));
        }
    }
    output
}

pub fn format_note(note: &Note) -> String {
    let mut output = String::new();
    let header = format!(
        "Note {}: {}",
        note.id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string()),
        note.title
    );
    output.push_str(&header);
    output.push('\n');
    output.push_str(&"=".repeat(header.chars().count().max(40)));
    output.push('\n');
    output.push_str(&format!("Modified: {}\n\n", format_timestamp(note.modified_ts)));

    if note.content.is_empty() {
        output.push_str("(no content)\n");
    } else {
        output.push_str(&note.content);
        output.push('\n');
    }

    if !note.resources.is_empty() {
        output.push_str("\nResources:\n");
        for resource in &note.resources {
            if resource.note.is_empty() {
                output.push_str(&format!("  - {}\n", resource.url));
            } else {
                output.push_str(&format!("  - {} ({})\n", resource.url, resource.note));
            }
        }
    }
    output
}

pub fn format_note_list(notes: &[Note]) -> String {
    let width = get_terminal_width();
    let title_width = width.saturating_sub(30).max(12);
    let mut output = String::new();
    output.push_str(&bold_if_tty(&format!("{:<4}  {:<16}  {:>5}  Title", "ID", "Modified", "Links"), is_tty()));
    output.push('\n');
    for note in notes {
        output.push_str(&format!(
            "{:<4}  {:<16}  {:>5}  {}\n",
            note.id.unwrap_or(0),
            format_timestamp(note.modified_ts),
            note.resources.len(),
            truncate(&note.title, title_width)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn task(id: i64, title: &str, days: i64) -> Task {
        let mut task = Task::new(
            "BIO".to_string(),
            title.to_string(),
            today() + chrono::Duration::days(days),
            45,
        );
        task.id = Some(id);
        task
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a lon...");
        assert_eq!(truncate("héllo wörld", 6), "hél...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_format_relative_due() {
        let t = today();
        assert_eq!(format_relative_due(Some(t), t), "today");
        assert_eq!(format_relative_due(Some(t + chrono::Duration::days(1)), t), "tomorrow");
        assert_eq!(format_relative_due(Some(t + chrono::Duration::days(5)), t), "in 5 days");
        assert_eq!(format_relative_due(Some(t - chrono::Duration::days(1)), t), "yesterday");
        assert_eq!(format_relative_due(Some(t - chrono::Duration::days(4)), t), "4 days ago");
        assert_eq!(format_relative_due(Some(t - chrono::Duration::days(60)), t), "overdue");
        assert_eq!(format_relative_due(None, t), "-");
    }

    #[test]
    fn test_task_table_plain() {
        let a = task(1, "Read chapter 7", 2);
        let mut b = task(12, "Lab write-up", 0);
        b.completed = true;
        let table = render_task_table(&[&a, &b], today(), RatingScale::Percent, 100, false);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Read chapter 7"));
        assert!(lines[1].contains("in 2 days"));
        assert!(lines[1].contains("45m"));
        assert!(lines[2].starts_with("12"));
        assert!(lines[2].ends_with('x'));
        assert!(!table.contains('\x1b'));
    }

    #[test]
    fn test_task_summary_shows_breakdown() {
        let mut t = task(3, "Essay draft", 0);
        t.priority = Priority::High;
        t.urgency = 80;
        t.importance = 60;
        let summary = format_task_summary(&t, today(), RatingScale::Percent);

        assert!(summary.starts_with("Task 3: Essay draft"));
        assert!(summary.contains("Q1 Do First"));
        assert!(summary.contains("Priority:      8.0"));
        assert!(summary.contains("Deadline:      3.0"));
        // 8 + 4 + 3 + 3
        assert!(summary.contains("Total:        18.0"));
    }

    #[test]
    fn test_task_json_fields() {
        let t = task(4, "Quiz prep", 10);
        let value = task_json(&t, today(), RatingScale::Percent);
        assert_eq!(value["id"], 4);
        assert_eq!(value["quadrant"], "Q1");
        assert_eq!(value["due_date"], "2026-03-20");
        assert_eq!(value["type"], "homework");
        assert_eq!(value["score"], 11.0);
    }

    #[test]
    fn test_sorted_by_score_is_stable() {
        let a = task(1, "first", 10);
        let b = task(2, "second", 10);
        let c = task(3, "urgent", 0);
        let sorted = sorted_by_score(&[&a, &b, &c], today(), RatingScale::Percent);
        let ids: Vec<i64> = sorted.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
