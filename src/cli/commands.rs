use clap::{Parser, Subcommand};
use rusqlite::Connection;
use chrono::NaiveDate;
use anyhow::{Context, Result};
use log::debug;

use crate::config::Config;
use crate::db::DbConnection;
use crate::models::{FocusSession, MoodEnergy, Note, Priority, TaskDraft, TaskKind, MAX_FOCUS_MINUTES};
use crate::planner::{
    bucketize, daily_capacity, mood_label, plan_for_day, PlanSettings, Quadrant, RatingScale,
};
use crate::repo::{FocusRepo, MoodRepo, NoteRepo, TaskRepo};
use crate::cli::parser::{join_words, parse_note_edit_args, parse_task_args};
use crate::cli::output::{
    format_focus_stats, format_matrix, format_mood, format_note, format_note_list, format_plan,
    format_task_summary, format_task_table, sorted_by_score, task_json,
};
use crate::cli::error::{parse_rating, user_error, validate_id, validate_non_empty, validate_url};
use crate::utils::{format_minutes, local_today, parse_date_expr, parse_minutes};

/// Number of sessions shown under "Recent" in focus stats
const RECENT_FOCUS_SESSIONS: usize = 5;

#[derive(Parser)]
#[command(name = "studypulse")]
#[command(about = "StudyPulse - plan study tasks around today's mood and energy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Treat this date as today (YYYY-MM-DD, tomorrow, +3d, ...)
    #[arg(long, global = true, value_name = "DATE", allow_hyphen_values = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Title words and fields (e.g., "lab report course=CHEM due=+2d minutes=90")
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List open tasks with quadrant and score
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show task details and score breakdown
    Show {
        /// Task ID
        id: String,
    },
    /// Toggle task completion
    Done {
        /// Task ID
        id: String,
    },
    /// Permanently delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Mood and energy check-in
    Mood {
        #[command(subcommand)]
        subcommand: MoodCommands,
    },
    /// Show today's plan
    Plan {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show the Eisenhower matrix
    Matrix {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Focus sessions and break coins
    Focus {
        #[command(subcommand)]
        subcommand: FocusCommands,
    },
    /// Study notes and resource links
    Notes {
        #[command(subcommand)]
        subcommand: NotesCommands,
    },
}

#[derive(Subcommand)]
pub enum MoodCommands {
    /// Record today's mood and energy
    Set {
        /// Mood rating
        mood: String,
        /// Energy rating
        energy: String,
    },
    /// Show today's check-in and capacity
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum FocusCommands {
    /// Record a completed focus session (e.g., 25, 45m, 1h)
    Log {
        minutes: String,
    },
    /// Show break coins and recent sessions
    Stats {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum NotesCommands {
    /// Create a note
    Add {
        /// Note title
        title: String,
        /// Note content
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        content: Vec<String>,
    },
    /// List notes
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show a note with its resources
    Show {
        /// Note ID
        id: String,
    },
    /// Edit a note: title=<text> renames, remaining words replace the content
    Edit {
        /// Note ID
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Attach a resource link to a note
    Link {
        /// Note ID
        id: String,
        /// Resource URL (http or https)
        url: String,
        /// Optional description of the link
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        note: Vec<String>,
    },
    /// Delete a note and its resources
    Delete {
        /// Note ID
        id: String,
    },
}

/// State shared by every command of one invocation
struct CommandContext {
    conn: Connection,
    settings: PlanSettings,
    today: NaiveDate,
}

impl CommandContext {
    fn scale(&self) -> RatingScale {
        self.settings.scale
    }
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let config = Config::load()?;
    let today = match cli.today.as_deref() {
        Some(expr) => parse_date_expr(expr, local_today())
            .unwrap_or_else(|e| user_error(&format!("Invalid --today value: {}", e))),
        None => local_today(),
    };
    debug!("Using {} as today, {} scale", today, config.scale.as_str());

    let conn = DbConnection::connect(&config)
        .context("Failed to connect to database")?;
    let ctx = CommandContext {
        conn,
        settings: config.plan_settings(),
        today,
    };

    handle_command(cli.command, &ctx)
}

fn handle_command(command: Commands, ctx: &CommandContext) -> Result<()> {
    match command {
        Commands::Add { args } => handle_task_add(ctx, args),
        Commands::List { all, json } => handle_task_list(ctx, all, json),
        Commands::Show { id } => handle_task_show(ctx, &id),
        Commands::Done { id } => handle_task_done(ctx, &id),
        Commands::Delete { id } => handle_task_delete(ctx, &id),
        Commands::Mood { subcommand } => match subcommand {
            MoodCommands::Set { mood, energy } => handle_mood_set(ctx, &mood, &energy),
            MoodCommands::Show { json } => handle_mood_show(ctx, json),
        },
        Commands::Plan { json } => handle_plan(ctx, json),
        Commands::Matrix { json } => handle_matrix(ctx, json),
        Commands::Focus { subcommand } => match subcommand {
            FocusCommands::Log { minutes } => handle_focus_log(ctx, &minutes),
            FocusCommands::Stats { json } => handle_focus_stats(ctx, json),
        },
        Commands::Notes { subcommand } => handle_notes(ctx, subcommand),
    }
}

fn parse_id_or_exit(id: &str, kind: &str) -> i64 {
    validate_id(id, kind).unwrap_or_else(|e| user_error(&e))
}

fn handle_task_add(ctx: &CommandContext, args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        user_error("Task title is required");
    }

    let parsed = parse_task_args(args).unwrap_or_else(|e| user_error(&e.to_string()));
    if parsed.title.is_empty() {
        user_error("Task title is required");
    }
    let title = join_words(&parsed.title);

    let course = parsed.course
        .unwrap_or_else(|| user_error("Course is required (course=<name>)"));
    let due = parsed.due
        .unwrap_or_else(|| user_error("Due date is required (due=<date>)"));
    let due_date = parse_date_expr(&due, ctx.today)?;

    let scale = ctx.scale();
    let mut draft = TaskDraft::new(&course, &title, due_date, scale);

    if let Some(minutes) = parsed.minutes {
        draft.minutes = parse_minutes(&minutes)?;
    }
    if let Some(kind) = parsed.kind {
        draft.kind = TaskKind::from_str(&kind).unwrap_or_else(|| {
            let valid: Vec<&str> = TaskKind::ALL.iter().map(|k| k.as_str()).collect();
            user_error(&format!("Invalid type '{}'. Valid types: {}", kind, valid.join(", ")))
        });
    }
    if let Some(priority) = parsed.priority {
        draft.priority = Priority::from_str(&priority).unwrap_or_else(|| {
            let valid: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
            user_error(&format!("Invalid priority '{}'. Valid priorities: {}", priority, valid.join(", ")))
        });
    }
    if let Some(urgency) = parsed.urgency {
        draft.urgency = parse_rating(&urgency, "urgency", scale).unwrap_or_else(|e| user_error(&e));
    }
    if let Some(importance) = parsed.importance {
        draft.importance = parse_rating(&importance, "importance", scale).unwrap_or_else(|e| user_error(&e));
    }

    let task = draft.into_task(scale)?;
    let created = TaskRepo::create(&ctx.conn, &task, scale)
        .context("Failed to create task")?;

    println!(
        "Created task {}: {}",
        created.id.unwrap_or_default(),
        created.title
    );
    Ok(())
}

fn handle_task_list(ctx: &CommandContext, all: bool, json: bool) -> Result<()> {
    let tasks = TaskRepo::list_all(&ctx.conn, ctx.scale())
        .context("Failed to list tasks")?;
    let shown: Vec<_> = tasks.iter().filter(|t| all || !t.completed).collect();

    if json {
        let json_tasks: Vec<serde_json::Value> = shown
            .iter()
            .map(|t| task_json(t, ctx.today, ctx.scale()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_tasks)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    print!("{}", format_task_table(&shown, ctx.today, ctx.scale()));
    Ok(())
}

fn handle_task_show(ctx: &CommandContext, id: &str) -> Result<()> {
    let task_id = parse_id_or_exit(id, "task");
    let task = TaskRepo::get_by_id(&ctx.conn, task_id, ctx.scale())?
        .unwrap_or_else(|| user_error(&format!("Task {} not found", task_id)));
    print!("{}", format_task_summary(&task, ctx.today, ctx.scale()));
    Ok(())
}

fn handle_task_done(ctx: &CommandContext, id: &str) -> Result<()> {
    let task_id = parse_id_or_exit(id, "task");
    let task = TaskRepo::toggle_completed(&ctx.conn, task_id, ctx.scale())?
        .unwrap_or_else(|| user_error(&format!("Task {} not found", task_id)));
    if task.completed {
        println!("Completed task {}: {}", task_id, task.title);
    } else {
        println!("Reopened task {}: {}", task_id, task.title);
    }
    Ok(())
}

fn handle_task_delete(ctx: &CommandContext, id: &str) -> Result<()> {
    let task_id = parse_id_or_exit(id, "task");
    if !TaskRepo::delete(&ctx.conn, task_id)? {
        user_error(&format!("Task {} not found", task_id));
    }
    println!("Deleted task {}", task_id);
    Ok(())
}

fn handle_mood_set(ctx: &CommandContext, mood: &str, energy: &str) -> Result<()> {
    let scale = ctx.scale();
    let mood = parse_rating(mood, "mood", scale).unwrap_or_else(|e| user_error(&e));
    let energy = parse_rating(energy, "energy", scale).unwrap_or_else(|e| user_error(&e));

    let record = MoodEnergy::new(ctx.today, mood, energy);
    record.validate(scale)?;
    MoodRepo::save(&ctx.conn, &record, scale)?;

    print!("{}", format_mood(&record, true, scale));
    Ok(())
}

fn handle_mood_show(ctx: &CommandContext, json: bool) -> Result<()> {
    let scale = ctx.scale();
    let saved = MoodRepo::get(&ctx.conn, ctx.today, scale)?;
    let logged = saved.is_some();
    let record = saved.unwrap_or_else(|| MoodEnergy::neutral(ctx.today, scale));

    if json {
        let (_, label) = mood_label(record.mood, scale);
        let value = serde_json::json!({
            "date": record.date.format("%Y-%m-%d").to_string(),
            "mood": record.mood,
            "energy": record.energy,
            "label": label,
            "logged": logged,
            "capacity_minutes": daily_capacity(record.mood, record.energy, scale),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", format_mood(&record, logged, scale));
    Ok(())
}

fn handle_plan(ctx: &CommandContext, json: bool) -> Result<()> {
    let tasks = TaskRepo::list_all(&ctx.conn, ctx.scale())
        .context("Failed to list tasks")?;
    let mood = MoodRepo::get_or_neutral(&ctx.conn, ctx.today, ctx.scale())?;
    let plan = plan_for_day(&tasks, &mood, ctx.today, ctx.settings);
    debug!(
        "Planned {} tasks, {}m of {}m",
        plan.tasks.len(),
        plan.scheduled_minutes,
        plan.capacity_minutes
    );

    if json {
        let value = serde_json::json!({
            "date": plan.date.format("%Y-%m-%d").to_string(),
            "mood": plan.mood,
            "energy": plan.energy,
            "capacity_minutes": plan.capacity_minutes,
            "scheduled_minutes": plan.scheduled_minutes,
            "tasks": plan.tasks.iter().map(|t| task_json(t, ctx.today, ctx.scale())).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", format_plan(&plan, ctx.scale()));
    Ok(())
}

fn handle_matrix(ctx: &CommandContext, json: bool) -> Result<()> {
    let tasks = TaskRepo::list_all(&ctx.conn, ctx.scale())
        .context("Failed to list tasks")?;
    let buckets = bucketize(&tasks, ctx.scale());

    if json {
        let mut map = serde_json::Map::new();
        for q in Quadrant::ALL {
            let bucket: Vec<serde_json::Value> = sorted_by_score(buckets.get(q), ctx.today, ctx.scale())
                .into_iter()
                .map(|t| task_json(t, ctx.today, ctx.scale()))
                .collect();
            map.insert(q.code().to_string(), serde_json::Value::Array(bucket));
        }
        println!("{}", serde_json::to_string_pretty(&serde_json::Value::Object(map))?);
        return Ok(());
    }

    print!("{}", format_matrix(&buckets, ctx.today, ctx.scale()));
    Ok(())
}

fn handle_focus_log(ctx: &CommandContext, minutes: &str) -> Result<()> {
    let minutes = parse_minutes(minutes)?;
    if minutes > MAX_FOCUS_MINUTES {
        user_error(&format!(
            "Focus session must be at most {} (got {})",
            format_minutes(MAX_FOCUS_MINUTES),
            format_minutes(minutes)
        ));
    }
    let session = FocusSession::new(minutes, chrono::Utc::now().timestamp());
    let created = FocusRepo::create(&ctx.conn, &session)?;
    let balance = FocusRepo::total_coins(&ctx.conn)?;

    println!(
        "Logged {} focus session: +{} break coins (balance: {})",
        format_minutes(created.minutes),
        created.break_coins,
        balance
    );
    Ok(())
}

fn handle_focus_stats(ctx: &CommandContext, json: bool) -> Result<()> {
    let total_coins = FocusRepo::total_coins(&ctx.conn)?;
    let sessions = FocusRepo::list_all(&ctx.conn)?;
    let recent = FocusRepo::recent(&ctx.conn, RECENT_FOCUS_SESSIONS)?;

    if json {
        let value = serde_json::json!({
            "break_coins": total_coins,
            "session_count": sessions.len(),
            "total_minutes": sessions.iter().map(|s| u64::from(s.minutes)).sum::<u64>(),
            "recent": recent,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", format_focus_stats(total_coins, &sessions, &recent));
    Ok(())
}

fn handle_notes(ctx: &CommandContext, cmd: NotesCommands) -> Result<()> {
    match cmd {
        NotesCommands::Add { title, content } => {
            validate_non_empty(&title, "Note title").unwrap_or_else(|e| user_error(&e));
            let note = Note::new(title.trim().to_string(), join_words(&content));
            let created = NoteRepo::create(&ctx.conn, &note)?;
            println!("Created note {}: {}", created.id.unwrap_or_default(), created.title);
        }
        NotesCommands::List { json } => {
            let notes = NoteRepo::list_all(&ctx.conn)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notes)?);
            } else if notes.is_empty() {
                println!("No notes found.");
            } else {
                print!("{}", format_note_list(&notes));
            }
        }
        NotesCommands::Show { id } => {
            let note_id = parse_id_or_exit(&id, "note");
            let note = NoteRepo::get_by_id(&ctx.conn, note_id)?
                .unwrap_or_else(|| user_error(&format!("Note {} not found", note_id)));
            print!("{}", format_note(&note));
        }
        NotesCommands::Edit { id, args } => {
            let note_id = parse_id_or_exit(&id, "note");
            let edit = parse_note_edit_args(&args);
            if edit.title.is_none() && edit.content.is_none() {
                user_error("Nothing to change. Use title=<text> and/or new content words.");
            }
            if let Some(title) = &edit.title {
                validate_non_empty(title, "Note title").unwrap_or_else(|e| user_error(&e));
            }
            NoteRepo::update(&ctx.conn, note_id, edit.title.as_deref().map(str::trim), edit.content.as_deref())?
                .unwrap_or_else(|| user_error(&format!("Note {} not found", note_id)));
            println!("Updated note {}", note_id);
        }
        NotesCommands::Link { id, url, note } => {
            let note_id = parse_id_or_exit(&id, "note");
            validate_url(&url).unwrap_or_else(|e| user_error(&e));
            if NoteRepo::get_by_id(&ctx.conn, note_id)?.is_none() {
                user_error(&format!("Note {} not found", note_id));
            }
            NoteRepo::add_resource(&ctx.conn, note_id, url.trim(), &join_words(&note))?;
            println!("Linked {} to note {}", url.trim(), note_id);
        }
        NotesCommands::Delete { id } => {
            let note_id = parse_id_or_exit(&id, "note");
            if !NoteRepo::delete(&ctx.conn, note_id)? {
                user_error(&format!("Note {} not found", note_id));
            }
            println!("Deleted note {}", note_id);
        }
    }
    Ok(())
}
