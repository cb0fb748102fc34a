//! Command-line driver for the todo core.
//!
//! # Responsibility
//! - Run list intents against the same on-device store the app uses.
//! - Provide a quick linkage probe (`todo ping`).

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use todo_core::{
    clear_tasks, default_log_level, detail_route, init_logging, SqliteKeyValueStore, Task,
    TaskService,
};

/// Manage the todo list stored on this device.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about, long_about = None)]
struct Cli {
    /// SQLite database holding the list
    #[arg(long, global = true, env = "TODO_DB_PATH", default_value = "todo_app.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true, env = "TODO_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "TODO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print the list as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all tasks, newest first
    List,
    /// Add a task
    Add {
        /// Task title; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip a task between open and done
    Toggle { id: i64 },
    /// Delete a task
    Remove { id: i64 },
    /// Show one task and its detail route
    Show { id: i64 },
    /// Forget the stored list; the next run starts from the built-in tasks
    Reset,
    /// Print core linkage info
    Ping,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let db = cli.db;
    let json = cli.json;
    match cli.command {
        Command::Ping => {
            println!("todo_core ping={}", todo_core::ping());
            println!("todo_core version={}", todo_core::core_version());
            Ok(())
        }
        Command::Reset => {
            let store = SqliteKeyValueStore::open(&db)
                .with_context(|| format!("failed to open `{}`", db.display()))?;
            clear_tasks(&store).context("failed to clear stored tasks")?;
            println!("Stored list cleared.");
            Ok(())
        }
        Command::List => print_list(&open_service(&db)?, json),
        Command::Show { id } => {
            let service = open_service(&db)?;
            let task = service
                .get(id)
                .with_context(|| format!("no task with id {id}"))?;
            println!("{}", format_task(task));
            println!("route: {}", detail_route(id));
            Ok(())
        }
        Command::Add { title } => mutate(&db, json, |service| {
            if !service.add(&title.join(" ")) {
                bail!("task title must not be blank");
            }
            Ok(())
        }),
        Command::Toggle { id } => mutate(&db, json, |service| {
            if !service.toggle(id) {
                bail!("no task with id {id}");
            }
            Ok(())
        }),
        Command::Remove { id } => mutate(&db, json, |service| {
            if !service.remove(id) {
                bail!("no task with id {id}");
            }
            Ok(())
        }),
    }
}

fn open_service(db: &Path) -> Result<TaskService> {
    TaskService::open_sqlite(db).with_context(|| format!("failed to open `{}`", db.display()))
}

/// Applies one change, waits for it to reach disk, then prints the list.
fn mutate(
    db: &Path,
    json: bool,
    change: impl FnOnce(&mut TaskService) -> Result<()>,
) -> Result<()> {
    let mut service = open_service(db)?;
    change(&mut service)?;
    if !service.flush() {
        bail!("failed to persist the change");
    }
    print_list(&service, json)
}

fn print_list(service: &TaskService, json: bool) -> Result<()> {
    let list = service.tasks();
    if json {
        println!("{}", serde_json::to_string_pretty(list)?);
        return Ok(());
    }
    for task in list {
        println!("{}", format_task(task));
    }
    println!("{} of {} open", list.remaining_count(), list.len());
    Ok(())
}

fn format_task(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("[{mark}] {:>3}  {}", task.id, task.title)
}
