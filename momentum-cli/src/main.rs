use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use momentum_core::{
    ACHIEVEMENTS, Category, NewTask, Notification, Notifier, Priority, Progression, TaskPatch,
    TaskStatus, UserStats, highlight_days, is_completion, local_day, parse_local_due_to_utc,
    parse_tz,
};
use momentum_store::{
    JsonStatsFile, LocalTaskStore, Page, RemoteTaskStore, SortKey, TaskFilter, TaskSort, TaskStore,
};

mod config;
mod notify;
mod profile;

use notify::TerminalNotifier;

#[derive(Parser, Debug)]
#[command(name = "momentum", version, about = "Gamified personal task tracker")]
struct Cli {
    /// Debug-level logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time setup: write default config and a local profile
    Init,

    /// Create a task
    Add {
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// low | medium | high | urgent
        #[arg(long)]
        priority: Option<Priority>,

        /// work | personal | shopping | health | education | other
        #[arg(long)]
        category: Option<Category>,

        /// Due date "YYYY-MM-DD" or "YYYY-MM-DD HH:MM" in the configured timezone
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    List {
        /// pending | in_progress | completed
        #[arg(long)]
        status: Option<TaskStatus>,

        #[arg(long)]
        priority: Option<Priority>,

        #[arg(long)]
        category: Option<Category>,

        /// Case-insensitive regex over titles
        #[arg(long)]
        search: Option<String>,

        /// created | due | priority | title
        #[arg(long, default_value = "created")]
        sort: SortKey,

        /// Ascending instead of the default descending order
        #[arg(long)]
        asc: bool,

        #[arg(long, default_value_t = 50)]
        limit: usize,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Mark a task in progress
    Start { id: String },

    /// Complete a task and collect the reward
    Complete { id: String },

    /// Edit task fields
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<TaskStatus>,

        #[arg(long)]
        priority: Option<Priority>,

        #[arg(long)]
        category: Option<Category>,

        /// Due date "YYYY-MM-DD" or "YYYY-MM-DD HH:MM" in the configured timezone
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Delete { id: String },

    /// Show level, points and streak
    Stats,

    /// Show the achievement board
    Achievements,
}

struct App {
    tz: Tz,
    store: TaskStore,
    engine: Progression<JsonStatsFile>,
    notifier: TerminalNotifier,
}

impl App {
    fn open() -> Result<Self> {
        let cfg = config::load_config()?;
        let tz = parse_tz(&cfg.timezone)?;
        let profile = profile::load_or_create_profile()?;
        let home = profile::ensure_momentum_home()?;

        let store = match cfg.store.mode.as_str() {
            "local" => TaskStore::Local(LocalTaskStore::open(&home, &profile.user_id)),
            "remote" => {
                let url = cfg
                    .store
                    .remote_url
                    .as_deref()
                    .context("store.mode is \"remote\" but store.remote_url is not set")?;
                TaskStore::Remote(RemoteTaskStore::new(url, &profile.user_id))
            }
            other => bail!("unknown store.mode: {other} (expected \"local\" or \"remote\")"),
        };

        tracing::debug!(mode = %cfg.store.mode, tz = %cfg.timezone, "opening stores");
        let engine = Progression::load(JsonStatsFile::for_user(&home, &profile.user_id), tz);

        Ok(Self {
            tz,
            store,
            engine,
            notifier: TerminalNotifier,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Command::Init = cli.command {
        config::init_config()?;
        let profile = profile::load_or_create_profile()?;
        println!("Profile ready (user id {})", profile.user_id);
        return Ok(());
    }

    let app = App::open()?;
    let now = Utc::now();

    match cli.command {
        Command::Init => unreachable!("handled above"),

        Command::Add {
            title,
            description,
            priority,
            category,
            due,
        } => {
            let due_date = match due {
                Some(ref raw) => Some(parse_local_due_to_utc(raw, app.tz)?),
                None => None,
            };
            let task = app
                .store
                .create(
                    NewTask {
                        title,
                        description,
                        status: None,
                        priority,
                        category,
                        due_date,
                    },
                    now,
                )
                .await?;
            println!("Added {}  {}", task.id, task.title);
        }

        Command::List {
            status,
            priority,
            category,
            search,
            sort,
            asc,
            limit,
            offset,
        } => {
            let filter = TaskFilter {
                status,
                priority,
                category,
                search,
                due_before: None,
            };
            let sort = TaskSort {
                key: sort,
                descending: !asc,
            };
            let tasks = app.store.list(&filter, sort, Page { offset, limit }).await?;

            if tasks.is_empty() {
                println!("No tasks.");
                return Ok(());
            }
            let today = local_day(now, app.tz);
            for t in &tasks {
                let priority = t.priority.map(|p| p.as_str()).unwrap_or("-");
                let category = t.category.map(|c| c.as_str()).unwrap_or("-");
                let due = match t.due_date {
                    Some(due) if t.is_overdue(today) => format!("{} OVERDUE", due.format("%Y-%m-%d")),
                    Some(due) if t.is_due_soon(today) => format!("{} due soon", due.format("%Y-%m-%d")),
                    Some(due) => due.format("%Y-%m-%d").to_string(),
                    None => "-".to_string(),
                };
                println!(
                    "[{}] {}  {} | priority={} category={} due={}",
                    t.status, t.id, t.title, priority, category, due
                );
            }
        }

        Command::Start { id } => {
            let task = app
                .store
                .update(&id, &TaskPatch::status(TaskStatus::InProgress), now)
                .await?;
            println!("Started {}  {}", task.id, task.title);
        }

        Command::Complete { id } => complete_task(&app, &id, now).await?,

        Command::Edit {
            id,
            title,
            description,
            status,
            priority,
            category,
            due,
        } => {
            let due_date = match due {
                Some(ref raw) => Some(parse_local_due_to_utc(raw, app.tz)?),
                None => None,
            };
            let patch = TaskPatch {
                title,
                description,
                status,
                priority,
                category,
                due_date,
            };
            if patch.is_empty() {
                bail!("nothing to change (pass at least one --field)");
            }
            let task = app.store.update(&id, &patch, now).await?;
            println!("Updated {}  {}", task.id, task.title);
        }

        Command::Delete { id } => {
            app.store.delete(&id).await?;
            println!("Deleted {id}");
        }

        Command::Stats => print_stats(&app.engine.stats(now), now, app.tz),

        Command::Achievements => print_achievements(&app.engine.stats(now)),
    }

    Ok(())
}

/// Store write first; rewards only once the write is confirmed and the
/// transition really entered the completed state.
async fn complete_task(app: &App, id: &str, now: DateTime<Utc>) -> Result<()> {
    let before = app.store.get(id).await?;
    if before.status == TaskStatus::Completed {
        println!("Already completed: {}", before.title);
        return Ok(());
    }

    let updated = match app
        .store
        .update(id, &TaskPatch::status(TaskStatus::Completed), now)
        .await
    {
        Ok(task) => task,
        Err(err) => {
            app.notifier.notify(Notification::failure(
                "Could not complete task",
                format!("{err:#}"),
            ));
            return Err(err);
        }
    };

    if is_completion(before.status, updated.status) {
        let mut events = app.engine.record_completion(updated.priority, now)?;
        events.extend(app.engine.evaluate_achievements(now)?);
        for event in &events {
            app.notifier.notify(Notification::from_event(event));
        }
    }
    Ok(())
}

fn print_stats(stats: &UserStats, now: DateTime<Utc>, tz: Tz) {
    println!("Level {}  ({} XP)", stats.level, stats.experience);
    if stats.experience_to_next > 0 {
        println!("  {} XP to level {}", stats.experience_to_next, stats.level + 1);
    } else {
        println!("  max level reached");
    }
    println!("Points: {}", stats.total_points);
    println!("Tasks completed: {}", stats.tasks_completed);
    println!(
        "Streak: {} day(s)  (longest {})",
        stats.streak, stats.longest_streak
    );

    let days = highlight_days(local_day(now, tz), stats.streak);
    if !days.is_empty() {
        let rendered: Vec<String> = days.iter().map(|d| d.format("%m-%d").to_string()).collect();
        println!("  active days: {}", rendered.join(" "));
    }
    println!(
        "Achievements: {}/{}",
        stats.achievements.len(),
        ACHIEVEMENTS.len()
    );
}

fn print_achievements(stats: &UserStats) {
    for spec in &ACHIEVEMENTS {
        match stats.achievements.iter().find(|a| a.id == spec.id) {
            Some(unlocked) => println!(
                "{} {} [{}]  {}  (unlocked {})",
                spec.icon,
                spec.title,
                spec.rarity.as_str(),
                spec.description,
                unlocked.unlocked_at.format("%Y-%m-%d")
            ),
            None => println!(
                "   {} [{}]  {}  (locked)",
                spec.title,
                spec.rarity.as_str(),
                spec.description
            ),
        }
    }
}
