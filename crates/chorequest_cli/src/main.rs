use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::warn;

use chorequest_cli::avatar::{self, AVATARS};
use chorequest_cli::cli::{
    AvatarCommand, Cli, Command, GoalCommand, PinCommand, RewardCommand, TaskCommand,
};
use chorequest_cli::gate;
use chorequest_core::error::EngineError;
use chorequest_core::model::{Difficulty, Goal, GoalBucket, RewardKind, Task};
use chorequest_core::notify::{Notifier, notifier_from_env};
use chorequest_core::provider::StateProvider;
use chorequest_core::storage::{FileStore, KeyValueStore};

struct Session {
    store: Arc<dyn KeyValueStore>,
    provider: StateProvider,
    notifier: Box<dyn Notifier>,
}

impl Session {
    async fn open() -> Result<Self, EngineError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::from_env()?);
        let provider = StateProvider::load(Arc::clone(&store)).await;
        Ok(Self {
            store,
            provider,
            notifier: notifier_from_env(),
        })
    }

    fn notify_pending(&self, what: &str) {
        let body = format!("{what} is waiting for parent approval");
        if let Err(err) = self.notifier.notify("ChoreQuest", &body) {
            warn!(%err, "could not send approval notification");
        }
    }
}

fn points_for(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 100,
        Difficulty::Medium => 200,
        Difficulty::Hard => 300,
    }
}

fn task_state(task: &Task) -> &'static str {
    if task.approved {
        "approved"
    } else if task.pending_approval {
        "pending approval"
    } else {
        "open"
    }
}

fn goal_state(goal: &Goal) -> &'static str {
    if goal.pending_approval {
        "pending approval"
    } else if goal.completed {
        "completed"
    } else {
        "open"
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Difficulty")]
    difficulty: &'static str,
    #[tabled(rename = "Points")]
    points: u32,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Done")]
    done: String,
}

fn task_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        difficulty: task.difficulty.as_str(),
        points: task.points,
        state: task_state(task),
        done: task.completed_date.clone().unwrap_or_else(|| "-".to_string()),
    }
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Bucket")]
    bucket: &'static str,
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Goal")]
    text: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

fn goal_row(bucket: GoalBucket, goal: &Goal) -> GoalRow {
    GoalRow {
        bucket: bucket.as_str(),
        id: goal.id,
        text: goal.text.clone(),
        progress: format!("{}/{}", goal.progress, goal.target),
        state: goal_state(goal),
    }
}

#[derive(Tabled)]
struct RewardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Reward")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: u32,
    #[tabled(rename = "Currency")]
    currency: &'static str,
}

#[derive(Tabled)]
struct AvatarRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Unlocks at")]
    unlocks: u32,
    #[tabled(rename = "HP")]
    hp: u32,
    #[tabled(rename = "Damage")]
    damage: u32,
    #[tabled(rename = "Status")]
    status: &'static str,
}

async fn run_task_command(
    command: TaskCommand,
    json: bool,
    session: &mut Session,
) -> Result<(), EngineError> {
    match command {
        TaskCommand::Add {
            title,
            description,
            difficulty,
            pin,
        } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            if title.trim().is_empty() {
                return Err(EngineError::invalid_input("title is required"));
            }
            let difficulty = Difficulty::parse(&difficulty)?;
            let points = points_for(difficulty);
            let task = session
                .provider
                .add_task(&title, description.as_deref().unwrap_or(""), difficulty, points)
                .await;
            if json {
                println!("{}", serde_json::json!(task));
            } else {
                println!("Added task: {} ({}, {} points)", task.title, task.id, task.points);
            }
        }
        TaskCommand::List { all } => {
            let tasks: Vec<&Task> = session
                .provider
                .tasks()
                .iter()
                .filter(|task| all || !task.approved)
                .collect();
            if json {
                println!("{}", serde_json::json!(tasks));
            } else if tasks.is_empty() {
                println!("No tasks yet");
            } else {
                let rows: Vec<TaskRow> = tasks.iter().map(|task| task_row(task)).collect();
                println!("{}", Table::new(rows));
            }
        }
        TaskCommand::Toggle { id } => {
            let task = session.provider.toggle_task(&id).await?;
            if task.pending_approval {
                session.notify_pending(&task.title);
            }
            if json {
                println!("{}", serde_json::json!(task));
            } else if task.pending_approval {
                println!("Finished task: {} ({})", task.title, task.id);
            } else {
                println!("Reopened task: {} ({})", task.title, task.id);
            }
        }
        TaskCommand::Approve { id, pin } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            let task = session.provider.approve_task(&id).await?;
            if json {
                println!("{}", serde_json::json!(task));
            } else {
                println!(
                    "Approved task: {} (+{} XP, +{} gold)",
                    task.title,
                    task.points,
                    task.points / 2
                );
            }
        }
        TaskCommand::Reject { id, pin } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            let task = session.provider.reject_task(&id).await?;
            if json {
                println!("{}", serde_json::json!(task));
            } else {
                println!("Rejected task: {} ({})", task.title, task.id);
            }
        }
        TaskCommand::Delete { id } => {
            let task = session.provider.delete_task(&id).await?;
            if json {
                println!("{}", serde_json::json!(task));
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        TaskCommand::ClearApproved => {
            let removed = session.provider.delete_approved_tasks().await;
            if json {
                println!("{}", serde_json::json!({ "removed": removed }));
            } else {
                println!("Removed {} approved task(s)", removed);
            }
        }
    }

    Ok(())
}

async fn run_goal_command(
    command: GoalCommand,
    json: bool,
    session: &mut Session,
) -> Result<(), EngineError> {
    match command {
        GoalCommand::Add {
            bucket,
            text,
            target,
            pin,
        } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            if text.trim().is_empty() {
                return Err(EngineError::invalid_input("text is required"));
            }
            let bucket = GoalBucket::parse(&bucket)?;
            let goal = session.provider.add_goal(bucket, &text, target).await?;
            if json {
                println!("{}", serde_json::json!(goal));
            } else {
                println!(
                    "Added {} goal: {} (id {}, target {})",
                    bucket.as_str(),
                    goal.text,
                    goal.id,
                    goal.target
                );
            }
        }
        GoalCommand::List { bucket } => {
            let goals = session.provider.goals();
            match bucket {
                Some(raw) => {
                    let bucket = GoalBucket::parse(&raw)?;
                    let entries = goals.bucket(bucket);
                    if json {
                        println!("{}", serde_json::json!(entries));
                    } else if entries.is_empty() {
                        println!("No {} goals yet", bucket.as_str());
                    } else {
                        let rows: Vec<GoalRow> =
                            entries.iter().map(|goal| goal_row(bucket, goal)).collect();
                        println!("{}", Table::new(rows));
                    }
                }
                None => {
                    if json {
                        println!("{}", serde_json::json!(goals));
                    } else if goals.daily.is_empty() && goals.weekly.is_empty() {
                        println!("No goals yet");
                    } else {
                        let rows: Vec<GoalRow> = goals
                            .daily
                            .iter()
                            .map(|goal| goal_row(GoalBucket::Daily, goal))
                            .chain(
                                goals
                                    .weekly
                                    .iter()
                                    .map(|goal| goal_row(GoalBucket::Weekly, goal)),
                            )
                            .collect();
                        println!("{}", Table::new(rows));
                    }
                }
            }
        }
        GoalCommand::Progress { bucket, id, to } => {
            let bucket = GoalBucket::parse(&bucket)?;
            let new_progress = match to {
                Some(value) => value,
                None => {
                    session
                        .provider
                        .goals()
                        .bucket(bucket)
                        .iter()
                        .find(|goal| goal.id == id)
                        .ok_or_else(|| EngineError::not_found("goal not found"))?
                        .progress
                        .saturating_add(1)
                }
            };
            let outcome = session
                .provider
                .record_goal_progress(bucket, id, new_progress)
                .await?;
            if outcome.reached_target {
                session.notify_pending(&outcome.goal.text);
            }
            if json {
                println!("{}", serde_json::json!(outcome.goal));
            } else if outcome.reached_target {
                println!(
                    "Goal finished: {} ({}/{})",
                    outcome.goal.text, outcome.goal.progress, outcome.goal.target
                );
            } else {
                println!(
                    "Progress on {}: {}/{}",
                    outcome.goal.text, outcome.goal.progress, outcome.goal.target
                );
            }
        }
        GoalCommand::Approve { bucket, id, pin } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            let bucket = GoalBucket::parse(&bucket)?;
            let goal = session.provider.approve_goal(bucket, id).await?;
            if json {
                println!("{}", serde_json::json!(goal));
            } else {
                println!("Approved goal: {} (+{} XP)", goal.text, goal.target * 10);
            }
        }
        GoalCommand::Reject { bucket, id, pin } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            let bucket = GoalBucket::parse(&bucket)?;
            let goal = session.provider.reject_goal(bucket, id).await?;
            if json {
                println!("{}", serde_json::json!(goal));
            } else {
                println!("Rejected goal: {} (progress reset)", goal.text);
            }
        }
    }

    Ok(())
}

async fn run_reward_command(
    command: RewardCommand,
    json: bool,
    session: &mut Session,
) -> Result<(), EngineError> {
    match command {
        RewardCommand::Add {
            name,
            cost,
            kind,
            pin,
        } => {
            gate::verify_pin(session.store.as_ref(), &pin).await?;
            if name.trim().is_empty() {
                return Err(EngineError::invalid_input("name is required"));
            }
            let kind = RewardKind::parse(&kind)?;
            let reward = session.provider.add_reward(&name, cost, kind).await?;
            if json {
                println!("{}", serde_json::json!(reward));
            } else {
                println!(
                    "Added reward: {} ({}, {} {})",
                    reward.name,
                    reward.id,
                    reward.cost,
                    reward.kind.as_str()
                );
            }
        }
        RewardCommand::List => {
            let rewards = session.provider.rewards();
            if json {
                println!("{}", serde_json::json!(rewards));
            } else if rewards.is_empty() {
                println!("No rewards in this session");
            } else {
                let rows: Vec<RewardRow> = rewards
                    .iter()
                    .map(|reward| RewardRow {
                        id: reward.id.clone(),
                        name: reward.name.clone(),
                        cost: reward.cost,
                        currency: reward.kind.as_str(),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        RewardCommand::Buy { id } => {
            let reward = session.provider.buy_reward(&id).await?;
            if json {
                println!("{}", serde_json::json!(reward));
            } else {
                println!(
                    "Bought reward: {} (-{} {})",
                    reward.name,
                    reward.cost,
                    reward.kind.as_str()
                );
            }
        }
    }

    Ok(())
}

async fn run_avatar_command(
    command: AvatarCommand,
    json: bool,
    session: &Session,
) -> Result<(), EngineError> {
    match command {
        AvatarCommand::List => {
            let stats = *session.provider.stats();
            let selected = avatar::selected_avatar(session.store.as_ref()).await?;
            if json {
                let mut payload = Vec::with_capacity(AVATARS.len());
                for entry in &AVATARS {
                    payload.push(serde_json::json!({
                        "id": entry.id,
                        "name": entry.name,
                        "hp": entry.hp,
                        "damage": entry.damage,
                        "unlockLevel": entry.unlock_level,
                        "selected": entry.id == selected.id,
                    }));
                }
                println!("{}", serde_json::Value::Array(payload));
            } else {
                let rows: Vec<AvatarRow> = AVATARS
                    .iter()
                    .map(|entry| AvatarRow {
                        id: entry.id,
                        name: entry.name,
                        unlocks: entry.unlock_level,
                        hp: entry.hp,
                        damage: entry.damage,
                        status: if entry.id == selected.id {
                            "selected"
                        } else if avatar::unlocked(entry, &stats) {
                            ""
                        } else {
                            "locked"
                        },
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }
        AvatarCommand::Select { id } => {
            let stats = *session.provider.stats();
            let chosen = avatar::select_avatar(session.store.as_ref(), &stats, &id).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "id": chosen.id,
                        "name": chosen.name,
                        "hp": chosen.hp,
                        "damage": chosen.damage,
                        "unlockLevel": chosen.unlock_level,
                    })
                );
            } else {
                println!("Selected avatar: {} ({})", chosen.name, chosen.id);
            }
        }
    }

    Ok(())
}

async fn run_pin_command(command: PinCommand, session: &Session) -> Result<(), EngineError> {
    match command {
        PinCommand::Set { pin } => {
            gate::set_pin(session.store.as_ref(), &pin).await?;
            println!("Parent PIN set");
        }
        PinCommand::Change { current, new } => {
            gate::change_pin(session.store.as_ref(), &current, &new).await?;
            println!("Parent PIN changed");
        }
    }

    Ok(())
}

async fn run_command(cli: Cli, session: &mut Session) -> Result<(), EngineError> {
    match cli.command {
        Command::Task { task } => run_task_command(task, cli.json, session).await,
        Command::Goal { goal } => run_goal_command(goal, cli.json, session).await,
        Command::Reward { reward } => run_reward_command(reward, cli.json, session).await,
        Command::Stats => {
            let stats = session.provider.stats();
            if cli.json {
                println!("{}", serde_json::json!(stats));
            } else {
                println!("Level {} | XP {} | Gold {}", stats.level, stats.xp, stats.gold);
                println!("HP {}/{} | MP {}/{}", stats.hp, stats.max_hp, stats.mp, stats.max_mp);
            }
            Ok(())
        }
        Command::Avatar { avatar } => run_avatar_command(avatar, cli.json, session).await,
        Command::Pin { pin } => run_pin_command(pin, session).await,
    }
}

fn normalize_parse_error(err: clap::Error) -> EngineError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    EngineError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, EngineError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(EngineError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

async fn run_interactive() -> Result<(), EngineError> {
    let mut session = Session::open().await?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| EngineError::storage(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("chorequest".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                match err.kind() {
                    clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                        let _ = err.print();
                    }
                    _ => eprintln!("ERROR: {}", normalize_parse_error(err)),
                }
                continue;
            }
        };

        if let Err(err) = run_command(cli, &mut session).await {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive().await {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp
            | clap::error::ErrorKind::DisplayVersion
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                std::process::exit(1);
            }
        },
    };

    let mut session = match Session::open().await {
        Ok(session) => session,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli, &mut session).await {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
