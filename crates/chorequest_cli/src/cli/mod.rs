use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        task: TaskCommand,
    },
    /// Manage daily and weekly goals
    Goal {
        #[command(subcommand)]
        goal: GoalCommand,
    },
    /// Manage the reward store
    Reward {
        #[command(subcommand)]
        reward: RewardCommand,
    },
    /// Show level, XP, gold and vitals
    ///
    /// Example: chorequest stats
    Stats,
    /// List and select avatars
    Avatar {
        #[command(subcommand)]
        avatar: AvatarCommand,
    },
    /// Manage the parent PIN
    Pin {
        #[command(subcommand)]
        pin: PinCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a new task (parent)
    ///
    /// Example: chorequest task add --pin 1234 "Clean the kitchen" --difficulty medium
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// easy (100 points), medium (200) or hard (300)
        #[arg(long, default_value = "easy")]
        difficulty: String,
        #[arg(long)]
        pin: String,
    },
    /// List open and pending tasks
    ///
    /// Example: chorequest task list
    /// Example: chorequest task list --all
    List {
        /// Include approved tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task finished, or reopen it
    ///
    /// Example: chorequest task toggle task-1755900000000
    Toggle {
        id: String,
    },
    /// Approve a finished task and grant its XP and gold (parent)
    ///
    /// Example: chorequest task approve --pin 1234 task-1755900000000
    Approve {
        id: String,
        #[arg(long)]
        pin: String,
    },
    /// Send a finished task back without granting anything (parent)
    ///
    /// Example: chorequest task reject --pin 1234 task-1755900000000
    Reject {
        id: String,
        #[arg(long)]
        pin: String,
    },
    /// Delete a task
    ///
    /// Example: chorequest task delete task-1755900000000
    Delete {
        id: String,
    },
    /// Remove every approved task
    ///
    /// Example: chorequest task clear-approved
    ClearApproved,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Add a goal to a bucket (parent)
    ///
    /// Example: chorequest goal add --pin 1234 daily "Practice piano" 1
    Add {
        bucket: String,
        text: String,
        target: u32,
        #[arg(long)]
        pin: String,
    },
    /// List goals
    ///
    /// Example: chorequest goal list
    /// Example: chorequest goal list weekly
    List {
        bucket: Option<String>,
    },
    /// Record progress on a goal
    ///
    /// Example: chorequest goal progress daily 1
    /// Example: chorequest goal progress weekly 2 --to 3
    Progress {
        bucket: String,
        id: u32,
        /// Absolute progress value; one step forward when omitted
        #[arg(long)]
        to: Option<u32>,
    },
    /// Approve a goal and grant its XP (parent)
    ///
    /// Example: chorequest goal approve --pin 1234 daily 1
    Approve {
        bucket: String,
        id: u32,
        #[arg(long)]
        pin: String,
    },
    /// Reset a goal's progress (parent)
    ///
    /// Example: chorequest goal reject --pin 1234 daily 1
    Reject {
        bucket: String,
        id: u32,
        #[arg(long)]
        pin: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RewardCommand {
    /// Add a reward to this session's store (parent)
    ///
    /// Example: chorequest reward add --pin 1234 "Movie night" 150
    /// Example: chorequest reward add --pin 1234 "Skip one chore" 200 --kind xp
    Add {
        name: String,
        cost: u32,
        /// Currency the reward is paid with: gold or xp
        #[arg(long, default_value = "gold")]
        kind: String,
        #[arg(long)]
        pin: String,
    },
    /// List this session's rewards
    ///
    /// Example: chorequest reward list
    List,
    /// Buy a reward
    ///
    /// Example: chorequest reward buy reward-1755900000000
    Buy {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AvatarCommand {
    /// Show the avatar catalog
    ///
    /// Example: chorequest avatar list
    List,
    /// Select an unlocked avatar
    ///
    /// Example: chorequest avatar select frost-archer
    Select {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinCommand {
    /// Set the parent PIN (only when none is set yet)
    ///
    /// Example: chorequest pin set 1234
    Set {
        pin: String,
    },
    /// Change the parent PIN
    ///
    /// Example: chorequest pin change 1234 5678
    Change {
        current: String,
        new: String,
    },
}
