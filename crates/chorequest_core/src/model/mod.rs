mod goal;
mod reward;
mod stats;
mod task;

pub use goal::{Goal, GoalBucket, GoalSet};
pub use reward::{Reward, RewardKind};
pub use stats::{ChildStats, level_for_xp};
pub use task::{Difficulty, Task};
