use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u32,
    pub text: String,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    #[serde(default)]
    pub pending_approval: bool,
    #[serde(default)]
    pub approved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalBucket {
    Daily,
    Weekly,
}

impl GoalBucket {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(EngineError::invalid_input("bucket must be daily or weekly")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSet {
    #[serde(default)]
    pub daily: Vec<Goal>,
    #[serde(default)]
    pub weekly: Vec<Goal>,
}

impl GoalSet {
    pub fn bucket(&self, bucket: GoalBucket) -> &[Goal] {
        match bucket {
            GoalBucket::Daily => &self.daily,
            GoalBucket::Weekly => &self.weekly,
        }
    }

    pub fn bucket_mut(&mut self, bucket: GoalBucket) -> &mut Vec<Goal> {
        match bucket {
            GoalBucket::Daily => &mut self.daily,
            GoalBucket::Weekly => &mut self.weekly,
        }
    }

    /// Starter goals seeded on first run, when the store has none yet.
    pub fn sample() -> Self {
        Self {
            daily: vec![
                sample_goal(1, "Read for 30 minutes", 1),
                sample_goal(2, "Finish your homework", 1),
                sample_goal(3, "Tidy your room", 1),
            ],
            weekly: vec![
                sample_goal(1, "Exercise 5 days", 5),
                sample_goal(2, "Learn 3 new words", 3),
                sample_goal(3, "Help around the house", 3),
            ],
        }
    }
}

fn sample_goal(id: u32, text: &str, target: u32) -> Goal {
    Goal {
        id,
        text: text.to_string(),
        progress: 0,
        target,
        completed: false,
        pending_approval: false,
        approved: false,
    }
}
