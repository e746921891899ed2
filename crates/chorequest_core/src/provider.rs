use crate::engine;
pub use crate::engine::GoalProgress;
use crate::error::EngineError;
use crate::model::{ChildStats, Difficulty, Goal, GoalBucket, GoalSet, Reward, RewardKind, Task};
use crate::storage::{KeyValueStore, keys};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{debug, warn};

/// Owns the in-memory collections and keeps the store in sync after every
/// mutation. The in-memory copy is authoritative; a failed write never rolls
/// an operation back.
pub struct StateProvider {
    store: Arc<dyn KeyValueStore>,
    tasks: Vec<Task>,
    rewards: Vec<Reward>,
    stats: ChildStats,
    goals: GoalSet,
}

impl StateProvider {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let tasks: Vec<Task> = read_value(store.as_ref(), keys::TASKS)
            .await
            .unwrap_or_default();

        // A session always starts with an empty reward catalog; parents
        // re-add the offers they are currently willing to honor.
        let rewards: Vec<Reward> = Vec::new();
        persist_value(store.as_ref(), keys::REWARDS, &rewards).await;

        let stats = match read_value::<ChildStats>(store.as_ref(), keys::CHILD_STATS).await {
            Some(stats) => stats,
            None => {
                let stats = ChildStats::default();
                persist_value(store.as_ref(), keys::CHILD_STATS, &stats).await;
                stats
            }
        };

        let goals = match read_value::<GoalSet>(store.as_ref(), keys::GOALS).await {
            Some(goals) => goals,
            None => {
                let goals = GoalSet::sample();
                persist_value(store.as_ref(), keys::GOALS, &goals).await;
                goals
            }
        };

        debug!(
            tasks = tasks.len(),
            daily_goals = goals.daily.len(),
            weekly_goals = goals.weekly.len(),
            "state loaded"
        );

        Self {
            store,
            tasks,
            rewards,
            stats,
            goals,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn stats(&self) -> &ChildStats {
        &self.stats
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub async fn add_task(
        &mut self,
        title: &str,
        description: &str,
        difficulty: Difficulty,
        points: u32,
    ) -> Task {
        let (tasks, task) = engine::add_task(&self.tasks, title, description, difficulty, points);
        self.tasks = tasks;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        task
    }

    pub async fn toggle_task(&mut self, id: &str) -> Result<Task, EngineError> {
        let (tasks, task) = engine::toggle_task(&self.tasks, id, today())?;
        self.tasks = tasks;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        Ok(task)
    }

    pub async fn approve_task(&mut self, id: &str) -> Result<Task, EngineError> {
        let outcome = engine::approve_task(&self.tasks, &self.stats, id)?;
        self.tasks = outcome.tasks;
        self.stats = outcome.stats;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        persist_value(self.store.as_ref(), keys::CHILD_STATS, &self.stats).await;
        Ok(outcome.task)
    }

    pub async fn reject_task(&mut self, id: &str) -> Result<Task, EngineError> {
        let (tasks, task) = engine::reject_task(&self.tasks, id)?;
        self.tasks = tasks;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        Ok(task)
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<Task, EngineError> {
        let (tasks, task) = engine::delete_task(&self.tasks, id)?;
        self.tasks = tasks;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        Ok(task)
    }

    pub async fn delete_approved_tasks(&mut self) -> usize {
        let (tasks, removed) = engine::delete_approved_tasks(&self.tasks);
        self.tasks = tasks;
        persist_value(self.store.as_ref(), keys::TASKS, &self.tasks).await;
        removed
    }

    pub async fn add_reward(
        &mut self,
        name: &str,
        cost: u32,
        kind: RewardKind,
    ) -> Result<Reward, EngineError> {
        let (rewards, reward) = engine::add_reward(&self.rewards, name, cost, kind)?;
        self.rewards = rewards;
        persist_value(self.store.as_ref(), keys::REWARDS, &self.rewards).await;
        Ok(reward)
    }

    pub async fn buy_reward(&mut self, id: &str) -> Result<Reward, EngineError> {
        let outcome = engine::buy_reward(&self.rewards, &self.stats, id)?;
        self.rewards = outcome.rewards;
        self.stats = outcome.stats;
        persist_value(self.store.as_ref(), keys::REWARDS, &self.rewards).await;
        persist_value(self.store.as_ref(), keys::CHILD_STATS, &self.stats).await;
        Ok(outcome.reward)
    }

    pub async fn add_goal(
        &mut self,
        bucket: GoalBucket,
        text: &str,
        target: u32,
    ) -> Result<Goal, EngineError> {
        let (goals, goal) = engine::add_goal(&self.goals, bucket, text, target)?;
        self.goals = goals;
        persist_value(self.store.as_ref(), keys::GOALS, &self.goals).await;
        Ok(goal)
    }

    pub async fn record_goal_progress(
        &mut self,
        bucket: GoalBucket,
        id: u32,
        new_progress: u32,
    ) -> Result<GoalProgress, EngineError> {
        let outcome = engine::record_goal_progress(&self.goals, bucket, id, new_progress)?;
        self.goals = outcome.goals.clone();
        persist_value(self.store.as_ref(), keys::GOALS, &self.goals).await;
        Ok(outcome)
    }

    pub async fn approve_goal(
        &mut self,
        bucket: GoalBucket,
        id: u32,
    ) -> Result<Goal, EngineError> {
        let outcome = engine::approve_goal(&self.goals, &self.stats, bucket, id)?;
        self.goals = outcome.goals;
        self.stats = outcome.stats;
        persist_value(self.store.as_ref(), keys::GOALS, &self.goals).await;
        persist_value(self.store.as_ref(), keys::CHILD_STATS, &self.stats).await;
        Ok(outcome.goal)
    }

    pub async fn reject_goal(
        &mut self,
        bucket: GoalBucket,
        id: u32,
    ) -> Result<Goal, EngineError> {
        let (goals, goal) = engine::reject_goal(&self.goals, bucket, id)?;
        self.goals = goals;
        persist_value(self.store.as_ref(), keys::GOALS, &self.goals).await;
        Ok(goal)
    }
}

fn today() -> Date {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset).date()
}

async fn read_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is unreadable, falling back to defaults");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "store read failed, falling back to defaults");
            None
        }
    }
}

async fn persist_value<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(key, error = %err, "failed to serialize state");
            return;
        }
    };

    if let Err(err) = store.set(key, &raw).await {
        warn!(key, error = %err, "failed to persist state, keeping the in-memory copy");
    }
}
