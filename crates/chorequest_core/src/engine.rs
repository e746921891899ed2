use crate::error::EngineError;
use crate::model::{
    ChildStats, Difficulty, Goal, GoalBucket, GoalSet, Reward, RewardKind, Task, level_for_xp,
};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone)]
pub struct TaskApproval {
    pub tasks: Vec<Task>,
    pub stats: ChildStats,
    pub task: Task,
}

#[derive(Debug, Clone)]
pub struct Purchase {
    pub rewards: Vec<Reward>,
    pub stats: ChildStats,
    pub reward: Reward,
}

#[derive(Debug, Clone)]
pub struct GoalProgress {
    pub goals: GoalSet,
    pub goal: Goal,
    pub reached_target: bool,
}

#[derive(Debug, Clone)]
pub struct GoalApproval {
    pub goals: GoalSet,
    pub stats: ChildStats,
    pub goal: Goal,
}

pub fn add_task(
    tasks: &[Task],
    title: &str,
    description: &str,
    difficulty: Difficulty,
    points: u32,
) -> (Vec<Task>, Task) {
    let task = Task {
        id: next_task_id(tasks),
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        difficulty,
        points,
        completed: false,
        completed_date: None,
        approved: false,
        pending_approval: false,
    };

    let mut next = tasks.to_vec();
    next.push(task.clone());
    (next, task)
}

pub fn toggle_task(tasks: &[Task], id: &str, today: Date) -> Result<(Vec<Task>, Task), EngineError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(EngineError::invalid_input("id is required"));
    }

    let mut next = tasks.to_vec();
    let mut updated_task = None;

    for task in &mut next {
        if task.id == trimmed_id {
            if task.completed {
                task.completed = false;
                task.completed_date = None;
                task.pending_approval = false;
                task.approved = false;
            } else {
                task.completed = true;
                task.completed_date = Some(today.to_string());
                task.pending_approval = true;
                task.approved = false;
            }
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| EngineError::not_found("task not found"))?;
    Ok((next, updated))
}

pub fn approve_task(
    tasks: &[Task],
    stats: &ChildStats,
    id: &str,
) -> Result<TaskApproval, EngineError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(EngineError::invalid_input("id is required"));
    }

    let mut next = tasks.to_vec();
    let mut approved_task = None;

    for task in &mut next {
        if task.id == trimmed_id {
            if !task.pending_approval {
                return Err(EngineError::invalid_state("task is not waiting for approval"));
            }
            task.approved = true;
            task.pending_approval = false;
            approved_task = Some(task.clone());
            break;
        }
    }

    let approved = approved_task.ok_or_else(|| EngineError::not_found("task not found"))?;

    let mut next_stats = *stats;
    next_stats.xp = next_stats
        .xp
        .checked_add(approved.points)
        .ok_or_else(|| EngineError::invalid_input("the grant would overflow the child's stats"))?;
    next_stats.gold = next_stats
        .gold
        .checked_add(approved.points / 2)
        .ok_or_else(|| EngineError::invalid_input("the grant would overflow the child's stats"))?;
    next_stats.level = level_for_xp(next_stats.xp);

    Ok(TaskApproval {
        tasks: next,
        stats: next_stats,
        task: approved,
    })
}

pub fn reject_task(tasks: &[Task], id: &str) -> Result<(Vec<Task>, Task), EngineError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(EngineError::invalid_input("id is required"));
    }

    let mut next = tasks.to_vec();
    let mut updated_task = None;

    for task in &mut next {
        if task.id == trimmed_id {
            task.completed = false;
            task.completed_date = None;
            task.pending_approval = false;
            task.approved = false;
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| EngineError::not_found("task not found"))?;
    Ok((next, updated))
}

pub fn delete_task(tasks: &[Task], id: &str) -> Result<(Vec<Task>, Task), EngineError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(EngineError::invalid_input("id is required"));
    }

    let index = tasks
        .iter()
        .position(|task| task.id == trimmed_id)
        .ok_or_else(|| EngineError::not_found("task not found"))?;

    let mut next = tasks.to_vec();
    let removed = next.remove(index);
    Ok((next, removed))
}

pub fn delete_approved_tasks(tasks: &[Task]) -> (Vec<Task>, usize) {
    let next: Vec<Task> = tasks.iter().filter(|task| !task.approved).cloned().collect();
    let removed = tasks.len() - next.len();
    (next, removed)
}

pub fn add_reward(
    rewards: &[Reward],
    name: &str,
    cost: u32,
    kind: RewardKind,
) -> Result<(Vec<Reward>, Reward), EngineError> {
    if cost == 0 {
        return Err(EngineError::invalid_input("cost must be greater than zero"));
    }

    let reward = Reward {
        id: next_reward_id(rewards),
        name: name.trim().to_string(),
        cost,
        kind,
    };

    let mut next = rewards.to_vec();
    next.push(reward.clone());
    Ok((next, reward))
}

pub fn buy_reward(
    rewards: &[Reward],
    stats: &ChildStats,
    id: &str,
) -> Result<Purchase, EngineError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(EngineError::invalid_input("id is required"));
    }

    let index = rewards
        .iter()
        .position(|reward| reward.id == trimmed_id)
        .ok_or_else(|| EngineError::not_found("reward not found"))?;
    let reward = rewards[index].clone();

    let mut next_stats = *stats;
    match reward.kind {
        RewardKind::Gold => {
            if next_stats.gold < reward.cost {
                return Err(EngineError::insufficient_balance("not enough gold for this reward"));
            }
            next_stats.gold -= reward.cost;
        }
        RewardKind::Xp => {
            if next_stats.xp < reward.cost {
                return Err(EngineError::insufficient_balance("not enough XP for this reward"));
            }
            next_stats.xp -= reward.cost;
            next_stats.level = level_for_xp(next_stats.xp);
        }
    }

    let mut next = rewards.to_vec();
    next.remove(index);

    Ok(Purchase {
        rewards: next,
        stats: next_stats,
        reward,
    })
}

pub fn add_goal(
    goals: &GoalSet,
    bucket: GoalBucket,
    text: &str,
    target: u32,
) -> Result<(GoalSet, Goal), EngineError> {
    if target == 0 {
        return Err(EngineError::invalid_input("target must be greater than zero"));
    }
    // approval grants target * 10 XP
    if target > u32::MAX / 10 {
        return Err(EngineError::invalid_input("target is too large"));
    }

    let mut next = goals.clone();
    let entries = next.bucket_mut(bucket);
    let id = entries.iter().map(|goal| goal.id).max().unwrap_or(0) + 1;
    let goal = Goal {
        id,
        text: text.trim().to_string(),
        progress: 0,
        target,
        completed: false,
        pending_approval: false,
        approved: false,
    };
    entries.push(goal.clone());

    Ok((next, goal))
}

pub fn record_goal_progress(
    goals: &GoalSet,
    bucket: GoalBucket,
    id: u32,
    new_progress: u32,
) -> Result<GoalProgress, EngineError> {
    let mut next = goals.clone();
    let mut outcome = None;

    for goal in next.bucket_mut(bucket) {
        if goal.id == id {
            if new_progress < goal.progress {
                return Err(EngineError::invalid_state("goal progress cannot decrease"));
            }
            goal.progress = new_progress;
            let mut reached = false;
            if new_progress >= goal.target && !goal.completed && !goal.pending_approval {
                goal.completed = true;
                goal.pending_approval = true;
                goal.approved = false;
                reached = true;
            }
            outcome = Some((goal.clone(), reached));
            break;
        }
    }

    let (goal, reached_target) = outcome.ok_or_else(|| EngineError::not_found("goal not found"))?;
    Ok(GoalProgress {
        goals: next,
        goal,
        reached_target,
    })
}

pub fn approve_goal(
    goals: &GoalSet,
    stats: &ChildStats,
    bucket: GoalBucket,
    id: u32,
) -> Result<GoalApproval, EngineError> {
    let mut next = goals.clone();
    let entries = next.bucket_mut(bucket);
    let index = entries
        .iter()
        .position(|goal| goal.id == id)
        .ok_or_else(|| EngineError::not_found("goal not found"))?;
    let goal = entries.remove(index);

    let mut next_stats = *stats;
    next_stats.xp = goal
        .target
        .checked_mul(10)
        .and_then(|grant| next_stats.xp.checked_add(grant))
        .ok_or_else(|| EngineError::invalid_input("the grant would overflow the child's stats"))?;
    next_stats.level = level_for_xp(next_stats.xp);

    Ok(GoalApproval {
        goals: next,
        stats: next_stats,
        goal,
    })
}

pub fn reject_goal(
    goals: &GoalSet,
    bucket: GoalBucket,
    id: u32,
) -> Result<(GoalSet, Goal), EngineError> {
    let mut next = goals.clone();
    let mut updated_goal = None;

    for goal in next.bucket_mut(bucket) {
        if goal.id == id {
            goal.progress = 0;
            goal.completed = false;
            goal.pending_approval = false;
            goal.approved = false;
            updated_goal = Some(goal.clone());
            break;
        }
    }

    let updated = updated_goal.ok_or_else(|| EngineError::not_found("goal not found"))?;
    Ok((next, updated))
}

fn next_task_id(tasks: &[Task]) -> String {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let mut id = format!("task-{nanos}");
    let mut bump = 1u32;
    while tasks.iter().any(|task| task.id == id) {
        id = format!("task-{nanos}-{bump}");
        bump += 1;
    }
    id
}

fn next_reward_id(rewards: &[Reward]) -> String {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let mut id = format!("reward-{nanos}");
    let mut bump = 1u32;
    while rewards.iter().any(|reward| reward.id == id) {
        id = format!("reward-{nanos}-{bump}");
        bump += 1;
    }
    id
}
