pub mod engine;
pub mod error;
pub mod model;
pub mod notify;
pub mod provider;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::EngineError;
    use crate::model::{Difficulty, Task};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "task-1".to_string(),
            title: "Feed the cat".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            points: 100,
            completed: false,
            completed_date: None,
            approved: false,
            pending_approval: false,
        };

        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "Feed the cat");
        assert_eq!(task.points, 100);
        assert!(!task.completed);
        assert!(!task.approved);
        assert!(!task.pending_approval);
        assert_eq!(task.completed_date, None);
    }

    #[test]
    fn engine_error_exposes_code() {
        let err = EngineError::insufficient_balance("not enough gold");
        assert_eq!(err.code(), "insufficient_balance");
        assert_eq!(err.to_string(), "insufficient_balance - not enough gold");
    }
}
