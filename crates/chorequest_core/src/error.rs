use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    NotFound(String),
    InvalidState(String),
    InsufficientBalance(String),
    InvalidInput(String),
    Storage(String),
    Notification(String),
}

impl EngineError {
    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_state<M: Into<String>>(message: M) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn insufficient_balance<M: Into<String>>(message: M) -> Self {
        Self::InsufficientBalance(message.into())
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn storage<M: Into<String>>(message: M) -> Self {
        Self::Storage(message.into())
    }

    pub fn notification<M: Into<String>>(message: M) -> Self {
        Self::Notification(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidState(_) => "invalid_state",
            Self::InsufficientBalance(_) => "insufficient_balance",
            Self::InvalidInput(_) => "invalid_input",
            Self::Storage(_) => "storage_error",
            Self::Notification(_) => "notification_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message) => message,
            Self::InvalidState(message) => message,
            Self::InsufficientBalance(message) => message,
            Self::InvalidInput(message) => message,
            Self::Storage(message) => message,
            Self::Notification(message) => message,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for EngineError {}
