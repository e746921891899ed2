use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub cost: u32,
    #[serde(rename = "type")]
    pub kind: RewardKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Gold,
    Xp,
}

impl RewardKind {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(Self::Gold),
            "xp" => Ok(Self::Xp),
            _ => Err(EngineError::invalid_input("reward kind must be gold or xp")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Xp => "xp",
        }
    }
}
