use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildStats {
    pub level: u32,
    pub xp: u32,
    pub gold: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
}

impl Default for ChildStats {
    fn default() -> Self {
        Self {
            level: 0,
            xp: 0,
            gold: 0,
            hp: 100,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
        }
    }
}

/// One level per 1000 XP. Every update to `xp` goes through this.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / 1000
}
