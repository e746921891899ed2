use chorequest_core::error::EngineError;
use chorequest_core::model::ChildStats;
use chorequest_core::storage::{KeyValueStore, keys};

#[derive(Debug)]
pub struct Avatar {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: u32,
    pub damage: u32,
    pub unlock_level: u32,
}

/// Fixed catalog, one new unlock per level. The hp and damage figures are
/// cosmetic flavor only.
pub const AVATARS: [Avatar; 12] = [
    Avatar { id: "ember-knight", name: "Ember Knight", hp: 100, damage: 10, unlock_level: 1 },
    Avatar { id: "frost-archer", name: "Frost Archer", hp: 110, damage: 15, unlock_level: 2 },
    Avatar { id: "stone-guardian", name: "Stone Guardian", hp: 115, damage: 20, unlock_level: 3 },
    Avatar { id: "shadow-rogue", name: "Shadow Rogue", hp: 120, damage: 25, unlock_level: 4 },
    Avatar { id: "storm-caller", name: "Storm Caller", hp: 125, damage: 30, unlock_level: 5 },
    Avatar { id: "iron-paladin", name: "Iron Paladin", hp: 130, damage: 35, unlock_level: 6 },
    Avatar { id: "moon-ranger", name: "Moon Ranger", hp: 135, damage: 40, unlock_level: 7 },
    Avatar { id: "flame-sorcerer", name: "Flame Sorcerer", hp: 140, damage: 45, unlock_level: 8 },
    Avatar { id: "river-monk", name: "River Monk", hp: 145, damage: 50, unlock_level: 9 },
    Avatar { id: "thunder-berserker", name: "Thunder Berserker", hp: 150, damage: 55, unlock_level: 10 },
    Avatar { id: "star-warden", name: "Star Warden", hp: 155, damage: 60, unlock_level: 11 },
    Avatar { id: "dragon-slayer", name: "Dragon Slayer", hp: 160, damage: 65, unlock_level: 12 },
];

pub fn find(id: &str) -> Option<&'static Avatar> {
    let trimmed = id.trim();
    AVATARS.iter().find(|avatar| avatar.id == trimmed)
}

pub fn unlocked(avatar: &Avatar, stats: &ChildStats) -> bool {
    stats.level >= avatar.unlock_level
}

/// The stored choice, falling back to the first catalog entry.
pub async fn selected_avatar(
    store: &dyn KeyValueStore,
) -> Result<&'static Avatar, EngineError> {
    let stored = store.get(keys::SELECTED_AVATAR).await?;
    Ok(stored.as_deref().and_then(find).unwrap_or(&AVATARS[0]))
}

pub async fn select_avatar(
    store: &dyn KeyValueStore,
    stats: &ChildStats,
    id: &str,
) -> Result<&'static Avatar, EngineError> {
    let avatar = find(id).ok_or_else(|| EngineError::not_found("avatar not found"))?;

    if !unlocked(avatar, stats) {
        return Err(EngineError::invalid_state(format!(
            "{} unlocks at level {}",
            avatar.name, avatar.unlock_level
        )));
    }

    store.set(keys::SELECTED_AVATAR, avatar.id).await?;
    Ok(avatar)
}
