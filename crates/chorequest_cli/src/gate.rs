//! Parent PIN gate. The PIN is stored as plain text next to the task data;
//! it keeps children out of parent commands and is not a security boundary.

use chorequest_core::error::EngineError;
use chorequest_core::storage::{KeyValueStore, keys};

const MIN_PIN_LENGTH: usize = 4;

pub async fn set_pin(store: &dyn KeyValueStore, pin: &str) -> Result<(), EngineError> {
    if store.get(keys::PARENT_PIN).await?.is_some() {
        return Err(EngineError::invalid_state(
            "a parent PIN is already set, use pin change",
        ));
    }
    validate_pin(pin)?;
    store.set(keys::PARENT_PIN, pin).await
}

pub async fn change_pin(
    store: &dyn KeyValueStore,
    current: &str,
    new_pin: &str,
) -> Result<(), EngineError> {
    verify_pin(store, current).await?;
    validate_pin(new_pin)?;
    store.set(keys::PARENT_PIN, new_pin).await
}

pub async fn verify_pin(store: &dyn KeyValueStore, pin: &str) -> Result<(), EngineError> {
    let stored = store.get(keys::PARENT_PIN).await?.ok_or_else(|| {
        EngineError::invalid_state("no parent PIN is set, run pin set first")
    })?;

    if stored != pin {
        return Err(EngineError::invalid_input("parent PIN does not match"));
    }

    Ok(())
}

fn validate_pin(pin: &str) -> Result<(), EngineError> {
    if pin.chars().count() < MIN_PIN_LENGTH {
        return Err(EngineError::invalid_input(
            "the PIN must be at least 4 characters",
        ));
    }
    Ok(())
}
