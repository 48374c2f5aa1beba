//! Swag Clicker save/load.
//!
//! The whole `GameState` is written as JSON under a single key after every
//! mutation and on the periodic save timer. There is no version field: a
//! blob that does not parse as the current shape is discarded and the game
//! starts fresh.

use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use super::error::SaveError;
use super::error::SaveResult;
use super::state::GameState;

/// localStorage key. Saves already in players' browsers live here.
pub const STORAGE_KEY: &str = "yamil-clicker-save";

/// Key-value text store holding the save blob.
pub trait Storage {
    fn read(&self, key: &str) -> SaveResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> SaveResult<()>;
    fn delete(&mut self, key: &str) -> SaveResult<()>;
}

/// Process-local storage. Backs native builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> SaveResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> SaveResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> SaveResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser localStorage. Missing storage (private mode, sandboxed iframe)
/// turns every operation into `SaveError::Unavailable`.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is unavailable; progress will not be kept");
        }
        Self { storage }
    }

    fn get(&self) -> SaveResult<&web_sys::Storage> {
        self.storage.as_ref().ok_or(SaveError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn read(&self, key: &str) -> SaveResult<Option<String>> {
        self.get()?
            .get_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> SaveResult<()> {
        self.get()?
            .set_item(key, value)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn delete(&mut self, key: &str) -> SaveResult<()> {
        self.get()?
            .remove_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}

pub fn encode(state: &GameState) -> SaveResult<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode(json: &str) -> SaveResult<GameState> {
    Ok(serde_json::from_str(json)?)
}

/// Write the state under `key`. Failures are logged, never retried.
pub fn save_game<S: Storage + ?Sized>(storage: &mut S, key: &str, state: &GameState) {
    let json = match encode(state) {
        Ok(j) => j,
        Err(e) => {
            log::warn!("failed to serialize save: {e}");
            return;
        }
    };
    if let Err(e) = storage.write(key, &json) {
        log::warn!("failed to write save: {e}");
    }
}

/// Read the saved state, if any. `Ok(None)` means nothing was saved.
pub fn try_load<S: Storage + ?Sized>(storage: &S, key: &str) -> SaveResult<Option<GameState>> {
    match storage.read(key)? {
        Some(json) => decode(&json).map(Some),
        None => Ok(None),
    }
}

/// Read the saved state, falling back to a new game when it is absent or unreadable.
pub fn load_game<S: Storage + ?Sized>(storage: &S, key: &str) -> GameState {
    match try_load(storage, key) {
        Ok(Some(state)) => {
            log::info!(
                "loaded save: {} Swag, {} prestiges",
                state.points,
                state.prestige_count()
            );
            state
        }
        Ok(None) => GameState::new(),
        Err(e) => {
            log::warn!("discarding save, starting fresh: {e}");
            GameState::new()
        }
    }
}

pub fn delete_save<S: Storage + ?Sized>(storage: &mut S, key: &str) {
    if let Err(e) = storage.delete(key) {
        log::warn!("failed to delete save: {e}");
    }
}
