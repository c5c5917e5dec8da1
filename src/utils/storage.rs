// ============================================================================
// STORAGE - Almacenamiento durable clave/valor
// ============================================================================
// En el navegador se usa localStorage; MemoryStore sirve de fallback cuando
// localStorage no está disponible (modo privado) y como doble en tests.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Almacenamiento clave/valor de strings (API síncrona, como localStorage)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Store en memoria. Los clones comparten las mismas entradas.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};
    use web_sys::{window, Storage};

    /// `window.localStorage`
    pub struct LocalStorage {
        storage: Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, StorageError> {
            let storage = window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)?;
            Ok(Self { storage })
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.storage
                .get_item(key)
                .map_err(|e| StorageError::Operation(format!("{:?}", e)))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage
                .set_item(key, value)
                .map_err(|e| StorageError::Operation(format!("{:?}", e)))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.storage
                .remove_item(key)
                .map_err(|e| StorageError::Operation(format!("{:?}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("sb_access", "tok").unwrap();
        assert_eq!(other.get("sb_access").unwrap().as_deref(), Some("tok"));

        other.remove("sb_access").unwrap();
        assert_eq!(store.get("sb_access").unwrap(), None);
    }

    #[test]
    fn memory_store_overwrites_existing_value() {
        let store = MemoryStore::new();
        store.set("sb_role", "ngo").unwrap();
        store.set("sb_role", "restaurant").unwrap();
        assert_eq!(store.get("sb_role").unwrap().as_deref(), Some("restaurant"));
    }
}
