use std::sync::{Arc, Mutex};

use rusty_pay_core::{PortError, SessionStorePort};

use crate::PaymentAdapterConfig;

/// Key under which the reconnect flag lives in browser storage and in the JSON file.
pub const CONNECTED_FLAG_KEY: &str = "walletConnected";

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    connected: Arc<Mutex<bool>>,
}

impl SessionStorePort for MemorySessionStore {
    fn load_connected_flag(&self) -> Result<bool, PortError> {
        let g = self
            .connected
            .lock()
            .map_err(|e| PortError::Transport(format!("session store lock poisoned: {e}")))?;
        Ok(*g)
    }

    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError> {
        let mut g = self
            .connected
            .lock()
            .map_err(|e| PortError::Transport(format!("session store lock poisoned: {e}")))?;
        *g = connected;
        Ok(())
    }
}

/// Flag persisted as `{"walletConnected": true}`. A missing file reads as `false`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSessionStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStorePort for FileSessionStore {
    fn load_connected_flag(&self) -> Result<bool, PortError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(PortError::Transport(format!(
                    "read {} failed: {e}",
                    self.path.display()
                )))
            }
        };
        let doc: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            PortError::Validation(format!("{} is not valid JSON: {e}", self.path.display()))
        })?;
        Ok(doc
            .get(CONNECTED_FLAG_KEY)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false))
    }

    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PortError::Transport(format!("create {} failed: {e}", parent.display()))
            })?;
        }
        let doc = serde_json::json!({ CONNECTED_FLAG_KEY: connected });
        std::fs::write(&self.path, doc.to_string()).map_err(|e| {
            PortError::Transport(format!("write {} failed: {e}", self.path.display()))
        })
    }
}

/// `window.localStorage["walletConnected"] = "true"`, the way the page always stored it.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageSessionStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageSessionStore {
    fn storage() -> Result<web_sys::Storage, PortError> {
        let window =
            web_sys::window().ok_or_else(|| PortError::Transport("missing window".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| PortError::Transport(format!("localStorage access failed: {e:?}")))?
            .ok_or_else(|| PortError::NotFound("localStorage unavailable".to_owned()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorePort for LocalStorageSessionStore {
    fn load_connected_flag(&self) -> Result<bool, PortError> {
        let value = Self::storage()?
            .get_item(CONNECTED_FLAG_KEY)
            .map_err(|e| PortError::Transport(format!("localStorage read failed: {e:?}")))?;
        Ok(value.as_deref() == Some("true"))
    }

    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError> {
        let storage = Self::storage()?;
        let result = if connected {
            storage.set_item(CONNECTED_FLAG_KEY, "true")
        } else {
            storage.remove_item(CONNECTED_FLAG_KEY)
        };
        result.map_err(|e| PortError::Transport(format!("localStorage write failed: {e:?}")))
    }
}

/// Store picked from configuration: browser storage on wasm32, a JSON file when a path
/// is configured, memory otherwise.
#[derive(Debug, Clone)]
pub enum SessionStoreAdapter {
    Memory(MemorySessionStore),
    #[cfg(not(target_arch = "wasm32"))]
    File(FileSessionStore),
    #[cfg(target_arch = "wasm32")]
    LocalStorage(LocalStorageSessionStore),
}

impl Default for SessionStoreAdapter {
    fn default() -> Self {
        Self::with_config(&PaymentAdapterConfig::from_env())
    }
}

impl SessionStoreAdapter {
    pub fn with_config(config: &PaymentAdapterConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = config;
            SessionStoreAdapter::LocalStorage(LocalStorageSessionStore)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            match &config.session_flag_path {
                Some(path) => SessionStoreAdapter::File(FileSessionStore::new(path)),
                None => SessionStoreAdapter::Memory(MemorySessionStore::default()),
            }
        }
    }

    pub fn in_memory() -> Self {
        SessionStoreAdapter::Memory(MemorySessionStore::default())
    }
}

impl SessionStorePort for SessionStoreAdapter {
    fn load_connected_flag(&self) -> Result<bool, PortError> {
        match self {
            SessionStoreAdapter::Memory(store) => store.load_connected_flag(),
            #[cfg(not(target_arch = "wasm32"))]
            SessionStoreAdapter::File(store) => store.load_connected_flag(),
            #[cfg(target_arch = "wasm32")]
            SessionStoreAdapter::LocalStorage(store) => store.load_connected_flag(),
        }
    }

    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError> {
        match self {
            SessionStoreAdapter::Memory(store) => store.store_connected_flag(connected),
            #[cfg(not(target_arch = "wasm32"))]
            SessionStoreAdapter::File(store) => store.store_connected_flag(connected),
            #[cfg(target_arch = "wasm32")]
            SessionStoreAdapter::LocalStorage(store) => store.store_connected_flag(connected),
        }
    }
}
