use std::{collections::HashMap, sync::Arc};

use kinema_platform::{MaybeSend, MaybeSync, Mutex};

use crate::error::PrefsResult;

/// String key-value storage provided by the host.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = KeyValueStoreMock)
)]
pub trait KeyValueStore: MaybeSend + MaybeSync + 'static {
    fn get(&self, key: &str) -> PrefsResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PrefsResult<()>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PrefsResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
