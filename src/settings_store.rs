use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::remote::events::InstanceSettings;

/// Per-instance settings, keyed by the host's context identifier.
///
/// Entries live for the whole process and are only ever overwritten.
/// One lock guards the map; values are cloned out so no guard escapes.
#[derive(Debug, Default)]
pub struct SettingsStore {
    entries: RwLock<HashMap<String, InstanceSettings>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `settings` under `context`, returning what was there before.
    pub fn insert(&self, context: &str, settings: InstanceSettings) -> Option<InstanceSettings> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(context.to_string(), settings)
    }

    pub fn get(&self, context: &str) -> Option<InstanceSettings> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(context)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::events::CommandId;
    use std::sync::Arc;
    use std::thread;

    fn settings(ip: &str, port: u16, cmd: &str) -> InstanceSettings {
        InstanceSettings {
            destination_address: ip.to_string(),
            destination_port: port,
            command: CommandId::Text(cmd.to_string()),
        }
    }

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let store = SettingsStore::new();
        assert!(store.is_empty());
        assert_eq!(store.insert("ctx", settings("10.0.0.1", 9000, "A")), None);
        let prev = store.insert("ctx", settings("10.0.0.2", 9001, "B"));
        assert_eq!(prev, Some(settings("10.0.0.1", 9000, "A")));
        assert_eq!(store.get("ctx"), Some(settings("10.0.0.2", 9001, "B")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_context_is_none() {
        let store = SettingsStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn keys_are_isolated_across_threads() {
        let store = Arc::new(SettingsStore::new());
        let handles: Vec<_> = (0..8u16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for round in 0..100u16 {
                        store.insert(&format!("ctx{}", i), settings("127.0.0.1", 8000 + i, &round.to_string()));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8);
        for i in 0..8u16 {
            let stored = store.get(&format!("ctx{}", i)).unwrap();
            assert_eq!(stored.destination_port, 8000 + i);
            assert_eq!(stored.command, CommandId::Text("99".to_string()));
        }
    }
}
