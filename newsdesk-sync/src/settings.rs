//! Persisted sync-enable switches.

use newsdesk_store::{StateStore, StoreResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key the serialized settings live under in the state store.
pub(crate) const SETTINGS_KEY: &str = "newsdesk.sync.settings";

/// The user-facing sync switches, persisted across restarts.
///
/// Both default to off: a fresh install never talks to a CMS it was
/// not pointed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Master switch. When off nothing is pushed or pulled.
    pub remote_sync_enabled: bool,
    /// Push local mutations as they happen.
    pub auto_sync_enabled: bool,
}

impl SyncSettings {
    /// Effective auto-sync: the master switch off forces auto off.
    #[must_use]
    pub fn auto_sync_active(&self) -> bool {
        self.remote_sync_enabled && self.auto_sync_enabled
    }

    /// Loads persisted settings, falling back to defaults when the
    /// key is absent or its payload unreadable.
    pub fn load(store: &dyn StateStore) -> Self {
        match store.read(SETTINGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("stored sync settings unreadable, using defaults: {e}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("failed to read sync settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Writes the settings to the durable store.
    pub fn persist(&self, store: &dyn StateStore) -> StoreResult<()> {
        let raw = serde_json::to_string(self)?;
        store.write(SETTINGS_KEY, &raw)
    }
}
