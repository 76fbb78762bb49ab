use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::providers::City;
use crate::schedule::Method;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LastRead {
    pub surah: u32,
    pub ayah: u32,
}

/// User preferences persisted across sessions. Read once at startup, written
/// only on explicit save.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Preferences {
    pub user_name: String,
    /// An unrecognized method id falls back to the default preset instead of
    /// failing the whole file and discarding the other fields.
    #[serde(deserialize_with = "lenient_method")]
    pub calculation_method: Method,
    pub selected_city: Option<City>,
    pub last_read: Option<LastRead>,
}

fn lenient_method<'de, D>(deserializer: D) -> Result<Method, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    Ok(Method::from_id(&id))
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            user_name: "Sahabat Muslim".to_string(),
            calculation_method: Method::default(),
            selected_city: None,
            last_read: None,
        }
    }
}

pub struct PreferenceStore {
    base: PathBuf,
}

impl PreferenceStore {
    pub fn new(base: PathBuf) -> Self {
        PreferenceStore { base }
    }

    fn path(&self) -> PathBuf {
        self.base.join("preferences.json")
    }

    /// A missing or unreadable file yields the defaults; preferences are
    /// never a reason to fail startup.
    pub fn load(&self) -> Preferences {
        let path = self.path();
        if !path.exists() {
            return Preferences::default();
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Preferences::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!("corrupt preferences in {}: {}", path.display(), e);
                Preferences::default()
            }
        }
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let content = serde_json::to_string_pretty(preferences)?;
        std::fs::write(self.path(), content)?;
        Ok(())
    }
}
