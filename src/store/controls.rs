//! User-defined control store
//!
//! Persists the mapping from command-hand launch gestures to ordered lists
//! of launch targets (platform URIs, executable paths, or bare program
//! names). The record is keyed by a per-installation identifier generated
//! once and stored alongside it. Read once at startup; written back when
//! the user edits the mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// The five launch-slot gesture names, in slot order.
///
/// These strings are the persisted record's keys and must stay stable.
pub const SLOT_NAMES: [&str; 5] = [
    "index",
    "index and middle",
    "index, middle and ring",
    "index, middle, ring and little",
    "thumb",
];

/// Gesture name → ordered launch-target list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserControlMap(pub BTreeMap<String, Vec<String>>);

impl UserControlMap {
    /// A map with every slot present and empty
    pub fn seeded() -> Self {
        let mut map = BTreeMap::new();
        for name in SLOT_NAMES {
            map.insert(name.to_string(), Vec::new());
        }
        Self(map)
    }

    /// Targets configured for a slot, empty when unset
    pub fn targets(&self, slot: &str) -> &[String] {
        self.0.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace a slot's target list, dropping empty entries
    pub fn set(&mut self, slot: &str, targets: Vec<String>) {
        let targets: Vec<String> = targets
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && t != "null")
            .collect();
        self.0.insert(slot.to_string(), targets);
    }

    /// Clear a slot
    pub fn clear(&mut self, slot: &str) {
        self.0.insert(slot.to_string(), Vec::new());
    }

    pub fn is_slot_name(slot: &str) -> bool {
        SLOT_NAMES.contains(&slot)
    }
}

/// The on-disk record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Per-installation identifier
    pub id: String,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Last edit time
    pub updated_at: DateTime<Utc>,
    /// The gesture-to-target mapping
    #[serde(rename = "userDefinedControls")]
    pub controls: UserControlMap,
}

impl StoreRecord {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            controls: UserControlMap::seeded(),
        }
    }
}

/// File-backed control store
pub struct ControlStore {
    path: PathBuf,
    id_path: PathBuf,
}

impl ControlStore {
    /// Store rooted at the given directory
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("controls.json"),
            id_path: dir.join("device_id"),
        }
    }

    /// Store under the default application directory
    pub fn default_location() -> Self {
        let dir = dirs::home_dir()
            .map(|h| h.join(".handctl"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(&dir)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stable per-installation id, generated and persisted on first
    /// use.
    pub fn install_id(&self) -> crate::Result<String> {
        if let Ok(existing) = std::fs::read_to_string(&self.id_path) {
            let trimmed = existing.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        let id = Uuid::new_v4().to_string();
        if let Some(parent) = self.id_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.id_path, &id)?;
        info!(%id, "Generated installation id");
        Ok(id)
    }

    /// Load the record, seeding a fresh one on first run.
    ///
    /// A corrupt or unreadable record falls back to an empty seeded map,
    /// behaviorally identical to a valid empty mapping and distinguishable
    /// only by the warning logged here.
    pub fn load_or_init(&self) -> crate::Result<StoreRecord> {
        let id = self.install_id()?;
        if !self.path.exists() {
            let record = StoreRecord::new(id);
            self.save(&record)?;
            info!(path = %self.path.display(), "Seeded new control store");
            return Ok(record);
        }
        match std::fs::read_to_string(&self.path)
            .map_err(crate::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<StoreRecord>(&content)?))
        {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "Control store unreadable ({e}); falling back to empty mapping"
                );
                Ok(StoreRecord::new(id))
            }
        }
    }

    /// Write the record back, stamping `updated_at`.
    pub fn save(&self, record: &StoreRecord) -> crate::Result<()> {
        let mut record = record.clone();
        record.updated_at = Utc::now();
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
