//! Organizer domain: folder mappings and the persisted settings store.

use bevy::log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "GlobalAssetOrganizer.UISettings";

/// Default prefs file name inside a project root.
pub const DEFAULT_PREFS_FILE: &str = ".asset_organizer_prefs.json";

/// One prefix/extension rule routing files into a target folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    /// Case-insensitive file name prefix; empty matches everything.
    #[serde(default)]
    pub prefix: String,
    pub folder_path: String,
    /// Allowed extensions; empty allows any.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl MappingEntry {
    pub fn new(prefix: &str, folder_path: &str, extensions: &[&str]) -> Self {
        Self {
            prefix: prefix.to_string(),
            folder_path: folder_path.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Extensions lowercased with any leading dot removed.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizerSettings {
    pub mappings: Vec<MappingEntry>,
    /// Folders relative to `Assets/` that are never touched.
    pub ignored_folders: Vec<String>,
    pub organize_particle_prefabs: bool,
    pub show_detailed_logs: bool,
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            ignored_folders: Vec::new(),
            organize_particle_prefabs: true,
            show_detailed_logs: true,
        }
    }
}

impl OrganizerSettings {
    /// Starter preset matching the standard project folders.
    pub fn template() -> Self {
        Self {
            mappings: vec![
                MappingEntry::new("T_", "Assets/Textures", &[".png", ".jpg", ".jpeg"]),
                MappingEntry::new("", "Assets/Prefabs", &[".prefab"]),
                MappingEntry::new("", "Assets/Scripts", &[".cs"]),
                MappingEntry::new("SG_", "Assets/Shaders", &[".shadergraph", ".shader", ".compute"]),
                MappingEntry::new("AUD_", "Assets/Audios", &[".mp3", ".flac"]),
                MappingEntry::new("", "Assets/Assets", &[".gltf", ".obj", ".fbx"]),
                MappingEntry::new("VFX", "Assets/VFX", &[".vfx"]),
                MappingEntry::new("ANIM", "Assets/Animations", &[".controller"]),
            ],
            ignored_folders: ["Plugins", "Editor", "Resources", "AssetOrganizer"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            organize_particle_prefabs: true,
            show_detailed_logs: false,
        }
    }

    /// Load from the store, falling back to defaults on missing or corrupt data.
    pub fn load(store: &PrefsStore) -> Self {
        let Some(blob) = store.get_string(SETTINGS_KEY) else {
            debug!("No organizer settings stored; using defaults");
            return Self::default();
        };

        match serde_json::from_str(&blob) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Stored organizer settings are unreadable ({}); using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &PrefsStore) -> Result<(), SettingsError> {
        let blob = serde_json::to_string(self).map_err(|e| SettingsError {
            path: store.path().to_path_buf(),
            message: format!("Serialize error: {}", e),
        })?;
        store.set_string(SETTINGS_KEY, blob)
    }
}

/// Failure to persist settings.
#[derive(Debug)]
pub struct SettingsError {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to save {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for SettingsError {}

/// String key/value store persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside a project root.
    pub fn for_project(project_root: &Path) -> Self {
        Self::open(project_root.join(DEFAULT_PREFS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Prefs file {} is corrupt ({}); ignoring it", self.path.display(), e);
            BTreeMap::new()
        })
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    pub fn set_string(&self, key: &str, value: String) -> Result<(), SettingsError> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value);

        let contents = serde_json::to_string_pretty(&entries).map_err(|e| SettingsError {
            path: self.path.clone(),
            message: format!("Serialize error: {}", e),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError {
                path: self.path.clone(),
                message: format!("IO error: {}", e),
            })?;
        }

        fs::write(&self.path, contents).map_err(|e| SettingsError {
            path: self.path.clone(),
            message: format!("IO error: {}", e),
        })
    }
}
