//! Asset organizer: routes project files into folders by name prefix and extension.
//!
//! Runs outside the game loop, from the command line.

mod relocate;
mod scan;
mod settings;

pub use relocate::{OrganizeReport, PROJECT_FOLDERS, create_project_folders, organize};
pub use scan::{
    ASSET_ROOT, MoveReason, OrganizerError, PARTICLE_FOLDER, PlannedMove, is_ignored,
    keyword_after_prefix, list_assets, match_mapping, normalize_folder, plan,
};
pub use settings::{
    DEFAULT_PREFS_FILE, MappingEntry, OrganizerSettings, PrefsStore, SETTINGS_KEY, SettingsError,
};
