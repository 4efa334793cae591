//! Organizer domain: executing planned moves and creating project folders.

use bevy::log::{debug, info, warn};
use std::fs;
use std::path::Path;

use super::scan::{ASSET_ROOT, META_EXTENSION, OrganizerError, PlannedMove, plan};
use super::settings::OrganizerSettings;

/// Folders created by [`create_project_folders`], under `Assets/`.
pub const PROJECT_FOLDERS: [&str; 9] = [
    "Animations",
    "Audios",
    "Materials",
    "Assets",
    "Prefabs",
    "Scripts",
    "Shaders",
    "Textures",
    "VFX",
];

/// Outcome of an organize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Moves the plan asked for.
    pub planned: usize,
    /// Files actually relocated.
    pub moved: usize,
    /// Planned moves that made no progress (already in place, name taken, I/O failure).
    pub skipped: usize,
}

/// Relocate every matching asset under `project_root`.
///
/// Individual move failures are counted, never returned.
pub fn organize(
    project_root: &Path,
    settings: &OrganizerSettings,
) -> Result<OrganizeReport, OrganizerError> {
    let planned = plan(project_root, settings)?;
    let mut report = OrganizeReport {
        planned: planned.len(),
        ..Default::default()
    };

    for planned_move in &planned {
        if move_asset(project_root, planned_move, settings.show_detailed_logs) {
            report.moved += 1;
        } else {
            report.skipped += 1;
        }
    }

    info!(
        "Organized assets: moved={}, skipped={}, planned={}",
        report.moved, report.skipped, report.planned
    );
    Ok(report)
}

/// Move one asset (and its `.meta` sidecar). Returns whether the asset moved.
fn move_asset(project_root: &Path, planned_move: &PlannedMove, verbose: bool) -> bool {
    let destination = planned_move.destination();
    if destination == planned_move.source {
        if verbose {
            debug!("{} already in place", planned_move.source);
        }
        return false;
    }

    let source_path = project_root.join(&planned_move.source);
    let destination_path = project_root.join(&destination);

    if let Err(e) = fs::create_dir_all(project_root.join(&planned_move.target_folder)) {
        warn!("Cannot create {}: {}", planned_move.target_folder, e);
        return false;
    }
    if destination_path.exists() {
        if verbose {
            warn!("{} not moved: {} already exists", planned_move.source, destination);
        }
        return false;
    }
    if let Err(e) = fs::rename(&source_path, &destination_path) {
        warn!("Failed to move {} to {}: {}", planned_move.source, destination, e);
        return false;
    }

    let source_meta = source_path.with_extension(meta_extension_for(&source_path));
    if source_meta.exists() {
        let destination_meta = destination_path.with_extension(meta_extension_for(&destination_path));
        if let Err(e) = fs::rename(&source_meta, &destination_meta) {
            warn!("Moved {} but not its meta file: {}", planned_move.source, e);
        }
    }

    if verbose {
        info!("Moved {} -> {}", planned_move.source, destination);
    }
    true
}

/// `foo.png` -> extension `png.meta`, giving `foo.png.meta`.
fn meta_extension_for(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), META_EXTENSION),
        None => META_EXTENSION.to_string(),
    }
}

/// Create the standard top-level folders under `Assets/`. Returns how many were new.
pub fn create_project_folders(project_root: &Path) -> std::io::Result<usize> {
    let asset_root = project_root.join(ASSET_ROOT);
    let mut created = 0;
    for folder in PROJECT_FOLDERS {
        let path = asset_root.join(folder);
        if !path.is_dir() {
            fs::create_dir_all(&path)?;
            created += 1;
        }
    }
    Ok(created)
}
