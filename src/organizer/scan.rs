//! Organizer domain: asset enumeration and move planning.

use bevy::log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::{MappingEntry, OrganizerSettings};

/// Top-level folder holding every organizable asset.
pub const ASSET_ROOT: &str = "Assets";

/// Destination for particle-system prefabs that match no mapping.
pub const PARTICLE_FOLDER: &str = "Assets/Particles";

/// Sidecar extension that always travels with its asset.
pub const META_EXTENSION: &str = "meta";

const KEYWORD_SEPARATORS: [char; 3] = ['_', '-', ' '];

#[derive(Debug)]
pub enum OrganizerError {
    /// The project has no `Assets/` directory.
    MissingAssetRoot(PathBuf),
    MalformedMapping { index: usize, reason: &'static str },
}

impl std::fmt::Display for OrganizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAssetRoot(path) => {
                write!(f, "asset root {} does not exist or is not a directory", path.display())
            }
            Self::MalformedMapping { index, reason } => {
                write!(f, "mapping #{} is malformed: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for OrganizerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveReason {
    /// Matched mapping `index`; grouped under `keyword` when it is shared.
    Mapping {
        index: usize,
        keyword: Option<String>,
    },
    ParticlePrefab,
}

impl std::fmt::Display for MoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mapping {
                index,
                keyword: Some(keyword),
            } => write!(f, "mapping #{} grouped by '{}'", index, keyword),
            Self::Mapping {
                index,
                keyword: None,
            } => write!(f, "mapping #{}", index),
            Self::ParticlePrefab => write!(f, "particle prefab"),
        }
    }
}

/// One file relocation, in project-relative `Assets/...` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: String,
    pub target_folder: String,
    pub reason: MoveReason,
}

impl PlannedMove {
    pub fn destination(&self) -> String {
        format!("{}/{}", self.target_folder, file_name(&self.source))
    }
}

/// Normalize a folder to `Assets/...` form with forward slashes.
pub fn normalize_folder(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.trim().trim_end_matches('/');
    if path == ASSET_ROOT || path.starts_with("Assets/") {
        path.to_string()
    } else {
        format!("{}/{}", ASSET_ROOT, path.trim_start_matches('/'))
    }
}

pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File stem and lowercased extension (without dot).
pub fn split_name(path: &str) -> (&str, String) {
    let name = file_name(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], name[dot + 1..].to_lowercase()),
        _ => (name, String::new()),
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// First token of the stem after `prefix`, split on `_`, `-`, or space.
pub fn keyword_after_prefix(stem: &str, prefix: &str) -> Option<String> {
    stem.get(prefix.len()..)?
        .split(KEYWORD_SEPARATORS)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

pub fn is_ignored(path: &str, ignored_folders: &[String]) -> bool {
    ignored_folders.iter().any(|folder| {
        let folder = normalize_folder(&format!("{}/{}", ASSET_ROOT, folder));
        starts_with_ignore_case(path, &format!("{}/", folder))
    })
}

fn is_editor_path(path: &str) -> bool {
    path.contains("/Editor/")
}

/// First mapping accepting this file, with its keyword.
pub fn match_mapping(
    stem: &str,
    extension: &str,
    mappings: &[MappingEntry],
) -> Option<(usize, Option<String>)> {
    mappings.iter().enumerate().find_map(|(index, mapping)| {
        let allowed = mapping.normalized_extensions();
        if !allowed.is_empty() && !allowed.iter().any(|e| e == extension) {
            return None;
        }
        if !starts_with_ignore_case(stem, &mapping.prefix) {
            return None;
        }
        Some((index, keyword_after_prefix(stem, &mapping.prefix)))
    })
}

/// A prefab whose serialized content declares a particle system.
pub fn is_particle_prefab(project_root: &Path, path: &str) -> bool {
    if split_name(path).1 != "prefab" {
        return false;
    }
    fs::read_to_string(project_root.join(path))
        .map(|contents| contents.contains("ParticleSystem:"))
        .unwrap_or(false)
}

/// Every file under `Assets/` except `.meta` sidecars, sorted.
pub fn list_assets(project_root: &Path) -> Result<Vec<String>, OrganizerError> {
    let asset_root = project_root.join(ASSET_ROOT);
    if !asset_root.is_dir() {
        return Err(OrganizerError::MissingAssetRoot(asset_root));
    }

    let mut assets = Vec::new();
    let mut pending = vec![(asset_root, ASSET_ROOT.to_string())];

    while let Some((dir, relative)) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable folder {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let child = format!("{}/{}", relative, name);
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                pending.push((entry.path(), child));
            } else if split_name(&child).1 != META_EXTENSION {
                assets.push(child);
            }
        }
    }

    assets.sort();
    Ok(assets)
}

fn validate_mappings(mappings: &[MappingEntry]) -> Result<(), OrganizerError> {
    for (index, mapping) in mappings.iter().enumerate() {
        if mapping.folder_path.trim().is_empty() {
            return Err(OrganizerError::MalformedMapping {
                index,
                reason: "target folder is empty",
            });
        }
    }
    Ok(())
}

/// Work out every move an organize run would make, without touching disk.
pub fn plan(
    project_root: &Path,
    settings: &OrganizerSettings,
) -> Result<Vec<PlannedMove>, OrganizerError> {
    validate_mappings(&settings.mappings)?;
    let assets = list_assets(project_root)?;

    let candidates: Vec<&str> = assets
        .iter()
        .map(String::as_str)
        .filter(|path| !is_editor_path(path) && !is_ignored(path, &settings.ignored_folders))
        .collect();

    // Pass 1: first matching mapping per file, counting keywords per target folder.
    let mut matched = Vec::new();
    let mut keyword_counts: HashMap<(String, String), usize> = HashMap::new();
    let mut unmatched = Vec::new();

    for path in candidates {
        let (stem, extension) = split_name(path);
        match match_mapping(stem, &extension, &settings.mappings) {
            Some((index, keyword)) => {
                let folder = normalize_folder(&settings.mappings[index].folder_path);
                if let Some(keyword) = &keyword {
                    *keyword_counts
                        .entry((folder.clone(), keyword.clone()))
                        .or_default() += 1;
                }
                matched.push((path, index, folder, keyword));
            }
            None => unmatched.push(path),
        }
    }

    // Pass 2: group shared keywords into subfolders.
    let mut moves: Vec<PlannedMove> = matched
        .into_iter()
        .map(|(path, index, folder, keyword)| {
            let shared = keyword.as_ref().is_some_and(|k| {
                keyword_counts
                    .get(&(folder.clone(), k.clone()))
                    .is_some_and(|count| *count > 1)
            });
            let target_folder = match (&keyword, shared) {
                (Some(k), true) => format!("{}/{}", folder, k),
                _ => folder,
            };
            PlannedMove {
                source: path.to_string(),
                target_folder,
                reason: MoveReason::Mapping {
                    index,
                    keyword: keyword.filter(|_| shared),
                },
            }
        })
        .collect();

    if settings.organize_particle_prefabs {
        moves.extend(
            unmatched
                .into_iter()
                .filter(|path| is_particle_prefab(project_root, path))
                .map(|path| PlannedMove {
                    source: path.to_string(),
                    target_folder: PARTICLE_FOLDER.to_string(),
                    reason: MoveReason::ParticlePrefab,
                }),
        );
    }

    debug!("Planned {} move(s) from {} asset(s)", moves.len(), assets.len());
    Ok(moves)
}
