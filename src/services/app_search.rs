//! Finds the game's install directory across Steam libraries.

use std::fs;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

use super::SetupError;
use super::library::LibraryRoot;
use super::vdf;
use crate::models::AppDescriptor;

/// The one field of `appmanifest_<id>.acf` this tool cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    pub install_dir: String,
}

impl AppManifest {
    /// Extracts `installdir` from manifest text.
    pub fn parse(text: &str) -> Option<Self> {
        vdf::extract_first(text, "installdir").map(|install_dir| Self { install_dir })
    }
}

/// True when `name` is exactly one ordinary path component, so joining it onto
/// `steamapps/common` cannot leave that directory.
fn is_plain_dir_name(name: &str) -> bool {
    let mut components = Utf8Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(_)), None)
    )
}

/// Returns the install directory of `app` in the first library that fully
/// matches: manifest present and parseable, install directory present, and the
/// executable present inside it.
///
/// Every per-library miss is soft; the search only fails once all libraries
/// have been probed, and the error lists each probed `steamapps` directory.
pub fn search_app(roots: &[LibraryRoot], app: &AppDescriptor) -> Result<Utf8PathBuf, SetupError> {
    let mut probed = Vec::with_capacity(roots.len());

    for root in roots {
        probed.push(root.steamapps_dir());

        let manifest_path = root.app_manifest_path(&app.app_id);
        if !manifest_path.is_file() {
            tracing::debug!("No manifest at {}", manifest_path);
            continue;
        }

        let manifest = match fs::read_to_string(&manifest_path) {
            Ok(text) => match AppManifest::parse(&text) {
                Some(manifest) => manifest,
                None => {
                    tracing::warn!("No installdir in {}, skipping library", manifest_path);
                    continue;
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", manifest_path, e);
                continue;
            }
        };

        if !is_plain_dir_name(&manifest.install_dir) {
            tracing::warn!(
                "{} has unusable installdir {:?}, skipping library",
                manifest_path,
                manifest.install_dir
            );
            continue;
        }

        let game_dir = root.common_dir(&manifest.install_dir);
        if !game_dir.is_dir() {
            tracing::warn!(
                "{} lists install dir {} but it does not exist",
                manifest_path,
                game_dir
            );
            continue;
        }

        let executable = game_dir.join(&app.executable);
        if !executable.is_file() {
            tracing::warn!("{} not found in {}", app.executable, game_dir);
            continue;
        }

        tracing::info!("Found {} at {}", app.display_name, game_dir);
        return Ok(game_dir);
    }

    Err(SetupError::AppNotFound {
        app: app.display_name.clone(),
        probed,
    })
}
