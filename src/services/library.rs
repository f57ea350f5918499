//! Steam library discovery from `steamapps/libraryfolders.vdf`.

use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use super::SetupError;
use super::vdf;

/// A directory registered with Steam as a place games may be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRoot(Utf8PathBuf);

impl LibraryRoot {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Utf8Path {
        &self.0
    }

    /// `<root>/steamapps`
    pub fn steamapps_dir(&self) -> Utf8PathBuf {
        self.0.join("steamapps")
    }

    /// `<root>/steamapps/appmanifest_<app_id>.acf`
    pub fn app_manifest_path(&self, app_id: &str) -> Utf8PathBuf {
        self.steamapps_dir()
            .join(format!("appmanifest_{}.acf", app_id))
    }

    /// `<root>/steamapps/common/<install_dir>`
    pub fn common_dir(&self, install_dir: &str) -> Utf8PathBuf {
        self.steamapps_dir().join("common").join(install_dir)
    }
}

impl fmt::Display for LibraryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path of the library manifest for a Steam root.
pub fn library_folders_path(steam_root: &Utf8Path) -> Utf8PathBuf {
    steam_root.join("steamapps").join("libraryfolders.vdf")
}

/// Reads the library roots listed in `<steam_root>/steamapps/libraryfolders.vdf`.
///
/// A manifest that is missing, unreadable, or lists no usable paths is an error;
/// it is never reported as "zero libraries".
pub fn parse_library_folders(steam_root: &Utf8Path) -> Result<Vec<LibraryRoot>, SetupError> {
    let manifest = library_folders_path(steam_root);

    let text = fs::read_to_string(&manifest).map_err(|e| {
        tracing::debug!("Failed to read {}: {}", manifest, e);
        SetupError::ManifestParse {
            path: manifest.clone(),
        }
    })?;

    let roots = parse_library_text(&text);
    if roots.is_empty() {
        return Err(SetupError::ManifestParse { path: manifest });
    }

    tracing::info!("Found {} Steam libraries in {}", roots.len(), manifest);
    Ok(roots)
}

/// Extracts library roots from manifest text, in document order.
pub fn parse_library_text(text: &str) -> Vec<LibraryRoot> {
    vdf::extract_values(text, "path")
        .into_iter()
        .map(LibraryRoot::new)
        .collect()
}
