use camino::Utf8PathBuf;
use thiserror::Error;

use super::registry::RegistryLocation;

/// Errors that can occur while setting up the game
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Steam installation not found (probed {})", join_locations(.probed))]
    SteamRootNotFound { probed: Vec<RegistryLocation> },

    #[error("Could not read any library folders from {path}")]
    ManifestParse { path: Utf8PathBuf },

    #[error("{app} is not installed in any Steam library (probed {})", join_paths(.probed))]
    AppNotFound {
        app: String,
        probed: Vec<Utf8PathBuf>,
    },

    #[error("Display resolution unavailable: {0}")]
    Display(String),

    #[error("Registry access failed at {location}: {message}")]
    Registry {
        location: RegistryLocation,
        message: String,
    },

    #[error("Failed to write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to write {path}: {reason}")]
    InvalidSetting { path: Utf8PathBuf, reason: String },

    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    #[error("Wrapper archive is invalid: {0}")]
    Archive(String),

    #[error("{0} is only supported on Windows")]
    Unsupported(&'static str),
}

impl SetupError {
    /// Expected negative outcomes: the thing we looked for is simply not there.
    ///
    /// Everything else is an unexpected fault (I/O broke, the OS refused, the
    /// network failed) and is logged with its full source chain.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            SetupError::SteamRootNotFound { .. }
                | SetupError::ManifestParse { .. }
                | SetupError::AppNotFound { .. }
        )
    }

    pub(crate) fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        SetupError::Write {
            path: path.into(),
            source,
        }
    }
}

fn join_locations(locations: &[RegistryLocation]) -> String {
    locations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    if paths.is_empty() {
        return "no libraries".to_string();
    }
    paths
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
