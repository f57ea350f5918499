//! Locates the Steam installation root from the registry.

use camino::Utf8PathBuf;

use super::SetupError;
use super::registry::{Hive, RegistryLocation, RegistryStore};

/// Registry value holding the Steam install directory.
const INSTALL_PATH_VALUE: &str = "InstallPath";

/// Registry locations probed for the Steam root, in order.
///
/// The 64-bit view is where current Steam clients register; the plain
/// `SOFTWARE\Valve\Steam` key is what 32-bit Windows and older clients use.
pub fn steam_root_locations() -> [RegistryLocation; 2] {
    [
        RegistryLocation::new(
            Hive::LocalMachine,
            r"SOFTWARE\Wow6432Node\Valve\Steam",
            INSTALL_PATH_VALUE,
        ),
        RegistryLocation::new(
            Hive::LocalMachine,
            r"SOFTWARE\Valve\Steam",
            INSTALL_PATH_VALUE,
        ),
    ]
}

/// Resolves the Steam root directory.
///
/// A candidate is accepted only when the registry read succeeds and the
/// directory it names exists. Read failures count as absence.
pub fn locate_steam_root(registry: &dyn RegistryStore) -> Result<Utf8PathBuf, SetupError> {
    let locations = steam_root_locations();

    for location in &locations {
        match registry.read_string(location) {
            Ok(value) => {
                let path = Utf8PathBuf::from(value.trim());
                if path.as_str().is_empty() || !path.is_dir() {
                    tracing::debug!("{} points at missing directory {}", location, path);
                    continue;
                }
                tracing::info!("Found Steam at {} (from {})", path, location);
                return Ok(path);
            }
            Err(e) => {
                tracing::debug!("Registry probe failed: {}", e);
            }
        }
    }

    Err(SetupError::SteamRootNotFound {
        probed: locations.to_vec(),
    })
}
