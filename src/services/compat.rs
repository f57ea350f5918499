//! Per-executable compatibility flags (`AppCompatFlags\Layers`).

use camino::Utf8Path;

use super::SetupError;
use super::registry::{Hive, RegistryLocation, RegistryStore};

const LAYERS_KEY: &str = r"Software\Microsoft\Windows NT\CurrentVersion\AppCompatFlags\Layers";

/// Where Windows keeps the compatibility layers for `executable`.
///
/// The value name is the absolute executable path with Windows separators.
pub fn layers_location(executable: &Utf8Path) -> RegistryLocation {
    RegistryLocation::new(
        Hive::CurrentUser,
        LAYERS_KEY,
        executable.as_str().replace('/', "\\"),
    )
}

/// Sets the compatibility layers for `executable` for the current user.
pub fn apply_compat_layers(
    registry: &dyn RegistryStore,
    executable: &Utf8Path,
    layers: &str,
) -> Result<RegistryLocation, SetupError> {
    let location = layers_location(executable);
    registry.write_string(&location, layers)?;
    tracing::info!("Set compatibility layers \"{}\" at {}", layers, location);
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_location_uses_backslashes() {
        let location = layers_location(Utf8Path::new(r"C:\Games/Army Men II/ArmyMen2.exe"));
        assert_eq!(location.hive, Hive::CurrentUser);
        assert_eq!(location.key, LAYERS_KEY);
        assert_eq!(location.value, r"C:\Games\Army Men II\ArmyMen2.exe");
    }
}
