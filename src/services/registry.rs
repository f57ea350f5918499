//! Windows registry access behind a small trait so the pipeline can be tested
//! without touching a real registry.

use std::fmt;

use super::SetupError;

/// Registry root a [`RegistryLocation`] lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hive {
    LocalMachine,
    CurrentUser,
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hive::LocalMachine => write!(f, "HKLM"),
            Hive::CurrentUser => write!(f, "HKCU"),
        }
    }
}

/// A single named value under a registry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLocation {
    pub hive: Hive,
    pub key: String,
    pub value: String,
}

impl RegistryLocation {
    pub fn new(hive: Hive, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            hive,
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for RegistryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}\\{}", self.hive, self.key, self.value)
    }
}

/// Address/value store used for the Steam install path and compatibility flags.
pub trait RegistryStore {
    /// Reads a string value. Absent keys and absent values are errors.
    fn read_string(&self, location: &RegistryLocation) -> Result<String, SetupError>;

    /// Writes a string value, creating the key if needed.
    fn write_string(&self, location: &RegistryLocation, value: &str) -> Result<(), SetupError>;
}

/// The real registry on Windows; every call fails with `Unsupported` elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRegistry;

#[cfg(windows)]
impl RegistryStore for SystemRegistry {
    fn read_string(&self, location: &RegistryLocation) -> Result<String, SetupError> {
        let key = predef(location.hive)
            .open_subkey(&location.key)
            .map_err(|e| registry_error(location, e))?;
        key.get_value::<String, _>(&location.value)
            .map_err(|e| registry_error(location, e))
    }

    fn write_string(&self, location: &RegistryLocation, value: &str) -> Result<(), SetupError> {
        let (key, _) = predef(location.hive)
            .create_subkey(&location.key)
            .map_err(|e| registry_error(location, e))?;
        key.set_value(&location.value, &value)
            .map_err(|e| registry_error(location, e))
    }
}

#[cfg(windows)]
fn predef(hive: Hive) -> winreg::RegKey {
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    match hive {
        Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
        Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
    }
}

#[cfg(windows)]
fn registry_error(location: &RegistryLocation, e: std::io::Error) -> SetupError {
    SetupError::Registry {
        location: location.clone(),
        message: e.to_string(),
    }
}

#[cfg(not(windows))]
impl RegistryStore for SystemRegistry {
    fn read_string(&self, _location: &RegistryLocation) -> Result<String, SetupError> {
        Err(SetupError::Unsupported("Registry access"))
    }

    fn write_string(&self, _location: &RegistryLocation, _value: &str) -> Result<(), SetupError> {
        Err(SetupError::Unsupported("Registry access"))
    }
}
