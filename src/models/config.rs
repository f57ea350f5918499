use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from Setup Config.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(rename = "Setup", default)]
    pub setup: SetupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSettings {
    #[serde(flatten)]
    pub app: AppDescriptor,

    /// Game settings file, relative to the install directory
    #[serde(rename = "Settings File", default = "default_settings_file")]
    pub settings_file: String,

    #[serde(rename = "Width Key", default = "default_width_key")]
    pub width_key: String,

    #[serde(rename = "Height Key", default = "default_height_key")]
    pub height_key: String,

    /// Merged into the settings file after the resolution keys
    #[serde(rename = "Extra Settings", default)]
    pub extra_settings: IndexMap<String, String>,

    #[serde(rename = "Compatibility Layers", default = "default_compat_layers")]
    pub compat_layers: String,

    #[serde(rename = "Wrapper", default)]
    pub wrapper: WrapperConfig,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            app: AppDescriptor::default(),
            settings_file: default_settings_file(),
            width_key: default_width_key(),
            height_key: default_height_key(),
            extra_settings: IndexMap::new(),
            compat_layers: default_compat_layers(),
            wrapper: WrapperConfig::default(),
            debug_mode: false,
        }
    }
}

/// Identity of the Steam application being set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Used to build `appmanifest_<id>.acf`
    #[serde(rename = "App ID", default = "default_app_id")]
    pub app_id: String,

    /// Executable expected inside the install directory
    #[serde(rename = "Executable", default = "default_executable")]
    pub executable: String,

    #[serde(rename = "Display Name", default = "default_display_name")]
    pub display_name: String,
}

impl Default for AppDescriptor {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            executable: default_executable(),
            display_name: default_display_name(),
        }
    }
}

/// Third-party rendering wrapper staged into the game directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrapperConfig {
    #[serde(rename = "Enabled", default = "default_true")]
    pub enabled: bool,

    /// A ZIP archive is unpacked; anything else is saved under the URL's file name
    #[serde(rename = "Download URL", default = "default_wrapper_url")]
    pub download_url: String,

    /// Wrapper config file, relative to the install directory. Empty disables it.
    #[serde(rename = "Config File", default = "default_wrapper_config_file")]
    pub config_file: String,

    /// `{width}` and `{height}` are replaced with the detected resolution
    #[serde(rename = "Config Template", default = "default_wrapper_template")]
    pub config_template: String,

    #[serde(rename = "Timeout Seconds", default = "default_wrapper_timeout")]
    pub timeout_secs: u64,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            download_url: default_wrapper_url(),
            config_file: default_wrapper_config_file(),
            config_template: default_wrapper_template(),
            timeout_secs: default_wrapper_timeout(),
        }
    }
}

impl SetupSettings {
    /// Settings merged into the game's settings file for a given resolution.
    pub fn settings_entries(&self, width: u32, height: u32) -> IndexMap<String, String> {
        let mut entries = IndexMap::new();
        entries.insert(self.width_key.clone(), width.to_string());
        entries.insert(self.height_key.clone(), height.to_string());
        for (key, value) in &self.extra_settings {
            entries.insert(key.clone(), value.clone());
        }
        entries
    }
}

fn default_app_id() -> String {
    "549170".to_string()
}

fn default_executable() -> String {
    "ArmyMen2.exe".to_string()
}

fn default_display_name() -> String {
    "Army Men II".to_string()
}

fn default_settings_file() -> String {
    "ArmyMen2.cfg".to_string()
}

fn default_width_key() -> String {
    "Width".to_string()
}

fn default_height_key() -> String {
    "Height".to_string()
}

fn default_compat_layers() -> String {
    "~ WINXPSP3 HIGHDPIAWARE".to_string()
}

fn default_true() -> bool {
    true
}

fn default_wrapper_url() -> String {
    "https://github.com/FunkyFr3sh/cnc-ddraw/releases/latest/download/cnc-ddraw.zip".to_string()
}

fn default_wrapper_config_file() -> String {
    "ddraw.ini".to_string()
}

fn default_wrapper_template() -> String {
    "[ddraw]\nwidth={width}\nheight={height}\nfullscreen=true\nmaintas=true\nrenderer=auto\n"
        .to_string()
}

fn default_wrapper_timeout() -> u64 {
    60
}
