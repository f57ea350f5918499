//! Services module - discovery, OS integration and file writing for the setup run.
//!
//! The services have no knowledge of stage ordering or reporting; the
//! [`Pipeline`](crate::pipeline::Pipeline) strings them together.
//!
//! # Discovery
//!
//! - [`steam_root`]: Steam install root from the registry (`InstallPath`)
//! - [`library`]: library roots listed in `steamapps/libraryfolders.vdf`
//! - [`app_search`]: first library whose `appmanifest_<id>.acf`, install directory
//!   and executable all check out
//! - [`vdf`]: the single-key text extraction both manifest readers share
//!
//! # Writers
//!
//! - [`settings`]: read-merge-overwrite of flat `key=value` settings files
//! - [`compat`]: `AppCompatFlags\Layers` entry for the game executable
//! - [`wrapper`]: download, unpack and configure the rendering wrapper
//!
//! # OS collaborators
//!
//! [`RegistryStore`], [`DisplaySource`] and [`WrapperSource`] are traits so tests
//! can substitute them; [`SystemRegistry`], [`SystemDisplay`] and
//! [`HttpWrapperSource`] are the real implementations.

pub mod app_search;
pub mod compat;
pub mod display;
pub mod error;
pub mod library;
pub mod registry;
pub mod settings;
pub mod steam_root;
pub mod vdf;
pub mod wrapper;

pub use app_search::{AppManifest, search_app};
pub use compat::{apply_compat_layers, layers_location};
pub use display::{DisplaySource, Resolution, SystemDisplay};
pub use error::SetupError;
pub use library::{LibraryRoot, library_folders_path, parse_library_folders, parse_library_text};
pub use registry::{Hive, RegistryLocation, RegistryStore, SystemRegistry};
pub use settings::{SettingsDocument, merge_and_write, validate_entry};
pub use steam_root::{locate_steam_root, steam_root_locations};
pub use wrapper::{HttpWrapperSource, WrapperInstall, WrapperSource, install_wrapper};
