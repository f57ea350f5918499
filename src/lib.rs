// ArmyMen2 Setup - Steam discovery, compatibility flags, settings and wrapper staging
//
// This is the library crate containing the core discovery logic and data structures.
// The binary crate (main.rs) provides the command line entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AppDescriptor, SetupConfig, SetupReport, Stage, StageOutcome};
pub use pipeline::{ConsoleProgress, Pipeline, PipelineOptions, ProgressSink};
pub use services::SetupError;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
