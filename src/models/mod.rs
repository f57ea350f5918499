//! Data models for the setup tool.
//!
//! - [`SetupConfig`]: the app descriptor, settings keys, compatibility layers and
//!   wrapper options loaded from `Setup Config.yaml`
//! - [`AppDescriptor`]: identity of the Steam application being set up
//! - [`SetupReport`]: per-stage outcomes of a run, folded together by the
//!   [`Pipeline`](crate::pipeline::Pipeline)

pub mod config;
pub mod report;

pub use config::{AppDescriptor, SetupConfig, SetupSettings, WrapperConfig};
pub use report::{SetupReport, Stage, StageOutcome, StageReport};
