//! Sequential setup pipeline.
//!
//! Stages run strictly in [`Stage::all`] order. Discovery stages (resolution,
//! Steam root, libraries, app search) are fatal: when one fails the remaining
//! stages are recorded as skipped. The writer stages (compatibility flags,
//! settings, wrapper) are independent of each other, so a failure in one is
//! recorded and the next one still runs.
//!
//! Each stage returns a value that is folded into the [`SetupReport`]; no stage
//! reads or writes shared run state.

use std::error::Error as _;
use std::time::Duration;

use crate::models::{SetupReport, SetupSettings, Stage, StageOutcome};
use crate::services::{
    DisplaySource, RegistryStore, SetupError, WrapperSource, apply_compat_layers,
    install_wrapper, locate_steam_root, merge_and_write, parse_library_folders, search_app,
};

/// Receives one line before a stage runs and one line after it finishes.
pub trait ProgressSink {
    fn stage_started(&mut self, stage: Stage);
    fn stage_finished(&mut self, stage: Stage, outcome: &StageOutcome);
}

/// Prints progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn stage_started(&mut self, stage: Stage) {
        println!("{}...", stage.description());
    }

    fn stage_finished(&mut self, _stage: Stage, outcome: &StageOutcome) {
        println!("  {}", outcome);
    }
}

/// Discards progress.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn stage_started(&mut self, _stage: Stage) {}
    fn stage_finished(&mut self, _stage: Stage, _outcome: &StageOutcome) {}
}

/// Stages the user opted out of on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub skip_compat: bool,
    pub skip_wrapper: bool,
}

pub struct Pipeline<'a> {
    settings: &'a SetupSettings,
    registry: &'a dyn RegistryStore,
    display: &'a dyn DisplaySource,
    wrapper_source: &'a dyn WrapperSource,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a SetupSettings,
        registry: &'a dyn RegistryStore,
        display: &'a dyn DisplaySource,
        wrapper_source: &'a dyn WrapperSource,
    ) -> Self {
        Self {
            settings,
            registry,
            display,
            wrapper_source,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every stage and returns the full report. Never panics on stage errors.
    pub fn run(&self, progress: &mut dyn ProgressSink) -> SetupReport {
        let mut report = SetupReport::default();
        let app = &self.settings.app;

        let Some(resolution) = self.run_stage(Stage::Resolution, &mut report, progress, || {
            let resolution = self.display.resolution()?;
            Ok((resolution, resolution.to_string()))
        }) else {
            return skip_remaining(report, progress);
        };
        report.resolution = Some(resolution);

        let Some(steam_root) = self.run_stage(Stage::SteamRoot, &mut report, progress, || {
            let root = locate_steam_root(self.registry)?;
            let detail = root.to_string();
            Ok((root, detail))
        }) else {
            return skip_remaining(report, progress);
        };
        report.steam_root = Some(steam_root.clone());

        let Some(libraries) = self.run_stage(Stage::Libraries, &mut report, progress, || {
            let roots = parse_library_folders(&steam_root)?;
            let detail = format!("{} library folder(s)", roots.len());
            Ok((roots, detail))
        }) else {
            return skip_remaining(report, progress);
        };
        report.libraries = libraries.iter().map(|r| r.path().to_path_buf()).collect();

        let Some(install_dir) = self.run_stage(Stage::AppSearch, &mut report, progress, || {
            let dir = search_app(&libraries, app)?;
            let detail = dir.to_string();
            Ok((dir, detail))
        }) else {
            return skip_remaining(report, progress);
        };
        report.install_dir = Some(install_dir.clone());

        if self.options.skip_compat {
            self.skip(Stage::Compatibility, "disabled on the command line", &mut report, progress);
        } else {
            self.run_stage(Stage::Compatibility, &mut report, progress, || {
                let executable = install_dir.join(&app.executable);
                let location =
                    apply_compat_layers(self.registry, &executable, &self.settings.compat_layers)?;
                Ok(((), format!("\"{}\" at {}", self.settings.compat_layers, location)))
            });
        }

        self.run_stage(Stage::Settings, &mut report, progress, || {
            let path = install_dir.join(&self.settings.settings_file);
            let entries = self
                .settings
                .settings_entries(resolution.width, resolution.height);
            let doc = merge_and_write(&path, &entries)?;
            Ok(((), format!("{} keys in {}", doc.len(), path)))
        });

        if self.options.skip_wrapper {
            self.skip(Stage::Wrapper, "disabled on the command line", &mut report, progress);
        } else if !self.settings.wrapper.enabled {
            self.skip(Stage::Wrapper, "disabled in configuration", &mut report, progress);
        } else {
            self.run_stage(Stage::Wrapper, &mut report, progress, || {
                let installed = install_wrapper(
                    self.wrapper_source,
                    &self.settings.wrapper,
                    &install_dir,
                    resolution,
                )?;
                Ok(((), format!("{} file(s) staged", installed.files.len())))
            });
        }

        report
    }

    /// Runs one stage: progress line, the work itself, outcome line, report entry.
    fn run_stage<T>(
        &self,
        stage: Stage,
        report: &mut SetupReport,
        progress: &mut dyn ProgressSink,
        work: impl FnOnce() -> Result<(T, String), SetupError>,
    ) -> Option<T> {
        tracing::info!("[{}] {}", stage, stage.description());
        progress.stage_started(stage);

        let (value, outcome) = match work() {
            Ok((value, detail)) => {
                tracing::info!("[{}] ok: {}", stage, detail);
                (Some(value), StageOutcome::Succeeded(detail))
            }
            Err(e) => {
                log_failure(stage, &e);
                (None, StageOutcome::Failed(e))
            }
        };

        progress.stage_finished(stage, &outcome);
        report.record(stage, outcome);
        value
    }

    fn skip(
        &self,
        stage: Stage,
        reason: &str,
        report: &mut SetupReport,
        progress: &mut dyn ProgressSink,
    ) {
        tracing::info!("[{}] skipped: {}", stage, reason);
        let outcome = StageOutcome::Skipped(reason.to_string());
        progress.stage_finished(stage, &outcome);
        report.record(stage, outcome);
    }
}

/// Marks every stage that has not run yet as skipped.
fn skip_remaining(mut report: SetupReport, progress: &mut dyn ProgressSink) -> SetupReport {
    for &stage in Stage::all() {
        if report.outcome(stage).is_some() {
            continue;
        }
        let outcome = StageOutcome::Skipped("an earlier stage failed".to_string());
        progress.stage_finished(stage, &outcome);
        report.record(stage, outcome);
    }
    report
}

/// Expected negatives are warnings; faults are errors with their source chain.
fn log_failure(stage: Stage, e: &SetupError) {
    if e.is_expected() {
        tracing::warn!("[{}] {}", stage, e);
        return;
    }

    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    tracing::error!("[{}] {}", stage, chain);
}

/// Timeout for the wrapper download.
pub fn wrapper_timeout(settings: &SetupSettings) -> Duration {
    Duration::from_secs(settings.wrapper.timeout_secs.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_timeout_never_zero() {
        let mut settings = SetupSettings::default();
        settings.wrapper.timeout_secs = 0;
        assert_eq!(wrapper_timeout(&settings), Duration::from_secs(1));
    }
}
