use std::fmt;

use camino::Utf8PathBuf;

use crate::services::SetupError;
use crate::services::display::Resolution;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Resolution,
    SteamRoot,
    Libraries,
    AppSearch,
    Compatibility,
    Settings,
    Wrapper,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Resolution,
            Stage::SteamRoot,
            Stage::Libraries,
            Stage::AppSearch,
            Stage::Compatibility,
            Stage::Settings,
            Stage::Wrapper,
        ]
    }

    /// Whether a failure here stops the run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Stage::Resolution | Stage::SteamRoot | Stage::Libraries | Stage::AppSearch
        )
    }

    /// Progress line shown before the stage runs.
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Resolution => "Detecting display resolution",
            Stage::SteamRoot => "Locating Steam installation",
            Stage::Libraries => "Reading Steam library folders",
            Stage::AppSearch => "Searching libraries for the game",
            Stage::Compatibility => "Setting compatibility flags",
            Stage::Settings => "Writing game settings",
            Stage::Wrapper => "Installing rendering wrapper",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolution => "resolution",
            Stage::SteamRoot => "steam-root",
            Stage::Libraries => "libraries",
            Stage::AppSearch => "app-search",
            Stage::Compatibility => "compatibility",
            Stage::Settings => "settings",
            Stage::Wrapper => "wrapper",
        };
        write!(f, "{}", name)
    }
}

/// What happened to a single stage
#[derive(Debug)]
pub enum StageOutcome {
    Succeeded(String),
    Failed(SetupError),
    /// Not run, either because an earlier stage was fatal or it was disabled
    Skipped(String),
}

impl StageOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed(_))
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutcome::Succeeded(detail) => write!(f, "ok: {}", detail),
            StageOutcome::Failed(e) => write!(f, "FAILED: {}", e),
            StageOutcome::Skipped(reason) => write!(f, "skipped: {}", reason),
        }
    }
}

#[derive(Debug)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Final result of a setup run, with one entry per stage.
#[derive(Debug, Default)]
pub struct SetupReport {
    pub stages: Vec<StageReport>,
    pub resolution: Option<Resolution>,
    pub steam_root: Option<Utf8PathBuf>,
    pub libraries: Vec<Utf8PathBuf>,
    pub install_dir: Option<Utf8PathBuf>,
}

impl SetupReport {
    pub fn record(&mut self, stage: Stage, outcome: StageOutcome) {
        self.stages.push(StageReport { stage, outcome });
    }

    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }

    /// True when no stage failed. Skipped stages do not count against success.
    pub fn success(&self) -> bool {
        !self.stages.iter().any(|r| r.outcome.is_failed())
    }

    /// The failure that stopped the run, if any.
    pub fn fatal_error(&self) -> Option<&SetupError> {
        self.stages.iter().find_map(|r| match &r.outcome {
            StageOutcome::Failed(e) if r.stage.is_fatal() => Some(e),
            _ => None,
        })
    }

    /// Every failure in stage order.
    pub fn errors(&self) -> Vec<(Stage, &SetupError)> {
        self.stages
            .iter()
            .filter_map(|r| match &r.outcome {
                StageOutcome::Failed(e) => Some((r.stage, e)),
                _ => None,
            })
            .collect()
    }

    /// Human-readable summary: one line per stage, then the error list.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for report in &self.stages {
            lines.push(format!("  {:<14} {}", report.stage.to_string(), report.outcome));
        }

        let errors = self.errors();
        if errors.is_empty() {
            lines.push("Setup completed successfully.".to_string());
        } else {
            if let Some(fatal) = self.fatal_error() {
                lines.push(format!("Setup stopped: {}", fatal));
            }
            lines.push(format!("{} error(s):", errors.len()));
            for (stage, e) in errors {
                lines.push(format!("  - [{}] {}", stage, e));
            }
        }

        lines.join("\n")
    }
}
