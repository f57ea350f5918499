//! ArmyMen2 Setup - prepares a Steam install of Army Men II for modern Windows.
//!
//! # Execution Flow
//!
//! 1. Parse command line options
//! 2. Load `Setup Config.yaml` from the config directory (defaults if missing)
//! 3. Initialize logging → logs/armymen2-setup.<date>
//! 4. Run the setup pipeline:
//!    resolution → Steam root → libraries → game search → compatibility flags →
//!    settings file → rendering wrapper
//! 5. Print the per-stage summary; exit non-zero if any stage failed
//!
//! # Platform
//!
//! Windows 10/11. Registry and display access report "unsupported" elsewhere.

use std::process::ExitCode;

use anyhow::Result;
use armymen2_setup::pipeline::wrapper_timeout;
use armymen2_setup::services::{HttpWrapperSource, SystemDisplay, SystemRegistry};
use armymen2_setup::{
    APP_NAME, ConfigManager, ConsoleProgress, Pipeline, PipelineOptions, SetupConfig, VERSION,
};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(
    name = "armymen2-setup",
    version,
    about = "Configure a Steam install of Army Men II: compatibility flags, resolution and rendering wrapper"
)]
struct Cli {
    /// Directory holding Setup Config.yaml.
    #[clap(long, default_value = "Setup Data")]
    config_dir: Utf8PathBuf,

    /// Log at debug level and mirror logs to the console.
    #[clap(short, long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Leave the Windows compatibility flags untouched.
    #[clap(long, action = ArgAction::SetTrue)]
    skip_compat: bool,

    /// Do not download or configure the rendering wrapper.
    #[clap(long, action = ArgAction::SetTrue)]
    skip_wrapper: bool,

    /// Write the default Setup Config.yaml and exit.
    #[clap(long, action = ArgAction::SetTrue)]
    write_default_config: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(&cli.config_dir)?;

    if cli.write_default_config {
        config_manager.save_setup_config(&SetupConfig::default())?;
        println!("Wrote {}", config_manager.setup_config_path());
        return Ok(ExitCode::SUCCESS);
    }

    let config = config_manager.load_setup_config()?;
    let settings = &config.setup;
    let debug = cli.debug || settings.debug_mode;

    let _guard =
        armymen2_setup::logging::setup_logging_with_console("logs", APP_NAME, debug, debug)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    println!("{} v{} - {}", APP_NAME, VERSION, settings.app.display_name);

    let registry = SystemRegistry;
    let display = SystemDisplay;
    let wrapper_source = HttpWrapperSource::new(wrapper_timeout(settings));

    let report = Pipeline::new(settings, &registry, &display, &wrapper_source)
        .with_options(PipelineOptions {
            skip_compat: cli.skip_compat,
            skip_wrapper: cli.skip_wrapper,
        })
        .run(&mut ConsoleProgress);

    let summary = report.summary();
    println!();
    println!("{}", summary);
    tracing::info!("Setup finished (success={})\n{}", report.success(), summary);

    Ok(if report.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
