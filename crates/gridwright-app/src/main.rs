//! Main application entry point.

use gridwright_app::{AppError, LogRenderer, Scenario, replay};
use gridwright_core::PlacementConfig;
use std::process::ExitCode;

const USAGE: &str = "usage: gridwright <scenario.json> [config.json]";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Gridwright");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (scenario_path, config_path) = match args.as_slice() {
        [scenario] => (scenario, None),
        [scenario, config] => (scenario, Some(config)),
        _ => return Err(AppError::Usage(USAGE.to_string())),
    };

    let config = match config_path {
        Some(path) => PlacementConfig::load(path)?,
        None => PlacementConfig::default(),
    };
    let scenario = Scenario::load(scenario_path)?;

    let mut renderer = LogRenderer::new();
    let summary = replay(&scenario, &config, &mut renderer)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
