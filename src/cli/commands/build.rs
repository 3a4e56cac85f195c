use anyhow::{Context, Ok, Result};

use super::super::args::BuildCommand;
use super::CommandResult;
use crate::{
    config::{ConfigLoadResult, load_config},
    core::{build::run_build, timestamp::BuildTimestamp},
};

pub fn build(cmd: BuildCommand) -> Result<CommandResult> {
    let common = &cmd.common;
    let start_dir = common
        .path
        .canonicalize()
        .with_context(|| format!("Project directory not found: {}", common.path.display()))?;

    let ConfigLoadResult {
        mut config,
        from_file,
        base_dir,
    } = load_config(&start_dir)?;
    if !from_file {
        tracing::debug!("No config file found, using defaults");
    }

    // Command line paths are relative to the project directory, like config paths.
    if let Some(source_root) = &common.source_root {
        config.source_root = source_root.to_string_lossy().into_owned();
    }
    if let Some(output_dir) = &common.output_dir {
        config.output_dir = output_dir.to_string_lossy().into_owned();
    }
    config.validate()?;

    let timestamp = BuildTimestamp::new(cmd.source_date_epoch.as_deref())?;
    let summary = run_build(&base_dir, config, timestamp)?;

    Ok(CommandResult::build(summary))
}
