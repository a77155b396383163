use crate::commands::{Cli, OutputFormat};
use medrag::config::{ConfigLoader, LogLevel, MedragConfig};
use medrag::prelude::*;
use std::path::Path;

pub struct MedragCliContext {
    pub pipeline: EnrichmentPipeline,
    pub output: OutputFormat,
}

impl MedragCliContext {
    /// Load configuration, initialize logging and build the pipeline.
    pub fn new(cli: &Cli) -> medrag::Result<Self> {
        let config = load_config(cli.config.as_deref(), cli.log_level)?;
        let pipeline = medrag::init(config)?;

        Ok(Self {
            pipeline,
            output: cli.output,
        })
    }

    /// Build the pipeline without touching the global logger.
    pub fn from_config(config: MedragConfig, output: OutputFormat) -> medrag::Result<Self> {
        let pipeline = PipelineBuilder::new().config(config).build()?;
        Ok(Self { pipeline, output })
    }
}

/// Resolve the configuration the CLI runs with.
///
/// An explicit file replaces the default file search. Without `--log-level`
/// and without a file, logging is limited to errors so it does not interleave
/// with command output.
pub fn load_config(path: Option<&Path>, log_level: Option<LogLevel>) -> medrag::Result<MedragConfig> {
    let mut loader = ConfigLoader::new();
    match path {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }
    loader.load_env();

    let mut config = loader.extract()?;
    match (log_level, path) {
        (Some(level), _) => config.logging.level = level,
        (None, None) => config.logging.level = LogLevel::Error,
        (None, Some(_)) => {}
    }
    Ok(config)
}
