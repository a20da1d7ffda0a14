//! Command-line interface for the OSRM batch router.
//!
//! Reads `origin_lat,origin_lng,dest_lat,dest_lng` records, routes each
//! pair through a private `osrm-routed` process, and writes the record
//! back with the route's distance and duration appended.
#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;

use batchroute_core::{Algorithm, EngineConfig, RouteEngine};
use batchroute_data::{Dataset, OsrmRoutedConfig, OsrmRoutedEngine};
use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod batch;
mod error;
mod streams;

pub use batch::BatchSummary;
pub use error::CliError;

pub(crate) const ARG_DATA_SOURCE: &str = "data-source";
pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_ALGORITHM: &str = "algorithm";
pub(crate) const ARG_OSRM_ROUTED: &str = "osrm-routed";
pub(crate) const ARG_STARTUP_TIMEOUT: &str = "startup-timeout";
pub(crate) const ENV_DATA_SOURCE: &str = "BATCHROUTE_CMDS_BATCHROUTE_DATA_SOURCE";

/// Run the batch router with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first fatal condition. Help
/// output is reported as [`CliError::ArgumentParsing`] with exit code `0`.
pub fn run() -> Result<(), CliError> {
    run_from(std::env::args_os())
}

/// Run the batch router with explicit arguments, the first being the
/// program name.
///
/// # Errors
///
/// See [`run`].
pub fn run_from<I, T>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = parse_args(args)?;
    let mut diagnostics = std::io::stderr();
    let summary = run_batch_with(args, &DefaultEngineBuilder, &mut diagnostics)?;
    log::info!(
        "processed {} records: {} routed, {} skipped",
        summary.records,
        summary.routed,
        summary.skipped
    );
    Ok(())
}

/// One-line usage text for diagnostics.
#[must_use]
pub fn usage() -> String {
    BatchArgs::command().render_usage().to_string()
}

/// Parse arguments, letting `--help` win over every other argument.
fn parse_args<I, T>(args: I) -> Result<BatchArgs, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if requests_help(&args) {
        let program = args
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from("batchroute"));
        return BatchArgs::try_parse_from([program, OsString::from("--help")])
            .map_err(CliError::ArgumentParsing);
    }
    BatchArgs::try_parse_from(args).map_err(CliError::ArgumentParsing)
}

fn requests_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == "-h" || arg == "--help")
}

pub(crate) fn run_batch_with(
    args: BatchArgs,
    builder: &dyn EngineBuilder,
    diagnostics: &mut dyn Write,
) -> Result<BatchSummary, CliError> {
    let config = args.into_config()?;
    builder.prepare(&config)?;
    let input = streams::open_input(config.input.as_deref())?;
    let mut output = streams::open_output(config.output.as_deref())?;
    let engine = builder.build(&config)?;
    batch::BatchProcessor::new(engine.as_ref(), diagnostics).run(input, &mut output)
}

/// CLI arguments for the batch router.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "batchroute",
    about = "Append OSRM route distance and duration to coordinate-pair records",
    long_about = "Read origin_lat,origin_lng,dest_lat,dest_lng records line by \
                  line, route each pair with osrm-routed, and write the record \
                  followed by distance and duration. Records the engine cannot \
                  route are skipped with a diagnostic; malformed records abort \
                  the batch.",
    version
)]
#[ortho_config(prefix = "BATCHROUTE")]
pub(crate) struct BatchArgs {
    /// Prepared OSRM dataset, e.g. `map.osrm`.
    #[arg(value_name = "data-source")]
    #[serde(default)]
    pub(crate) data_source: Option<Utf8PathBuf>,
    /// Read records from this file instead of standard input.
    #[arg(short = 'i', long = ARG_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Write results to this file instead of standard output.
    #[arg(short = 'o', long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Routing algorithm the dataset was prepared for: CH or MLD.
    #[arg(short = 'a', long = ARG_ALGORITHM, value_name = "CH|MLD")]
    #[serde(default)]
    pub(crate) algorithm: Option<String>,
    /// Path to the `osrm-routed` executable.
    #[arg(long = ARG_OSRM_ROUTED, value_name = "path")]
    #[serde(default)]
    pub(crate) osrm_routed: Option<Utf8PathBuf>,
    /// Seconds to wait for the engine to load the dataset.
    #[arg(long = ARG_STARTUP_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) startup_timeout: Option<u64>,
}

impl BatchArgs {
    fn into_config(self) -> Result<RunConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RunConfig::try_from(merged)
    }
}

/// Resolved configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunConfig {
    pub(crate) engine: EngineConfig,
    pub(crate) input: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) routed: OsrmRoutedConfig,
}

impl TryFrom<BatchArgs> for RunConfig {
    type Error = CliError;

    fn try_from(args: BatchArgs) -> Result<Self, Self::Error> {
        let data_source = args.data_source.ok_or(CliError::MissingArgument {
            field: ARG_DATA_SOURCE,
            env: ENV_DATA_SOURCE,
        })?;
        let algorithm = match args.algorithm {
            Some(name) => name.parse::<Algorithm>()?,
            None => Algorithm::default(),
        };

        let mut routed = OsrmRoutedConfig::default();
        if let Some(executable) = args.osrm_routed {
            routed = routed.with_executable(executable);
        }
        if let Some(secs) = args.startup_timeout {
            routed = routed.with_startup_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            engine: EngineConfig::new(algorithm, data_source),
            input: args.input,
            output: args.output,
            routed,
        })
    }
}

/// Builds the route engine for a batch run.
pub(crate) trait EngineBuilder {
    /// Validate the configured data source. Runs before any stream is opened.
    fn prepare(&self, config: &RunConfig) -> Result<(), CliError>;

    fn build(&self, config: &RunConfig) -> Result<Box<dyn RouteEngine>, CliError>;
}

struct DefaultEngineBuilder;

impl EngineBuilder for DefaultEngineBuilder {
    fn prepare(&self, config: &RunConfig) -> Result<(), CliError> {
        let dataset = Dataset::locate(&config.engine)?;
        log::debug!("using data source {}", dataset.base());
        Ok(())
    }

    fn build(&self, config: &RunConfig) -> Result<Box<dyn RouteEngine>, CliError> {
        let engine = OsrmRoutedEngine::start(&config.engine, &config.routed)?;
        Ok(Box::new(engine))
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RunConfig, CliError> {
    let merged = BatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RunConfig::try_from(merged)
}

#[cfg(test)]
mod tests;
