//! Error types emitted by the batch router CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::io;
use std::sync::Arc;

use batchroute_core::{AlgorithmParseError, QueryError, RecordError};
use batchroute_data::{DatasetError, EngineStartError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Exit status for runtime failures.
const EXIT_RUNTIME: u8 = 1;
/// Exit status for argument and configuration errors.
const EXIT_USAGE: u8 = 2;

/// Errors emitted by the batch router CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation, or help was requested.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass <{field}> or set {env})")]
    MissingArgument {
        /// Name of the missing argument.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The algorithm name is not recognised.
    #[error(transparent)]
    InvalidAlgorithm(#[from] AlgorithmParseError),
    /// The data source lacks files the algorithm needs.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// The named input file could not be opened.
    #[error("failed to open input {path:?}: {source}")]
    OpenInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The named output file could not be created.
    #[error("failed to create output {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The routing engine failed to start.
    #[error("failed to start routing engine: {0}")]
    StartEngine(#[from] EngineStartError),
    /// A record had the wrong shape or a non-numeric field.
    #[error("line {line}: malformed record {text:?}: {source}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
        /// Why the record was rejected.
        #[source]
        source: RecordError,
    },
    /// The engine could not answer a query.
    #[error("line {line}: {source}")]
    Query {
        /// 1-based line number.
        line: usize,
        /// Underlying query error.
        #[source]
        source: QueryError,
    },
    /// Reading the input failed.
    #[error("failed to read input line {line}: {source}")]
    ReadInput {
        /// 1-based number of the line being read.
        line: usize,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing results failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
    /// Writing a record diagnostic failed.
    #[error("failed to write diagnostics: {0}")]
    WriteDiagnostics(#[source] io::Error),
}

impl CliError {
    /// Whether the error stems from how the tool was invoked.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::MissingArgument { .. }
                | Self::InvalidAlgorithm(_)
                | Self::Dataset(_)
        )
    }

    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ArgumentParsing(err) => u8::try_from(err.exit_code()).unwrap_or(EXIT_USAGE),
            _ if self.is_usage_error() => EXIT_USAGE,
            _ => EXIT_RUNTIME,
        }
    }
}
