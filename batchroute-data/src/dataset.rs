//! Completeness checks for prepared OSRM datasets.
//!
//! `osrm-extract` and friends write a family of companion files next to
//! the base path, named `<stem>.osrm.<suffix>`. The base path may be
//! given with or without its `.osrm` extension. Which companions are
//! needed depends on the algorithm the engine will run.

use std::io;

use batchroute_core::{Algorithm, EngineConfig};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

const COMMON_SUFFIXES: &[&str] = &["fileIndex", "ramIndex", "properties", "names", "timestamp"];
const CH_SUFFIXES: &[&str] = &["hsgr"];
const MLD_SUFFIXES: &[&str] = &["partition", "cells", "mldgr"];

/// Errors raised while checking a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Companion files required by the algorithm are absent.
    #[error("data source {base:?} is incomplete for {algorithm}: missing {}", display_paths(.missing))]
    Incomplete {
        /// Data source as configured.
        base: Utf8PathBuf,
        /// Algorithm the files were checked for.
        algorithm: Algorithm,
        /// Every missing companion file.
        missing: Vec<Utf8PathBuf>,
    },
    /// A companion file could not be inspected.
    #[error("failed to inspect data source file {path:?}: {source}")]
    Inspect {
        /// File being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

fn display_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A dataset whose companion files are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    base: Utf8PathBuf,
    algorithm: Algorithm,
}

impl Dataset {
    /// Check that every file `config` needs exists and return the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Incomplete`] listing all missing files, or
    /// [`DatasetError::Inspect`] when a file cannot be examined.
    pub fn locate(config: &EngineConfig) -> Result<Self, DatasetError> {
        let dataset = Self {
            base: config.data_source().to_path_buf(),
            algorithm: config.algorithm(),
        };
        let mut missing = Vec::new();
        for path in dataset.required_files() {
            if !is_present(&path)? {
                missing.push(path);
            }
        }
        if missing.is_empty() {
            log::debug!("data source {} is complete", dataset.base);
            Ok(dataset)
        } else {
            Err(DatasetError::Incomplete {
                base: dataset.base,
                algorithm: dataset.algorithm,
                missing,
            })
        }
    }

    /// Base path as configured.
    #[must_use]
    pub fn base(&self) -> &Utf8Path {
        &self.base
    }

    /// Companion files needed by the dataset's algorithm.
    #[must_use]
    pub fn required_files(&self) -> Vec<Utf8PathBuf> {
        let stem = file_stem(&self.base);
        let specific = match self.algorithm {
            Algorithm::Ch => CH_SUFFIXES,
            Algorithm::Mld => MLD_SUFFIXES,
        };
        COMMON_SUFFIXES
            .iter()
            .chain(specific)
            .map(|suffix| Utf8PathBuf::from(format!("{stem}.osrm.{suffix}")))
            .collect()
    }
}

fn file_stem(base: &Utf8Path) -> Utf8PathBuf {
    if base.extension() == Some("osrm") {
        base.with_extension("")
    } else {
        base.to_path_buf()
    }
}

fn is_present(path: &Utf8Path) -> Result<bool, DatasetError> {
    match batchroute_fs::file_is_file(path) {
        Ok(is_file) => Ok(is_file),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(DatasetError::Inspect {
            path: path.to_path_buf(),
            source,
        }),
    }
}
