//! Test helpers for batch runs against a scripted engine.

use super::*;
use batchroute_core::test_support::StubEngine;
use batchroute_data::DatasetError;
use std::cell::{Cell, RefCell};
use std::fs;
use tempfile::TempDir;

/// Hands out a prepared [`StubEngine`] and counts build requests.
pub(super) struct StubEngineBuilder {
    engine: RefCell<Option<StubEngine>>,
    dataset_error: RefCell<Option<DatasetError>>,
    calls: Cell<usize>,
}

impl StubEngineBuilder {
    pub(super) fn new(engine: StubEngine) -> Self {
        Self {
            engine: RefCell::new(Some(engine)),
            dataset_error: RefCell::new(None),
            calls: Cell::new(0),
        }
    }

    /// Fail data source validation with `err`.
    pub(super) fn rejecting_dataset(engine: StubEngine, err: DatasetError) -> Self {
        let builder = Self::new(engine);
        builder.dataset_error.replace(Some(err));
        builder
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl EngineBuilder for StubEngineBuilder {
    fn prepare(&self, _config: &RunConfig) -> Result<(), CliError> {
        match self.dataset_error.borrow_mut().take() {
            Some(err) => Err(CliError::Dataset(err)),
            None => Ok(()),
        }
    }

    fn build(&self, _config: &RunConfig) -> Result<Box<dyn RouteEngine>, CliError> {
        self.calls.set(self.calls.get() + 1);
        let engine = self
            .engine
            .borrow_mut()
            .take()
            .expect("engine should be built once per run");
        Ok(Box::new(engine))
    }
}

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("write workspace file");
        path
    }

    pub(super) fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read workspace file")
    }

    /// Arguments reading `records.csv` and writing `routes.csv`.
    pub(super) fn file_args(&self) -> BatchArgs {
        BatchArgs {
            data_source: Some(self.path("map.osrm")),
            input: Some(self.path("records.csv")),
            output: Some(self.path("routes.csv")),
            ..BatchArgs::default()
        }
    }
}
