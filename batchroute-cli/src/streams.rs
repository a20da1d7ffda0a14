//! Input and output stream selection.

use std::io::{self, BufRead, BufReader, BufWriter, Write};

use batchroute_fs::{create_utf8_file, open_utf8_file};
use camino::Utf8Path;

use crate::CliError;

/// Open `path` for reading, or standard input when absent.
pub(crate) fn open_input(path: Option<&Utf8Path>) -> Result<Box<dyn BufRead>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdin().lock()));
    };
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Create or truncate `path` for writing, or standard output when absent.
pub(crate) fn open_output(path: Option<&Utf8Path>) -> Result<Box<dyn Write>, CliError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };
    let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}
