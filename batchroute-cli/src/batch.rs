//! The record processing loop.
//!
//! Records are handled strictly one at a time: read, parse, route, then
//! write or skip. A record the engine declines is skipped with a
//! diagnostic. Anything else that goes wrong ends the batch; lines
//! already written stay written.

use std::io::{BufRead, Write};

use batchroute_core::{Record, RouteEngine, RouteResult, query_route};

use crate::CliError;

/// Counts reported after a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records read.
    pub records: usize,
    /// Records written with route metrics.
    pub routed: usize,
    /// Records the engine declined to route.
    pub skipped: usize,
}

pub(crate) struct BatchProcessor<'a, E: RouteEngine + ?Sized> {
    engine: &'a E,
    diagnostics: &'a mut dyn Write,
}

impl<'a, E: RouteEngine + ?Sized> BatchProcessor<'a, E> {
    pub(crate) fn new(engine: &'a E, diagnostics: &'a mut dyn Write) -> Self {
        Self {
            engine,
            diagnostics,
        }
    }

    /// Process every record in `input`, flushing `output` whatever the
    /// outcome.
    pub(crate) fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<BatchSummary, CliError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let outcome = self.process(input, output);
        let flushed = output.flush().map_err(CliError::WriteOutput);
        let summary = outcome?;
        flushed?;
        Ok(summary)
    }

    fn process<R, W>(&mut self, mut input: R, output: &mut W) -> Result<BatchSummary, CliError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let mut summary = BatchSummary::default();
        let mut buffer = String::new();
        loop {
            buffer.clear();
            let line_number = summary.records + 1;
            let read = input
                .read_line(&mut buffer)
                .map_err(|source| CliError::ReadInput {
                    line: line_number,
                    source,
                })?;
            if read == 0 {
                return Ok(summary);
            }
            summary.records = line_number;

            let line = strip_line_ending(&buffer);
            let record = Record::parse(line).map_err(|source| CliError::MalformedRecord {
                line: line_number,
                text: line.to_owned(),
                source,
            })?;
            let result = query_route(self.engine, &record.query()).map_err(|source| {
                CliError::Query {
                    line: line_number,
                    source,
                }
            })?;

            match result {
                RouteResult::Ok { distance, duration } => {
                    writeln!(output, "{},{distance},{duration}", record.line())
                        .map_err(CliError::WriteOutput)?;
                    summary.routed += 1;
                }
                RouteResult::EngineError { code, message } => {
                    log::debug!("skipping line {line_number}: {code}");
                    writeln!(
                        self.diagnostics,
                        "line {line_number}: routing failed: {code}. {message}"
                    )
                    .map_err(CliError::WriteDiagnostics)?;
                    summary.skipped += 1;
                }
            }
        }
    }
}

/// Remove a trailing `\n` and then a single trailing `\r`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
