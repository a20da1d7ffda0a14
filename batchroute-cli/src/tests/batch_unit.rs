//! Unit tests for the record processing loop and batch runs.

use super::helpers::{StubEngineBuilder, Workspace};
use super::*;
use crate::batch::BatchProcessor;
use batchroute_core::test_support::StubEngine;
use batchroute_core::{
    Algorithm, EngineFailure, EngineResponse, QueryError, RecordError, RecordField, RouteSummary,
};
use batchroute_data::DatasetError;
use rstest::rstest;
use std::io::{BufWriter, Cursor};

struct Outcome {
    result: Result<BatchSummary, CliError>,
    output: String,
    diagnostics: String,
}

fn process(engine: &StubEngine, input: &[u8]) -> Outcome {
    let mut diagnostics = Vec::new();
    let mut output = BufWriter::new(Vec::new());
    let result = BatchProcessor::new(engine, &mut diagnostics).run(Cursor::new(input), &mut output);
    Outcome {
        result,
        output: String::from_utf8(output.get_ref().clone()).expect("utf-8 output"),
        diagnostics: String::from_utf8(diagnostics).expect("utf-8 diagnostics"),
    }
}

fn no_route() -> Result<EngineResponse, EngineFailure> {
    Ok(EngineResponse::Error {
        code: "NoRoute".to_owned(),
        message: "Impossible route".to_owned(),
    })
}

#[rstest]
fn appends_distance_and_duration() {
    let engine = StubEngine::routing(12345.6, 987.3);

    let outcome = process(&engine, b"52.5,13.4,52.6,13.5\n");

    assert_eq!(outcome.output, "52.5,13.4,52.6,13.5,12345.6,987.3\n");
    assert_eq!(
        outcome.result.expect("batch should succeed"),
        BatchSummary {
            records: 1,
            routed: 1,
            skipped: 0
        }
    );
    assert!(outcome.diagnostics.is_empty());
}

#[rstest]
fn echoes_the_record_verbatim_and_renders_whole_numbers_plainly() {
    let engine = StubEngine::routing(100.0, 7.5);

    let outcome = process(&engine, b" 52.5 ,+13.40,52.6,13.5\n");

    assert_eq!(outcome.output, " 52.5 ,+13.40,52.6,13.5,100,7.5\n");
}

#[rstest]
fn routes_records_in_input_order() {
    let engine = StubEngine::routing(3.0, 3.0)
        .then_reply(Ok(EngineResponse::Ok {
            routes: vec![RouteSummary {
                distance: 1.0,
                duration: 1.5,
            }],
        }))
        .then_reply(Ok(EngineResponse::Ok {
            routes: vec![RouteSummary {
                distance: 2.0,
                duration: 2.5,
            }],
        }));

    let outcome = process(&engine, b"1,2,3,4\n5,6,7,8\n9,10,11,12");

    assert_eq!(outcome.output, "1,2,3,4,1,1.5\n5,6,7,8,2,2.5\n9,10,11,12,3,3\n");
    let requests = engine.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].origin().latitude, 5.0);
    assert_eq!(requests[1].origin().longitude, 6.0);
    assert_eq!(requests[1].destination().latitude, 7.0);
    assert_eq!(requests[1].destination().longitude, 8.0);
}

#[rstest]
fn strips_carriage_returns() {
    let engine = StubEngine::routing(12345.6, 987.3);

    let outcome = process(&engine, b"52.5,13.4,52.6,13.5\r\n");

    assert_eq!(outcome.output, "52.5,13.4,52.6,13.5,12345.6,987.3\n");
}

#[rstest]
fn empty_input_writes_nothing() {
    let engine = StubEngine::routing(1.0, 1.0);

    let outcome = process(&engine, b"");

    assert_eq!(
        outcome.result.expect("empty input succeeds"),
        BatchSummary::default()
    );
    assert!(outcome.output.is_empty());
    assert!(engine.requests().is_empty());
}

#[rstest]
fn skips_records_the_engine_rejects() {
    let engine = StubEngine::routing(10.0, 2.0).then_reply(no_route());

    let outcome = process(&engine, b"0,0,1,1\n52.5,13.4,52.6,13.5\n");

    assert_eq!(outcome.output, "52.5,13.4,52.6,13.5,10,2\n");
    assert_eq!(
        outcome.diagnostics,
        "line 1: routing failed: NoRoute. Impossible route\n"
    );
    assert_eq!(
        outcome.result.expect("rejections do not fail the batch"),
        BatchSummary {
            records: 2,
            routed: 1,
            skipped: 1
        }
    );
}

#[rstest]
#[case(b"52.5,13.4,52.6\n".as_slice(), 3)]
#[case(b"52.5,13.4,52.6,13.5,1\n".as_slice(), 5)]
#[case(b"\n".as_slice(), 1)]
fn wrong_field_counts_abort_the_batch(#[case] input: &[u8], #[case] found: usize) {
    let engine = StubEngine::routing(1.0, 1.0);

    let outcome = process(&engine, input);

    match outcome.result {
        Err(CliError::MalformedRecord { line, source, .. }) => {
            assert_eq!(line, 1);
            assert_eq!(source, RecordError::FieldCount { found });
        }
        other => panic!("expected MalformedRecord, found {other:?}"),
    }
    assert!(outcome.output.is_empty());
    assert!(engine.requests().is_empty());
}

#[rstest]
fn malformed_records_keep_earlier_output_and_stop_reading() {
    let engine = StubEngine::routing(12345.6, 987.3);

    let outcome = process(&engine, b"52.5,13.4,52.6,13.5\n52.5,13.4,52.6\n1,2,3,4\n");

    assert_eq!(outcome.output, "52.5,13.4,52.6,13.5,12345.6,987.3\n");
    let err = outcome.result.expect_err("second record is malformed");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        err.to_string(),
        "line 2: malformed record \"52.5,13.4,52.6\": expected 4 comma-separated fields, found 3"
    );
    assert_eq!(engine.requests().len(), 1);
}

#[rstest]
fn non_numeric_fields_abort_the_batch() {
    let engine = StubEngine::routing(1.0, 1.0);

    let outcome = process(&engine, b"52.5,13.4,52.6,abc\n");

    match outcome.result {
        Err(CliError::MalformedRecord { line, text, source }) => {
            assert_eq!(line, 1);
            assert_eq!(text, "52.5,13.4,52.6,abc");
            assert_eq!(
                source,
                RecordError::InvalidNumber {
                    field: RecordField::DestinationLongitude,
                    value: "abc".to_owned(),
                }
            );
        }
        other => panic!("expected MalformedRecord, found {other:?}"),
    }
}

#[rstest]
fn empty_route_lists_are_fatal() {
    let engine = StubEngine::replying(EngineResponse::Ok { routes: Vec::new() });

    let outcome = process(&engine, b"52.5,13.4,52.6,13.5\n");

    assert!(matches!(
        outcome.result,
        Err(CliError::Query {
            line: 1,
            source: QueryError::NoRoutes
        })
    ));
}

#[rstest]
fn unreachable_engines_are_fatal() {
    let engine = StubEngine::failing(EngineFailure::Unavailable {
        endpoint: "http://127.0.0.1:5000".to_owned(),
        message: "connection refused".to_owned(),
    });

    let outcome = process(&engine, b"52.5,13.4,52.6,13.5\n");

    let err = outcome.result.expect_err("transport faults end the batch");
    assert!(matches!(
        err,
        CliError::Query {
            source: QueryError::Engine(_),
            ..
        }
    ));
    assert_eq!(err.exit_code(), 1);
}

#[rstest]
fn read_errors_are_fatal_after_flushing_earlier_output() {
    let engine = StubEngine::routing(10.0, 2.0);

    let outcome = process(&engine, b"1,2,3,4\n\xff\xfe,2,3,4\n");

    assert_eq!(outcome.output, "1,2,3,4,10,2\n");
    assert!(matches!(
        outcome.result,
        Err(CliError::ReadInput { line: 2, .. })
    ));
}

#[rstest]
fn batch_runs_read_and_write_named_files() {
    let workspace = Workspace::new();
    workspace.write("records.csv", "52.5,13.4,52.6,13.5\n0,0,1,1\n");
    let engine = StubEngine::rejecting("NoRoute", "Impossible route").then_reply(Ok(
        EngineResponse::Ok {
            routes: vec![RouteSummary {
                distance: 12345.6,
                duration: 987.3,
            }],
        },
    ));
    let builder = StubEngineBuilder::new(engine);
    let mut diagnostics = Vec::new();

    let summary = run_batch_with(workspace.file_args(), &builder, &mut diagnostics)
        .expect("batch should succeed");

    assert_eq!(summary.routed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        workspace.read("routes.csv"),
        "52.5,13.4,52.6,13.5,12345.6,987.3\n"
    );
    assert_eq!(
        String::from_utf8(diagnostics).expect("utf-8 diagnostics"),
        "line 2: routing failed: NoRoute. Impossible route\n"
    );
}

#[rstest]
fn missing_input_files_fail_before_the_engine_starts() {
    let workspace = Workspace::new();
    let builder = StubEngineBuilder::new(StubEngine::routing(1.0, 1.0));
    let mut diagnostics = Vec::new();

    let err = run_batch_with(workspace.file_args(), &builder, &mut diagnostics)
        .expect_err("input does not exist");

    match &err {
        CliError::OpenInput { path, .. } => assert_eq!(path, &workspace.path("records.csv")),
        other => panic!("expected OpenInput, found {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert_eq!(builder.calls(), 0);
}

#[rstest]
fn unwritable_outputs_fail_before_the_engine_starts() {
    let workspace = Workspace::new();
    workspace.write("records.csv", "1,2,3,4\n");
    let args = BatchArgs {
        output: Some(workspace.path("missing-dir/routes.csv")),
        ..workspace.file_args()
    };
    let builder = StubEngineBuilder::new(StubEngine::routing(1.0, 1.0));
    let mut diagnostics = Vec::new();

    let err = run_batch_with(args, &builder, &mut diagnostics).expect_err("no such directory");

    assert!(matches!(err, CliError::CreateOutput { .. }));
    assert_eq!(builder.calls(), 0);
}

#[rstest]
fn missing_data_source_fails_before_opening_streams() {
    let workspace = Workspace::new();
    let args = BatchArgs {
        data_source: None,
        ..workspace.file_args()
    };
    let builder = StubEngineBuilder::new(StubEngine::routing(1.0, 1.0));
    let mut diagnostics = Vec::new();

    let err = run_batch_with(args, &builder, &mut diagnostics).expect_err("data source required");

    assert!(matches!(err, CliError::MissingArgument { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(builder.calls(), 0);
}

#[rstest]
fn incomplete_datasets_leave_existing_output_untouched() {
    let workspace = Workspace::new();
    workspace.write("records.csv", "1,2,3,4\n");
    workspace.write("routes.csv", "earlier results\n");
    let builder = StubEngineBuilder::rejecting_dataset(
        StubEngine::routing(1.0, 1.0),
        DatasetError::Incomplete {
            base: workspace.path("map.osrm"),
            algorithm: Algorithm::Ch,
            missing: vec![workspace.path("map.osrm.hsgr")],
        },
    );
    let mut diagnostics = Vec::new();

    let err = run_batch_with(workspace.file_args(), &builder, &mut diagnostics)
        .expect_err("dataset is incomplete");

    assert!(matches!(err, CliError::Dataset(_)));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(workspace.read("routes.csv"), "earlier results\n");
    assert_eq!(builder.calls(), 0);
}
