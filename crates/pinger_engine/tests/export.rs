use std::fs;
use std::time::Duration;

use pinger_engine::{
    parse_results, read_results, render_results, write_results, ExportError, ExportRow,
    ExportStatus, ProbeOutcome,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_rows() -> Vec<ExportRow> {
    vec![
        ExportRow::from_outcome(
            "10.0.0.1",
            &ProbeOutcome::Reachable(Duration::from_micros(12_500)),
        ),
        ExportRow::from_outcome("256.1.1.1", &ProbeOutcome::Unreachable),
        ExportRow::from_outcome(
            "odd,name",
            &ProbeOutcome::Error("cannot resolve odd,name".into()),
        ),
    ]
}

#[test]
fn export_has_header_and_one_line_per_result() {
    let text = render_results(&sample_rows());
    assert_eq!(
        text,
        "Host,Result Time (ms),Status\n\
         10.0.0.1,12.50,Reachable\n\
         256.1.1.1,N/A,Unreachable\n\
         \"odd,name\",N/A,Unreachable\n"
    );
}

#[test]
fn written_export_reads_back_with_same_hosts_and_statuses() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("results").join("export.csv");
    let rows = sample_rows();

    let summary = write_results(&path, &rows).unwrap();
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.output_path, path);

    let read = read_results(&path).unwrap();
    let pairs: Vec<_> = read.iter().map(|r| (r.host.as_str(), r.status)).collect();
    let expected: Vec<_> = rows.iter().map(|r| (r.host.as_str(), r.status)).collect();
    assert_eq!(pairs, expected);

    let first_ms = read[0].time_ms.unwrap();
    assert!((first_ms - 12.5).abs() < 0.01);
    assert_eq!(read[1].time_ms, None);
}

#[test]
fn rewriting_an_export_replaces_it() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("export.csv");
    write_results(&path, &sample_rows()).unwrap();
    write_results(&path, &[]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Host,Result Time (ms),Status\n"
    );
    assert!(read_results(&path).unwrap().is_empty());
}

#[test]
fn reader_rejects_foreign_files() {
    assert!(matches!(
        parse_results("a,b\n", "list.csv"),
        Err(ExportError::MissingHeader { .. })
    ));

    let err = parse_results("Host,Result Time (ms),Status\nhost,fast,Reachable\n", "x.csv")
        .unwrap_err();
    assert!(matches!(err, ExportError::MalformedRow { line: 2, .. }));

    let err = parse_results("Host,Result Time (ms),Status\nhost,1.0,Maybe\n", "x.csv")
        .unwrap_err();
    assert!(err.to_string().contains("Maybe"));
}

#[test]
fn unreachable_rows_parse_without_time() {
    let rows = parse_results(
        "Host,Result Time (ms),Status\n\nrouter,N/A,Unreachable\n",
        "x.csv",
    )
    .unwrap();
    assert_eq!(
        rows,
        vec![ExportRow {
            host: "router".into(),
            time_ms: None,
            status: ExportStatus::Unreachable,
        }]
    );
}
