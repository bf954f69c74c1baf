//! Integration tests for the CSV-backed row source.

use std::io::Write;

use pretty_assertions::assert_eq;
use wgen_sheet::{ColumnMap, CsvSource, RowSource, SheetError};

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn reads_header_and_rows() {
    let file = write_csv("Question,Rubric,Answer\nIs X true?,\"[]\",yes\nQ2,,\n");
    let mut source = CsvSource::open(file.path()).expect("open");

    let headers = source.headers().to_vec();
    assert_eq!(headers, ["Question", "Rubric", "Answer"]);

    let first = source.next_row().expect("row").expect("ok");
    assert_eq!(first.get(0), "Is X true?");
    assert_eq!(first.get(1), "[]");
    assert_eq!(first.get(2), "yes");

    let second = source.next_row().expect("row").expect("ok");
    assert_eq!(second.get(0), "Q2");
    assert_eq!(second.get(1), "");

    assert!(source.next_row().is_none());
}

#[test]
fn quoted_cells_keep_embedded_commas_and_newlines() {
    let file = write_csv(
        "question,rubric\n\"One, with commas\",\"[{\"\"criteria\"\": \"\"a, b\"\"}]\"\n\"multi\nline\",text\n",
    );
    let mut source = CsvSource::open(file.path()).expect("open");

    let first = source.next_row().expect("row").expect("ok");
    assert_eq!(first.get(0), "One, with commas");
    assert_eq!(first.get(1), r#"[{"criteria": "a, b"}]"#);

    let second = source.next_row().expect("row").expect("ok");
    assert_eq!(second.get(0), "multi\nline");
}

#[test]
fn ragged_rows_read_as_empty_cells() {
    let file = write_csv("question,rubric,answer\nonly-question\n");
    let mut source = CsvSource::open(file.path()).expect("open");
    let row = source.next_row().expect("row").expect("ok");
    assert_eq!(row.get(0), "only-question");
    assert_eq!(row.get(1), "");
    assert_eq!(row.get(2), "");
}

#[test]
fn missing_file_is_unavailable() {
    let error = CsvSource::open("/nonexistent/sheet.csv").expect_err("should fail");
    assert!(matches!(error, SheetError::Unavailable { .. }));
    assert!(error.to_string().contains("/nonexistent/sheet.csv"));
}

#[test]
fn column_map_resolves_against_real_header() {
    let file = write_csv("Question,Answer,Steps,Rubric,Filing Links,Pass@10,Mean,Variance\n");
    let source = CsvSource::open(file.path()).expect("open");
    let map = ColumnMap::resolve(source.headers()).expect("resolve");
    assert_eq!(map.question, 0);
    assert_eq!(map.rubric, 3);
    assert_eq!(map.answer, Some(1));
    assert_eq!(map.steps, Some(2));
    assert_eq!(map.filing_links, Some(4));
    assert_eq!(map.pass_at_10, Some(5));
    assert_eq!(map.mean, Some(6));
    assert_eq!(map.variance, Some(7));
}
