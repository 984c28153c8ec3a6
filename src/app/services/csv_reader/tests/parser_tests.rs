//! Tests for header/record assembly

use crate::app::services::csv_reader::parse;

#[test]
fn test_records_are_keyed_by_header() {
    let table = parse("nome,lat,lng\nSummit,-10.0,-48.0\nGate,1.5,2.5");

    assert_eq!(table.headers, vec!["nome", "lat", "lng"]);
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[0]["nome"], "Summit");
    assert_eq!(table.records[0]["lat"], "-10.0");
    assert_eq!(table.records[1]["lng"], "2.5");
}

#[test]
fn test_short_rows_pad_with_empty_strings() {
    let table = parse("nome,lat,lng,descricao\nSummit,-10.0,-48.0");

    assert_eq!(table.records.len(), 1);
    assert_eq!(table.records[0]["descricao"], "");
}

#[test]
fn test_extra_values_are_discarded() {
    let table = parse("nome,lat\nSummit,-10.0,unexpected,more");

    assert_eq!(table.records[0].len(), 2);
    assert_eq!(table.records[0]["nome"], "Summit");
    assert_eq!(table.records[0]["lat"], "-10.0");
}

#[test]
fn test_quoted_header_names() {
    let table = parse("\"nome\",\"lat\"\nSummit,-10.0");

    assert_eq!(table.headers, vec!["nome", "lat"]);
    assert_eq!(table.records[0]["nome"], "Summit");
}

#[test]
fn test_quoted_multiline_description_stays_one_record() {
    let table = parse("nome,descricao\nPeak,\"line one\nline two\"");

    assert_eq!(table.records.len(), 1);
    assert_eq!(table.records[0]["descricao"], "line one\nline two");
}

#[test]
fn test_empty_input_yields_empty_table() {
    let table = parse("");
    assert!(table.headers.is_empty());
    assert!(table.records.is_empty());
}

#[test]
fn test_header_only_input_yields_no_records() {
    let table = parse("nome,lat,lng\n");
    assert_eq!(table.headers.len(), 3);
    assert!(table.records.is_empty());
}

#[test]
fn test_blank_lines_between_records_are_skipped() {
    let table = parse("nome,lat\nA,1.0\n\nB,2.0\n\n");
    assert_eq!(table.records.len(), 2);
}
