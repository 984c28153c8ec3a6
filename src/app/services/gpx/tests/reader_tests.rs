//! Tests for GPX waypoint extraction

use crate::Error;
use crate::app::services::gpx::parse;

fn wrap(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"test\" xmlns=\"http://www.topografix.com/GPX/1/1\">{}</gpx>",
        body
    )
}

#[test]
fn test_waypoint_with_all_children() {
    let xml = wrap(
        "<wpt lat=\"-10.5\" lon=\"-48.25\">\
           <name>Summit</name>\
           <desc>Windy ridge</desc>\
           <ele>812.4</ele>\
         </wpt>",
    );

    let records = parse(&xml).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].nome.as_deref(), Some("Summit"));
    assert_eq!(records[0].lat.as_deref(), Some("-10.5"));
    assert_eq!(records[0].lng.as_deref(), Some("-48.25"));
    assert_eq!(records[0].descricao.as_deref(), Some("Windy ridge"));
    assert_eq!(records[0].elevacao.as_deref(), Some("812.4"));
}

#[test]
fn test_missing_name_defaults_to_indexed_waypoint() {
    let xml = wrap(
        "<wpt lat=\"1\" lon=\"2\"><ele>10</ele></wpt>\
         <wpt lat=\"3\" lon=\"4\"><name>Named</name></wpt>\
         <wpt lat=\"5\" lon=\"6\"></wpt>",
    );

    let records = parse(&xml).unwrap();
    assert_eq!(records[0].nome.as_deref(), Some("Waypoint 1"));
    assert_eq!(records[1].nome.as_deref(), Some("Named"));
    assert_eq!(records[2].nome.as_deref(), Some("Waypoint 3"));
}

#[test]
fn test_missing_coordinates_default_to_zero() {
    let xml = wrap("<wpt><name>Lost</name></wpt>");

    let records = parse(&xml).unwrap();
    assert_eq!(records[0].lat.as_deref(), Some("0"));
    assert_eq!(records[0].lng.as_deref(), Some("0"));
}

#[test]
fn test_self_closing_waypoint() {
    let xml = wrap("<wpt lat=\"7.5\" lon=\"8.5\"/>");

    let records = parse(&xml).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lat.as_deref(), Some("7.5"));
    assert_eq!(records[0].nome.as_deref(), Some("Waypoint 1"));
    assert_eq!(records[0].descricao, None);
    assert_eq!(records[0].elevacao, None);
}

#[test]
fn test_unknown_children_are_skipped() {
    let xml = wrap(
        "<wpt lat=\"1\" lon=\"2\">\
           <extensions><name>shadow</name></extensions>\
           <name>Real</name>\
         </wpt>",
    );

    let records = parse(&xml).unwrap();
    assert_eq!(records[0].nome.as_deref(), Some("Real"));
}

#[test]
fn test_document_without_waypoints() {
    let xml = wrap("<trk><trkseg></trkseg></trk>");
    let records = parse(&xml).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_mismatched_end_tag_is_format_error() {
    let xml = wrap("<wpt lat=\"1\" lon=\"2\"><name>Broken</desc></wpt>");
    let result = parse(&xml);
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_truncated_waypoint_is_format_error() {
    let xml = "<gpx><wpt lat=\"1\" lon=\"2\"><name>Cut";
    let result = parse(xml);
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_empty_elevation_means_zero() {
    let xml = wrap("<wpt lat=\"1\" lon=\"2\"><ele></ele></wpt>");
    let records = parse(&xml).unwrap();
    assert_eq!(records[0].elevacao.as_deref(), Some("0"));
}
