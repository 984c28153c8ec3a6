//! Point validation and the file parse pipeline
//!
//! Turns raw records from any codec into canonical insert-ready points.
//! Rejection is silent and counted: the caller gets aggregate valid/invalid
//! numbers, never per-row diagnostics.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::app::models::{NewPoint, ParseReport, PointKind, RawRecord};
use crate::app::services::{csv_reader, gpx, json_reader};
use crate::constants::TIMESTAMP_FORMAT;
use crate::{Error, Result};

/// Supported import file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Gpx,
}

impl FileFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" => Some(FileFormat::Csv),
            "json" => Some(FileFormat::Json),
            "gpx" => Some(FileFormat::Gpx),
            _ => None,
        }
    }

    /// Format name as used in error messages and reports
    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Json => "JSON",
            FileFormat::Gpx => "GPX",
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "gpx" => Ok(FileFormat::Gpx),
            other => Err(Error::configuration(format!(
                "unknown file format '{}': expected csv, json or gpx",
                other
            ))),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validate one raw record into an insert-ready point
///
/// Returns `None` for rejected records. Required: a non-empty name and
/// in-range coordinates. `tipo` is permissive by design: exactly
/// `"trackpoint"` (case-insensitive) maps to a trackpoint, every other
/// value including garbage maps to a waypoint.
pub fn validate(record: &RawRecord) -> Option<NewPoint> {
    let name = record.nome.as_deref().map(str::trim).filter(|n| !n.is_empty())?;

    let latitude = parse_coordinate(record.lat.as_deref())?;
    let longitude = parse_coordinate(record.lng.as_deref())?;

    if !(-90.0..=90.0).contains(&latitude) {
        return None;
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    let kind = match record.tipo.as_deref().map(|t| t.trim().to_lowercase()) {
        Some(ref tipo) if tipo == "trackpoint" => PointKind::Trackpoint,
        _ => PointKind::Waypoint,
    };

    Some(NewPoint {
        id: non_empty(record.id.as_deref()),
        name: name.to_string(),
        description: non_empty(record.descricao.as_deref()),
        latitude,
        longitude,
        kind,
        elevation: record
            .elevacao
            .as_deref()
            .and_then(|e| e.trim().parse::<f64>().ok())
            .filter(|e| !e.is_nan()),
        timestamp: record.timestamp.as_deref().and_then(parse_timestamp),
        track_id: non_empty(record.track_id.as_deref()),
        group_id: non_empty(record.grupo_id.as_deref()),
    })
}

/// Parse and validate one input file
///
/// Codec failures (unparseable JSON/XML) abort before any record is
/// validated; per-record failures are only counted.
pub fn parse_file(text: &str, format: FileFormat) -> Result<ParseReport> {
    let (headers, records) = match format {
        FileFormat::Csv => {
            let table = csv_reader::parse(text);
            let records = table.records.iter().map(RawRecord::from_map).collect();
            (table.headers, records)
        }
        FileFormat::Json => {
            let table = json_reader::parse(text)?;
            let records: Vec<RawRecord> =
                table.records.iter().map(RawRecord::from_map).collect();
            (table.headers, records)
        }
        FileFormat::Gpx => {
            let records = gpx::parse(text)?;
            let headers = ["nome", "lat", "lng", "descricao", "elevacao"]
                .iter()
                .map(|h| h.to_string())
                .collect();
            (headers, records)
        }
    };

    let mut points = Vec::with_capacity(records.len());
    let mut rejected = 0usize;

    for record in &records {
        match validate(record) {
            Some(point) => points.push(point),
            None => {
                rejected += 1;
                debug!("rejected {} record", format.name());
            }
        }
    }

    info!(
        "parsed {} input: {} valid, {} rejected",
        format.name(),
        points.len(),
        rejected
    );

    Ok(ParseReport {
        points,
        rejected,
        headers,
    })
}

/// Parse a timestamp in RFC 3339 or `YYYY-MM-DD HH:MM:SS` form
///
/// Unparseable values are dropped, not treated as record-fatal.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| !parsed.is_nan())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(nome: &str, lat: &str, lng: &str) -> RawRecord {
        RawRecord {
            nome: Some(nome.to_string()),
            lat: Some(lat.to_string()),
            lng: Some(lng.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_valid_record() {
        let point = validate(&record("Summit", "-10.0", "-48.0")).unwrap();
        assert_eq!(point.name, "Summit");
        assert_eq!(point.latitude, -10.0);
        assert_eq!(point.longitude, -48.0);
        assert_eq!(point.kind, PointKind::Waypoint);
        assert_eq!(point.elevation, None);
        assert_eq!(point.id, None);
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut r = record("x", "1", "2");
        r.nome = None;
        assert!(validate(&r).is_none());

        r.nome = Some("   ".to_string());
        assert!(validate(&r).is_none());
    }

    #[test]
    fn test_unparseable_coordinates_rejected() {
        assert!(validate(&record("A", "abc", "2")).is_none());
        assert!(validate(&record("A", "1", "")).is_none());
        assert!(validate(&record("A", "NaN", "2")).is_none());
    }

    #[test]
    fn test_latitude_boundary() {
        // 90 is inside the range, 91 is out
        assert!(validate(&record("A", "90", "0")).is_some());
        assert!(validate(&record("A", "91", "0")).is_none());
        assert!(validate(&record("A", "-90", "0")).is_some());
        assert!(validate(&record("A", "-90.0001", "0")).is_none());
    }

    #[test]
    fn test_longitude_boundary() {
        assert!(validate(&record("A", "0", "180")).is_some());
        assert!(validate(&record("A", "0", "180.5")).is_none());
        assert!(validate(&record("A", "0", "-180")).is_some());
        assert!(validate(&record("A", "0", "-181")).is_none());
    }

    #[test]
    fn test_tipo_is_permissive() {
        let mut r = record("A", "1", "2");

        r.tipo = Some("trackpoint".to_string());
        assert_eq!(validate(&r).unwrap().kind, PointKind::Trackpoint);

        r.tipo = Some("  TrackPoint  ".to_string());
        assert_eq!(validate(&r).unwrap().kind, PointKind::Trackpoint);

        // Anything else falls back to waypoint, never rejects
        for tipo in ["waypoint", "garbage", "trail", ""] {
            r.tipo = Some(tipo.to_string());
            assert_eq!(validate(&r).unwrap().kind, PointKind::Waypoint);
        }

        r.tipo = None;
        assert_eq!(validate(&r).unwrap().kind, PointKind::Waypoint);
    }

    #[test]
    fn test_optional_fields_are_copied() {
        let mut r = record("A", "1", "2");
        r.descricao = Some("ridge".to_string());
        r.elevacao = Some("812.5".to_string());
        r.timestamp = Some("2024-05-01T10:00:00Z".to_string());
        r.track_id = Some("trail-7".to_string());
        r.grupo_id = Some("grp-2".to_string());
        r.id = Some("pt-55".to_string());

        let point = validate(&r).unwrap();
        assert_eq!(point.description.as_deref(), Some("ridge"));
        assert_eq!(point.elevation, Some(812.5));
        assert_eq!(
            point.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(point.track_id.as_deref(), Some("trail-7"));
        assert_eq!(point.group_id.as_deref(), Some("grp-2"));
        assert_eq!(point.id.as_deref(), Some("pt-55"));
    }

    #[test]
    fn test_unparseable_elevation_dropped_not_fatal() {
        let mut r = record("A", "1", "2");
        r.elevacao = Some("high".to_string());
        let point = validate(&r).unwrap();
        assert_eq!(point.elevation, None);
    }

    #[test]
    fn test_unparseable_timestamp_dropped_not_fatal() {
        let mut r = record("A", "1", "2");
        r.timestamp = Some("yesterday".to_string());
        let point = validate(&r).unwrap();
        assert_eq!(point.timestamp, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn test_file_format_detection() {
        assert_eq!(
            FileFormat::from_path(Path::new("points.csv")),
            Some(FileFormat::Csv)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("data/points.JSON")),
            Some(FileFormat::Json)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("trip.gpx")),
            Some(FileFormat::Gpx)
        );
        assert_eq!(FileFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(FileFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_parse_file_csv_counts_rejections() {
        let text = "nome,lat,lng\nGood,-10.0,-48.0\nBad,91,0\n,1,2\n";
        let report = parse_file(text, FileFormat::Csv).unwrap();

        assert_eq!(report.points.len(), 1);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.headers, vec!["nome", "lat", "lng"]);
        assert_eq!(report.points[0].name, "Good");
    }

    #[test]
    fn test_parse_file_preserves_row_order() {
        let text = "nome,lat,lng\nFirst,1,1\nSecond,2,2\nThird,3,3\n";
        let report = parse_file(text, FileFormat::Csv).unwrap();

        let names: Vec<&str> = report.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_parse_file_json() {
        let text = r#"[
            {"nome": "Summit", "lat": -10.0, "lng": -48.0, "tipo": "trackpoint"},
            {"nome": "Broken", "lat": "north", "lng": 0}
        ]"#;
        let report = parse_file(text, FileFormat::Json).unwrap();

        assert_eq!(report.points.len(), 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.points[0].kind, PointKind::Trackpoint);
    }

    #[test]
    fn test_parse_file_gpx_defaults_rejected_by_validator() {
        // Missing lat/lon default to "0", which is in range and accepted;
        // a wpt with an out-of-range lat is silently dropped
        let text = "<gpx>\
            <wpt lon=\"2\"><name>NoLat</name></wpt>\
            <wpt lat=\"95\" lon=\"2\"><name>TooFar</name></wpt>\
        </gpx>";
        let report = parse_file(text, FileFormat::Gpx).unwrap();

        assert_eq!(report.points.len(), 1);
        assert_eq!(report.points[0].name, "NoLat");
        assert_eq!(report.points[0].latitude, 0.0);
        assert_eq!(report.rejected, 1);
    }
}
