//! GPX waypoint extraction
//!
//! Walks the XML event stream and turns every `<wpt>` element into a raw
//! record for the validator. Missing `lat`/`lon` attributes default to
//! `"0"` (yielding a likely-invalid point the validator rejects); a missing
//! or empty `<name>` defaults to `"Waypoint N"` with a 1-based index.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::app::models::RawRecord;
use crate::{Error, Result};

/// Parse a GPX document into raw waypoint records
///
/// Any structural XML error is reported as an invalid-GPX format error;
/// a well-formed document without waypoints yields an empty list.
pub fn parse(xml: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"wpt" => {
                let record = read_waypoint(&e, &mut reader, records.len() + 1)?;
                records.push(record);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"wpt" => {
                // Self-closing waypoint: attributes only, no children
                let (lat, lon) = coordinate_attrs(&e)?;
                records.push(build_record(lat, lon, None, None, None, records.len() + 1));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(invalid_gpx()),
        }
    }

    Ok(records)
}

fn invalid_gpx() -> Error {
    Error::format("GPX", "invalid GPX")
}

/// Read `lat`/`lon` attributes, defaulting each to "0" when absent
fn coordinate_attrs(element: &BytesStart<'_>) -> Result<(String, String)> {
    let mut lat = None;
    let mut lon = None;

    for attr_result in element.attributes() {
        let attr = attr_result.map_err(|_| invalid_gpx())?;
        let value = std::str::from_utf8(&attr.value).unwrap_or_default();
        match attr.key.local_name().as_ref() {
            b"lat" => lat = Some(value.to_string()),
            b"lon" => lon = Some(value.to_string()),
            _ => {}
        }
    }

    Ok((
        lat.unwrap_or_else(|| "0".to_string()),
        lon.unwrap_or_else(|| "0".to_string()),
    ))
}

/// Read one `<wpt>` element and its children
fn read_waypoint(
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
    index: usize,
) -> Result<RawRecord> {
    let (lat, lon) = coordinate_attrs(start)?;

    let mut name = None;
    let mut desc = None;
    let mut ele = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => name = Some(read_text(reader, &e)?),
                b"desc" => desc = Some(read_text(reader, &e)?),
                b"ele" => ele = Some(read_text(reader, &e)?),
                _ => {
                    // Skip unknown children (extensions, links, ...) wholesale
                    // so their nested elements cannot shadow wpt fields
                    reader.read_to_end(e.name()).map_err(|_| invalid_gpx())?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"wpt" => break,
            Ok(Event::Eof) => return Err(invalid_gpx()),
            Ok(_) => {}
            Err(_) => return Err(invalid_gpx()),
        }
    }

    Ok(build_record(lat, lon, name, desc, ele, index))
}

fn read_text(reader: &mut Reader<&[u8]>, element: &BytesStart<'_>) -> Result<String> {
    reader
        .read_text(element.name())
        .map(|text| text.into_owned())
        .map_err(|_| invalid_gpx())
}

fn build_record(
    lat: String,
    lon: String,
    name: Option<String>,
    desc: Option<String>,
    ele: Option<String>,
    index: usize,
) -> RawRecord {
    RawRecord {
        nome: Some(
            name.map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Waypoint {}", index)),
        ),
        lat: Some(lat),
        lng: Some(lon),
        descricao: desc
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        // An empty <ele> element means zero elevation, not unknown
        elevacao: ele.map(|e| {
            let trimmed = e.trim().to_string();
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed
            }
        }),
        ..Default::default()
    }
}
