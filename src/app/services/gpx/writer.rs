//! GPX document generation
//!
//! Emits a GPX 1.1 document with one `<wpt>` per point. `<desc>` and
//! `<ele>` appear only when the point carries the corresponding value; all
//! text content is XML-escaped.

use std::fmt::Write;

use crate::app::models::Point;
use crate::constants::{GPX_CREATOR, GPX_NAMESPACE, GPX_VERSION};

/// Serialize a point collection as a GPX 1.1 document
pub fn write_gpx(points: &[Point]) -> String {
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        doc,
        "<gpx version=\"{}\" creator=\"{}\" xmlns=\"{}\">",
        GPX_VERSION, GPX_CREATOR, GPX_NAMESPACE
    );

    for point in points {
        let _ = writeln!(
            doc,
            "  <wpt lat=\"{}\" lon=\"{}\">",
            point.latitude, point.longitude
        );
        let _ = writeln!(doc, "    <name>{}</name>", escape_xml(&point.name));
        if let Some(description) = &point.description {
            let _ = writeln!(doc, "    <desc>{}</desc>", escape_xml(description));
        }
        if let Some(elevation) = point.elevation {
            let _ = writeln!(doc, "    <ele>{}</ele>", elevation);
        }
        doc.push_str("  </wpt>\n");
    }

    doc.push_str("</gpx>\n");
    doc
}

/// Escape the five special XML characters
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
