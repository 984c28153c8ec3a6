//! Data models for waymark
//!
//! This module contains the core data structures: persisted points and
//! groups, their insert/update shapes, the derived track and bounds views,
//! and the normalized raw record shape that feeds the validator.

use crate::constants::PRESET_COLORS;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Point
// =============================================================================

/// Classification of a GPS point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// A standalone point of interest
    Waypoint,
    /// A point belonging to a recorded path
    Trackpoint,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointKind::Waypoint => write!(f, "waypoint"),
            PointKind::Trackpoint => write!(f, "trackpoint"),
        }
    }
}

impl FromStr for PointKind {
    type Err = Error;

    /// Strict parse, used for CLI/config input.
    ///
    /// Import rows do NOT go through this: the validator maps every value
    /// other than `trackpoint` to `Waypoint` by design.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "waypoint" => Ok(PointKind::Waypoint),
            "trackpoint" => Ok(PointKind::Trackpoint),
            other => Err(Error::data_validation(format!(
                "unknown point kind '{}': expected 'waypoint' or 'trackpoint'",
                other
            ))),
        }
    }
}

/// A geolocated record as persisted by a point store
///
/// The validator guarantees that `latitude`/`longitude` are present and in
/// range for every point it accepts; records failing that never become
/// `Point` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Opaque unique identifier, assigned by the store on creation
    pub id: String,

    /// Non-empty display label
    pub name: String,

    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,

    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,

    /// Waypoint or trackpoint
    pub kind: PointKind,

    /// Elevation in meters; absent means unknown, not zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// Recording instant; absent means unordered/unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Grouping key linking trackpoints into a track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,

    /// Weak reference to a [`Group`]; cleared when the group is deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Record-creation instant, store-assigned
    pub created_at: DateTime<Utc>,
}

impl Point {
    /// Get the point location as a (latitude, longitude) tuple
    pub fn location(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Check whether this point belongs to a track
    pub fn is_trackpoint(&self) -> bool {
        self.kind == PointKind::Trackpoint
    }
}

/// Insert shape for a point
///
/// `id` is normally absent and minted by the store; a re-import may carry
/// one through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: PointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl NewPoint {
    /// Materialize a stored point, using `fallback_id` when the insert
    /// shape carries no id of its own
    pub fn into_point(self, fallback_id: String, created_at: DateTime<Utc>) -> Point {
        Point {
            id: self.id.unwrap_or(fallback_id),
            name: self.name,
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
            kind: self.kind,
            elevation: self.elevation,
            timestamp: self.timestamp,
            track_id: self.track_id,
            group_id: self.group_id,
            created_at,
        }
    }
}

/// Partial-update shape for a point
///
/// `None` fields are left unchanged. Clearing the group reference is an
/// explicit flag so it cannot be confused with "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub kind: Option<PointKind>,
    pub elevation: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub track_id: Option<String>,
    pub group_id: Option<String>,
    pub clear_group: bool,
}

impl PointPatch {
    /// Apply the patch to a stored point
    pub fn apply(&self, point: &mut Point) {
        if let Some(name) = &self.name {
            point.name = name.clone();
        }
        if let Some(description) = &self.description {
            point.description = Some(description.clone());
        }
        if let Some(latitude) = self.latitude {
            point.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            point.longitude = longitude;
        }
        if let Some(kind) = self.kind {
            point.kind = kind;
        }
        if let Some(elevation) = self.elevation {
            point.elevation = Some(elevation);
        }
        if let Some(timestamp) = self.timestamp {
            point.timestamp = Some(timestamp);
        }
        if let Some(track_id) = &self.track_id {
            point.track_id = Some(track_id.clone());
        }
        if let Some(group_id) = &self.group_id {
            point.group_id = Some(group_id.clone());
        }
        if self.clear_group {
            point.group_id = None;
        }
    }
}

// =============================================================================
// Group
// =============================================================================

/// A named, colored tag applied to points for filtering
///
/// Groups are weakly referenced: deleting a group clears `group_id` on the
/// points that carry it but never deletes the points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for a group
#[derive(Debug, Clone, PartialEq)]
pub struct NewGroup {
    pub name: String,
    /// Preset palette entry or arbitrary color string; the first preset is
    /// used when absent
    pub color: Option<String>,
    pub description: Option<String>,
}

impl NewGroup {
    /// Validate the insert shape
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::data_validation(
                "group name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Materialize a stored group
    pub fn into_group(self, id: String, created_at: DateTime<Utc>) -> Group {
        Group {
            id,
            name: self.name,
            color: self
                .color
                .unwrap_or_else(|| PRESET_COLORS[0].to_string()),
            description: self.description,
            created_at,
        }
    }
}

/// Partial-update shape for a group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl GroupPatch {
    /// Apply the patch to a stored group
    pub fn apply(&self, group: &mut Group) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }
        if let Some(color) = &self.color {
            group.color = color.clone();
        }
        if let Some(description) = &self.description {
            group.description = Some(description.clone());
        }
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// An ordered sequence of trackpoints sharing a track identifier
///
/// Derived from the current point snapshot, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track identifier, or `"default"` for points without one
    pub id: String,
    /// Trackpoints ordered by ascending timestamp
    pub points: Vec<Point>,
}

impl Track {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Axis-aligned bounding rectangle over a point collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// South-west corner as (latitude, longitude)
    pub fn south_west(&self) -> (f64, f64) {
        (self.min_lat, self.min_lon)
    }

    /// North-east corner as (latitude, longitude)
    pub fn north_east(&self) -> (f64, f64) {
        (self.max_lat, self.max_lon)
    }
}

// =============================================================================
// Raw Records
// =============================================================================

/// The single normalized record shape produced by every input codec
///
/// All fields are trimmed, non-empty strings or absent; the validator is
/// the only component that interprets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub nome: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub tipo: Option<String>,
    pub descricao: Option<String>,
    pub elevacao: Option<String>,
    pub timestamp: Option<String>,
    pub track_id: Option<String>,
    pub grupo_id: Option<String>,
    pub id: Option<String>,
}

impl RawRecord {
    /// Normalize a string-keyed row (CSV/JSON) into the record shape
    ///
    /// `name` is accepted as an alias for `nome`; values that are empty
    /// after trimming are treated as absent.
    pub fn from_map(row: &HashMap<String, String>) -> Self {
        let field = |key: &str| -> Option<String> {
            row.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            nome: field("nome").or_else(|| field("name")),
            lat: field("lat"),
            lng: field("lng"),
            tipo: field("tipo"),
            descricao: field("descricao"),
            elevacao: field("elevacao"),
            timestamp: field("timestamp"),
            track_id: field("track_id"),
            grupo_id: field("grupo_id"),
            id: field("id"),
        }
    }
}

/// A parsed table of string-keyed rows, as produced by the CSV and JSON
/// codecs before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in the order they were encountered
    pub headers: Vec<String>,
    /// One map per data row, keyed by column name
    pub records: Vec<HashMap<String, String>>,
}

/// Outcome of parsing and validating one input file
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    /// Points that passed validation, in row order
    pub points: Vec<NewPoint>,
    /// Number of rejected records; no per-row detail is kept
    pub rejected: usize,
    /// Column names seen in the input, for preview/reporting
    pub headers: Vec<String>,
}

impl ParseReport {
    /// Total number of data records encountered
    pub fn total(&self) -> usize {
        self.points.len() + self.rejected
    }

    /// Check whether any record was rejected
    pub fn has_rejections(&self) -> bool {
        self.rejected > 0
    }
}
