//! Application constants for waymark
//!
//! This module contains the default values, column mappings and fixed
//! palettes used throughout the application.

// =============================================================================
// Import / Store Defaults
// =============================================================================

/// Number of points submitted per batch insert during chunked imports
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Page size used when reading the complete point set from a store
///
/// Hosted stores commonly cap a single read at 1000 rows; `list_all` pages
/// with this size until it sees a short page.
pub const STORE_PAGE_SIZE: usize = 1000;

/// Track identifier assigned to trackpoints that carry no explicit track id
pub const DEFAULT_TRACK_ID: &str = "default";

/// File name of the JSON-backed store when only a directory is configured
pub const STORE_FILE_NAME: &str = "points.json";

// =============================================================================
// Interchange Columns
// =============================================================================

/// Recognized columns of the CSV/JSON interchange format
///
/// `nome`, `lat` and `lng` are required; everything else is optional.
/// `name` is accepted as an alias for `nome`.
pub const CSV_COLUMNS: &[&str] = &[
    "nome",
    "lat",
    "lng",
    "tipo",
    "descricao",
    "elevacao",
    "timestamp",
    "track_id",
    "grupo_id",
    "id",
];

/// Timestamp fallback format accepted alongside RFC 3339
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// GPX Output
// =============================================================================

/// GPX document version emitted on export
pub const GPX_VERSION: &str = "1.1";

/// Creator attribute written into exported GPX documents
pub const GPX_CREATOR: &str = "waymark";

/// GPX 1.1 XML namespace
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

// =============================================================================
// Group Palette
// =============================================================================

/// Preset colors offered for groups
///
/// Arbitrary color strings are also accepted; this palette is the default
/// choice set, and its first entry is used when no color is given.
pub const PRESET_COLORS: &[&str] = &[
    "#3b82f6", // blue
    "#22c55e", // green
    "#f59e0b", // amber
    "#ef4444", // red
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#84cc16", // lime
];
