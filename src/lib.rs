//! Waymark Library
//!
//! A Rust library for importing, validating and exporting GPS waypoint and
//! track data against a pluggable point store.
//!
//! This library provides tools for:
//! - Parsing heterogeneous input files (CSV, JSON, GPX 1.1) into one
//!   normalized record shape
//! - Validating raw records into canonical points with silent, counted
//!   rejection of malformed rows
//! - Grouping trackpoints into ordered tracks and computing map bounds
//! - Serializing point collections back to GPX 1.1
//! - Driving chunked batch persistence with per-chunk progress reporting

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bounds;
        pub mod csv_reader;
        pub mod gpx;
        pub mod importer;
        pub mod json_reader;
        pub mod track_builder;
        pub mod validator;
    }
    pub mod adapters {
        pub mod json_store;
        pub mod memory;
        pub mod store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Group, Point, PointKind};
pub use config::Config;

/// Result type alias for waymark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for waymark operations
///
/// Per-record validation failures are deliberately not represented here:
/// they are counted in [`app::models::ParseReport`] and never itemized.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input could not be parsed as the declared file format
    #[error("{format} format error: {message}")]
    Format { format: String, message: String },

    /// A persistence call failed
    #[error("store error: {message}")]
    Store { message: String },

    /// Update or delete target does not exist in the store
    #[error("no record with id '{id}'")]
    NotFound { id: String },

    /// A chunked batch import failed part-way through
    ///
    /// Chunks committed before the failure are not rolled back; `committed`
    /// reports how many points were already persisted.
    #[error("batch insert failed at chunk {chunk}: {message} ({committed} points committed before the failure)")]
    BatchImport {
        chunk: usize,
        committed: usize,
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file format error
    pub fn format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a not-found error for a missing store record
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a batch import error (chunk index is 1-based)
    pub fn batch_import(
        chunk: usize,
        committed: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::BatchImport {
            chunk,
            committed,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
