//! Seedle - directory engine and map search for Canadian campus
//! mental-health resources
//!
//! This library loads the resource and institution spreadsheets into an
//! immutable snapshot, and answers filtered, ranked directory queries over
//! it: radius filtering around a campus, free-text search with relevance
//! ranking, category colors and map rendering through the `MapView` seam.

pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod geo;
pub mod ingest;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use config::SeedleConfig;
pub use directory::{
    AccessType, DirectoryController, MapView, Marker, RecordingMapView, SessionQuery, Viewport,
};
pub use error::SeedleError;
pub use geo::{Coordinates, adaptive_radius_km, distance_km, within_radius};
pub use ingest::{CsvSource, HttpSource, TabularDataSource, XlsxSource, load_snapshot};
pub use models::{DirectorySnapshot, Institution, Resource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SeedleError>;
