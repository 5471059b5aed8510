//! The map widget seam
//!
//! The third-party map is an external collaborator behind the small
//! `MapView` trait, so rendering decisions can be unit-tested without a
//! browser. `RecordingMapView` is the test double.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Canada-wide default center shown when nothing is mappable
pub const CANADA_CENTER: Coordinates = Coordinates {
    latitude: 56.1304,
    longitude: -106.3468,
};
/// Zoom for the Canada-wide default view
pub const CANADA_ZOOM: u8 = 4;
/// Zoom when centering a single resource marker
pub const SINGLE_MARKER_ZOOM: u8 = 12;
/// Zoom when centering a selected campus with no markers
pub const CAMPUS_ZOOM: u8 = 13;
/// Zoom when auto-focusing the best search match
pub const FOCUS_ZOOM: u8 = 14;

/// Info-card payload behind a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerInfo {
    pub category: String,
    pub description: String,
    pub address: String,
    /// "N.n km from campus" when an institution reference exists
    pub distance_text: Option<String>,
    pub phone: String,
    pub email: String,
    pub hours: String,
    pub ohip: String,
    pub uhip: String,
    pub link: String,
}

/// One map pin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Coordinates,
    pub title: String,
    pub color: String,
    pub info: MarkerInfo,
}

/// Where the map should look after a render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    /// Fit all current markers
    FitAll,
    /// Center on a point at a given zoom
    Center { position: Coordinates, zoom: u8 },
}

impl Viewport {
    /// The Canada-wide default view
    #[must_use]
    pub fn canada() -> Self {
        Self::Center {
            position: CANADA_CENTER,
            zoom: CANADA_ZOOM,
        }
    }
}

/// Minimal interface the rendering logic needs from a map widget
pub trait MapView {
    fn add_marker(&mut self, marker: Marker);
    fn clear_markers(&mut self);
    fn set_viewport(&mut self, viewport: Viewport);
}

/// Test double that records every call
#[derive(Debug, Default)]
pub struct RecordingMapView {
    pub markers: Vec<Marker>,
    pub viewport: Option<Viewport>,
    pub clear_count: usize,
}

impl RecordingMapView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapView for RecordingMapView {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.clear_count += 1;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}
