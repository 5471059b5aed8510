//! Directory filtering, ranking and rendering
//!
//! Everything the page used to do with module-level globals lives here
//! behind an explicit `DirectoryController`, with the map widget abstracted
//! as the `MapView` trait so the logic is testable without a browser.

pub mod controller;
pub mod palette;
pub mod search;
pub mod state;
pub mod view;

pub use controller::{DirectoryController, DirectoryRender};
pub use palette::{CategoryPalette, fixed_category_color};
pub use search::{SearchFields, SearchOutcome, search_resources};
pub use state::{AccessType, SessionQuery};
pub use view::{MapView, Marker, MarkerInfo, RecordingMapView, Viewport};
