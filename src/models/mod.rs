//! Data models for the resource directory

pub mod institution;
pub mod resource;
pub mod snapshot;

pub use institution::Institution;
pub use resource::Resource;
pub use snapshot::DirectorySnapshot;

/// Normalize a label for matching: lowercase, trim, collapse inner whitespace.
///
/// Category, city and province comparisons all go through this so that
/// "Community  Counselling " and "community counselling" are the same key.
#[must_use]
pub fn normalize_label(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Best-effort numeric parse of a coordinate cell. Blank or non-numeric
/// cells yield `None`.
#[must_use]
pub fn parse_coordinate(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
