//! Resource record model
//!
//! One `Resource` is one row of the mental-health-service spreadsheet,
//! normalized for matching while keeping the original category casing for
//! display.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinates, Geolocated};
use crate::ingest::source::RowRecord;
use crate::models::{normalize_label, parse_coordinate};

/// A single mental-health resource listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Display name
    pub name: String,
    /// Normalized category used as the matching/palette key
    pub category: String,
    /// Category in its original casing, for display
    pub category_display: String,
    /// Normalized city
    pub city: String,
    /// Normalized province
    pub province: String,
    /// Listed as an online-only service (no physical location)
    pub online_only: bool,
    /// Map position. Present only when both coordinates parsed; a row with a
    /// single parsable coordinate carries no position at all.
    pub position: Option<Coordinates>,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
    /// External link (URL)
    pub link: String,
    /// OHIP coverage note
    pub ohip: String,
    /// UHIP coverage note
    pub uhip: String,
}

impl Resource {
    /// Convert a spreadsheet row into a resource record.
    ///
    /// Coercion is best-effort: coordinates get a numeric parse, everything
    /// else stays trimmed text. Row validity (blank names etc.) is the
    /// cleaning pipeline's concern, not this conversion's.
    #[must_use]
    pub fn from_row(row: &RowRecord) -> Self {
        let latitude = parse_coordinate(row.get("Latitude"));
        let longitude = parse_coordinate(row.get("Longitude"));
        let position = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        let category_display = row.get("Category").trim().to_string();

        // The cleaned sheet folds phone/email/hours into one "Contact"
        // column; the raw sheet keeps them separate.
        let phone = {
            let phone = row.get("Phone Number").trim();
            if phone.is_empty() {
                row.get("Contact").trim().to_string()
            } else {
                phone.to_string()
            }
        };

        Self {
            name: row.get("Name").trim().to_string(),
            category: normalize_label(&category_display),
            category_display,
            city: normalize_label(row.get("City")),
            province: normalize_label(row.get("Province")),
            online_only: row.get("OnlineOnly").trim().eq_ignore_ascii_case("yes"),
            position,
            description: row.get("Description").trim().to_string(),
            address: row.get("Address").trim().to_string(),
            phone,
            email: row.get("Email").trim().to_string(),
            hours: row.get("Hours").trim().to_string(),
            link: row.get("Link").trim().to_string(),
            ohip: row.get("OHIP").trim().to_string(),
            uhip: row.get("UHIP").trim().to_string(),
        }
    }

    /// Whether this resource belongs in the online list rather than on the
    /// map: flagged online-only, or unlocatable (no coordinates and no
    /// address).
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online_only || (self.position.is_none() && self.address.is_empty())
    }

    /// Whether this resource can be rendered as a map pin
    #[must_use]
    pub fn is_mappable(&self) -> bool {
        !self.online_only && self.position.is_some()
    }
}

impl Geolocated for Resource {
    fn position(&self) -> Option<Coordinates> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RowRecord {
        RowRecord::from_cells(
            cells
                .iter()
                .map(|(h, v)| ((*h).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_from_row_normalizes_matching_fields() {
        let resource = Resource::from_row(&row(&[
            ("Name", " Counselling Centre "),
            ("Category", "Community  Counselling"),
            ("City", " Toronto "),
            ("Province", "Ontario"),
            ("Latitude", "43.6629"),
            ("Longitude", "-79.3957"),
            ("OnlineOnly", "No"),
        ]));

        assert_eq!(resource.name, "Counselling Centre");
        assert_eq!(resource.category, "community counselling");
        assert_eq!(resource.category_display, "Community  Counselling");
        assert_eq!(resource.city, "toronto");
        assert_eq!(resource.province, "ontario");
        assert!(!resource.online_only);
        assert_eq!(
            resource.position,
            Some(Coordinates::new(43.6629, -79.3957))
        );
    }

    #[test]
    fn test_partial_coordinates_yield_no_position() {
        let resource = Resource::from_row(&row(&[
            ("Name", "Half Pinned"),
            ("Latitude", "43.6629"),
            ("Longitude", "not a number"),
        ]));
        assert_eq!(resource.position, None);

        let resource = Resource::from_row(&row(&[
            ("Name", "Half Pinned"),
            ("Latitude", ""),
            ("Longitude", "-79.3957"),
        ]));
        assert_eq!(resource.position, None);
    }

    #[test]
    fn test_online_bucketing() {
        let flagged = Resource::from_row(&row(&[
            ("Name", "Crisis Line"),
            ("OnlineOnly", " yes "),
            ("Latitude", "43.0"),
            ("Longitude", "-79.0"),
        ]));
        assert!(flagged.is_online());
        assert!(!flagged.is_mappable());

        let unlocatable = Resource::from_row(&row(&[("Name", "Chat Service")]));
        assert!(unlocatable.is_online());

        let in_person = Resource::from_row(&row(&[
            ("Name", "Clinic"),
            ("Address", "1 Main St"),
            ("Latitude", "43.0"),
            ("Longitude", "-79.0"),
        ]));
        assert!(!in_person.is_online());
        assert!(in_person.is_mappable());

        // In-person with an address but no pin: listed, not mapped.
        let address_only = Resource::from_row(&row(&[
            ("Name", "Walk-in"),
            ("Address", "2 Main St"),
        ]));
        assert!(!address_only.is_online());
        assert!(!address_only.is_mappable());
    }

    #[test]
    fn test_contact_column_fallback() {
        let cleaned_sheet = Resource::from_row(&row(&[
            ("Name", "Centre"),
            ("Contact", "555-0100"),
        ]));
        assert_eq!(cleaned_sheet.phone, "555-0100");

        let raw_sheet = Resource::from_row(&row(&[
            ("Name", "Centre"),
            ("Phone Number", "555-0199"),
            ("Contact", "ignored"),
        ]));
        assert_eq!(raw_sheet.phone, "555-0199");
    }
}
