//! Institution (campus) model

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinates, Geolocated};
use crate::ingest::source::RowRecord;
use crate::models::parse_coordinate;

/// A university or college campus usable as a reference point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub city: String,
    pub address: String,
    pub position: Option<Coordinates>,
}

impl Institution {
    /// Convert a spreadsheet row (University/City/Address/Latitude/Longitude)
    /// into an institution.
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

        Self {
            name: row.get("University").trim().to_string(),
            city: row.get("City").trim().to_string(),
            address: row.get("Address").trim().to_string(),
            position,
        }
    }

    /// The city part without a trailing province ("Kingston, ON" → "Kingston")
    #[must_use]
    pub fn city_name(&self) -> &str {
        self.city.split(',').next().unwrap_or("").trim()
    }
}

impl Geolocated for Institution {
    fn position(&self) -> Option<Coordinates> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row() {
        let row = RowRecord::from_cells(vec![
            ("University".to_string(), "Queen's University".to_string()),
            ("City".to_string(), "Kingston, ON".to_string()),
            ("Address".to_string(), "99 University Ave".to_string()),
            ("Latitude".to_string(), "44.2250".to_string()),
            ("Longitude".to_string(), "-76.4951".to_string()),
        ]);

        let institution = Institution::from_row(&row);
        assert_eq!(institution.name, "Queen's University");
        assert_eq!(institution.city_name(), "Kingston");
        assert_eq!(
            institution.position,
            Some(Coordinates::new(44.2250, -76.4951))
        );
    }

    #[test]
    fn test_missing_coordinates() {
        let row = RowRecord::from_cells(vec![
            ("University".to_string(), "Online College".to_string()),
            ("City".to_string(), String::new()),
        ]);
        let institution = Institution::from_row(&row);
        assert_eq!(institution.position, None);
        assert_eq!(institution.city_name(), "");
    }
}
