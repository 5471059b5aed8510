//! JSON API over the directory
//!
//! The page's data plane: the same filter/search/render pipeline the
//! controller runs, exposed as machine-readable endpoints. Each request
//! builds a controller over the shared snapshot, applies the query
//! parameters and returns one composed render.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::DirectoryConfig;
use crate::directory::controller::{CategoryOption, DirectoryController, FocusTarget};
use crate::directory::state::AccessType;
use crate::directory::view::{Marker, Viewport};
use crate::geo::Coordinates;
use crate::models::{DirectorySnapshot, Institution, Resource};

/// Shared per-process state behind the router
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<DirectorySnapshot>,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize)]
pub struct ResourceParams {
    /// "online" or "inperson"
    #[serde(rename = "type")]
    pub access_type: Option<String>,
    pub university: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
    /// Explicit user reference point (geolocation)
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub color: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub distance_text: Option<String>,
    pub phone: String,
    pub email: String,
    pub hours: String,
    pub ohip: String,
    pub uhip: String,
    pub link: String,
}

impl From<&Marker> for ApiMarker {
    fn from(marker: &Marker) -> Self {
        Self {
            latitude: marker.position.latitude,
            longitude: marker.position.longitude,
            title: marker.title.clone(),
            color: marker.color.clone(),
            category: marker.info.category.clone(),
            description: marker.info.description.clone(),
            address: marker.info.address.clone(),
            distance_text: marker.info.distance_text.clone(),
            phone: marker.info.phone.clone(),
            email: marker.info.email.clone(),
            hours: marker.info.hours.clone(),
            ohip: marker.info.ohip.clone(),
            uhip: marker.info.uhip.clone(),
            link: marker.info.link.clone(),
        }
    }
}

/// An online resource card (no pin)
#[derive(Serialize, Deserialize)]
pub struct ApiResourceCard {
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: String,
    pub link: String,
}

impl From<&Resource> for ApiResourceCard {
    fn from(resource: &Resource) -> Self {
        Self {
            name: resource.name.clone(),
            category: if resource.category_display.is_empty() {
                resource.category.clone()
            } else {
                resource.category_display.clone()
            },
            description: resource.description.clone(),
            address: resource.address.clone(),
            phone: resource.phone.clone(),
            email: resource.email.clone(),
            hours: resource.hours.clone(),
            link: resource.link.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiInstitution {
    pub name: String,
    pub city: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&Institution> for ApiInstitution {
    fn from(institution: &Institution) -> Self {
        Self {
            name: institution.name.clone(),
            city: institution.city.clone(),
            address: institution.address.clone(),
            latitude: institution.position.map(|p| p.latitude),
            longitude: institution.position.map(|p| p.longitude),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub markers: Vec<ApiMarker>,
    pub online: Vec<ApiResourceCard>,
    pub categories: Vec<CategoryOption>,
    pub viewport: Viewport,
    pub best_match: Option<FocusTarget>,
    /// Query string restoring this view
    pub permalink: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/resources", get(get_resources))
        .route("/institutions", get(get_institutions))
        .route("/health", get(get_health))
        .with_state(state)
}

async fn get_resources(
    State(state): State<AppState>,
    Query(params): Query<ResourceParams>,
) -> Result<Json<DirectoryResponse>, StatusCode> {
    let mut controller = DirectoryController::new(state.snapshot.clone(), &state.directory);

    controller.set_access_type(params.access_type.as_deref().and_then(AccessType::parse));
    controller.select_institution(params.university.as_deref());
    if let (Some(lat), Some(lng)) = (params.lat, params.lng) {
        controller.set_user_point(Some(Coordinates::new(lat, lng)));
    }
    controller.set_category(params.category.as_deref());
    controller.set_query(params.q.as_deref().unwrap_or(""));

    let render = controller.compose();
    let response = DirectoryResponse {
        markers: render.markers.iter().map(ApiMarker::from).collect(),
        online: render.online.iter().map(ApiResourceCard::from).collect(),
        categories: render.categories,
        viewport: render.viewport,
        best_match: render.best_match,
        permalink: controller.session_query().to_query_string(),
    };

    Ok(Json(response))
}

async fn get_institutions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiInstitution>>, StatusCode> {
    let institutions: Vec<ApiInstitution> = state
        .snapshot
        .institutions
        .iter()
        .map(ApiInstitution::from)
        .collect();
    Ok(Json(institutions))
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::source::RowRecord;

    #[test]
    fn test_marker_dto_conversion() {
        let resource = Resource::from_row(&RowRecord::from_cells(vec![
            ("Name".to_string(), "Counselling Centre".to_string()),
            ("Category".to_string(), "Community Counselling".to_string()),
            ("Latitude".to_string(), "43.6629".to_string()),
            ("Longitude".to_string(), "-79.3957".to_string()),
            ("Address".to_string(), "10 College St".to_string()),
        ]));

        let card = ApiResourceCard::from(&resource);
        assert_eq!(card.name, "Counselling Centre");
        assert_eq!(card.category, "Community Counselling");
    }

    #[test]
    fn test_institution_dto_flattens_position() {
        let institution = Institution {
            name: "Test University".to_string(),
            city: "Toronto, ON".to_string(),
            address: String::new(),
            position: Some(Coordinates::new(43.6532, -79.3832)),
        };

        let dto = ApiInstitution::from(&institution);
        assert_eq!(dto.latitude, Some(43.6532));
        assert_eq!(dto.longitude, Some(-79.3832));

        let unpinned = Institution {
            position: None,
            ..institution
        };
        let dto = ApiInstitution::from(&unpinned);
        assert_eq!(dto.latitude, None);
    }
}
