//! Page controller
//!
//! Owns everything the page variants kept in module-level globals: the
//! loaded snapshot, the session palette and the active filters. Every input
//! change recomputes the active set synchronously against the in-memory
//! snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::directory::palette::CategoryPalette;
use crate::directory::search::{SearchFields, search_resources};
use crate::directory::state::{AccessType, SessionQuery};
use crate::directory::view::{
    CAMPUS_ZOOM, FOCUS_ZOOM, MapView, Marker, MarkerInfo, SINGLE_MARKER_ZOOM, Viewport,
};
use crate::geo::{self, Coordinates};
use crate::models::{DirectorySnapshot, Institution, Resource, normalize_label};

/// How the campus search radius is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusPolicy {
    Fixed(f64),
    Adaptive,
}

/// A category offered in the filter dropdown: normalized key plus the
/// first-seen display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub key: String,
    pub label: String,
}

/// The resource a search wants the map to focus on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub name: String,
    pub position: Option<Coordinates>,
}

/// Everything one render pass produces
#[derive(Debug, Clone)]
pub struct DirectoryRender {
    pub markers: Vec<Marker>,
    pub online: Vec<Resource>,
    pub categories: Vec<CategoryOption>,
    pub viewport: Viewport,
    pub best_match: Option<FocusTarget>,
}

/// Owns the session state and answers directory queries over the snapshot
pub struct DirectoryController {
    snapshot: Arc<DirectorySnapshot>,
    radius_policy: RadiusPolicy,
    search_fields: SearchFields,
    palette: CategoryPalette,
    access_type: Option<AccessType>,
    selected_institution: Option<String>,
    user_point: Option<Coordinates>,
    category: Option<String>,
    query: String,
}

impl DirectoryController {
    #[must_use]
    pub fn new(snapshot: Arc<DirectorySnapshot>, config: &DirectoryConfig) -> Self {
        let radius_policy = match config.radius_policy.as_str() {
            "adaptive" => RadiusPolicy::Adaptive,
            _ => RadiusPolicy::Fixed(config.fixed_radius_km),
        };
        let search_fields =
            SearchFields::parse(&config.search_fields).unwrap_or_default();

        // Seed colors in dataset order so a category's color does not depend
        // on which filtered subset happens to render first.
        let mut palette = CategoryPalette::new();
        for resource in &snapshot.resources {
            palette.color_for(&resource.category);
        }

        Self {
            snapshot,
            radius_policy,
            search_fields,
            palette,
            access_type: None,
            selected_institution: None,
            user_point: None,
            category: None,
            query: String::new(),
        }
    }

    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    pub fn set_access_type(&mut self, access_type: Option<AccessType>) {
        self.access_type = access_type;
    }

    /// Select an institution by name. An unknown name clears the selection;
    /// that mirrors a stale permalink degrading to no reference point.
    pub fn select_institution(&mut self, name: Option<&str>) {
        self.selected_institution = name
            .filter(|n| !n.trim().is_empty())
            .map(|n| n.trim().to_string());
    }

    /// Set an explicit user reference point (geolocation). `None` is the
    /// denial/timeout case and simply leaves no reference.
    pub fn set_user_point(&mut self, point: Option<Coordinates>) {
        self.user_point = point;
    }

    /// Filter to one category (normalized internally). `None` or "all"
    /// shows every category.
    pub fn set_category(&mut self, category: Option<&str>) {
        self.category = category
            .map(normalize_label)
            .filter(|c| !c.is_empty() && c != "all");
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Restore state from a permalink.
    pub fn apply_session(&mut self, session: &SessionQuery) {
        self.set_access_type(session.access_type);
        self.select_institution(session.university.as_deref());
        self.set_category(session.category.as_deref());
        self.set_query(session.query.as_deref().unwrap_or(""));
    }

    /// Current state as a permalink.
    #[must_use]
    pub fn session_query(&self) -> SessionQuery {
        SessionQuery {
            access_type: self.access_type,
            university: self.selected_institution.clone(),
            category: self.category.clone(),
            query: if self.query.trim().is_empty() {
                None
            } else {
                Some(self.query.clone())
            },
        }
    }

    fn selected_institution(&self) -> Option<&Institution> {
        self.selected_institution
            .as_deref()
            .and_then(|name| self.snapshot.find_institution(name))
    }

    /// The reference point distances are measured from: the selected
    /// campus, else the user position, else none.
    #[must_use]
    pub fn reference_point(&self) -> Option<Coordinates> {
        self.selected_institution()
            .and_then(|institution| institution.position)
            .or(self.user_point)
    }

    /// The radius applied around the current reference point.
    #[must_use]
    pub fn effective_radius_km(&self) -> Option<f64> {
        let reference = self.reference_point()?;
        let radius = match self.radius_policy {
            RadiusPolicy::Fixed(radius) => radius,
            RadiusPolicy::Adaptive => {
                let same_city: Vec<Coordinates> = match self.selected_institution() {
                    Some(institution) => {
                        let city = normalize_label(institution.city_name());
                        self.snapshot
                            .resources
                            .iter()
                            .filter(|r| r.city == city)
                            .filter_map(|r| r.position)
                            .collect()
                    }
                    // A bare user position carries no city to sample from.
                    None => Vec::new(),
                };
                geo::adaptive_radius_km(&reference, &same_city)
            }
        };
        Some(radius)
    }

    /// The access-type partition with the radius filter applied, before
    /// category and search narrowing. This is the set the category dropdown
    /// is built from.
    fn base_set(&self) -> Vec<&Resource> {
        partition_base(
            &self.snapshot,
            self.access_type,
            self.reference_point(),
            self.effective_radius_km(),
        )
    }

    /// The fully narrowed active set: partition, radius, category, search.
    #[must_use]
    pub fn active_resources(&self) -> Vec<&Resource> {
        let mut candidates = self.base_set();
        if let Some(category) = &self.category {
            candidates.retain(|r| &r.category == category);
        }
        search_resources(&self.query, &candidates, self.search_fields).matches
    }

    /// Distinct categories of the pre-search active set, first-seen order.
    #[must_use]
    pub fn available_categories(&self) -> Vec<CategoryOption> {
        let mut options: Vec<CategoryOption> = Vec::new();
        for resource in self.base_set() {
            if resource.category.is_empty() {
                continue;
            }
            if options.iter().any(|o| o.key == resource.category) {
                continue;
            }
            options.push(CategoryOption {
                key: resource.category.clone(),
                label: if resource.category_display.is_empty() {
                    resource.category.clone()
                } else {
                    resource.category_display.clone()
                },
            });
        }
        options
    }

    /// Compute one render pass: markers, online cards, dropdown options,
    /// viewport and the search auto-focus target.
    pub fn compose(&mut self) -> DirectoryRender {
        let campus_reference = self
            .selected_institution()
            .and_then(|institution| institution.position);
        let reference = self.reference_point();
        let radius = self.effective_radius_km();
        let query = self.query.clone();
        let category = self.category.clone();
        let search_fields = self.search_fields;

        // Borrow the snapshot field directly so the palette (a sibling
        // field) stays mutably borrowable while match refs are alive.
        let snapshot = &self.snapshot;
        let mut candidates = partition_base(snapshot, self.access_type, reference, radius);
        if let Some(category) = &category {
            candidates.retain(|r| &r.category == category);
        }
        let outcome = search_resources(&query, &candidates, search_fields);

        let mut markers = Vec::new();
        let mut online = Vec::new();
        for resource in &outcome.matches {
            if resource.is_online() {
                online.push((*resource).clone());
            } else if let Some(position) = resource.position {
                let distance_text = campus_reference.map(|campus| {
                    format!("{:.1} km from campus", geo::distance_km(&campus, &position))
                });
                let color = self.palette.color_for(&resource.category).to_string();
                markers.push(Marker {
                    position,
                    title: resource.name.clone(),
                    color,
                    info: MarkerInfo {
                        category: resource.category_display.clone(),
                        description: resource.description.clone(),
                        address: resource.address.clone(),
                        distance_text,
                        phone: resource.phone.clone(),
                        email: resource.email.clone(),
                        hours: resource.hours.clone(),
                        ohip: resource.ohip.clone(),
                        uhip: resource.uhip.clone(),
                        link: resource.link.clone(),
                    },
                });
            }
        }

        let best_match = outcome.best_match.map(|resource| FocusTarget {
            name: resource.name.clone(),
            position: resource.position,
        });

        let viewport = match &best_match {
            Some(FocusTarget {
                position: Some(position),
                ..
            }) => Viewport::Center {
                position: *position,
                zoom: FOCUS_ZOOM,
            },
            _ if markers.len() == 1 => Viewport::Center {
                position: markers[0].position,
                zoom: SINGLE_MARKER_ZOOM,
            },
            _ if !markers.is_empty() => Viewport::FitAll,
            _ => match campus_reference {
                Some(position) => Viewport::Center {
                    position,
                    zoom: CAMPUS_ZOOM,
                },
                None => Viewport::canada(),
            },
        };

        debug!(
            "Composed render: {} markers, {} online cards, best match: {:?}",
            markers.len(),
            online.len(),
            best_match.as_ref().map(|b| &b.name)
        );

        DirectoryRender {
            markers,
            online,
            categories: self.available_categories(),
            viewport,
            best_match,
        }
    }

    /// Render the current state into a map view.
    pub fn render(&mut self, view: &mut dyn MapView) {
        let render = self.compose();
        view.clear_markers();
        for marker in render.markers {
            view.add_marker(marker);
        }
        view.set_viewport(render.viewport);
    }
}

/// Access-type partition plus radius filter over the snapshot.
fn partition_base(
    snapshot: &DirectorySnapshot,
    access_type: Option<AccessType>,
    reference: Option<Coordinates>,
    radius: Option<f64>,
) -> Vec<&Resource> {
    let all = snapshot.resources.iter();
    match access_type {
        Some(AccessType::Online) => all.filter(|r| r.is_online()).collect(),
        Some(AccessType::InPerson) => match (reference, radius) {
            (Some(reference), Some(radius)) => {
                geo::within_radius(&snapshot.resources, &reference, radius)
                    .into_iter()
                    .filter(|r| !r.is_online())
                    .collect()
            }
            _ => all.filter(|r| !r.is_online()).collect(),
        },
        None => all.collect(),
    }
}
