//! Snapshot loading
//!
//! The two datasets load concurrently and independently. Any failure is
//! logged and degrades to an empty list; the page then renders "no resources
//! found". Nothing is fatal and nothing is retried.

use tracing::{info, warn};

use crate::SeedleError;
use crate::ingest::clean::clean_resources;
use crate::ingest::source::TabularDataSource;
use crate::models::{DirectorySnapshot, Institution, Resource};

/// Log a failed dataset load, with the friendlier wording when the cause is
/// one of our own error variants.
fn warn_load_failure(dataset: &str, error: &anyhow::Error) {
    match error.downcast_ref::<SeedleError>() {
        Some(e) => warn!("Failed to load {} dataset: {}", dataset, e.user_message()),
        None => warn!("Failed to load {} dataset: {:#}", dataset, error),
    }
}

/// Load both datasets into an immutable snapshot.
pub async fn load_snapshot(
    resources_source: &dyn TabularDataSource,
    institutions_source: &dyn TabularDataSource,
    clean: bool,
) -> DirectorySnapshot {
    let (resource_rows, institution_rows) =
        futures::join!(resources_source.load(), institutions_source.load());

    let mut resources: Vec<Resource> = match resource_rows {
        Ok(rows) => rows.iter().map(Resource::from_row).collect(),
        Err(e) => {
            warn_load_failure("resource", &e);
            Vec::new()
        }
    };

    if clean {
        resources = clean_resources(resources);
    }

    let institutions: Vec<Institution> = match institution_rows {
        Ok(rows) => rows.iter().map(Institution::from_row).collect(),
        Err(e) => {
            warn_load_failure("institution", &e);
            Vec::new()
        }
    };

    let geolocated = resources.iter().filter(|r| r.position.is_some()).count();
    info!(
        "Loaded {} resources ({} geolocated) and {} institutions",
        resources.len(),
        geolocated,
        institutions.len()
    );

    DirectorySnapshot::new(resources, institutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::source::{CsvSource, RowRecord};
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl TabularDataSource for FailingSource {
        async fn load(&self) -> anyhow::Result<Vec<RowRecord>> {
            Err(SeedleError::fetch("connection refused").into())
        }
    }

    #[tokio::test]
    async fn test_load_snapshot_from_csv() {
        let resources = CsvSource::new(
            b"Name,Category,City,Latitude,Longitude,Description\n\
              Counselling Centre,Community Counselling,Toronto,43.6629,-79.3957,walk-in counselling\n"
                .to_vec(),
        );
        let institutions = CsvSource::new(
            b"University,City,Address,Latitude,Longitude\n\
              Queen's University,\"Kingston, ON\",99 University Ave,44.2250,-76.4951\n"
                .to_vec(),
        );

        let snapshot = load_snapshot(&resources, &institutions, false).await;
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.institutions.len(), 1);
        assert!(snapshot.resources[0].position.is_some());
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_empty() {
        let institutions = CsvSource::new(b"University,City\nSolo College,Guelph\n".to_vec());

        let snapshot = load_snapshot(&FailingSource, &institutions, false).await;
        assert!(snapshot.resources.is_empty());
        assert_eq!(snapshot.institutions.len(), 1);

        let snapshot = load_snapshot(&FailingSource, &FailingSource, false).await;
        assert!(snapshot.resources.is_empty());
        assert!(snapshot.institutions.is_empty());
    }
}
