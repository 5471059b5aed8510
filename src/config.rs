//! Configuration management for the Seedle directory engine
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SeedleError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Seedle directory engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedleConfig {
    /// Dataset locations and cleaning toggle
    #[serde(default)]
    pub datasets: DatasetsConfig,
    /// HTTP fetch configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Directory filtering and search policy
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Dataset source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    /// URL of the resource spreadsheet (.xlsx or .csv)
    #[serde(default = "default_resources_url")]
    pub resources_url: String,
    /// URL of the institution spreadsheet (.xlsx or .csv)
    #[serde(default = "default_institutions_url")]
    pub institutions_url: String,
    /// Run the cleaning pipeline on the raw resource sheet
    #[serde(default = "default_clean")]
    pub clean: bool,
}

/// HTTP fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u32,
    /// TTL for cached spreadsheet bytes in hours
    #[serde(default = "default_fetch_cache_ttl")]
    pub cache_ttl_hours: u32,
}

/// Cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the persistent byte cache for fetched datasets
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the HTTP API to
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served as the static frontend fallback
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Directory filtering and search policy
///
/// The page variants disagreed on the campus radius and on which fields
/// participate in search, so both are per-deployment knobs rather than one
/// reconciled behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Campus radius policy: "fixed" or "adaptive"
    #[serde(default = "default_radius_policy")]
    pub radius_policy: String,
    /// Radius in km used by the "fixed" policy
    #[serde(default = "default_fixed_radius")]
    pub fixed_radius_km: f64,
    /// Searchable field set: "full" or "compact"
    #[serde(default = "default_search_fields")]
    pub search_fields: String,
}

// Default value functions
fn default_resources_url() -> String {
    "https://seedle.ca/assets/canadianMentalHealthResources.xlsx".to_string()
}

fn default_institutions_url() -> String {
    "https://seedle.ca/assets/canadianUniversitiesAndColleges.xlsx".to_string()
}

fn default_clean() -> bool {
    false
}

fn default_fetch_timeout() -> u32 {
    30
}

fn default_fetch_cache_ttl() -> u32 {
    24
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_location() -> String {
    "~/.cache/seedle".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_radius_policy() -> String {
    "fixed".to_string()
}

fn default_fixed_radius() -> f64 {
    25.0
}

fn default_search_fields() -> String {
    "full".to_string()
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            resources_url: default_resources_url(),
            institutions_url: default_institutions_url(),
            clean: default_clean(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_fetch_timeout(),
            cache_ttl_hours: default_fetch_cache_ttl(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            location: default_cache_location(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            radius_policy: default_radius_policy(),
            fixed_radius_km: default_fixed_radius(),
            search_fields: default_search_fields(),
        }
    }
}

impl Default for SeedleConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetsConfig::default(),
            fetch: FetchConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            directory: DirectoryConfig::default(),
        }
    }
}

impl SeedleConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with SEEDLE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SEEDLE")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SeedleConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seedle").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate dataset URLs
    fn validate_urls(&self) -> Result<()> {
        for url in [&self.datasets.resources_url, &self.datasets.institutions_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SeedleError::config(format!(
                    "Dataset URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.fetch.timeout_seconds == 0 || self.fetch.timeout_seconds > 300 {
            return Err(
                SeedleError::config("Fetch timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.fetch.cache_ttl_hours > 168 {
            return Err(
                SeedleError::config("Fetch cache TTL cannot exceed 168 hours (1 week)").into(),
            );
        }

        if self.directory.fixed_radius_km <= 0.0 || self.directory.fixed_radius_km > 500.0 {
            return Err(
                SeedleError::config("Fixed radius must be between 0 and 500 km").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_policies = ["fixed", "adaptive"];
        if !valid_policies.contains(&self.directory.radius_policy.as_str()) {
            return Err(SeedleError::config(format!(
                "Invalid radius policy '{}'. Must be one of: {}",
                self.directory.radius_policy,
                valid_policies.join(", ")
            ))
            .into());
        }

        let valid_field_sets = ["full", "compact"];
        if !valid_field_sets.contains(&self.directory.search_fields.as_str()) {
            return Err(SeedleError::config(format!(
                "Invalid search field set '{}'. Must be one of: {}",
                self.directory.search_fields,
                valid_field_sets.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
