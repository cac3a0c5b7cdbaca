//! Platform-agnostic application bootstrap for Zone Manager.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection)
//! and the configuration loader shared by every frontend.

pub mod adapters;

use std::path::Path;
use std::sync::Arc;

use zone_manager_core::config::ZoneManagerConfig;
use zone_manager_core::error::{CoreError, CoreResult};
use zone_manager_core::services::{ServiceContext, SyncService, ZoneService};
use zone_manager_core::traits::{InMemoryZoneRepository, ProviderGateway, ZoneRepository};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds the storage and provider adapters)
    pub ctx: Arc<ServiceContext>,
    /// Zone lifecycle, records, import/export
    pub zone_service: ZoneService,
    /// Provider sync
    pub sync_service: SyncService,
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `provider_gateway`: where observed provider state comes from
///
/// # Optional
/// - `zone_repository`: defaults to `InMemoryZoneRepository`
/// - `config`: defaults to `ZoneManagerConfig::default()`
pub struct AppStateBuilder {
    zone_repository: Option<Arc<dyn ZoneRepository>>,
    provider_gateway: Option<Arc<dyn ProviderGateway>>,
    config: ZoneManagerConfig,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            zone_repository: None,
            provider_gateway: None,
            config: ZoneManagerConfig::default(),
        }
    }

    #[must_use]
    pub fn zone_repository(mut self, repo: Arc<dyn ZoneRepository>) -> Self {
        self.zone_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn provider_gateway(mut self, gateway: Arc<dyn ProviderGateway>) -> Self {
        self.provider_gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ZoneManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfig` if a required adapter is missing.
    pub fn build(self) -> CoreResult<AppState> {
        let provider_gateway = self.provider_gateway.ok_or_else(|| {
            CoreError::InvalidConfig("provider_gateway is required".to_string())
        })?;
        let zone_repository = self
            .zone_repository
            .unwrap_or_else(|| Arc::new(InMemoryZoneRepository::new()));

        let ctx = Arc::new(ServiceContext::new(
            zone_repository,
            provider_gateway,
            self.config,
        ));

        Ok(AppState {
            zone_service: ZoneService::new(Arc::clone(&ctx)),
            sync_service: SyncService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the JSON configuration file, or the defaults when no path is given.
///
/// # Errors
/// `InvalidConfig` when the file cannot be read, `SerializationError` when it
/// is not a valid configuration document.
pub async fn load_config(path: Option<&Path>) -> CoreResult<ZoneManagerConfig> {
    let Some(path) = path else {
        return Ok(ZoneManagerConfig::default());
    };
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        CoreError::InvalidConfig(format!("Failed to read {}: {e}", path.display()))
    })?;
    let config = ZoneManagerConfig::from_json(&json)?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}
