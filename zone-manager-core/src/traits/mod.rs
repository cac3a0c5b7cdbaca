//! Storage and provider abstraction trait definitions

mod provider_gateway;
mod zone_repository;

pub use provider_gateway::ProviderGateway;
pub use zone_repository::{InMemoryZoneRepository, ZoneRepository};
