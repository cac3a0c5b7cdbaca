//! 业务逻辑服务层

mod sync_service;
mod zone_service;

pub use sync_service::SyncService;
pub use zone_service::ZoneService;

use std::sync::Arc;

use crate::config::ZoneManagerConfig;
use crate::error::{CoreError, CoreResult};
use crate::traits::{ProviderGateway, ZoneRepository};
use crate::types::Zone;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// Zone 持久化仓库
    pub zone_repository: Arc<dyn ZoneRepository>,
    /// DNS Provider 访问
    pub provider_gateway: Arc<dyn ProviderGateway>,
    /// 默认值与校验严格度
    pub config: ZoneManagerConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        zone_repository: Arc<dyn ZoneRepository>,
        provider_gateway: Arc<dyn ProviderGateway>,
        config: ZoneManagerConfig,
    ) -> Self {
        Self {
            zone_repository,
            provider_gateway,
            config,
        }
    }

    /// 加载 Zone，不存在时返回 `ZoneNotFound`
    pub async fn load_zone(&self, name: &str) -> CoreResult<Zone> {
        self.zone_repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CoreError::ZoneNotFound(name.to_string()))
    }
}

/// Log a service failure at `warn` for expected errors and `error` otherwise.
pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
}
