use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::checkout::CheckoutManager;
use crate::core::Config;
use crate::submit::{InMemorySubmitter, TransactionSubmitter};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | catalog | CatalogService | 商品/客户目录 |
/// | checkout | CheckoutManager | 交易管理器 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<CatalogService>,
    pub checkout: Arc<CheckoutManager>,
}

impl ServerState {
    /// 初始化所有服务
    pub fn initialize(config: &Config) -> Self {
        let catalog = Arc::new(CatalogService::new());
        if config.is_development() {
            catalog.seed_demo();
            tracing::info!("Seeded demo catalog data");
        }

        let submitter: Arc<dyn TransactionSubmitter> = Arc::new(InMemorySubmitter::new());
        let checkout = Arc::new(CheckoutManager::new(catalog.clone(), submitter));

        Self {
            config: config.clone(),
            catalog,
            checkout,
        }
    }
}
