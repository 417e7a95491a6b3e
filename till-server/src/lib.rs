//! Till Checkout Server - 交易定价与收银服务
//!
//! # 架构概述
//!
//! 本模块是收银服务的主入口，提供以下核心功能：
//!
//! - **定价引擎** (`pricing`): 纯函数定价 - 行金额、整单汇总
//! - **支付** (`payments`): 支付核销与 Due/Partial/Paid 状态机
//! - **交易管理** (`checkout`): 内存交易快照与命令处理
//! - **目录** (`catalog`): 商品/客户查询 (黑盒协作方)
//! - **提交** (`submit`): 交易提交端点 (黑盒协作方)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! till-server/src/
//! ├── core/      # 配置、状态、HTTP 启动
//! ├── pricing/   # 定价引擎 (纯函数)
//! ├── payments/  # 支付核销与状态机
//! ├── checkout/  # 交易管理器
//! ├── catalog/   # 商品/客户目录
//! ├── submit/    # 交易提交
//! ├── api/       # HTTP 路由和处理器
//! └── utils/     # 工具函数
//! ```

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod payments;
pub mod pricing;
pub mod submit;
pub mod utils;

// Re-export 公共类型
pub use catalog::CatalogService;
pub use checkout::{CheckoutError, CheckoutManager};
pub use core::{Config, Server, ServerState};
pub use pricing::PricingError;
pub use submit::{InMemorySubmitter, TransactionSubmitter};
pub use utils::{AppError, AppResult};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _______ _ _ _
|__   __(_) | |
   | |   _| | |
   | |  | | | |
   |_|  |_|_|_|
"#
    );
}
