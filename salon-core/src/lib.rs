//! Salon Core - 美发沙龙会员规则引擎
//!
//! # 架构概述
//!
//! 纯计算组件 + 可注入的业务规则，供后台/前台 API 层调用：
//!
//! - **会员等级** (`membership`): 等级判定、升级进度、积分
//! - **服务目录** (`catalog`): 服务组合校验、报价
//! - **计价** (`pricing`): 来店计价、折扣叠加策略
//! - **结账** (`checkout`): 校验 → 计价 → 记录来店 → 更新会员统计
//!
//! # 模块结构
//!
//! ```text
//! salon-core/src/
//! ├── core/          # 进程配置、业务规则 (RulesConfig)
//! ├── common/        # 日志
//! ├── membership/    # TierCalculator
//! ├── catalog/       # ServiceCatalog, ServiceCombinationValidator
//! ├── pricing/       # VisitPricingEngine, DiscountPolicy
//! ├── checkout/      # VisitCheckout 与存储协作者 trait
//! └── money.rs       # rust_decimal 金额工具
//! ```

pub mod catalog;
pub mod checkout;
pub mod common;
pub mod core;
pub mod membership;
pub mod money;
pub mod pricing;

// Re-export 公共类型
pub use catalog::{ServiceCatalog, ServiceCombinationValidator};
pub use checkout::{
    CheckoutReceipt, MemberCountersProvider, ServiceCatalogProvider, VisitCheckout, VisitRequest,
    VisitSink,
};
pub use core::{Config, RulesConfig, TierTable};
pub use membership::TierCalculator;
pub use pricing::{DiscountPolicy, VisitPricingEngine};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use common::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
