//! 战斗通行证服务
//!
//! 提供运营侧按原因发放通行证等级的 REST API。
//!
//! ## 核心功能
//!
//! - **等级发放**：按配置的原因为玩家增加等级，调用等级奖励引擎合并奖励
//! - **档案解析**：从档案文档解析主/次/进度容器并写回
//! - **并发控制**：同一玩家的发放串行执行，并支持按原因冷却
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 账号与档案实体
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: API Key 认证
//! - `repository`: 账号、档案、赛季目录仓储
//! - `service`: 发放服务
//! - `lock`: 玩家锁
//! - `cooldown`: 发放冷却
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 并发存储：dashmap

pub mod cooldown;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod lock;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use dto::{BpTiersQuery, BpTiersResponse};
pub use error::{Result, ServiceError};
pub use models::{Account, ProfileDocument};
pub use service::{BattlePassGrantService, TierGrantReceipt};
pub use state::AppState;
