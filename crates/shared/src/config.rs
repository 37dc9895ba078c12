//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// 战斗通行证配置
///
/// 对应运营侧的赛季开关、API Key 以及「发放原因 -> 等级数」映射
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BattlePassConfig {
    /// 是否启用战斗通行证
    pub enabled: bool,
    /// 当前赛季编号，对应 `Season{N}.json`
    pub season: u32,
    /// 调用发放接口所需的 API Key（为空时拒绝所有请求）
    pub api_key: String,
    /// 赛季奖励目录文件所在目录
    pub catalog_dir: String,
    /// 发放原因 -> 增加的等级数
    pub reasons: HashMap<String, i64>,
    /// 同一玩家同一原因的冷却时间（秒），0 表示不限制
    pub cooldown_secs: u64,
}

impl Default for BattlePassConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            season: 1,
            api_key: String::new(),
            catalog_dir: "responses/Athena/BattlePass".to_string(),
            reasons: HashMap::new(),
            cooldown_secs: 0,
        }
    }
}

impl BattlePassConfig {
    /// 赛季目录名，如 `Season12`
    pub fn season_name(&self) -> String {
        format!("Season{}", self.season)
    }

    /// 查询发放原因对应的等级数
    ///
    /// 配置加载可能改变 key 的大小写，因此先精确匹配，再忽略大小写匹配。
    /// 未配置或配置为非正数时返回 None。
    pub fn tiers_for_reason(&self, reason: &str) -> Option<i64> {
        let tiers = self.reasons.get(reason).copied().or_else(|| {
            self.reasons
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(reason))
                .map(|(_, tiers)| *tiers)
        })?;

        (tiers > 0).then_some(tiers)
    }

    /// 已配置的发放原因列表（排序后，便于错误提示）
    pub fn allowed_reasons(&self) -> Vec<String> {
        let mut reasons: Vec<String> = self.reasons.keys().cloned().collect();
        reasons.sort();
        reasons
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub battlepass: BattlePassConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（BATTLEPASS_ 前缀，层级用双下划线分隔，
    ///    如 BATTLEPASS_SERVER__PORT -> server.port）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("BATTLEPASS_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("BATTLEPASS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        if let Some(port) = Self::get_service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 从环境变量获取服务特定端口
    ///
    /// 将 "battlepass-service" 转换为 "BATTLEPASS_SERVICE_PORT"
    fn get_service_port_from_env(service_name: &str) -> Option<u16> {
        let env_var_name = format!(
            "{}_PORT",
            service_name.to_uppercase().replace('-', "_")
        );
        std::env::var(&env_var_name)
            .ok()
            .and_then(|v| v.parse().ok())
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
