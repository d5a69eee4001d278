use config::{Config, Environment, File};
use dotenvy::dotenv;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// 默认身份请求头，由上游网关写入已认证的用户 ID
pub const DEFAULT_IDENTITY_HEADER: &str = "X-Authenticated-User";

/// 雪花算法节点 ID 上限（10 位）
const MAX_NODE_ID: i64 = 1023;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("node_id must be within 0..=1023, got {0}")]
    NodeIdOutOfRange(i64),
    #[error("like_count_cache.ttl_secs must be greater than zero")]
    ZeroCacheTtl,
    #[error("identity_header must not be empty")]
    EmptyIdentityHeader,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    /// 可信身份请求头名称
    identity_header: String,
    /// ID 生成器节点
    node_id: i64,
    /// 服务器配置
    server: RawServerConfig,
    /// 点赞数缓存配置
    like_count_cache: RawLikeCountCacheConfig,
}

/// 服务器配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServerConfig {
    /// 监听地址
    host: String,
    /// 监听端口
    port: u16,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// 点赞数缓存配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawLikeCountCacheConfig {
    /// 过期时间（秒），默认 30 分钟
    ttl_secs: u64,
    /// 最大条目数
    max_capacity: u64,
}

impl Default for RawLikeCountCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 30 * 60,
            max_capacity: 10_000,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            node_id: 1,
            server: RawServerConfig::default(),
            like_count_cache: RawLikeCountCacheConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 点赞数缓存配置
#[derive(Debug, Clone)]
pub struct LikeCountCacheConfig {
    pub ttl_secs: u64,
    pub max_capacity: u64,
}

impl LikeCountCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    pub database_url: String,
    pub identity_header: String,
    pub node_id: i64,
    pub server: ServerConfig,
    pub like_count_cache: LikeCountCacheConfig,
}

impl Default for AppConfigImpl {
    fn default() -> Self {
        AppConfigImpl::new(RawConfig::default())
    }
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Self {
        AppConfigImpl {
            database_url: data.database_url,
            identity_header: data.identity_header,
            node_id: data.node_id,
            server: ServerConfig {
                host: data.server.host,
                port: data.server.port,
            },
            like_count_cache: LikeCountCacheConfig {
                ttl_secs: data.like_count_cache.ttl_secs,
                max_capacity: data.like_count_cache.max_capacity,
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_NODE_ID).contains(&self.node_id) {
            return Err(ConfigError::NodeIdOutOfRange(self.node_id));
        }
        if self.like_count_cache.ttl_secs == 0 {
            return Err(ConfigError::ZeroCacheTtl);
        }
        if self.identity_header.trim().is_empty() {
            return Err(ConfigError::EmptyIdentityHeader);
        }
        Ok(())
    }

    pub fn load() -> Result<AppConfigImpl, Box<dyn std::error::Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        let app_config = AppConfigImpl::new(raw);
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone()
    }

    pub fn like_count_cache(&self) -> LikeCountCacheConfig {
        self.like_count_cache.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> AppConfigImpl {
        let raw: RawConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        AppConfigImpl::new(raw)
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfigImpl::default();
        assert_eq!(cfg.identity_header, DEFAULT_IDENTITY_HEADER);
        assert_eq!(cfg.like_count_cache.ttl(), Duration::from_secs(1800));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = from_toml(
            r#"
            database_url = "postgres://localhost/setlist"

            [like_count_cache]
            ttl_secs = 60
            "#,
        );
        assert_eq!(cfg.database_url(), "postgres://localhost/setlist");
        assert_eq!(cfg.like_count_cache.ttl_secs, 60);
        assert_eq!(cfg.like_count_cache.max_capacity, 10_000);
        assert_eq!(cfg.server().port, 5000);
    }

    #[test]
    fn test_validation() {
        let cfg = from_toml("node_id = 4096");
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NodeIdOutOfRange(4096))
        ));

        let cfg = from_toml("[like_count_cache]\nttl_secs = 0");
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroCacheTtl)));
    }
}
