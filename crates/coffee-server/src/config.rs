use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// 环境变量前缀，例如 `COFFEE__DATABASE__URL`
pub const ENV_PREFIX: &str = "COFFEE";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,

    /// 连接池上限，未设置时使用驱动默认值
    pub max_connections: Option<u32>,

    /// 输出 SQL 语句日志
    pub sqlx_logging: bool,

    /// 启动时创建表结构
    pub auto_migrate: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    /// 已知品牌，启动时打印
    pub brands: Vec<String>,
}

impl AppConfig {
    /// 加载配置：文件（可缺省）+ `COFFEE__` 环境变量
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    pub fn load_with_prefix(path: &str, env_prefix: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        Ok(app_config)
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Default trait 实现
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: None,
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            brands: vec!["Brand 1".to_string(), "Brand 2".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert!(config.database.auto_migrate);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.max_page_size, 100);
        assert_eq!(config.catalog.brands, vec!["Brand 1", "Brand 2"]);
    }
}
