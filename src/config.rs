// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "TEXT2PINYIN_CONFIG";
const HOST_ENV: &str = "TEXT2PINYIN_HOST";
const PORT_ENV: &str = "TEXT2PINYIN_PORT";
const API_PREFIX_ENV: &str = "TEXT2PINYIN_API_PREFIX";

// ============================================================================
// 服务配置
// ============================================================================

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// API 路由前缀（如 "/api"）
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl ServerConfig {
    /// 规范化后的路由前缀：保证以 "/" 开头且不以 "/" 结尾，空前缀返回 ""
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============================================================================
// 拼音转换配置
// ============================================================================

/// 拼音转换配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G2pConfig {
    /// 轻声是否以数字 5 标注（如 "de5"）
    #[serde(default = "default_neutral_tone_with_five")]
    pub neutral_tone_with_five: bool,
    /// 用户词组读音（词 → 逐字拼音），优先于内置词表
    #[serde(default)]
    pub phrases: HashMap<String, Vec<String>>,
}

fn default_neutral_tone_with_five() -> bool {
    true
}

impl Default for G2pConfig {
    fn default() -> Self {
        Self {
            neutral_tone_with_five: default_neutral_tone_with_five(),
            phrases: HashMap::new(),
        }
    }
}

// ============================================================================
// 应用配置
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub g2p: G2pConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            server: ServerConfig::default(),
            log_level: default_log_level(),
            g2p: G2pConfig::default(),
        }
    }

    /// 配置文件路径：优先环境变量，其次系统配置目录
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join("Text2Pinyin");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    /// 加载配置并应用环境变量覆盖
    ///
    /// 配置文件不存在时写入默认配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {:?}", path))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("解析配置文件失败: {:?}", path))?;
            tracing::info!("配置加载成功");
            Ok(config)
        } else {
            tracing::warn!("配置文件不存在，创建并返回默认配置");
            let config = Self::new();
            if let Err(e) = config.save_to(path) {
                // 只读文件系统等场景下仍可使用默认配置启动
                tracing::warn!("写入默认配置失败: {}", e);
            }
            Ok(config)
        }
    }

    /// 环境变量覆盖（容器部署场景）
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("忽略无效端口 {}={}: {}", PORT_ENV, port, e),
            }
        }
        if let Some(prefix) = lookup(API_PREFIX_ENV) {
            self.server.api_prefix = prefix;
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("保存配置到: {:?}", path);

        // 原子写入：先写临时文件，再原子替换
        let temp_path = path.with_extension("json.tmp");
        let backup_path = path.with_extension("json.bak");

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;

        if path.exists() {
            if backup_path.exists() {
                let _ = std::fs::remove_file(&backup_path);
            }
            std::fs::rename(path, &backup_path).map_err(|e| {
                tracing::error!("备份旧配置文件失败: {}", e);
                e
            })?;
        }

        match std::fs::rename(&temp_path, path) {
            Ok(_) => {
                let _ = std::fs::remove_file(&backup_path);
                tracing::info!("配置保存成功");
                Ok(())
            }
            Err(e) => {
                tracing::error!("重命名临时文件失败: {}", e);
                if backup_path.exists() {
                    if let Err(restore_err) = std::fs::rename(&backup_path, path) {
                        tracing::error!("恢复备份失败: {}", restore_err);
                    } else {
                        tracing::info!("已从备份恢复配置");
                    }
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::new());
        assert!(path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::new();
        config.server.port = 9100;
        config
            .g2p
            .phrases
            .insert("长大".to_string(), vec!["zhang3".to_string(), "da4".to_string()]);
        config.save_to(&path).unwrap();
        // 第二次保存走备份 + 替换分支
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("json.tmp").exists());
        assert!(!path.with_extension("json.bak").exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": {"port": 8080}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.api_prefix, "/api");
        assert!(config.g2p.neutral_tone_with_five);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::new();
        config.apply_overrides(|key| match key {
            "TEXT2PINYIN_PORT" => Some("9000".to_string()),
            "TEXT2PINYIN_API_PREFIX" => Some("/v1/".to_string()),
            _ => None,
        });
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.normalized_prefix(), "/v1");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = AppConfig::new();
        config.apply_overrides(|key| (key == "TEXT2PINYIN_PORT").then(|| "abc".to_string()));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_normalized_prefix() {
        let mut server = ServerConfig::default();
        assert_eq!(server.normalized_prefix(), "/api");
        server.api_prefix = "".to_string();
        assert_eq!(server.normalized_prefix(), "");
        server.api_prefix = "api/v2".to_string();
        assert_eq!(server.normalized_prefix(), "/api/v2");
    }
}
