use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 未找到 Duolingo 标签页时打开的目标URL
    pub target_url: String,
    /// 拟人模式（操作节奏随机化）
    pub human_feel: bool,
    /// 固定速度模式的延迟（毫秒）
    pub robot_speed_ms: u64,
    /// 拟人模式下离散选择之间的延迟范围（毫秒）
    pub human_choose_speed_range: [u64; 2],
    /// 拟人模式下逐字输入的延迟范围（毫秒）
    pub human_type_speed_range: [u64; 2],
    /// 是否自动按下继续按钮
    pub autoskip: bool,
    /// 是否自动开启练习模式
    pub auto_practice: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_url: "https://www.duolingo.com/learn".to_string(),
            human_feel: true,
            robot_speed_ms: 500,
            human_choose_speed_range: [500, 900],
            human_type_speed_range: [50, 300],
            autoskip: false,
            auto_practice: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：先读 config.toml（存在时），再用环境变量覆盖
    pub fn load() -> Self {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let base = if Path::new(&path).exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    info!("✓ 已加载配置文件: {}", path);
                    config
                }
                Err(e) => {
                    warn!("⚠️ {}，使用默认配置", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        base.apply_env()
    }

    /// 从 TOML 文件读取配置
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_string(),
            source: e,
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_string(),
            source: e,
        })?;
        Ok(config)
    }

    /// 用环境变量覆盖配置项
    fn apply_env(mut self) -> Self {
        if let Some(v) = env_parse("BROWSER_DEBUG_PORT") {
            self.browser_debug_port = v;
        }
        if let Ok(v) = std::env::var("TARGET_URL") {
            self.target_url = v;
        }
        if let Some(v) = env_parse("HUMAN_FEEL") {
            self.human_feel = v;
        }
        if let Some(v) = env_parse("ROBOT_SPEED_MS") {
            self.robot_speed_ms = v;
        }
        if let Some(v) = env_range("HUMAN_CHOOSE_SPEED_RANGE") {
            self.human_choose_speed_range = v;
        }
        if let Some(v) = env_range("HUMAN_TYPE_SPEED_RANGE") {
            self.human_type_speed_range = v;
        }
        if let Some(v) = env_parse("AUTOSKIP") {
            self.autoskip = v;
        }
        if let Some(v) = env_parse("AUTO_PRACTICE") {
            self.auto_practice = v;
        }
        if let Some(v) = env_parse("VERBOSE_LOGGING") {
            self.verbose_logging = v;
        }
        self
    }
}

/// 读取并解析环境变量，未设置或解析失败时返回 None
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// 读取 "min,max" 形式的区间环境变量
fn env_range(name: &str) -> Option<[u64; 2]> {
    parse_range(&std::env::var(name).ok()?)
}

/// 解析 "min,max" 形式的区间
fn parse_range(raw: &str) -> Option<[u64; 2]> {
    let (min, max) = raw.split_once(',')?;
    Some([min.trim().parse().ok()?, max.trim().parse().ok()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("50,300"), Some([50, 300]));
        assert_eq!(parse_range(" 500 , 900 "), Some([500, 900]));
        assert_eq!(parse_range("500"), None);
        assert_eq!(parse_range("a,b"), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("autoskip = true\nrobot_speed_ms = 200").unwrap();
        assert!(config.autoskip);
        assert_eq!(config.robot_speed_ms, 200);
        // 未给出的字段回落到默认值
        assert!(config.human_feel);
        assert_eq!(config.human_type_speed_range, [50, 300]);
    }
}
