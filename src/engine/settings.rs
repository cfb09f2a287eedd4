//! 引擎运行参数

use crate::config::Config;

/// 引擎运行参数
///
/// 由外部引导层在引擎创建时提供一次，引擎只读
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// 拟人模式（操作节奏随机化）
    pub human_feel: bool,
    /// 固定速度模式的延迟（毫秒）
    pub robot_speed_ms: u64,
    /// 拟人模式下离散选择之间的延迟范围（毫秒）
    pub human_choose_speed_range: (u64, u64),
    /// 拟人模式下逐字输入的延迟范围（毫秒）
    pub human_type_speed_range: (u64, u64),
    /// 是否自动按下继续按钮
    pub autoskip: bool,
    /// 是否打印题目数据等详细日志
    pub verbose_logging: bool,
}

impl EngineSettings {
    /// 从程序配置构造引擎参数
    ///
    /// 固定速度模式和自动练习模式下没有人会手动按继续按钮，
    /// 这两种情况强制开启 autoskip
    pub fn from_config(config: &Config) -> Self {
        let autoskip = config.autoskip || !config.human_feel || config.auto_practice;
        Self {
            human_feel: config.human_feel,
            robot_speed_ms: config.robot_speed_ms,
            human_choose_speed_range: (
                config.human_choose_speed_range[0],
                config.human_choose_speed_range[1],
            ),
            human_type_speed_range: (
                config.human_type_speed_range[0],
                config.human_type_speed_range[1],
            ),
            autoskip,
            verbose_logging: config.verbose_logging,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_mode_forces_autoskip() {
        let config = Config {
            human_feel: false,
            autoskip: false,
            ..Config::default()
        };
        assert!(EngineSettings::from_config(&config).autoskip);
    }

    #[test]
    fn test_auto_practice_forces_autoskip() {
        let config = Config {
            auto_practice: true,
            autoskip: false,
            ..Config::default()
        };
        assert!(EngineSettings::from_config(&config).autoskip);
    }

    #[test]
    fn test_human_mode_keeps_autoskip_choice() {
        let config = Config {
            human_feel: true,
            autoskip: false,
            auto_practice: false,
            ..Config::default()
        };
        assert!(!EngineSettings::from_config(&config).autoskip);
    }
}
