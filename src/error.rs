use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 引擎相关错误
    #[error("引擎错误: {0}")]
    Engine(#[from] EngineError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        source: chromiumoxide::error::CdpError,
    },
    /// 枚举标签页失败
    #[error("枚举标签页失败: {0}")]
    PageLookupFailed(chromiumoxide::error::CdpError),
    /// 创建页面失败
    #[error("创建页面失败: {0}")]
    PageCreationFailed(chromiumoxide::error::CdpError),
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        source: chromiumoxide::error::CdpError,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    ScriptExecutionFailed(chromiumoxide::error::CdpError),
    /// 脚本结果解析失败
    #[error("脚本结果解析失败: {0}")]
    ScriptResultParseFailed(serde_json::Error),
}

/// 引擎错误
///
/// 区分"可恢复的失败"与"正常的缺席状态"：前者回到空闲状态等待重试，
/// 后者引导状态机走备选转移
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// 没有注册对应策略的题型
    #[error("不支持的题型: {challenge_type}")]
    UnsupportedChallengeType { challenge_type: String },
    /// 策略执行中预期的页面元素不存在
    #[error("页面元素不存在: {selector}")]
    MissingElement { selector: String },
    /// 题目数据缺少策略必需的字段
    #[error("题目数据缺少字段: {field}")]
    MissingChallengeField { field: &'static str },
    /// 继续按钮不在页面上（课程临近结束时的正常状态）
    #[error("没有找到继续按钮")]
    NoContinueButton,
}

impl EngineError {
    /// 是否可恢复：回到空闲状态，等下一次页面变动后重试
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedChallengeType { .. }
                | Self::MissingElement { .. }
                | Self::MissingChallengeField { .. }
        )
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// 解析配置文件失败
    #[error("解析配置文件失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        source: toml::de::Error,
    },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
