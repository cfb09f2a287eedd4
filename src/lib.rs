//! # Duo Lesson Complete
//!
//! 一个自动完成 Duolingo 课程练习的 Rust 应用程序
//!
//! 通过 CDP 连接到已登录 Duolingo 的浏览器，读取页面内 React
//! 组件持有的题目数据，并合成宿主框架能识别的用户输入来答题。
//!
//! ## 架构设计
//!
//! 本系统采用三层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `react_inspect` - 探测宿主 React 内部结构的 JS 片段，
//!   整个系统中唯一与宿主框架版本耦合的部分
//! - `CdpDomDriver` - 把引擎的 DOM 边界翻译成页面内执行的 JS
//!
//! ### ② 引擎层（Engine）
//! - `engine/` - 挑战求解引擎
//! - 题目数据模型、节奏策略、输入合成、解题策略分发、
//!   继续控制、推进状态机
//! - 引擎只通过 `DomDriver` 接口接触页面，可以用假页面测试
//!
//! ### ③ 编排层（App）
//! - `app` - 连接浏览器、监视页面导航、按课程创建引擎会话
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod config;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod logger;

// 重新导出常用类型
pub use app::App;
pub use browser::connect_to_duolingo_page;
pub use config::Config;
pub use engine::{
    Challenge, ChallengeKind, ChallengeState, DomDriver, EndReason, EngineSession,
    EngineSettings, LessonCompleter, LessonSummary,
};
pub use error::{AppError, AppResult, BrowserError, ConfigError, EngineError};
pub use infrastructure::{CdpDomDriver, JsExecutor};
