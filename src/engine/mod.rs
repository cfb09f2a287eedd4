//! 挑战求解引擎
//!
//! 读取当前题目 → 分发解题策略 → 合成输入 → 按检查按钮 →
//! 等待下一题，循环直到课程结束。
//!
//! 引擎只通过 [`DomDriver`] 接口接触页面，所有可变状态集中在
//! [`EngineSession`]，同一时刻最多只有一道题在处理中。

pub mod challenge;
pub mod completer;
pub mod continuation;
pub mod driver;
pub mod observe;
pub mod selectors;
pub mod session;
pub mod settings;
pub mod solver;
pub mod timing;
pub mod typer;

pub use challenge::{
    Challenge, ChallengeKind, ChallengeState, CompletedChallenge, DisplayToken, MatchPair,
};
pub use completer::{EndReason, LessonCompleter, LessonSummary};
pub use driver::DomDriver;
pub use session::EngineSession;
pub use settings::EngineSettings;
