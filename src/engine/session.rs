//! 引擎会话状态

use crate::engine::challenge::Challenge;

/// 一次课程运行期间引擎持有的全部可变状态
///
/// 只由推进循环和继续控制器修改；任一时刻最多只有一道题在处理中，
/// 不存在并发读写
#[derive(Debug)]
pub struct EngineSession {
    /// 正在解答的题目
    pub current_challenge: Option<Challenge>,
    /// 上一道实际执行过解题策略的题目 id
    pub previous_challenge_id: Option<String>,
    /// 本轮是否还允许按一次检查按钮
    pub check_allowed: bool,
}

impl EngineSession {
    /// 创建新会话
    pub fn new() -> Self {
        Self {
            current_challenge: None,
            previous_challenge_id: None,
            check_allowed: true,
        }
    }

    /// 进入新一轮推进时恢复检查按钮的一次性许可
    pub fn reset_check_guard(&mut self) {
        self.check_allowed = true;
    }
}

impl Default for EngineSession {
    fn default() -> Self {
        Self::new()
    }
}
