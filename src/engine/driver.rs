//! DOM 驱动接口
//!
//! 引擎与宿主页面之间的唯一边界。生产实现通过 CDP 在页面里
//! 执行 JS（`infrastructure::CdpDomDriver`），测试用脚本化的假页面。

use async_trait::async_trait;

use crate::engine::challenge::ChallengeState;
use crate::error::AppResult;

/// 引擎需要的全部 DOM 能力
#[async_trait]
pub trait DomDriver: Send + Sync {
    /// 判断选择器命中的元素是否存在
    async fn element_exists(&self, selector: &str) -> AppResult<bool>;

    /// 读取当前题目状态
    ///
    /// 页面上没有渲染题目时返回 None，这是正常状态而不是错误
    async fn read_challenge_state(&self) -> AppResult<Option<ChallengeState>>;

    /// 定位输入框注册的变更回调并以新值调用
    ///
    /// 元素或回调不存在时返回 false
    async fn dispatch_change(&self, selector: &str, value: &str) -> AppResult<bool>;

    /// 向 contenteditable 目标写入文本并派发 input 事件，光标保持在末尾
    async fn set_editable_text(&self, value: &str) -> AppResult<bool>;

    /// 读取词库中各选项的可见文本（按 DOM 顺序），没有词库时返回 None
    async fn word_bank_tokens(&self) -> AppResult<Option<Vec<String>>>;

    /// 点击词库中指定下标的选项
    async fn click_bank_token(&self, index: usize) -> AppResult<bool>;

    /// 点击选择器命中的第 index 个元素
    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<bool>;

    /// 点击选择器命中的所有元素，返回点击数量
    async fn click_all(&self, selector: &str) -> AppResult<usize>;

    /// 点击继续/检查按钮，按钮不存在时返回 false
    async fn click_continue(&self) -> AppResult<bool>;

    /// 挂起直到页面发生一次 DOM 变动（实现方可以设置兜底超时）
    async fn wait_for_mutation(&self) -> AppResult<()>;
}
