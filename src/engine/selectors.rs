//! 宿主页面的 DOM 选择器契约
//!
//! 这些选择器是与 Duolingo 页面标记的约定，改动任何一个
//! 都会破坏行为兼容性

/// 课程播放器的锚点元素（React 状态树入口）
pub const LESSON_ROOT: &str = ".mQ0GW";

/// 普通文本输入框
pub const CHALLENGE_TEXT_INPUT: &str = "[data-test='challenge-text-input']";

/// 翻译输入框
pub const CHALLENGE_TRANSLATE_INPUT: &str = "[data-test='challenge-translate-input']";

/// 词库容器
pub const WORD_BANK: &str = "[data-test='word-bank']";

/// 词库选项的文本节点
pub const TAP_TOKEN_TEXT: &str = "[data-test='challenge-tap-token-text']";

/// 多选题选项
pub const CHALLENGE_CHOICE: &str = "[data-test='challenge-choice']";

/// 继续/检查按钮
pub const PLAYER_NEXT: &str = "[data-test='player-next']";

/// 跳过按钮
pub const PLAYER_SKIP: &str = "[data-test='player-skip']";

/// 富文本输入目标
pub const CONTENT_EDITABLE: &str = "[contenteditable=true]";

/// 全局练习入口按钮
pub const GLOBAL_PRACTICE: &str = "[data-test='global-practice']";
