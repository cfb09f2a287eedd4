//! 测试用的脚本化假页面
//!
//! 快照序列模拟页面状态随时间的变化：每次"变动"把游标向前推一格，
//! 读取操作总是看到游标指向的快照

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use duo_lesson_complete::engine::{Challenge, ChallengeState, CompletedChallenge, DomDriver};
use duo_lesson_complete::error::{AppError, AppResult};

/// 记录下来的一次页面交互
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Change { selector: String, value: String },
    EditableText { value: String },
    BankClick { index: usize },
    NthClick { selector: String, index: usize },
    AllClick { selector: String },
    ContinueClick,
}

/// 假页面状态
#[derive(Default)]
pub struct FakeDom {
    /// 按时间顺序排列的题目状态快照，游标走到末尾后停住
    pub snapshots: Vec<Option<ChallengeState>>,
    pub cursor: usize,
    /// element_exists 返回 true 的选择器
    pub existing: HashSet<String>,
    /// dispatch_change 有注册回调的选择器
    pub handlers: HashSet<String>,
    /// 是否存在 contenteditable 目标
    pub editable: bool,
    /// 词库选项文本，None 表示没有词库
    pub bank: Option<Vec<String>>,
    /// click_nth / click_all 可命中的元素数量
    pub element_counts: HashMap<String, usize>,
    pub interactions: Vec<Interaction>,
    pub continue_clicks: usize,
    pub reads: usize,
    pub mutations: usize,
}

/// 脚本化 DOM 驱动
#[derive(Clone, Default)]
pub struct FakeDriver {
    pub dom: Arc<Mutex<FakeDom>>,
}

impl FakeDriver {
    pub fn new(dom: FakeDom) -> Self {
        Self {
            dom: Arc::new(Mutex::new(dom)),
        }
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.dom.lock().unwrap().interactions.clone()
    }

    pub fn continue_clicks(&self) -> usize {
        self.dom.lock().unwrap().continue_clicks
    }

    pub fn reads(&self) -> usize {
        self.dom.lock().unwrap().reads
    }

    /// 按顺序取出写入指定输入框的所有值
    pub fn typed_values(&self, selector: &str) -> Vec<String> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::Change {
                    selector: s,
                    value,
                } if s == selector => Some(value),
                _ => None,
            })
            .collect()
    }

    /// 按顺序取出写入 contenteditable 的所有值
    pub fn editable_values(&self) -> Vec<String> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::EditableText { value } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// 按顺序取出词库点击的下标
    pub fn bank_clicks(&self) -> Vec<usize> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::BankClick { index } => Some(index),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl DomDriver for FakeDriver {
    async fn element_exists(&self, selector: &str) -> AppResult<bool> {
        let dom = self.dom.lock().unwrap();
        Ok(dom.existing.contains(selector)
            || dom.element_counts.get(selector).copied().unwrap_or(0) > 0)
    }

    async fn read_challenge_state(&self) -> AppResult<Option<ChallengeState>> {
        let mut dom = self.dom.lock().unwrap();
        dom.reads += 1;
        if dom.snapshots.is_empty() {
            return Ok(None);
        }
        let index = dom.cursor.min(dom.snapshots.len() - 1);
        Ok(dom.snapshots[index].clone())
    }

    async fn dispatch_change(&self, selector: &str, value: &str) -> AppResult<bool> {
        let mut dom = self.dom.lock().unwrap();
        if !dom.handlers.contains(selector) {
            return Ok(false);
        }
        dom.interactions.push(Interaction::Change {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        Ok(true)
    }

    async fn set_editable_text(&self, value: &str) -> AppResult<bool> {
        let mut dom = self.dom.lock().unwrap();
        if !dom.editable {
            return Ok(false);
        }
        dom.interactions.push(Interaction::EditableText {
            value: value.to_string(),
        });
        Ok(true)
    }

    async fn word_bank_tokens(&self) -> AppResult<Option<Vec<String>>> {
        Ok(self.dom.lock().unwrap().bank.clone())
    }

    async fn click_bank_token(&self, index: usize) -> AppResult<bool> {
        let mut dom = self.dom.lock().unwrap();
        let size = dom.bank.as_ref().map(Vec::len).unwrap_or(0);
        if index >= size {
            return Ok(false);
        }
        dom.interactions.push(Interaction::BankClick { index });
        Ok(true)
    }

    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<bool> {
        let mut dom = self.dom.lock().unwrap();
        if index >= dom.element_counts.get(selector).copied().unwrap_or(0) {
            return Ok(false);
        }
        dom.interactions.push(Interaction::NthClick {
            selector: selector.to_string(),
            index,
        });
        Ok(true)
    }

    async fn click_all(&self, selector: &str) -> AppResult<usize> {
        let mut dom = self.dom.lock().unwrap();
        let count = dom.element_counts.get(selector).copied().unwrap_or(0);
        dom.interactions.push(Interaction::AllClick {
            selector: selector.to_string(),
        });
        Ok(count)
    }

    async fn click_continue(&self) -> AppResult<bool> {
        let mut dom = self.dom.lock().unwrap();
        if !dom
            .existing
            .contains(duo_lesson_complete::engine::selectors::PLAYER_NEXT)
        {
            return Ok(false);
        }
        dom.continue_clicks += 1;
        dom.interactions.push(Interaction::ContinueClick);
        Ok(true)
    }

    async fn wait_for_mutation(&self) -> AppResult<()> {
        let mut dom = self.dom.lock().unwrap();
        dom.mutations += 1;
        // 脚本走完后仍然循环说明状态机卡住了，把挂起变成测试失败
        if dom.mutations > 1000 {
            return Err(AppError::Other("假页面变动次数超限".to_string()));
        }
        if !dom.snapshots.is_empty() {
            dom.cursor = (dom.cursor + 1).min(dom.snapshots.len() - 1);
        }
        Ok(())
    }
}

// ========== 题目构造辅助 ==========

/// 构造一个空题目
pub fn challenge(id: &str, challenge_type: &str) -> Challenge {
    Challenge {
        id: id.to_string(),
        challenge_type: challenge_type.to_string(),
        prompt: None,
        correct_solutions: vec![],
        correct_tokens: vec![],
        display_tokens: vec![],
        pairs: vec![],
        correct_index: None,
    }
}

/// 构造题目状态快照
pub fn state_with(current: Challenge, completed: &[&str]) -> Option<ChallengeState> {
    Some(ChallengeState {
        current_challenge: current,
        correct_challenges: completed
            .iter()
            .map(|id| CompletedChallenge { id: id.to_string() })
            .collect(),
    })
}

/// 固定速度零延迟的引擎参数，测试里跑得快
pub fn instant_settings(autoskip: bool) -> duo_lesson_complete::engine::EngineSettings {
    duo_lesson_complete::engine::EngineSettings {
        human_feel: false,
        robot_speed_ms: 0,
        human_choose_speed_range: (500, 900),
        human_type_speed_range: (50, 300),
        autoskip,
        verbose_logging: false,
    }
}
