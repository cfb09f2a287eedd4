//! 解题策略
//!
//! 每种题型一个策略：读取题目数据，在页面上完成最少的选择/输入
//! 操作。策略本身不按检查按钮，检查按钮由推进循环统一处理。

use tracing::debug;

use crate::engine::challenge::{Challenge, ChallengeKind, DisplayToken};
use crate::engine::driver::DomDriver;
use crate::engine::selectors;
use crate::engine::settings::EngineSettings;
use crate::engine::timing::{self, Pace};
use crate::engine::typer::{self, TypeTarget};
use crate::error::{AppResult, EngineError};

/// 解题器：把一道题分发到对应的策略并执行
pub struct ChallengeSolver<'a, D: DomDriver + ?Sized> {
    driver: &'a D,
    settings: &'a EngineSettings,
}

impl<'a, D: DomDriver + ?Sized> ChallengeSolver<'a, D> {
    /// 创建新的解题器
    pub fn new(driver: &'a D, settings: &'a EngineSettings) -> Self {
        Self { driver, settings }
    }

    /// 执行与题型匹配的策略
    ///
    /// 未注册的题型返回 UnsupportedChallengeType，策略执行中
    /// 预期元素缺失返回 MissingElement，两者都可恢复
    pub async fn solve(&self, challenge: &Challenge) -> AppResult<()> {
        let kind = ChallengeKind::parse(&challenge.challenge_type).ok_or_else(|| {
            EngineError::UnsupportedChallengeType {
                challenge_type: challenge.challenge_type.clone(),
            }
        })?;

        debug!("题型: {:?} 🎯", kind);

        match kind {
            ChallengeKind::Translate => self.solve_translate(challenge).await,
            ChallengeKind::Listen => self.solve_listen(challenge).await,
            ChallengeKind::Name => self.solve_name(challenge).await,
            ChallengeKind::ListenComplete | ChallengeKind::CompleteReverseTranslation => {
                self.solve_blank_tokens(challenge).await
            }
            ChallengeKind::PartialReverseTranslate => self.solve_partial_reverse(challenge).await,
            ChallengeKind::ListenTap => self.solve_word_bank(challenge).await,
            ChallengeKind::Assist | ChallengeKind::Form => self.solve_choice(challenge).await,
            ChallengeKind::ListenMatch => self.solve_listen_match(challenge).await,
        }
    }

    /// translate：有翻译输入框就逐字输入第一个正确答案，否则按词库处理
    async fn solve_translate(&self, challenge: &Challenge) -> AppResult<()> {
        if self
            .driver
            .element_exists(selectors::CHALLENGE_TRANSLATE_INPUT)
            .await?
        {
            debug!("翻译题形态: 输入");
            let solution = first_solution(challenge)?;
            typer::type_into(
                self.driver,
                TypeTarget::Input(selectors::CHALLENGE_TRANSLATE_INPUT),
                solution,
                self.settings,
            )
            .await
        } else {
            debug!("翻译题形态: 词库");
            self.solve_word_bank(challenge).await
        }
    }

    /// listen：把听到的原文输入到翻译输入框
    async fn solve_listen(&self, challenge: &Challenge) -> AppResult<()> {
        let prompt = challenge
            .prompt
            .as_deref()
            .ok_or(EngineError::MissingChallengeField { field: "prompt" })?;
        typer::type_into(
            self.driver,
            TypeTarget::Input(selectors::CHALLENGE_TRANSLATE_INPUT),
            prompt,
            self.settings,
        )
        .await
    }

    /// name：第一个正确答案输入到普通文本框
    async fn solve_name(&self, challenge: &Challenge) -> AppResult<()> {
        let solution = first_solution(challenge)?;
        typer::type_into(
            self.driver,
            TypeTarget::Input(selectors::CHALLENGE_TEXT_INPUT),
            solution,
            self.settings,
        )
        .await
    }

    /// 填空题：把所有标记为空白的词拼起来输入到文本框
    async fn solve_blank_tokens(&self, challenge: &Challenge) -> AppResult<()> {
        let words = blank_tokens_text(&challenge.display_tokens);
        if words.is_empty() {
            return Err(EngineError::MissingChallengeField {
                field: "displayTokens",
            }
            .into());
        }
        typer::type_into(
            self.driver,
            TypeTarget::Input(selectors::CHALLENGE_TEXT_INPUT),
            &words,
            self.settings,
        )
        .await
    }

    /// partialReverseTranslate：同样的空白词拼接，目标是 contenteditable
    async fn solve_partial_reverse(&self, challenge: &Challenge) -> AppResult<()> {
        let words = blank_tokens_text(&challenge.display_tokens);
        if words.is_empty() {
            return Err(EngineError::MissingChallengeField {
                field: "displayTokens",
            }
            .into());
        }
        typer::type_into(self.driver, TypeTarget::Editable, &words, self.settings).await
    }

    /// 词库点选：按正确顺序点击每个目标词
    ///
    /// 已消耗的选项从候选中移除，同一个词出现两次时不会点同一个按钮
    async fn solve_word_bank(&self, challenge: &Challenge) -> AppResult<()> {
        let tokens = self.driver.word_bank_tokens().await?.ok_or_else(|| {
            EngineError::MissingElement {
                selector: selectors::WORD_BANK.to_string(),
            }
        })?;
        let plan = plan_bank_clicks(&tokens, &challenge.correct_tokens);
        debug!("词库点击计划: {:?}", plan);
        for index in plan {
            if self.driver.click_bank_token(index).await? {
                timing::pause(self.settings, Pace::Choose).await;
            }
        }
        Ok(())
    }

    /// assist / form：点击 correct_index 指向的选项（存在时）
    async fn solve_choice(&self, challenge: &Challenge) -> AppResult<()> {
        let index = challenge
            .correct_index
            .ok_or(EngineError::MissingChallengeField {
                field: "correctIndex",
            })?;
        if self
            .driver
            .click_nth(selectors::CHALLENGE_CHOICE, index)
            .await?
        {
            timing::pause(self.settings, Pace::Choose).await;
        }
        Ok(())
    }

    /// listenMatch：为每一对生成 data-test 查找键并点击命中的元素
    ///
    /// 宿主标记对限定词的位置不一致，两种属性顺序都要查
    async fn solve_listen_match(&self, challenge: &Challenge) -> AppResult<()> {
        for pair in &challenge.pairs {
            for key in pair_tap_token_keys(&pair.translation) {
                let selector = format!("[data-test=\"{}\"]", key);
                let clicked = self.driver.click_all(&selector).await?;
                if clicked > 0 {
                    timing::pause(self.settings, Pace::Choose).await;
                }
            }
        }
        Ok(())
    }
}

// ========== 纯逻辑辅助函数 ==========

/// 取第一个正确答案
fn first_solution(challenge: &Challenge) -> AppResult<&str> {
    challenge
        .correct_solutions
        .first()
        .map(String::as_str)
        .ok_or_else(|| {
            EngineError::MissingChallengeField {
                field: "correctSolutions",
            }
            .into()
        })
}

/// 把标记为空白的词按顺序用空格拼接
pub(crate) fn blank_tokens_text(tokens: &[DisplayToken]) -> String {
    tokens
        .iter()
        .filter(|t| t.is_blank)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 计算词库点击计划
///
/// 按正确顺序逐个匹配可见文本；匹配过的选项从候选中移除，
/// 词库里找不到的词跳过
pub(crate) fn plan_bank_clicks(choices: &[String], correct_tokens: &[String]) -> Vec<usize> {
    let mut remaining: Vec<Option<&str>> = choices.iter().map(|c| Some(c.as_str())).collect();
    let mut plan = Vec::with_capacity(correct_tokens.len());
    for token in correct_tokens {
        if let Some(index) = remaining.iter().position(|c| *c == Some(token.as_str())) {
            remaining[index] = None;
            plan.push(index);
        }
    }
    plan
}

/// 为配对的译文生成 data-test 查找键
///
/// 多于一个词时第一个词作为限定词，其余部分用连字符相连
pub(crate) fn pair_tap_token_keys(translation: &str) -> Vec<String> {
    let parts: Vec<&str> = translation.split_whitespace().collect();
    match parts.as_slice() {
        [] => Vec::new(),
        [only] => vec![format!("{}-challenge-tap-token", only)],
        [prefix, rest @ ..] => {
            let joined = rest.join("-");
            vec![
                format!("{}-challenge-tap-token {}", joined, prefix),
                format!("{} {}-challenge-tap-token", prefix, joined),
            ]
        }
    }
}
