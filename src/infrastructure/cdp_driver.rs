//! CDP DOM 驱动 - 基础设施层
//!
//! `DomDriver` 的生产实现：把引擎需要的每个 DOM 能力
//! 翻译成在宿主页面里执行的 JS 片段

use async_trait::async_trait;
use serde::Deserialize;

use crate::engine::challenge::ChallengeState;
use crate::engine::driver::DomDriver;
use crate::engine::selectors;
use crate::error::AppResult;
use crate::infrastructure::js_executor::JsExecutor;
use crate::infrastructure::react_inspect::{self, js_str};

/// 题目状态的信封，见 `react_inspect::challenge_state_js`
#[derive(Debug, Deserialize)]
struct StateEnvelope {
    state: Option<ChallengeState>,
}

/// 词库文本的信封
#[derive(Debug, Deserialize)]
struct TokensEnvelope {
    tokens: Option<Vec<String>>,
}

/// 页面完全静止时变动等待的兜底超时（毫秒），防止 eval 永久挂起
const MUTATION_FALLBACK_MS: u64 = 10_000;

/// 基于 CDP 的 DOM 驱动
pub struct CdpDomDriver {
    executor: JsExecutor,
}

impl CdpDomDriver {
    /// 创建新的 CDP DOM 驱动
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl DomDriver for CdpDomDriver {
    async fn element_exists(&self, selector: &str) -> AppResult<bool> {
        let js = format!(
            "document.querySelector({}) !== null",
            js_str(selector)
        );
        self.executor.eval_as(js).await
    }

    async fn read_challenge_state(&self) -> AppResult<Option<ChallengeState>> {
        let envelope: StateEnvelope = self
            .executor
            .eval_as(react_inspect::challenge_state_js())
            .await?;
        Ok(envelope.state)
    }

    async fn dispatch_change(&self, selector: &str, value: &str) -> AppResult<bool> {
        self.executor
            .eval_as(react_inspect::dispatch_change_js(selector, value))
            .await
    }

    async fn set_editable_text(&self, value: &str) -> AppResult<bool> {
        self.executor
            .eval_as(react_inspect::set_editable_text_js(value))
            .await
    }

    async fn word_bank_tokens(&self) -> AppResult<Option<Vec<String>>> {
        let js = format!(
            r#"(() => {{
    const bank = document.querySelector({bank});
    if (!bank) return {{ tokens: null }};
    return {{ tokens: Array.from(bank.children).map((choice) => {{
        const text = choice.querySelector({token_text});
        return text ? text.innerText : "";
    }}) }};
}})()"#,
            bank = js_str(selectors::WORD_BANK),
            token_text = js_str(selectors::TAP_TOKEN_TEXT),
        );
        let envelope: TokensEnvelope = self.executor.eval_as(js).await?;
        Ok(envelope.tokens)
    }

    async fn click_bank_token(&self, index: usize) -> AppResult<bool> {
        let js = format!(
            r#"(() => {{
    const bank = document.querySelector({bank});
    if (!bank) return false;
    const choice = Array.from(bank.children)[{index}];
    if (!choice) return false;
    const text = choice.querySelector({token_text});
    if (!text) return false;
    text.click();
    return true;
}})()"#,
            bank = js_str(selectors::WORD_BANK),
            token_text = js_str(selectors::TAP_TOKEN_TEXT),
            index = index,
        );
        self.executor.eval_as(js).await
    }

    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<bool> {
        let js = format!(
            r#"(() => {{
    const list = document.querySelectorAll({selector});
    if (!list[{index}]) return false;
    list[{index}].click();
    return true;
}})()"#,
            selector = js_str(selector),
            index = index,
        );
        self.executor.eval_as(js).await
    }

    async fn click_all(&self, selector: &str) -> AppResult<usize> {
        let js = format!(
            r#"(() => {{
    const list = Array.from(document.querySelectorAll({selector}));
    for (const element of list) {{
        element.click();
    }}
    return list.length;
}})()"#,
            selector = js_str(selector),
        );
        self.executor.eval_as(js).await
    }

    async fn click_continue(&self) -> AppResult<bool> {
        let js = format!(
            r#"(() => {{
    const button = document.querySelector({selector});
    if (!button) return false;
    button.click();
    return true;
}})()"#,
            selector = js_str(selectors::PLAYER_NEXT),
        );
        self.executor.eval_as(js).await
    }

    async fn wait_for_mutation(&self) -> AppResult<()> {
        let js = format!(
            r#"new Promise((resolve) => {{
    const observer = new MutationObserver(() => {{
        observer.disconnect();
        resolve(true);
    }});
    observer.observe(document.body, {{ childList: true, subtree: true }});
    setTimeout(() => {{
        observer.disconnect();
        resolve(false);
    }}, {timeout});
}})"#,
            timeout = MUTATION_FALLBACK_MS,
        );
        // 超时返回 false 也算一次"变动"：调用方会重新探测再决定是否继续等
        let _: bool = self.executor.eval_as(js).await?;
        Ok(())
    }
}
