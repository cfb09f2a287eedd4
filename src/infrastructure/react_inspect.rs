//! React 内部结构探测 - 基础设施层
//!
//! 通过 `__reactFiber$` 前缀键访问宿主页面 React 组件的内部数据。
//! 这是整个系统中唯一与宿主框架版本耦合的部分：Duolingo 升级 React
//! 或调整组件层级时，只需要修改这里的片段。
//!
//! 所有片段都在 JS 侧 try/catch，结构不符合预期时返回 null/false
//! 而不是抛异常，"读不到"对引擎来说是正常状态。

use crate::engine::selectors;

/// 把 Rust 字符串编码为 JS 字符串字面量
pub(crate) fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// 生成读取当前题目状态的 JS 片段
///
/// 从课程播放器锚点出发，沿 fiber 树上行两层到持有题目 props
/// 的组件实例，取出当前题目和已答对题目列表的可序列化子集。
/// 结果包在 `{ state: ... }` 信封里：CDP 对裸 null 返回值
/// 不携带 value 字段，没有题目时 state 为 null
pub fn challenge_state_js() -> String {
    format!(
        r#"(() => {{
    try {{
        const anchor = document.querySelector({anchor});
        if (!anchor) return {{ state: null }};
        const key = Object.keys(anchor).find((k) => k.startsWith("__reactFiber$"));
        if (!key) return {{ state: null }};
        const props = anchor[key].return.return.stateNode.props;
        const challenge = props.currentChallenge;
        if (!challenge || !challenge.id) return {{ state: null }};
        return {{ state: JSON.parse(JSON.stringify({{
            currentChallenge: {{
                id: challenge.id,
                type: challenge.type,
                prompt: challenge.prompt ?? null,
                correctSolutions: challenge.correctSolutions ?? [],
                correctTokens: challenge.correctTokens ?? [],
                displayTokens: (challenge.displayTokens ?? []).map((t) => ({{
                    text: t.text ?? "",
                    isBlank: !!t.isBlank,
                }})),
                pairs: (challenge.pairs ?? []).map((p) => ({{
                    translation: p.translation ?? "",
                }})),
                correctIndex: challenge.correctIndex ?? null,
            }},
            correctChallenges: (props.correctChallenges ?? []).map((c) => ({{ id: c.id }})),
        }})) }};
    }} catch (e) {{
        return {{ state: null }};
    }}
}})()"#,
        anchor = js_str(selectors::LESSON_ROOT),
    )
}

/// 生成"定位输入框的 React onChange 回调并以新值调用"的 JS 片段
///
/// 元素或回调不存在时返回 false
pub fn dispatch_change_js(selector: &str, value: &str) -> String {
    format!(
        r#"(() => {{
    try {{
        const input = document.querySelector({selector});
        if (!input) return false;
        const key = Object.keys(input).find((k) => k.startsWith("__reactFiber$"));
        if (!key) return false;
        const fiber = input[key];
        const onChange = fiber && fiber.pendingProps && fiber.pendingProps.onChange;
        if (typeof onChange !== "function") return false;
        onChange({{ target: {{ value: {value} }} }});
        return true;
    }} catch (e) {{
        return false;
    }}
}})()"#,
        selector = js_str(selector),
        value = js_str(value),
    )
}

/// 生成"向 contenteditable 目标写入文本并派发 input 事件"的 JS 片段
///
/// contenteditable 的 span 没有 onChange 回调，只能直接改文本
/// 再派发冒泡的 input 事件触发宿主逻辑；写入后把光标移到末尾
pub fn set_editable_text_js(value: &str) -> String {
    format!(
        r#"(() => {{
    try {{
        const input = document.querySelector({selector});
        if (!input) return false;
        input.innerText = {value};
        input.dispatchEvent(new InputEvent("input", {{ bubbles: true }}));
        const selection = window.getSelection();
        if (selection) {{
            const range = document.createRange();
            range.selectNodeContents(input);
            range.collapse(false);
            selection.removeAllRanges();
            selection.addRange(range);
        }}
        return true;
    }} catch (e) {{
        return false;
    }}
}})()"#,
        selector = js_str(selectors::CONTENT_EDITABLE),
        value = js_str(value),
    )
}
