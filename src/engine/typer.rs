//! 输入合成器
//!
//! 把目标文本按前缀逐步写入输入目标：第 k 步写入前 k 个字符，
//! 模拟宿主框架能识别的逐字输入

use crate::engine::driver::DomDriver;
use crate::engine::selectors;
use crate::engine::settings::EngineSettings;
use crate::engine::timing::{self, Pace};
use crate::error::{AppResult, EngineError};

/// 输入目标
#[derive(Debug, Clone, Copy)]
pub enum TypeTarget<'a> {
    /// 由 React 管理的文本输入框
    Input(&'a str),
    /// contenteditable 富文本目标
    Editable,
}

impl TypeTarget<'_> {
    fn selector(&self) -> &str {
        match *self {
            TypeTarget::Input(selector) => selector,
            TypeTarget::Editable => selectors::CONTENT_EDITABLE,
        }
    }
}

/// 把 text 逐字输入到目标中
///
/// 拟人模式下每步之间按输入节奏区间随机停顿。
/// 调用方需要先确认目标元素存在；中途元素消失按可恢复错误处理
pub async fn type_into<D: DomDriver + ?Sized>(
    driver: &D,
    target: TypeTarget<'_>,
    text: &str,
    settings: &EngineSettings,
) -> AppResult<()> {
    for prefix in char_prefixes(text) {
        let delivered = match target {
            TypeTarget::Input(selector) => driver.dispatch_change(selector, prefix).await?,
            TypeTarget::Editable => driver.set_editable_text(prefix).await?,
        };
        if !delivered {
            return Err(EngineError::MissingElement {
                selector: target.selector().to_string(),
            }
            .into());
        }
        timing::pause(settings, Pace::Type).await;
    }
    Ok(())
}

/// 按字符边界产生 text 的全部前缀（长度 1..=n）
fn char_prefixes(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .map(move |(i, c)| &text[..i + c.len_utf8()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_prefixes_ascii() {
        let prefixes: Vec<&str> = char_prefixes("bonjour").collect();
        assert_eq!(
            prefixes,
            vec!["b", "bo", "bon", "bonj", "bonjo", "bonjou", "bonjour"]
        );
    }

    #[test]
    fn test_char_prefixes_multibyte() {
        let prefixes: Vec<&str> = char_prefixes("héllo").collect();
        assert_eq!(prefixes, vec!["h", "hé", "hél", "héll", "héllo"]);
    }

    #[test]
    fn test_char_prefixes_empty() {
        assert_eq!(char_prefixes("").count(), 0);
    }
}
