//! 题目数据模型
//!
//! 所有数据都来自宿主页面，引擎只读；每轮推进读取一次，
//! 读到之后页面随时可能异步变化，不能当作最新状态长期使用

use serde::Deserialize;

/// 从宿主页面读取的题目状态快照
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    /// 当前显示的题目
    pub current_challenge: Challenge,
    /// 本课程中已答对的题目记录
    #[serde(default)]
    pub correct_challenges: Vec<CompletedChallenge>,
}

impl ChallengeState {
    /// 判断指定 id 的题目是否已经答对过
    pub fn is_completed(&self, id: &str) -> bool {
        self.correct_challenges.iter().any(|c| c.id == id)
    }
}

/// 单个题目的数据快照
///
/// 只有与当前题型相关的字段会被填充
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// 题目实例的稳定标识
    pub id: String,
    /// 题型标签，决定使用哪个解题策略
    #[serde(rename = "type")]
    pub challenge_type: String,
    /// 听力题的原文
    #[serde(default)]
    pub prompt: Option<String>,
    /// 正确答案列表
    #[serde(default)]
    pub correct_solutions: Vec<String>,
    /// 词库题按顺序要点的词
    #[serde(default)]
    pub correct_tokens: Vec<String>,
    /// 句子中的词，填空题用 is_blank 标记要补全的部分
    #[serde(default)]
    pub display_tokens: Vec<DisplayToken>,
    /// 配对题的词对
    #[serde(default)]
    pub pairs: Vec<MatchPair>,
    /// 选择题的正确选项下标
    #[serde(default)]
    pub correct_index: Option<usize>,
}

/// 已答对题目的记录
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedChallenge {
    pub id: String,
}

/// 句子中的一个词
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayToken {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_blank: bool,
}

/// 配对题中的一对
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPair {
    #[serde(default)]
    pub translation: String,
}

/// 已注册解题策略的题型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    Translate,
    Listen,
    Name,
    ListenComplete,
    CompleteReverseTranslation,
    PartialReverseTranslate,
    ListenTap,
    Assist,
    ListenMatch,
    Form,
}

impl ChallengeKind {
    /// 解析题型标签
    ///
    /// 未注册的题型返回 None，由调用方转成"不支持的题型"条件
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "translate" => Some(Self::Translate),
            "listen" => Some(Self::Listen),
            "name" => Some(Self::Name),
            "listenComplete" => Some(Self::ListenComplete),
            "completeReverseTranslation" => Some(Self::CompleteReverseTranslation),
            "partialReverseTranslate" => Some(Self::PartialReverseTranslate),
            "listenTap" => Some(Self::ListenTap),
            "assist" => Some(Self::Assist),
            "listenMatch" => Some(Self::ListenMatch),
            "form" => Some(Self::Form),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(ChallengeKind::parse("translate"), Some(ChallengeKind::Translate));
        assert_eq!(ChallengeKind::parse("listenMatch"), Some(ChallengeKind::ListenMatch));
        assert_eq!(
            ChallengeKind::parse("completeReverseTranslation"),
            Some(ChallengeKind::CompleteReverseTranslation)
        );
    }

    #[test]
    fn test_parse_unknown_kind() {
        assert_eq!(ChallengeKind::parse("speak"), None);
        assert_eq!(ChallengeKind::parse(""), None);
    }

    #[test]
    fn test_deserialize_page_payload() {
        let raw = r#"{
            "currentChallenge": {
                "id": "ch-1",
                "type": "translate",
                "prompt": null,
                "correctSolutions": ["bonjour"],
                "correctTokens": [],
                "displayTokens": [
                    { "text": "le", "isBlank": false },
                    { "text": "chat", "isBlank": true }
                ],
                "pairs": [],
                "correctIndex": null
            },
            "correctChallenges": [{ "id": "ch-0" }]
        }"#;
        let state: ChallengeState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.current_challenge.id, "ch-1");
        assert_eq!(state.current_challenge.correct_solutions, vec!["bonjour"]);
        assert!(state.current_challenge.display_tokens[1].is_blank);
        assert!(state.is_completed("ch-0"));
        assert!(!state.is_completed("ch-1"));
    }
}
