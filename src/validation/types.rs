//! 校验类型定义

use serde::{Deserialize, Serialize};

use crate::text::tokenizer::{token_texts, Tokenizer};

/// 校验规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// 是否容忍拼写错误（编辑距离阈值内记为 SpellingError，而非错词）
    pub allow_spelling_errors: bool,
    /// 是否要求词序完全一致
    pub exact_order_required: bool,
    /// 是否要求标点
    pub punctuation_required: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            allow_spelling_errors: false,
            exact_order_required: true,
            punctuation_required: true,
        }
    }
}

/// 句子定义：参考句 + 预分词结果 + 规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceDefinition {
    pub expected: String,
    pub tokens: Vec<String>,
    #[serde(default)]
    pub rules: ValidationRules,
}

impl SentenceDefinition {
    pub fn new(expected: impl Into<String>, tokens: Vec<String>, rules: ValidationRules) -> Self {
        Self {
            expected: expected.into(),
            tokens,
            rules,
        }
    }

    /// 由参考句自动分词构建
    pub fn from_text(expected: impl Into<String>, rules: ValidationRules) -> Self {
        let expected = expected.into();
        let tokens = token_texts(&Tokenizer::tokenize_text(&expected));
        Self {
            expected,
            tokens,
            rules,
        }
    }
}

/// 错误类型（封闭集合，消费方必须穷尽匹配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingWord,
    ExtraWord,
    WrongOrder,
    SpellingError,
    MissingPunctuation,
}

/// Token 级错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenError {
    pub kind: ErrorKind,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    pub message: String,
}

impl TokenError {
    pub fn new(
        kind: ErrorKind,
        position: usize,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        let message = describe(kind, expected.as_deref(), actual.as_deref());
        Self {
            kind,
            position,
            expected,
            actual,
            message,
        }
    }
}

/// 面向学习者的错误描述
fn describe(kind: ErrorKind, expected: Option<&str>, actual: Option<&str>) -> String {
    let actual = actual.unwrap_or_default();
    match (kind, expected) {
        (ErrorKind::MissingWord, Some(expected)) => format!("מילה חסרה: \"{expected}\""),
        (ErrorKind::MissingWord, None) => "לא הוקלד טקסט".to_string(),
        (ErrorKind::ExtraWord, Some(expected)) => {
            format!("מילה לא צפויה: \"{actual}\" (צפוי: \"{expected}\")")
        }
        (ErrorKind::ExtraWord, None) => format!("מילה מיותרת: \"{actual}\""),
        (ErrorKind::WrongOrder, _) => format!("סדר מילים שגוי: \"{actual}\" אינה במקומה"),
        (ErrorKind::SpellingError, expected) => {
            format!("שגיאת כתיב: \"{actual}\" במקום \"{}\"", expected.unwrap_or_default())
        }
        (ErrorKind::MissingPunctuation, expected) => {
            format!("חסר סימן פיסוק: \"{}\"", expected.unwrap_or_default())
        }
    }
}

/// 句子校验结果
///
/// 反序列化时忽略传入的 `isCorrect`，按错误列表重新推导
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ValidationResultData")]
pub struct ValidationResult {
    /// 恒等于 `errors.is_empty()`
    is_correct: bool,
    pub errors: Vec<TokenError>,
    pub normalized_input: String,
    pub normalized_expected: String,
}

impl ValidationResult {
    pub fn new(errors: Vec<TokenError>, normalized_input: String, normalized_expected: String) -> Self {
        Self {
            is_correct: errors.is_empty(),
            errors,
            normalized_input,
            normalized_expected,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// 指定类型的错误数
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResultData {
    errors: Vec<TokenError>,
    normalized_input: String,
    normalized_expected: String,
}

impl From<ValidationResultData> for ValidationResult {
    fn from(data: ValidationResultData) -> Self {
        Self::new(data.errors, data.normalized_input, data.normalized_expected)
    }
}

/// 对齐模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// 贪心双指针扫描（默认，兼容既有结果）
    #[default]
    Greedy,
    /// 完整动态规划对齐（含路径回溯）
    Strict,
}

/// 字符状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharStatus {
    Correct,
    Incorrect,
    Extra,
}

/// 字符级校验条目（仅覆盖输入字符）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterValidation {
    pub char: char,
    pub status: CharStatus,
    pub index: usize,
}

/// 词状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Correct,
    Synonym,
    Incorrect,
}

/// 词级校验条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordValidation {
    pub word: String,
    pub status: WordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_with: Option<String>,
}

/// 词级评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordScore {
    pub word_validations: Vec<WordValidation>,
    pub missing_keywords: Vec<String>,
    /// 0-100
    pub word_accuracy: u32,
}

/// 翻译练习综合反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationFeedback {
    pub character_validations: Vec<CharacterValidation>,
    pub word_validations: Vec<WordValidation>,
    /// 字符准确率 0-100
    pub accuracy: u32,
    /// 词准确率 0-100
    pub word_accuracy: u32,
    pub is_complete: bool,
    pub missing_keywords: Vec<String>,
}

/// 高亮片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSegment {
    pub text: String,
    pub matched: bool,
}

/// 逐位置 token 对比高亮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffHighlight {
    pub input: Vec<HighlightSegment>,
    pub expected: Vec<HighlightSegment>,
}

/// 百分比（四舍五入，分母为 0 时返回 0）
pub fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((200 * numerator + denominator) / (2 * denominator)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(3, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 向上取整
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn test_validation_result_invariant() {
        let ok = ValidationResult::new(Vec::new(), "a".into(), "a".into());
        assert!(ok.is_correct());

        let err = TokenError::new(ErrorKind::MissingWord, 0, None, None);
        let bad = ValidationResult::new(vec![err], String::new(), "a".into());
        assert!(!bad.is_correct());
        assert_eq!(bad.count(ErrorKind::MissingWord), 1);
        assert_eq!(bad.count(ErrorKind::ExtraWord), 0);
    }

    #[test]
    fn test_deserialized_result_rederives_flag() {
        let json = serde_json::to_string(&ValidationResult::new(
            vec![TokenError::new(ErrorKind::ExtraWord, 1, None, Some("ב".into()))],
            "א ב".into(),
            "א".into(),
        ))
        .unwrap();
        assert!(json.contains("\"isCorrect\":false"));

        // 伪造的 isCorrect 不生效
        let forged = json.replace("\"isCorrect\":false", "\"isCorrect\":true");
        let parsed: ValidationResult = serde_json::from_str(&forged).unwrap();
        assert!(!parsed.is_correct());
        assert_eq!(parsed.errors.len(), 1);

        let empty: ValidationResult = serde_json::from_str(
            r#"{"isCorrect":false,"errors":[],"normalizedInput":"א","normalizedExpected":"א"}"#,
        )
        .unwrap();
        assert!(empty.is_correct());
    }

    #[test]
    fn test_messages_cover_every_kind() {
        let kinds = [
            ErrorKind::MissingWord,
            ErrorKind::ExtraWord,
            ErrorKind::WrongOrder,
            ErrorKind::SpellingError,
            ErrorKind::MissingPunctuation,
        ];
        for kind in kinds {
            let err = TokenError::new(kind, 1, Some("א".into()), Some("ב".into()));
            assert!(!err.message.is_empty());
        }
        let spelling = TokenError::new(
            ErrorKind::SpellingError,
            0,
            Some("סובל".into()),
            Some("סבל".into()),
        );
        assert!(spelling.message.contains("סבל"));
        assert!(spelling.message.contains("סובל"));
    }

    #[test]
    fn test_serde_shape() {
        let result = ValidationResult::new(
            vec![TokenError::new(
                ErrorKind::MissingPunctuation,
                4,
                Some(".".into()),
                None,
            )],
            "a".into(),
            "a.".into(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isCorrect"], false);
        assert_eq!(json["normalizedExpected"], "a.");
        assert_eq!(json["errors"][0]["kind"], "missing_punctuation");
        assert!(json["errors"][0].get("actual").is_none());
    }

    #[test]
    fn test_rules_default_from_partial_json() {
        let rules: ValidationRules = serde_json::from_str(r#"{"allowSpellingErrors": true}"#).unwrap();
        assert!(rules.allow_spelling_errors);
        assert!(rules.exact_order_required);
        assert!(rules.punctuation_required);
    }

    #[test]
    fn test_definition_from_text() {
        let def = SentenceDefinition::from_text("החולה סובל.", ValidationRules::default());
        assert_eq!(def.tokens, vec!["החולה", "סובל", "."]);
    }
}
