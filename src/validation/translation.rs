//! 翻译练习综合反馈
//!
//! 一次调用同时给出字符级、词级结果以及完成度

use crate::text::synonyms::SynonymTable;
use crate::validation::characters::{character_accuracy, validate_chars};
use crate::validation::types::TranslationFeedback;
use crate::validation::words::WordScorer;

/// 默认完成度阈值（输入长度达到参考长度的百分比）
pub const DEFAULT_COMPLETION_RATIO_PERCENT: usize = 80;

/// 生成综合反馈（默认评分器与完成度阈值）
pub fn evaluate_translation(
    input: &str,
    expected: &str,
    synonyms: &SynonymTable,
) -> TranslationFeedback {
    evaluate_translation_with(
        input,
        expected,
        synonyms,
        &WordScorer::default(),
        DEFAULT_COMPLETION_RATIO_PERCENT,
    )
}

/// 生成综合反馈，评分器与完成度阈值由调用方指定
pub fn evaluate_translation_with(
    input: &str,
    expected: &str,
    synonyms: &SynonymTable,
    scorer: &WordScorer,
    completion_ratio_percent: usize,
) -> TranslationFeedback {
    let character_validations = validate_chars(input, expected);
    let accuracy = character_accuracy(&character_validations, expected);
    let word_score = scorer.score(input, expected, synonyms);

    TranslationFeedback {
        character_validations,
        word_validations: word_score.word_validations,
        accuracy,
        word_accuracy: word_score.word_accuracy,
        is_complete: is_complete(input, expected, completion_ratio_percent),
        missing_keywords: word_score.missing_keywords,
    }
}

/// 去除首尾空白后，输入字符数 ≥ 参考字符数 × 比例
fn is_complete(input: &str, expected: &str, ratio_percent: usize) -> bool {
    let typed = input.trim().chars().count();
    let target = expected.trim().chars().count();
    typed * 100 >= target * ratio_percent
}
