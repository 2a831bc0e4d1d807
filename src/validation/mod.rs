//! 校验层 - 对齐、字符校验、词级评分
//!
//! 架构：
//! - types: 结果类型与规则
//! - alignment: token 对齐（贪心 / 严格 DP）
//! - characters: 字符级逐位校验
//! - words: 词级贪心匹配与同义词
//! - translation: 翻译练习综合反馈
//! - engine: 组合以上组件的可复用引擎

pub mod alignment;
pub mod characters;
pub mod engine;
pub mod translation;
pub mod types;
pub mod words;

pub use alignment::{highlight_differences, AlignmentEngine};
pub use characters::{character_accuracy, pending_tail, validate_chars};
pub use engine::ValidationEngine;
pub use translation::{evaluate_translation, evaluate_translation_with};
pub use types::*;
pub use words::{extract_words, score_words, WordScorer};

/// 学习者文本摘要（日志中不记录原文，仅保留 hash 前 8 位）
pub(crate) fn text_digest(text: &str) -> String {
    let digest = format!("{:x}", md5::compute(text));
    digest[..8].to_string()
}
