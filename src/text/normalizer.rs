//! 文本规范化
//!
//! 两套策略，刻意分开命名：
//! - `normalize`：分词/对齐路径使用（去 niqqud + NFC + 空白折叠）
//! - `comparison_normalize`：字符校验、词级评分、相似度判定使用
//!   （在前者基础上折叠词尾字母并转小写）

use unicode_normalization::UnicodeNormalization;

use crate::text::rules::{is_hebrew_letter, is_niqqud, FINAL_LETTERS};

/// 规范化文本（分词策略）
///
/// 纯函数，不可失败；空串返回空串。先做规范分解再去除 niqqud，
/// 使预组合的表现形式（如 U+FB2A）同样被剥离，保证幂等。
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let composed: String = text.nfd().filter(|ch| !is_niqqud(*ch)).nfc().collect();
    collapse_whitespace(&composed)
}

/// 比较用规范化（比较策略）
pub fn comparison_normalize(text: &str) -> String {
    fold_final_letters(&normalize(text)).to_lowercase()
}

/// 规范化后是否完全相同
pub fn compare_sentences(input: &str, expected: &str) -> bool {
    normalize(input) == normalize(expected)
}

/// 去除 niqqud（不做其他处理）
pub fn strip_niqqud(text: &str) -> String {
    text.chars().filter(|ch| !is_niqqud(*ch)).collect()
}

/// 空白折叠：多个连续空白 -> 单个空格，并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_whitespace {
                result.push(' ');
                prev_whitespace = true;
            }
        } else {
            result.push(ch);
            prev_whitespace = false;
        }
    }

    result.trim().to_string()
}

/// 词尾字母折叠为常规形
pub fn fold_final_letters(text: &str) -> String {
    text.chars().map(|ch| FINAL_LETTERS.fold(ch)).collect()
}

pub fn is_final_letter(ch: char) -> bool {
    FINAL_LETTERS.is_final(ch)
}

/// 是否包含希伯来字母
pub fn is_hebrew_text(text: &str) -> bool {
    text.chars().any(is_hebrew_letter)
}
