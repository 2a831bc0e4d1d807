//! 分词器
//!
//! 将规范化后的文本分割为：词、标点

use serde::{Deserialize, Serialize};

use crate::text::normalizer::normalize;
use crate::text::rules::PUNCTUATION;

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// 词（不含标点）
    Word,
    /// 单个标点字符
    Punctuation,
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// 在输出序列中的位置
    pub source_index: usize,
}

/// 分词器
pub struct Tokenizer;

impl Tokenizer {
    /// 分词
    ///
    /// 输入应为 `normalize` 的结果：按单个空格切分，再逐字符扫描，
    /// 遇到标点时先输出已缓冲的词，再把标点作为独立 token 输出
    pub fn tokenize(normalized: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for chunk in normalized.split(' ') {
            if chunk.is_empty() {
                continue;
            }

            let mut current = String::new();
            for ch in chunk.chars() {
                if PUNCTUATION.contains(ch) {
                    Self::flush(&mut tokens, &mut current);
                    Self::push(&mut tokens, ch.to_string(), TokenKind::Punctuation);
                } else {
                    current.push(ch);
                }
            }
            Self::flush(&mut tokens, &mut current);
        }

        tokens
    }

    /// 规范化后分词
    pub fn tokenize_text(raw: &str) -> Vec<Token> {
        Self::tokenize(&normalize(raw))
    }

    fn flush(tokens: &mut Vec<Token>, current: &mut String) {
        if !current.is_empty() {
            let text = std::mem::take(current);
            Self::push(tokens, text, TokenKind::Word);
        }
    }

    fn push(tokens: &mut Vec<Token>, text: String, kind: TokenKind) {
        let source_index = tokens.len();
        tokens.push(Token {
            text,
            kind,
            source_index,
        });
    }
}

/// 提取 token 文本序列
pub fn token_texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_sentence() {
        let tokens = Tokenizer::tokenize("החולה סובל מכאב ראש.");
        assert_eq!(
            token_texts(&tokens),
            vec!["החולה", "סובל", "מכאב", "ראש", "."]
        );
        assert_eq!(tokens[3].kind, TokenKind::Word);
        assert_eq!(tokens[4].kind, TokenKind::Punctuation);
        assert_eq!(tokens[4].source_index, 4);
    }

    #[test]
    fn test_tokenize_inner_punctuation() {
        let tokens = Tokenizer::tokenize("חום,לחץ?!");
        assert_eq!(token_texts(&tokens), vec!["חום", ",", "לחץ", "?", "!"]);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.source_index, i);
        }
    }

    #[test]
    fn test_tokenize_arabic_marks() {
        let tokens = Tokenizer::tokenize("א،ב؛");
        assert_eq!(token_texts(&tokens), vec!["א", "،", "ב", "؛"]);
        assert!(tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Punctuation)
            .all(|t| t.text.chars().count() == 1));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::tokenize("").is_empty());
        assert!(Tokenizer::tokenize_text("   ").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_hyphen_and_quotes_in_words() {
        let tokens = Tokenizer::tokenize("בי\"ח קו-מנחה");
        assert_eq!(token_texts(&tokens), vec!["בי\"ח", "קו-מנחה"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
    }

    #[test]
    fn test_tokenize_text_normalizes() {
        let tokens = Tokenizer::tokenize_text("  הַחוֹלֶה   סובל .");
        assert_eq!(token_texts(&tokens), vec!["החולה", "סובל", "."]);
    }

    #[test]
    fn test_tokenize_control_characters() {
        // 控制字符视为普通词字符
        let tokens = Tokenizer::tokenize("א\u{0007}ב.");
        assert_eq!(token_texts(&tokens), vec!["א\u{0007}ב", "."]);
    }
}
