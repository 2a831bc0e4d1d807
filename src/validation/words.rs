//! 词级评分
//!
//! 贪心匹配：每个输入词依次在未消耗的参考词中找精确匹配，其次找同义词

use crate::text::normalizer::comparison_normalize;
use crate::text::rules::is_word_separator;
use crate::text::synonyms::SynonymTable;
use crate::validation::text_digest;
use crate::validation::types::{percentage, WordScore, WordStatus, WordValidation};

/// 默认关键词最小长度（字符数，需"大于 2"）
pub const DEFAULT_KEYWORD_MIN_CHARS: usize = 3;

/// 按空白 / 标点 / 连字符切词，丢弃空串
pub fn extract_words(sentence: &str) -> Vec<String> {
    sentence
        .split(is_word_separator)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// 词级评分器
#[derive(Debug, Clone, Copy)]
pub struct WordScorer {
    keyword_min_chars: usize,
}

impl WordScorer {
    pub fn new(keyword_min_chars: usize) -> Self {
        Self { keyword_min_chars }
    }

    pub fn score(&self, input: &str, expected: &str, synonyms: &SynonymTable) -> WordScore {
        let user_words = extract_words(input);
        let expected_words = extract_words(expected);
        let expected_normalized: Vec<String> = expected_words
            .iter()
            .map(|w| comparison_normalize(w))
            .collect();

        // 未消耗的参考词下标（升序）
        let mut pool: Vec<usize> = (0..expected_words.len()).collect();

        let word_validations: Vec<WordValidation> = user_words
            .into_iter()
            .map(|word| {
                let normalized = comparison_normalize(&word);

                let exact = pool
                    .iter()
                    .position(|&idx| expected_normalized[idx] == normalized);
                if let Some(slot) = exact {
                    let idx = pool.remove(slot);
                    return WordValidation {
                        word,
                        status: WordStatus::Correct,
                        matched_with: Some(expected_words[idx].clone()),
                    };
                }

                let synonym = pool
                    .iter()
                    .position(|&idx| synonyms.are_synonyms(&word, &expected_words[idx]));
                if let Some(slot) = synonym {
                    let idx = pool.remove(slot);
                    return WordValidation {
                        word,
                        status: WordStatus::Synonym,
                        matched_with: Some(expected_words[idx].clone()),
                    };
                }

                WordValidation {
                    word,
                    status: WordStatus::Incorrect,
                    matched_with: None,
                }
            })
            .collect();

        let missing_keywords: Vec<String> = pool
            .iter()
            .map(|&idx| &expected_words[idx])
            .filter(|w| w.chars().count() >= self.keyword_min_chars)
            .cloned()
            .collect();

        let matched = word_validations
            .iter()
            .filter(|v| match v.status {
                WordStatus::Correct | WordStatus::Synonym => true,
                WordStatus::Incorrect => false,
            })
            .count();
        let word_accuracy = percentage(matched, expected_words.len());

        tracing::debug!(
            "score_words: input_digest={}, matched={}/{}, missing_keywords={}",
            text_digest(input),
            matched,
            expected_words.len(),
            missing_keywords.len()
        );

        WordScore {
            word_validations,
            missing_keywords,
            word_accuracy,
        }
    }
}

impl Default for WordScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_MIN_CHARS)
    }
}

/// 默认参数下的词级评分
pub fn score_words(input: &str, expected: &str, synonyms: &SynonymTable) -> WordScore {
    WordScorer::default().score(input, expected, synonyms)
}
