//! 拼写相似度判定
//!
//! 基于编辑距离判断两个词是否为"拼写错误"级别的近似

use strsim::levenshtein;

use crate::text::normalizer::comparison_normalize;

/// 默认拼写容错阈值（编辑距离）
pub const DEFAULT_MAX_SPELLING_DISTANCE: usize = 2;

/// Levenshtein 距离（插入/删除/替换代价均为 1，按 Unicode 标量计）
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// 默认阈值下的相似判定
pub fn are_similar_words(a: &str, b: &str) -> bool {
    SimilarityOracle::default().are_similar_words(a, b)
}

/// 相似度判定器
#[derive(Debug, Clone, Copy)]
pub struct SimilarityOracle {
    max_distance: usize,
}

impl SimilarityOracle {
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// 比较规范化后相同，或编辑距离不超过阈值
    pub fn are_similar_words(&self, a: &str, b: &str) -> bool {
        let a = comparison_normalize(a);
        let b = comparison_normalize(b);

        if a == b {
            return true;
        }

        // 长度差已超过阈值时距离必然超限
        let len_diff = a.chars().count().abs_diff(b.chars().count());
        if len_diff > self.max_distance {
            return false;
        }

        levenshtein_distance(&a, &b) <= self.max_distance
    }
}

impl Default for SimilarityOracle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SPELLING_DISTANCE)
    }
}
