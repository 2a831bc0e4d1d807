//! 文本层 - 规范化、分词、相似度
//!
//! ## 处理流程
//! 1. 去 niqqud + Unicode 归一化 + 空白折叠
//! 2. 分词（词/标点）
//! 3. 相似度判定（编辑距离 / 同义词表）

pub mod fuzzy;
pub mod normalizer;
pub mod rules;
pub mod synonyms;
pub mod tokenizer;

pub use fuzzy::{are_similar_words, levenshtein_distance, SimilarityOracle};
pub use normalizer::{comparison_normalize, compare_sentences, normalize};
pub use synonyms::SynonymTable;
pub use tokenizer::{Token, TokenKind, Tokenizer};
