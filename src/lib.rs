// 句子校验与对齐引擎
//
// 学习者输入 vs 参考句：规范化 → 分词 → 对齐 / 字符校验 / 词级评分
// 引擎本身不做 I/O；仅配置与同义词表加载会读文件

pub mod config;
pub mod text;
pub mod validation;

pub use config::EngineConfig;
pub use text::{
    are_similar_words, compare_sentences, comparison_normalize, levenshtein_distance, normalize,
    SimilarityOracle, SynonymTable, Token, TokenKind, Tokenizer,
};
pub use validation::{
    evaluate_translation, highlight_differences, score_words, validate_chars, AlignmentEngine,
    AlignmentMode, CharStatus, CharacterValidation, DiffHighlight, ErrorKind, SentenceDefinition,
    TokenError, TranslationFeedback, ValidationEngine, ValidationResult, ValidationRules,
    WordScore, WordStatus, WordValidation,
};
