//! 校验引擎
//!
//! 组合对齐、字符校验、词级评分；可复用，构建一次后可跨线程共享

use std::sync::Arc;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::text::fuzzy::SimilarityOracle;
use crate::text::synonyms::SynonymTable;
use crate::validation::alignment::{highlight_differences, AlignmentEngine};
use crate::validation::characters::{character_accuracy, validate_chars};
use crate::validation::translation::evaluate_translation_with;
use crate::validation::types::{
    CharacterValidation, DiffHighlight, SentenceDefinition, TranslationFeedback, ValidationResult,
    WordScore,
};
use crate::validation::words::WordScorer;

/// 校验引擎（可复用，预编译配置）
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: EngineConfig,
    synonyms: Arc<SynonymTable>,
    aligner: AlignmentEngine,
    scorer: WordScorer,
}

impl ValidationEngine {
    /// 创建校验引擎
    ///
    /// # Arguments
    /// * `config` - 引擎配置
    /// * `synonyms` - 注入的只读同义词表
    pub fn new(config: EngineConfig, synonyms: Arc<SynonymTable>) -> Self {
        let oracle = SimilarityOracle::new(config.max_spelling_distance);
        let aligner = AlignmentEngine::new(config.alignment_mode, oracle);
        let scorer = WordScorer::new(config.keyword_min_chars);

        Self {
            config,
            synonyms,
            aligner,
            scorer,
        }
    }

    /// 按配置创建；配置了同义词文件时从文件加载，否则使用内置表
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let synonyms = match &config.synonyms_path {
            Some(path) => Arc::new(SynonymTable::load(path)?),
            None => SynonymTable::builtin(),
        };
        Ok(Self::new(config, synonyms))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// 句子对齐校验
    pub fn validate(&self, input: &str, definition: &SentenceDefinition) -> ValidationResult {
        self.aligner.validate(input, definition)
    }

    /// 以配置中的默认规则校验参考句
    pub fn validate_text(&self, input: &str, expected: &str) -> ValidationResult {
        let definition = SentenceDefinition::from_text(expected, self.config.default_rules);
        self.aligner.validate(input, &definition)
    }

    pub fn validate_chars(&self, input: &str, expected: &str) -> Vec<CharacterValidation> {
        validate_chars(input, expected)
    }

    pub fn character_accuracy(&self, input: &str, expected: &str) -> u32 {
        character_accuracy(&validate_chars(input, expected), expected)
    }

    pub fn score_words(&self, input: &str, expected: &str) -> WordScore {
        self.scorer.score(input, expected, &self.synonyms)
    }

    pub fn evaluate_translation(&self, input: &str, expected: &str) -> TranslationFeedback {
        evaluate_translation_with(
            input,
            expected,
            &self.synonyms,
            &self.scorer,
            self.config.completion_ratio_percent,
        )
    }

    pub fn highlight_differences(&self, input: &str, expected: &str) -> DiffHighlight {
        highlight_differences(input, expected)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), SynonymTable::builtin())
    }
}
