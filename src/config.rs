// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::text::fuzzy::DEFAULT_MAX_SPELLING_DISTANCE;
use crate::validation::translation::DEFAULT_COMPLETION_RATIO_PERCENT;
use crate::validation::types::{AlignmentMode, ValidationRules};
use crate::validation::words::DEFAULT_KEYWORD_MIN_CHARS;

// ============================================================================
// 引擎配置
// ============================================================================

/// 校验引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 对齐模式（默认贪心）
    #[serde(default)]
    pub alignment_mode: AlignmentMode,
    /// 拼写容错阈值（编辑距离）
    #[serde(default = "default_max_spelling_distance")]
    pub max_spelling_distance: usize,
    /// 缺失关键词的最小字符数
    #[serde(default = "default_keyword_min_chars")]
    pub keyword_min_chars: usize,
    /// 完成度阈值（百分比，0-100）
    #[serde(default = "default_completion_ratio_percent")]
    pub completion_ratio_percent: usize,
    /// 外部同义词表（JSON），为空时使用内置表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms_path: Option<PathBuf>,
    /// 未显式给出规则时使用的默认规则
    #[serde(default)]
    pub default_rules: ValidationRules,
}

fn default_max_spelling_distance() -> usize {
    DEFAULT_MAX_SPELLING_DISTANCE
}

fn default_keyword_min_chars() -> usize {
    DEFAULT_KEYWORD_MIN_CHARS
}

fn default_completion_ratio_percent() -> usize {
    DEFAULT_COMPLETION_RATIO_PERCENT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alignment_mode: AlignmentMode::default(),
            max_spelling_distance: default_max_spelling_distance(),
            keyword_min_chars: default_keyword_min_chars(),
            completion_ratio_percent: default_completion_ratio_percent(),
            synonyms_path: None,
            default_rules: ValidationRules::default(),
        }
    }
}

impl EngineConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        Ok(config_dir.join("SentenceCheck").join("config.json"))
    }

    /// 从默认位置加载；文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// 从指定文件加载
    ///
    /// 整体解析失败时逐字段恢复，无法识别的字段回退到默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let v: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("配置文件不是有效的 JSON: {}", path.display()))?;

        let mut config: EngineConfig = match serde_json::from_value(v.clone()) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("直接解析配置失败，尝试逐字段恢复: {}", e);
                Self::recover_fields(&v)
            }
        };

        config.sanitize();
        Ok(config)
    }

    fn recover_fields(v: &serde_json::Value) -> Self {
        let mut cfg = Self::default();

        if let Some(mode) = v.get("alignment_mode") {
            if let Ok(mode) = serde_json::from_value(mode.clone()) {
                tracing::info!("成功恢复 alignment_mode");
                cfg.alignment_mode = mode;
            }
        }
        if let Some(distance) = v.get("max_spelling_distance").and_then(|d| d.as_u64()) {
            cfg.max_spelling_distance = distance as usize;
        }
        if let Some(min_chars) = v.get("keyword_min_chars").and_then(|d| d.as_u64()) {
            cfg.keyword_min_chars = min_chars as usize;
        }
        if let Some(ratio) = v.get("completion_ratio_percent").and_then(|d| d.as_u64()) {
            cfg.completion_ratio_percent = ratio as usize;
        }
        if let Some(path) = v.get("synonyms_path").and_then(|p| p.as_str()) {
            cfg.synonyms_path = Some(PathBuf::from(path));
        }
        if let Some(rules) = v.get("default_rules") {
            if let Ok(rules) = serde_json::from_value(rules.clone()) {
                tracing::info!("成功恢复 default_rules");
                cfg.default_rules = rules;
            }
        }

        cfg
    }

    /// 修正越界取值
    fn sanitize(&mut self) {
        if self.completion_ratio_percent > 100 {
            tracing::warn!(
                "completion_ratio_percent={} 超出范围，截断为 100",
                self.completion_ratio_percent
            );
            self.completion_ratio_percent = 100;
        }
    }

    /// 保存到指定文件（先写临时文件，再原子替换）
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tracing::info!("保存配置到: {:?}", path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时文件失败: {}", e);
            e
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            tracing::error!("重命名临时文件失败: {}", e);
            e
        })?;

        tracing::info!("配置保存成功");
        Ok(())
    }

    /// 保存到默认位置
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }
}
