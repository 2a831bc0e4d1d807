//! 同义词表
//!
//! 只读映射：规范词 → 可接受的同义词列表，对称查询（A 列出 B，或 B 列出 A）。
//! 键与条目在构建时统一做比较规范化。

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::text::normalizer::comparison_normalize;

/// 内置医疗希伯来语同义词
const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("מטופל", &["חולה", "פציינט"]),
    ("חולה", &["מטופל", "פציינט"]),
    ("כאב", &["כאבים", "מכאוב"]),
    ("חום", &["טמפרטורה", "קדחת"]),
    ("בדיקה", &["בדיקות", "אבחון"]),
    ("תרופה", &["תרופות", "טיפול"]),
    ("רופא", &["דוקטור", "מטפל"]),
    ("בית חולים", &["בי\"ח", "מרכז רפואי"]),
    ("לב", &["לבבי", "קרדיאלי"]),
    ("דם", &["דמי"]),
    ("ראש", &["גולגולת"]),
    ("בטן", &["בטנית", "ביטנית"]),
];

lazy_static::lazy_static! {
    /// 进程内共享的内置表，首次使用时构建一次
    static ref BUILTIN_TABLE: Arc<SynonymTable> = Arc::new(SynonymTable::from_pairs(
        BUILTIN_SYNONYMS
            .iter()
            .map(|(term, list)| (*term, list.iter().copied())),
    ));
}

/// 同义词表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// 空表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 内置医疗同义词表（共享实例）
    pub fn builtin() -> Arc<SynonymTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    /// 从 (词, 同义词列表) 序列构建
    ///
    /// 同一规范键出现多次时合并列表；规范化后为空的条目被忽略
    pub fn from_pairs<K, I, S>(pairs: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for (term, list) in pairs {
            let key = comparison_normalize(term.as_ref());
            if key.is_empty() {
                continue;
            }

            let synonyms = entries.entry(key).or_default();
            for synonym in list {
                let normalized = comparison_normalize(synonym.as_ref());
                if !normalized.is_empty() && !synonyms.contains(&normalized) {
                    synonyms.push(normalized);
                }
            }
        }

        Self { entries }
    }

    pub fn from_map(map: HashMap<String, Vec<String>>) -> Self {
        Self::from_pairs(map)
    }

    /// 解析 JSON：`{ "词": ["同义词", ...], ... }`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: HashMap<String, Vec<String>> =
            serde_json::from_str(json).context("同义词表 JSON 格式无效")?;
        Ok(Self::from_map(map))
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("加载同义词表: {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取同义词表: {}", path.display()))?;
        let table = Self::from_json_str(&content)?;
        tracing::info!("同义词表已加载，共 {} 个词条", table.len());
        Ok(table)
    }

    /// 查询同义词（已规范化的列表）
    pub fn synonyms_of(&self, word: &str) -> &[String] {
        self.entries
            .get(&comparison_normalize(word))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 对称同义判定
    pub fn are_synonyms(&self, a: &str, b: &str) -> bool {
        let a = comparison_normalize(a);
        let b = comparison_normalize(b);

        if a == b {
            return true;
        }

        let lists = |key: &str, other: &str| {
            self.entries
                .get(key)
                .is_some_and(|list| list.iter().any(|s| s == other))
        };

        lists(a.as_str(), b.as_str()) || lists(b.as_str(), a.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_symmetric() {
        let table = SynonymTable::builtin();
        assert!(table.are_synonyms("מטופל", "חולה"));
        assert!(table.are_synonyms("חולה", "מטופל"));
        // 只在一侧列出
        assert!(table.are_synonyms("קדחת", "חום"));
        assert!(!table.are_synonyms("קדחת", "טמפרטורה"));
    }

    #[test]
    fn test_identical_words_are_synonyms() {
        let table = SynonymTable::empty();
        assert!(table.are_synonyms("ראש", "ראש"));
        assert!(table.are_synonyms("שלום", "שלומ"));
        assert!(!table.are_synonyms("ראש", "גולגולת"));
    }

    #[test]
    fn test_normalized_lookup() {
        // 键含词尾字母与 niqqud 时依然命中
        let table = SynonymTable::from_pairs([("חום", ["קדחת"])]);
        assert!(table.are_synonyms("חוּם", "קדחת"));
        assert_eq!(table.synonyms_of("חום"), &["קדחת".to_string()]);
        assert!(table.synonyms_of("לא קיים").is_empty());
    }

    #[test]
    fn test_duplicate_keys_merge() {
        let table = SynonymTable::from_pairs([("a", vec!["b"]), ("A", vec!["c", "b"])]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.synonyms_of("a"), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_from_json_str() {
        let table = SynonymTable::from_json_str(r#"{"רופא": ["דוקטור"]}"#).unwrap();
        assert!(table.are_synonyms("דוקטור", "רופא"));
        assert!(SynonymTable::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"לב": ["קרדיאלי"]}}"#).unwrap();

        let table = SynonymTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.are_synonyms("קרדיאלי", "לב"));

        assert!(SynonymTable::load(Path::new("/nonexistent/synonyms.json")).is_err());
    }
}
