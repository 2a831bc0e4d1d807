//! 文本规则定义
//!
//! 包含 niqqud 码位范围、词尾字母映射、标点集合

use std::collections::{HashMap, HashSet};

/// Niqqud（元音点 / 吟诵符号）码位范围
pub const NIQQUD_RANGE: std::ops::RangeInclusive<char> = '\u{0591}'..='\u{05C7}';

/// 希伯来字母码位范围（含词尾形）
pub const HEBREW_LETTER_RANGE: std::ops::RangeInclusive<char> = '\u{05D0}'..='\u{05EA}';

/// 判断是否为 niqqud 码位
#[inline]
pub fn is_niqqud(ch: char) -> bool {
    NIQQUD_RANGE.contains(&ch)
}

/// 判断是否为希伯来字母
#[inline]
pub fn is_hebrew_letter(ch: char) -> bool {
    HEBREW_LETTER_RANGE.contains(&ch)
}

/// 词尾字母映射（sofit → 常规形）
pub struct FinalLetterMap {
    map: HashMap<char, char>,
}

impl FinalLetterMap {
    pub fn new() -> Self {
        let map = HashMap::from([
            ('ך', 'כ'),
            ('ם', 'מ'),
            ('ן', 'נ'),
            ('ף', 'פ'),
            ('ץ', 'צ'),
        ]);

        Self { map }
    }

    /// 折叠单个字符，非词尾字母原样返回
    pub fn fold(&self, ch: char) -> char {
        self.map.get(&ch).copied().unwrap_or(ch)
    }

    pub fn is_final(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }
}

impl Default for FinalLetterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// 标点集合
///
/// 分词与对齐共用：句号、逗号、分号、冒号、感叹号、问号，以及阿拉伯文逗号/分号
pub struct PunctuationSet {
    marks: HashSet<char>,
}

impl PunctuationSet {
    pub fn new() -> Self {
        let marks: HashSet<char> = ['.', ',', ';', ':', '!', '?', '،', '؛']
            .into_iter()
            .collect();

        Self { marks }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.marks.contains(&ch)
    }

    /// 文本中是否含有任一标点
    pub fn contains_any(&self, text: &str) -> bool {
        text.chars().any(|ch| self.contains(ch))
    }

    /// 是否为单个标点字符
    pub fn is_mark(&self, text: &str) -> bool {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.contains(ch),
            _ => false,
        }
    }
}

impl Default for PunctuationSet {
    fn default() -> Self {
        Self::new()
    }
}

/// 词级评分的分隔符（空白之外）
///
/// 与 `PunctuationSet` 不同：包含连字符，不含分号
pub const WORD_SEPARATORS: [char; 6] = [',', '.', '!', '?', '-', ':'];

/// 判断是否为词级评分分隔符
#[inline]
pub fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace() || WORD_SEPARATORS.contains(&ch)
}

lazy_static::lazy_static! {
    /// 全局共享的只读规则表
    pub static ref FINAL_LETTERS: FinalLetterMap = FinalLetterMap::new();
    pub static ref PUNCTUATION: PunctuationSet = PunctuationSet::new();
}
