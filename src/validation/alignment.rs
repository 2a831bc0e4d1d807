//! 句子对齐引擎
//!
//! 比较学习者输入与参考句的 token 序列，输出分类后的错误列表。
//!
//! 默认使用贪心双指针扫描（不回溯）：一次真实的插入/删除之后，
//! 后续 token 可能被连带判为 WrongOrder / ExtraWord，这是既有行为，保持不变。
//! `AlignmentMode::Strict` 提供完整的动态规划对齐作为可选项。

use crate::text::fuzzy::SimilarityOracle;
use crate::text::normalizer::normalize;
use crate::text::rules::PUNCTUATION;
use crate::text::tokenizer::{token_texts, Tokenizer};
use crate::validation::text_digest;
use crate::validation::types::{
    AlignmentMode, DiffHighlight, ErrorKind, HighlightSegment, SentenceDefinition, TokenError,
    ValidationResult, ValidationRules,
};

/// 对齐引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentEngine {
    mode: AlignmentMode,
    oracle: SimilarityOracle,
}

/// DP 路径步骤
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Match,
    Spelling,
    /// 输入多出的 token
    Extra,
    /// 参考句缺失的 token
    Missing,
}

impl AlignmentEngine {
    pub fn new(mode: AlignmentMode, oracle: SimilarityOracle) -> Self {
        Self { mode, oracle }
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    /// 校验输入句子
    ///
    /// 纯函数，不可失败；所有异常都表示为 `TokenError`
    pub fn validate(&self, input: &str, definition: &SentenceDefinition) -> ValidationResult {
        let normalized_input = normalize(input);
        let normalized_expected = normalize(&definition.expected);

        let mut input_tokens = token_texts(&Tokenizer::tokenize(&normalized_input));
        let mut expected_tokens: Vec<String> = definition
            .tokens
            .iter()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect();

        if !definition.rules.punctuation_required {
            input_tokens.retain(|t| !PUNCTUATION.is_mark(t));
            expected_tokens.retain(|t| !PUNCTUATION.is_mark(t));
        }

        let errors = self.detect_errors(&input_tokens, &expected_tokens, &definition.rules);

        tracing::debug!(
            "validate: input_digest={}, input_tokens={}, expected_tokens={}, errors={}, mode={:?}",
            text_digest(&normalized_input),
            input_tokens.len(),
            expected_tokens.len(),
            errors.len(),
            self.mode
        );

        ValidationResult::new(errors, normalized_input, normalized_expected)
    }

    /// 检测全部错误
    fn detect_errors(
        &self,
        input: &[String],
        expected: &[String],
        rules: &ValidationRules,
    ) -> Vec<TokenError> {
        // 完全没有输入
        if input.is_empty() {
            return vec![TokenError::new(ErrorKind::MissingWord, 0, None, None)];
        }

        // 逐位完全一致
        if input == expected {
            return Vec::new();
        }

        // 不要求词序时，多重集合相同即视为正确
        if !rules.exact_order_required && same_multiset(input, expected) {
            return Vec::new();
        }

        match self.mode {
            AlignmentMode::Greedy => self.greedy_scan(input, expected, rules),
            AlignmentMode::Strict => self.strict_align(input, expected, rules),
        }
    }

    /// 贪心双指针扫描
    ///
    /// 每轮至少推进一个指针，最多 `len(input) + len(expected)` 轮
    fn greedy_scan(
        &self,
        input: &[String],
        expected: &[String],
        rules: &ValidationRules,
    ) -> Vec<TokenError> {
        let mut errors = Vec::new();
        let mut i = 0usize;
        let mut j = 0usize;

        while i < input.len() || j < expected.len() {
            match (input.get(i), expected.get(j)) {
                (Some(actual), Some(wanted)) => {
                    if actual == wanted {
                        i += 1;
                        j += 1;
                    } else if rules.allow_spelling_errors
                        && self.oracle.are_similar_words(actual, wanted)
                    {
                        errors.push(TokenError::new(
                            ErrorKind::SpellingError,
                            i,
                            Some(wanted.clone()),
                            Some(actual.clone()),
                        ));
                        i += 1;
                        j += 1;
                    } else if expected[j + 1..].contains(actual) {
                        // 出现在后面：词序错误，参考 token 保持待匹配
                        errors.push(TokenError::new(
                            ErrorKind::WrongOrder,
                            i,
                            Some(wanted.clone()),
                            Some(actual.clone()),
                        ));
                        i += 1;
                    } else {
                        errors.push(TokenError::new(
                            ErrorKind::ExtraWord,
                            i,
                            Some(wanted.clone()),
                            Some(actual.clone()),
                        ));
                        i += 1;
                    }
                }
                (Some(actual), None) => {
                    errors.push(TokenError::new(
                        ErrorKind::ExtraWord,
                        i,
                        None,
                        Some(actual.clone()),
                    ));
                    i += 1;
                }
                (None, Some(wanted)) => {
                    errors.push(missing_error(j, wanted));
                    j += 1;
                }
                (None, None) => break,
            }
        }

        errors
    }

    /// 完整 DP 对齐（token 级编辑距离 + 路径回溯）
    ///
    /// 仅允许：相等、拼写近似替换（需规则允许）、插入、删除。
    /// 不相似的替换按"多一个 + 缺一个"计。
    fn strict_align(
        &self,
        input: &[String],
        expected: &[String],
        rules: &ValidationRules,
    ) -> Vec<TokenError> {
        let n = input.len();
        let m = expected.len();

        // 对角步代价：Some(0) 相等，Some(1) 拼写近似，None 不可替换
        let diag: Vec<Vec<Option<usize>>> = input
            .iter()
            .map(|actual| {
                expected
                    .iter()
                    .map(|wanted| {
                        if actual == wanted {
                            Some(0)
                        } else if rules.allow_spelling_errors
                            && self.oracle.are_similar_words(actual, wanted)
                        {
                            Some(1)
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        let mut dist = vec![vec![0usize; m + 1]; n + 1];
        for (i, row) in dist.iter_mut().enumerate() {
            row[0] = i;
        }
        for (j, val) in dist[0].iter_mut().enumerate() {
            *val = j;
        }

        for i in 1..=n {
            for j in 1..=m {
                let mut best = (dist[i - 1][j] + 1).min(dist[i][j - 1] + 1);
                if let Some(cost) = diag[i - 1][j - 1] {
                    best = best.min(dist[i - 1][j - 1] + cost);
                }
                dist[i][j] = best;
            }
        }

        // 回溯
        let mut steps = Vec::with_capacity(n + m);
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            let diagonal = if i > 0 && j > 0 {
                diag[i - 1][j - 1].filter(|cost| dist[i][j] == dist[i - 1][j - 1] + cost)
            } else {
                None
            };

            if let Some(cost) = diagonal {
                steps.push(if cost == 0 { Step::Match } else { Step::Spelling });
                i -= 1;
                j -= 1;
            } else if j > 0 && dist[i][j] == dist[i][j - 1] + 1 {
                steps.push(Step::Missing);
                j -= 1;
            } else {
                steps.push(Step::Extra);
                i -= 1;
            }
        }
        steps.reverse();

        // 正向生成错误
        let mut errors = Vec::new();
        let (mut ii, mut ei) = (0usize, 0usize);
        for step in steps {
            match step {
                Step::Match => {
                    ii += 1;
                    ei += 1;
                }
                Step::Spelling => {
                    errors.push(TokenError::new(
                        ErrorKind::SpellingError,
                        ii,
                        Some(expected[ei].clone()),
                        Some(input[ii].clone()),
                    ));
                    ii += 1;
                    ei += 1;
                }
                Step::Missing => {
                    errors.push(missing_error(ei, &expected[ei]));
                    ei += 1;
                }
                Step::Extra => {
                    errors.push(TokenError::new(
                        ErrorKind::ExtraWord,
                        ii,
                        expected.get(ei).cloned(),
                        Some(input[ii].clone()),
                    ));
                    ii += 1;
                }
            }
        }

        pair_moved_tokens(errors)
    }
}

/// 缺失 token：含标点则为 MissingPunctuation，否则 MissingWord
fn missing_error(position: usize, wanted: &str) -> TokenError {
    let kind = if PUNCTUATION.contains_any(wanted) {
        ErrorKind::MissingPunctuation
    } else {
        ErrorKind::MissingWord
    };
    TokenError::new(kind, position, Some(wanted.to_string()), None)
}

/// 多出的 token 与某个缺失 token 相同时，合并为一个 WrongOrder
fn pair_moved_tokens(errors: Vec<TokenError>) -> Vec<TokenError> {
    let mut paired_missing = vec![false; errors.len()];
    let mut moved = vec![false; errors.len()];

    for (k, extra) in errors.iter().enumerate() {
        if extra.kind != ErrorKind::ExtraWord {
            continue;
        }
        let partner = errors.iter().enumerate().position(|(idx, missing)| {
            !paired_missing[idx]
                && matches!(
                    missing.kind,
                    ErrorKind::MissingWord | ErrorKind::MissingPunctuation
                )
                && missing.expected == extra.actual
        });
        if let Some(idx) = partner {
            paired_missing[idx] = true;
            moved[k] = true;
        }
    }

    errors
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !paired_missing[*idx])
        .map(|(idx, err)| {
            if moved[idx] {
                TokenError::new(ErrorKind::WrongOrder, err.position, err.expected, err.actual)
            } else {
                err
            }
        })
        .collect()
}

fn same_multiset(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&String> = a.iter().collect();
    let mut b: Vec<&String> = b.iter().collect();
    a.sort();
    b.sort();
    a == b
}

/// 逐位置 token 对比，标记每个 token 是否与同位置 token 相同
pub fn highlight_differences(input: &str, expected: &str) -> DiffHighlight {
    let input_tokens = token_texts(&Tokenizer::tokenize_text(input));
    let expected_tokens = token_texts(&Tokenizer::tokenize_text(expected));

    let segments = |own: &[String], other: &[String]| -> Vec<HighlightSegment> {
        own.iter()
            .enumerate()
            .map(|(idx, text)| HighlightSegment {
                text: text.clone(),
                matched: other.get(idx) == Some(text),
            })
            .collect()
    };

    DiffHighlight {
        input: segments(input_tokens.as_slice(), expected_tokens.as_slice()),
        expected: segments(expected_tokens.as_slice(), input_tokens.as_slice()),
    }
}
