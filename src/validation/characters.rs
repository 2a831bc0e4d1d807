//! 字符级校验
//!
//! 与参考句逐位置并行比较，不做对齐

use crate::text::normalizer::comparison_normalize;
use crate::validation::types::{percentage, CharStatus, CharacterValidation};

/// 逐字符校验
///
/// 只为输入字符生成条目；参考句中尚未对比到的尾部由调用方以"待输入"渲染
pub fn validate_chars(input: &str, expected: &str) -> Vec<CharacterValidation> {
    let expected_chars: Vec<char> = expected.chars().collect();

    input
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let status = match expected_chars.get(index) {
                None => CharStatus::Extra,
                Some(&target) if chars_match(ch, target) => CharStatus::Correct,
                Some(_) => CharStatus::Incorrect,
            };
            CharacterValidation {
                char: ch,
                status,
                index,
            }
        })
        .collect()
}

/// 单字符比较：空格对空格直接通过，其余按比较策略规范化
fn chars_match(input: char, expected: char) -> bool {
    if input == ' ' && expected == ' ' {
        return true;
    }

    let mut buf_a = [0u8; 4];
    let mut buf_b = [0u8; 4];
    comparison_normalize(input.encode_utf8(&mut buf_a))
        == comparison_normalize(expected.encode_utf8(&mut buf_b))
}

/// 字符准确率：round(100 · 正确数 / max(输入长度, 参考长度))，0/0 → 0
pub fn character_accuracy(validations: &[CharacterValidation], expected: &str) -> u32 {
    let correct = validations
        .iter()
        .filter(|v| v.status == CharStatus::Correct)
        .count();
    let total = validations.len().max(expected.chars().count());
    percentage(correct, total)
}

/// 参考句中尚未对比到的尾部
pub fn pending_tail(input: &str, expected: &str) -> String {
    expected.chars().skip(input.chars().count()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(validations: &[CharacterValidation]) -> Vec<CharStatus> {
        validations.iter().map(|v| v.status).collect()
    }

    #[test]
    fn test_prefix_input() {
        let validations = validate_chars("אבג", "אבגד");
        assert_eq!(validations.len(), 3);
        assert!(validations.iter().all(|v| v.status == CharStatus::Correct));
        assert_eq!(pending_tail("אבג", "אבגד"), "ד");
    }

    #[test]
    fn test_extra_chars() {
        let validations = validate_chars("אבגדה", "אבג");
        assert_eq!(
            statuses(&validations),
            vec![
                CharStatus::Correct,
                CharStatus::Correct,
                CharStatus::Correct,
                CharStatus::Extra,
                CharStatus::Extra,
            ]
        );
        assert_eq!(validations[4].index, 4);
        assert_eq!(validations[4].char, 'ה');
        assert_eq!(pending_tail("אבגדה", "אבג"), "");
    }

    #[test]
    fn test_incorrect_char() {
        let validations = validate_chars("אבד", "אבג");
        assert_eq!(validations[2].status, CharStatus::Incorrect);
    }

    #[test]
    fn test_final_letter_matches_regular_form() {
        let validations = validate_chars("שלומ", "שלום");
        assert!(validations.iter().all(|v| v.status == CharStatus::Correct));
        // 大小写不敏感
        assert_eq!(validate_chars("A", "a")[0].status, CharStatus::Correct);
    }

    #[test]
    fn test_spaces() {
        let validations = validate_chars("א ב", "א ב");
        assert!(validations.iter().all(|v| v.status == CharStatus::Correct));
        // 空格对字母不通过
        assert_eq!(validate_chars(" ", "א")[0].status, CharStatus::Incorrect);
    }

    #[test]
    fn test_niqqud_vs_space_quirk() {
        // 单独的 niqqud 与空白规范化后都为空串，视为相同
        assert_eq!(
            validate_chars("\u{05B8}", " ")[0].status,
            CharStatus::Correct
        );
    }

    #[test]
    fn test_accuracy() {
        let validations = validate_chars("אבג", "אבגד");
        assert_eq!(character_accuracy(&validations, "אבגד"), 75);

        let validations = validate_chars("אבגדה", "אבג");
        assert_eq!(character_accuracy(&validations, "אבג"), 60);

        assert_eq!(character_accuracy(&validate_chars("", ""), ""), 0);
        assert_eq!(character_accuracy(&validate_chars("", "אב"), "אב"), 0);
    }

    #[test]
    fn test_control_characters() {
        let validations = validate_chars("\u{0007}", "\u{0007}");
        assert_eq!(validations[0].status, CharStatus::Correct);
    }
}
