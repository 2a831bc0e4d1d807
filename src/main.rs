// 命令行工具 - 对一条参考句校验学习者输入，输出 JSON
//
// 省略 input 时从标准输入读取一行
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sentence_check_lib::{AlignmentMode, EngineConfig, SentenceDefinition, ValidationEngine};

#[derive(Parser, Debug)]
#[command(name = "sentence-check", about = "校验学习者输入与参考句")]
struct Cli {
    /// 配置文件路径（默认使用用户配置目录）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 同义词表 JSON 路径
    #[arg(long)]
    synonyms: Option<PathBuf>,

    /// 容忍拼写错误
    #[arg(long)]
    spelling: bool,

    /// 使用严格对齐
    #[arg(long)]
    strict: bool,

    /// 参考句
    expected: String,

    /// 学习者输入
    input: Option<String>,
}

/// 去掉 read_line 留下的行尾换行，保留其余空白
fn strip_line_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，不污染 JSON）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    if let Some(path) = cli.synonyms {
        config.synonyms_path = Some(path);
    }
    if cli.spelling {
        config.default_rules.allow_spelling_errors = true;
    }
    if cli.strict {
        config.alignment_mode = AlignmentMode::Strict;
    }

    let input = match cli.input {
        Some(input) => input,
        None => {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            strip_line_terminator(&line).to_string()
        }
    };
    let expected = cli.expected;

    let rules = config.default_rules;
    let engine = ValidationEngine::from_config(config)?;
    let definition = SentenceDefinition::from_text(expected.as_str(), rules);

    let output = serde_json::json!({
        "validation": engine.validate(&input, &definition),
        "feedback": engine.evaluate_translation(&input, &expected),
        "highlight": engine.highlight_differences(&input, &expected),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_and_positionals() {
        let cli = Cli::try_parse_from([
            "sentence-check",
            "--strict",
            "--synonyms",
            "s.json",
            "א ב",
            "א",
        ])
        .unwrap();
        assert!(cli.strict);
        assert!(!cli.spelling);
        assert_eq!(cli.synonyms, Some(PathBuf::from("s.json")));
        assert_eq!(cli.expected, "א ב");
        assert_eq!(cli.input.as_deref(), Some("א"));

        let cli = Cli::try_parse_from(["sentence-check", "א ב"]).unwrap();
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_parse_missing_value() {
        assert!(Cli::try_parse_from(["sentence-check", "--config"]).is_err());
        assert!(Cli::try_parse_from(["sentence-check", "--help"]).is_err());
        assert!(Cli::try_parse_from(["sentence-check"]).is_err());
    }

    #[test]
    fn test_stdin_line_terminator_stripped() {
        assert_eq!(strip_line_terminator("החולה סובל\n"), "החולה סובל");
        assert_eq!(strip_line_terminator("החולה סובל\r\n"), "החולה סובל");
        assert_eq!(strip_line_terminator(" החולה  סובל \n"), " החולה  סובל ");

        let engine = ValidationEngine::default();
        let feedback =
            engine.evaluate_translation(strip_line_terminator("החולה סובל\n"), "החולה סובל");
        assert_eq!(feedback.accuracy, 100);
    }
}
