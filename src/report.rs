use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

pub const DEFAULT_OUTPUT: &str = "result_google.txt";

const RULE_WIDTH: usize = 50;
const EMPTY_QUESTION: &str = "[Без текста вопроса]";

/// One question with its normalized answer lines, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub question: String,
    pub answers: Vec<String>,
}

/// Render records to the report text: a rule line, a 1-based label, the
/// question text, then its answer lines.
pub fn render(records: &[ReportRecord]) -> String {
    let mut out = String::new();
    for (i, rec) in records.iter().enumerate() {
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
        out.push_str(&format!("Вопрос {}:\n", i + 1));

        let question = rec.question.trim();
        out.push_str(if question.is_empty() { EMPTY_QUESTION } else { question });
        out.push_str("\n\n");

        for answer in &rec.answers {
            out.push_str(answer);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn save(records: &[ReportRecord], path: &Path) -> Result<()> {
    std::fs::write(path, render(records))
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("saved {} questions to {}", records.len(), path.display());
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record(question: &str, answers: &[&str]) -> ReportRecord {
        ReportRecord {
            question: question.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn renders_labels_and_rules() {
        let text = render(&[
            record("Первый вопрос", &["a", "b ✅"]),
            record("Второй вопрос", &["[Текстовый ответ]"]),
        ]);
        let expected = "\
==================================================
Вопрос 1:
Первый вопрос

a
b ✅

==================================================
Вопрос 2:
Второй вопрос

[Текстовый ответ]

";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_question_text_gets_placeholder() {
        let text = render(&[record("   ", &["x"])]);
        assert!(text.contains("[Без текста вопроса]"));
    }

    #[test]
    fn no_records_renders_empty() {
        assert_eq!(render(&[]), "");
    }
}
