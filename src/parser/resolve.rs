use std::collections::HashSet;

use super::answer_key::AnswerKey;
use super::question::{Question, QuestionKind};
use crate::report::ReportRecord;

const CORRECT_MARK: &str = "✅";

const PLACEHOLDER_LONG_TEXT: &str = "[Текстовый ответ]";
const PLACEHOLDER_SHORT_TEXT: &str = "[Короткий текстовый ответ]";
const PLACEHOLDER_OTHER: &str = "[Другой тип ответа]";

/// Outcome of resolving one question node.
pub enum Resolution {
    Record(ReportRecord),
    Header,
    Duplicate,
}

/// Run a question through the rule chain: answer-key match, own correctness
/// node, plain options, placeholder by kind. The first rule that yields
/// answer lines wins.
pub fn resolve(q: &Question, key: &AnswerKey, resolved: &HashSet<String>) -> Resolution {
    if q.kind == QuestionKind::Header {
        return Resolution::Header;
    }
    // First write wins: a later node with already-resolved text never
    // re-emits, even when the answer-key region has an entry for it.
    if resolved.contains(&q.text) {
        return Resolution::Duplicate;
    }

    let answers = answer_key_rule(q, key)
        .or_else(|| own_correctness_rule(q))
        .or_else(|| plain_options_rule(q))
        .unwrap_or_else(|| vec![placeholder(q.kind)]);

    Resolution::Record(ReportRecord {
        question: q.text.clone(),
        answers,
    })
}

/// Answer-key entry for this text: render the question's own options with
/// the correct ones marked, or synthesize a single revealing line when no
/// option list is available.
fn answer_key_rule(q: &Question, key: &AnswerKey) -> Option<Vec<String>> {
    let correct = key.get(&q.text)?;
    let rendered = q.choices.iter().find_map(|block| {
        if block.options.is_empty() {
            return None;
        }
        let lines = block
            .options
            .iter()
            .map(|opt| {
                if correct.iter().any(|c| c == opt) {
                    mark(opt)
                } else {
                    opt.clone()
                }
            })
            .collect::<Vec<_>>();
        Some(lines)
    });
    Some(rendered.unwrap_or_else(|| vec![synthesize(correct)]))
}

/// Correctness annotation embedded in the question's own choice blocks;
/// the first block carrying one wins.
fn own_correctness_rule(q: &Question) -> Option<Vec<String>> {
    q.choices
        .iter()
        .find(|b| !b.correct.is_empty())
        .map(|b| vec![synthesize(&b.correct)])
}

/// First choice block with a non-empty option list, rendered unmarked.
fn plain_options_rule(q: &Question) -> Option<Vec<String>> {
    q.choices
        .iter()
        .find(|b| !b.options.is_empty())
        .map(|b| b.options.clone())
}

fn placeholder(kind: QuestionKind) -> String {
    match kind {
        QuestionKind::LongText => PLACEHOLDER_LONG_TEXT,
        QuestionKind::ShortText => PLACEHOLDER_SHORT_TEXT,
        _ => PLACEHOLDER_OTHER,
    }
    .to_string()
}

/// One synthesized line from a correct-answer set: a purely numeric first
/// value stands alone, anything else joins the full set.
fn synthesize(correct: &[String]) -> String {
    let first = correct.first().map(|s| s.trim()).unwrap_or_default();
    if is_numeric(first) {
        mark(first)
    } else {
        mark(&correct.join(", "))
    }
}

fn mark(text: &str) -> String {
    format!("{text} {CORRECT_MARK}")
}

/// Only digits remain after dropping `.`/`,`/`-`/`/` separators.
fn is_numeric(s: &str) -> bool {
    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '-' | '/'))
        .collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
