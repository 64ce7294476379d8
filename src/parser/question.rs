use serde_json::Value;

use super::access;

// Positions inside a question node, by upstream convention.
const IDX_TEXT: usize = 1;
const IDX_TYPE: usize = 3;
const IDX_CHOICES: usize = 4;

// Positions inside a choice block.
const IDX_OPTIONS: usize = 1;
const IDX_CORRECTNESS: usize = 9;

// The correctness node carries its answer groups at index 1.
const IDX_ANSWER_GROUPS: usize = 1;

// Observed question type codes.
const TYPE_LONG_TEXT: i64 = 0;
const TYPE_SHORT_TEXT: i64 = 1;
const TYPE_HEADER: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    LongText,
    ShortText,
    Choice,
    Header,
    Other,
}

impl QuestionKind {
    fn from_code(code: Option<i64>, has_choices: bool) -> QuestionKind {
        match code {
            Some(TYPE_LONG_TEXT) => QuestionKind::LongText,
            Some(TYPE_SHORT_TEXT) => QuestionKind::ShortText,
            Some(TYPE_HEADER) => QuestionKind::Header,
            _ if has_choices => QuestionKind::Choice,
            _ => QuestionKind::Other,
        }
    }
}

/// One rendering of a question's answer options, optionally paired with the
/// correct-answer text set from its embedded correctness node.
#[derive(Debug, Clone, Default)]
pub struct ChoiceBlock {
    pub options: Vec<String>,
    pub correct: Vec<String>,
}

/// A question node lifted out of the positional payload.
#[derive(Debug, Clone)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    pub choices: Vec<ChoiceBlock>,
}

impl Question {
    /// Lift one node of a question list. `None` means the node is too
    /// malformed to interpret at all (not an array, or too short to carry a
    /// type code); anything shape-odd below that degrades to "absent".
    pub fn from_node(node: &Value) -> Option<Question> {
        let items = access::seq(node)?;
        if items.len() <= IDX_TYPE {
            return None;
        }

        let text = access::text(node, IDX_TEXT).unwrap_or_default().to_string();
        let choices_root = access::item(node, IDX_CHOICES).and_then(access::seq);
        let kind = QuestionKind::from_code(access::code(node, IDX_TYPE), choices_root.is_some());
        let choices = choices_root
            .map(|blocks| blocks.iter().filter_map(ChoiceBlock::from_node).collect())
            .unwrap_or_default();

        Some(Question { text, kind, choices })
    }
}

impl ChoiceBlock {
    fn from_node(block: &Value) -> Option<ChoiceBlock> {
        access::seq(block)?;

        let options = access::item(block, IDX_OPTIONS)
            .and_then(access::seq)
            .map(|opts| {
                opts.iter()
                    .filter_map(|opt| access::item(opt, 0).and_then(display_string))
                    .collect()
            })
            .unwrap_or_default();

        let correct = access::item(block, IDX_CORRECTNESS)
            .map(collect_correct)
            .unwrap_or_default();

        Some(ChoiceBlock { options, correct })
    }
}

/// Flatten a correctness node: groups of strings at index 1, each string
/// taken as-is, one-deeper lists contributing their stringified scalars.
fn collect_correct(node: &Value) -> Vec<String> {
    let mut out = Vec::new();
    let Some(groups) = access::item(node, IDX_ANSWER_GROUPS).and_then(access::seq) else {
        return out;
    };
    for group in groups {
        let Some(items) = access::seq(group) else { continue };
        for item in items {
            match item {
                Value::String(s) => out.push(s.clone()),
                Value::Array(inner) => out.extend(
                    inner
                        .iter()
                        .filter_map(display_string)
                        .filter(|s| !s.is_empty()),
                ),
                _ => {}
            }
        }
    }
    out
}

/// A cell rendered as display text: strings pass through, numbers are
/// stringified, anything else counts as absent.
fn display_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
