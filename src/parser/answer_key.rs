use std::collections::HashMap;

use serde_json::Value;

use super::question::Question;

/// Question text → ordered correct-answer strings, built from the
/// answer-key region of the payload.
pub type AnswerKey = HashMap<String, Vec<String>>;

/// Index correctness sets by question text. Each non-empty correctness set
/// overwrites the entry for its question, so the last write wins; duplicate
/// texts are not expected upstream but are not rejected either.
pub fn build(nodes: &[Value]) -> AnswerKey {
    let mut key = AnswerKey::new();
    for node in nodes {
        let Some(q) = Question::from_node(node) else { continue };
        for block in &q.choices {
            if !block.correct.is_empty() {
                key.insert(q.text.clone(), block.correct.clone());
            }
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed_node(text: &str, answers: Vec<&str>) -> Value {
        json!([1, text, null, 2, [[9, [], 0, null, null, null, null, null, null, [null, [answers]]]]])
    }

    #[test]
    fn builds_entries_from_correctness_nodes() {
        let nodes = vec![keyed_node("Q1", vec!["a"]), keyed_node("Q2", vec!["b", "c"])];
        let key = build(&nodes);
        assert_eq!(key.get("Q1"), Some(&vec!["a".to_string()]));
        assert_eq!(key.get("Q2"), Some(&vec!["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn last_write_wins_for_duplicate_text() {
        let nodes = vec![keyed_node("Q", vec!["old"]), keyed_node("Q", vec!["new"])];
        let key = build(&nodes);
        assert_eq!(key.get("Q"), Some(&vec!["new".to_string()]));
    }

    #[test]
    fn nodes_without_correctness_contribute_nothing() {
        let nodes = vec![
            json!([1, "plain", null, 2, [[9, [["a"], ["b"]]]]]),
            json!([1, "short"]),
            json!("garbage"),
        ];
        assert!(build(&nodes).is_empty());
    }
}
