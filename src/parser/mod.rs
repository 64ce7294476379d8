pub mod access;
pub mod answer_key;
pub mod question;
pub mod resolve;

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::report::ReportRecord;
use question::Question;
use resolve::Resolution;

// Top-level payload regions, by upstream convention: the question list
// lives at root[0][1][1], the answer-key list at root[14][1][1].
const PRIMARY_SECTION: usize = 0;
const ANSWER_KEY_SECTION: usize = 14;
const SECTION_BODY: usize = 1;
const SECTION_ITEMS: usize = 1;

/// Skip/emit tallies for one interpretation pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParseCounts {
    pub emitted: usize,
    pub skipped_headers: usize,
    pub skipped_invalid: usize,
    pub skipped_duplicates: usize,
}

impl ParseCounts {
    pub fn print(&self) {
        println!(
            "Recovered {} questions ({} headers, {} malformed, {} duplicates skipped).",
            self.emitted, self.skipped_headers, self.skipped_invalid, self.skipped_duplicates,
        );
    }
}

/// Two-pass interpretation: index the answer-key region, then walk the
/// primary and answer-key lists in order, emitting one record per unique
/// question text. The answer-key list is appended so questions that exist
/// only there still surface.
pub fn interpret(root: &Value) -> (Vec<ReportRecord>, ParseCounts) {
    let primary = section_items(root, PRIMARY_SECTION);
    let secondary = section_items(root, ANSWER_KEY_SECTION);
    debug!(
        "payload regions: {} primary nodes, {} answer-key nodes",
        primary.len(),
        secondary.len()
    );

    let key = answer_key::build(secondary);

    let mut records = Vec::new();
    let mut counts = ParseCounts::default();
    let mut resolved: HashSet<String> = HashSet::new();

    for node in primary.iter().chain(secondary.iter()) {
        let Some(q) = Question::from_node(node) else {
            counts.skipped_invalid += 1;
            continue;
        };
        match resolve::resolve(&q, &key, &resolved) {
            Resolution::Header => counts.skipped_headers += 1,
            Resolution::Duplicate => counts.skipped_duplicates += 1,
            Resolution::Record(rec) => {
                resolved.insert(rec.question.clone());
                counts.emitted += 1;
                records.push(rec);
            }
        }
    }

    (records, counts)
}

fn section_items(root: &Value, section: usize) -> &[Value] {
    access::path(root, &[section, SECTION_BODY, SECTION_ITEMS])
        .and_then(access::seq)
        .unwrap_or(&[])
}

// ── Tests ──
