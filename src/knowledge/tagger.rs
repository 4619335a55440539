//! Rule-based line tagger
//!
//! Rules are evaluated top to bottom and the first match wins, so the order
//! of [`TAG_RULES`] is the tag priority: pitfall > glossary > rule > process.
//! Matching is plain substring search. English terms are compared against the
//! lower-cased line, Korean terms against the line as written.

use super::types::Tag;

/// One entry of the ordered tag table.
#[derive(Debug)]
struct TagRule {
    tag: Tag,
    /// Matched against the lower-cased line
    folded_terms: &'static [&'static str],
    /// Matched against the original line
    exact_terms: &'static [&'static str],
}

impl TagRule {
    fn matches(&self, line: &str, lowered: &str) -> bool {
        self.folded_terms.iter().any(|t| lowered.contains(t))
            || self.exact_terms.iter().any(|t| line.contains(t))
    }
}

const TAG_RULES: &[TagRule] = &[
    TagRule {
        tag: Tag::Pitfall,
        folded_terms: &["error", "fail"],
        exact_terms: &["버그", "실수"],
    },
    TagRule {
        tag: Tag::Glossary,
        folded_terms: &[],
        exact_terms: &["정의", "용어"],
    },
    TagRule {
        tag: Tag::Rule,
        folded_terms: &[],
        exact_terms: &["해야", "금지", "원칙"],
    },
];

/// Tag used when no rule matches.
const DEFAULT_TAG: Tag = Tag::Process;

/// Classify a single line of text.
pub fn classify(line: &str) -> Tag {
    let lowered = line.to_lowercase();
    TAG_RULES
        .iter()
        .find(|rule| rule.matches(line, &lowered))
        .map(|rule| rule.tag)
        .unwrap_or(DEFAULT_TAG)
}
