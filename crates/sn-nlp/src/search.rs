//! Search interpreter: free text → table, encoded query, limit.
//!
//! Each slot is detected independently from the raw text:
//! 1. collection: leftmost collection word, mapped by stem;
//! 2. search term: "about X" style phrases first, then "find ... X";
//! 3. priority tier and 4. state tier from ordered tables.
//!
//! Clauses are always emitted as term, priority, state, whatever order the
//! phrases had in the sentence.

use regex::Regex;
use std::sync::LazyLock;

use crate::rules::{capture_trimmed, compile, first_match};
use crate::types::{CLAUSE_SEPARATOR, Collection, SEARCH_LIMIT, SearchSpec, TEXT_QUERY_OPERATOR};

static COLLECTION_WORD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i-u:incidents?|problems?|changes?|tasks?|users?|groups?)")
});

/// Stem of the matched collection word → collection.
const COLLECTION_STEMS: [(&str, Collection); 6] = [
    ("incident", Collection::Incident),
    ("problem", Collection::Problem),
    ("change", Collection::ChangeRequest),
    ("task", Collection::Task),
    ("user", Collection::User),
    ("group", Collection::Group),
];

// "about printers", "related to email": text up to the next period.
static TOPIC_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i-u:about|related to|regarding|concerning|with|containing)\s+([^.]+)")
});

// "find all incidents X", "show all open X": the remainder after the verb and
// up to two filler words.
static VERB_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i-u:find|search for|show|get|list|display)\s+(?i-u:all|any|)(?:\s+\w+)?\s+(?:\w+\s+)?(.+)",
    )
});

// A tier word only counts when "priority" follows it, so topics such as
// "low disk space" stay unfiltered.
static PRIORITY_TIERS: LazyLock<[(Regex, u8); 3]> = LazyLock::new(|| {
    [
        (compile(r"\b(?i-u:high|critical)\s+(?i-u:priority)\b"), 1),
        (compile(r"\b(?i-u:medium)\s+(?i-u:priority)\b"), 2),
        (compile(r"\b(?i-u:low)\s+(?i-u:priority)\b"), 3),
    ]
});

static STATE_TIERS: LazyLock<[(Regex, u8); 3]> = LazyLock::new(|| {
    [
        (compile(r"\b(?i-u:new|open)\b"), 1),
        (compile(r"\b(?i-u:in progress|working)\b"), 2),
        (compile(r"\b(?i-u:closed|resolved)\b"), 7),
    ]
});

/// Interpret a free-text search. Never fails: missing signals fall back to
/// the incident table and an empty query.
pub fn interpret_search(text: &str) -> SearchSpec {
    let collection = detect_collection(text);
    let term = extract_term(text);
    let priority = detect_priority(text);
    let state = detect_state(text);

    tracing::debug!(
        table = collection.table_name(),
        term = term.unwrap_or_default(),
        ?priority,
        ?state,
        "interpreted search"
    );

    SearchSpec {
        collection,
        query: encode_query(term, priority, state),
        limit: SEARCH_LIMIT,
    }
}

/// Collection named by the leftmost collection word, incident by default.
pub fn detect_collection(text: &str) -> Collection {
    let Some(word) = COLLECTION_WORD.find(text) else {
        return Collection::default();
    };
    let word = word.as_str().to_ascii_lowercase();
    COLLECTION_STEMS
        .iter()
        .find(|(stem, _)| word.starts_with(stem))
        .map(|(_, collection)| *collection)
        .unwrap_or_default()
}

/// Free-text term: a topic phrase wins over a verb phrase.
pub fn extract_term(text: &str) -> Option<&str> {
    capture_trimmed(&TOPIC_PHRASE, text).or_else(|| capture_trimmed(&VERB_PHRASE, text))
}

/// Priority 1–3, or `None` when no "<tier> priority" phrase appears.
pub fn detect_priority(text: &str) -> Option<u8> {
    first_match(&*PRIORITY_TIERS, text)
}

/// Record state 1, 2 or 7, or `None` when no state word appears.
pub fn detect_state(text: &str) -> Option<u8> {
    first_match(&*STATE_TIERS, text)
}

fn encode_query(term: Option<&str>, priority: Option<u8>, state: Option<u8>) -> String {
    let mut clauses = Vec::with_capacity(3);
    if let Some(term) = term {
        clauses.push(format!("{TEXT_QUERY_OPERATOR}={term}"));
    }
    if let Some(priority) = priority {
        clauses.push(format!("priority={priority}"));
    }
    if let Some(state) = state {
        clauses.push(format!("state={state}"));
    }
    clauses.join(&CLAUSE_SEPARATOR.to_string())
}
