//! Interpreters are pure: same input, same output, from any thread.

use std::thread;

use sn_nlp::{interpret_script_reference, interpret_search, interpret_update};

const SEARCHES: [&str; 4] = [
    "find all incidents about email",
    "show me all incidents with high priority",
    "list closed problems regarding storage. ignore the rest",
    "nothing to see",
];

const UPDATES: [&str; 4] = [
    "Update incident INC0010001 saying I'm working on it",
    "Close incident INC0010002 with resolution: fixed the issue",
    "Update incident INC0010003 with work note: internal troubleshooting steps",
    "no identifier here",
];

const SCRIPTS: [&str; 3] = [
    "update @my_script.js, it's a script include",
    "update @validation.js, it's a business rule",
    "no marker",
];

#[test]
fn repeated_calls_agree() {
    for text in SEARCHES {
        assert_eq!(interpret_search(text), interpret_search(text), "{text}");
    }
    for text in UPDATES {
        assert_eq!(interpret_update(text), interpret_update(text), "{text}");
    }
    for text in SCRIPTS {
        assert_eq!(
            interpret_script_reference(text),
            interpret_script_reference(text),
            "{text}"
        );
    }
}

#[test]
fn concurrent_calls_agree() {
    let expected_search: Vec<_> = SEARCHES.iter().map(|t| interpret_search(t)).collect();
    let expected_update: Vec<_> = UPDATES.iter().map(|t| interpret_update(t)).collect();
    let expected_script: Vec<_> = SCRIPTS
        .iter()
        .map(|t| interpret_script_reference(t))
        .collect();

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..50 {
                    let search: Vec<_> = SEARCHES.iter().map(|t| interpret_search(t)).collect();
                    let update: Vec<_> = UPDATES.iter().map(|t| interpret_update(t)).collect();
                    let script: Vec<_> = SCRIPTS
                        .iter()
                        .map(|t| interpret_script_reference(t))
                        .collect();
                    assert_eq!(search, expected_search);
                    assert_eq!(update, expected_update);
                    assert_eq!(script, expected_script);
                }
            });
        }
    });
}

#[test]
fn failures_are_all_or_nothing() {
    assert!(interpret_update(UPDATES[3]).is_err());
    assert!(interpret_script_reference(SCRIPTS[2]).is_err());
    let spec = interpret_search(SEARCHES[3]);
    assert_eq!(spec.query, "");
    assert_eq!(spec.collection.table_name(), "incident");
}
