//! Update interpreter: free text → record number + field changes.
//!
//! Steps, each reading only the original text:
//! 1. record number (`INC`, `PRB`, `CHG`, `TASK` + digits), mandatory;
//! 2. target state from an ordered tier table;
//! 3. a comment or work note;
//! 4. a resolution note, only when step 2 produced a terminal state.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, ParseResult};
use crate::rules::{capture_trimmed, compile, first_match};
use crate::types::{CLOSE_CODE, RecordState, UpdateFields, UpdateSpec};

static RECORD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i-u:INC|PRB|CHG|TASK)[0-9]+"));

// In-progress wins over close, and an explicit close wins over any
// resolve/fix wording in the same sentence.
static STATE_TIERS: LazyLock<[(Regex, u8); 3]> = LazyLock::new(|| {
    [
        (
            compile(r"\b(?i-u:working on|in progress|assign)\b"),
            RecordState::IN_PROGRESS,
        ),
        (compile(r"\b(?i-u:close|closed)\b"), RecordState::CLOSED),
        (
            compile(r"\b(?i-u:resolve|resolved|fix|fixed)\b"),
            RecordState::RESOLVED,
        ),
    ]
});

// Marker, optional plural and colon, then text up to a sentence end. The end
// of input may carry one trailing newline.
static NOTE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i-u:(?:saying|comment|note|with comment|with note)s?)\s*:?\s*(.+?)(?:\n?\z|\.(?:\s|\z))",
    )
});

static WORK_NOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?i-u:work note|internal|private)\b"));

static RESOLUTION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i-u:(?:with resolution|resolution|close note|resolve with)s?)\s*:?\s*(.+?)(?:\n?\z|\.(?:\s|\z))",
    )
});

/// Interpret an update command.
///
/// Fails only when the text carries no record number.
pub fn interpret_update(text: &str) -> ParseResult<UpdateSpec> {
    let record_id = extract_record_id(text).ok_or(ParseError::MissingRecordId)?;

    let mut fields = UpdateFields {
        state: detect_state(text),
        ..Default::default()
    };

    if let Some(note) = capture_trimmed(&NOTE_PHRASE, text) {
        if WORK_NOTE_MARKER.is_match(text) {
            fields.work_notes = Some(note.to_string());
        } else {
            fields.comments = Some(note.to_string());
        }
    }

    if let Some(state) = fields.state
        && RecordState::is_terminal(state)
        && let Some(resolution) = capture_trimmed(&RESOLUTION_PHRASE, text)
    {
        fields.close_notes = Some(resolution.to_string());
        fields.close_code = Some(CLOSE_CODE.to_string());
    }

    tracing::debug!(
        record = %record_id,
        state = ?fields.state,
        comment = fields.comments.is_some(),
        work_note = fields.work_notes.is_some(),
        close_note = fields.close_notes.is_some(),
        "interpreted update"
    );

    Ok(UpdateSpec { record_id, fields })
}

/// First record number in the text, upper-cased.
pub fn extract_record_id(text: &str) -> Option<String> {
    RECORD_NUMBER
        .find(text)
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Target state implied by the wording, if any.
pub fn detect_state(text: &str) -> Option<u8> {
    first_match(&*STATE_TIERS, text)
}
