//! Script reference interpreter: "update @util.js, it's a ui script" →
//! artifact name + script table.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, ParseResult};
use crate::rules::{compile, first_match};
use crate::types::{ScriptKind, ScriptRef};

static ARTIFACT_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([^\s,]+)").unwrap());

static KIND_PHRASES: LazyLock<[(Regex, ScriptKind); 9]> = LazyLock::new(|| {
    [
        (compile(r"\b(?i-u:script include)\b"), ScriptKind::ScriptInclude),
        (compile(r"\b(?i-u:business rule)\b"), ScriptKind::BusinessRule),
        (compile(r"\b(?i-u:client script)\b"), ScriptKind::ClientScript),
        (compile(r"\b(?i-u:ui script)\b"), ScriptKind::UiScript),
        (compile(r"\b(?i-u:ui action)\b"), ScriptKind::UiAction),
        (compile(r"\b(?i-u:ui page)\b"), ScriptKind::UiPage),
        (compile(r"\b(?i-u:ui macro)\b"), ScriptKind::UiMacro),
        (compile(r"\b(?i-u:scheduled job)\b"), ScriptKind::ScheduledJob),
        (compile(r"\b(?i-u:fix script)\b"), ScriptKind::FixScript),
    ]
});

/// Interpret a script command. The returned content is always empty; the
/// caller attaches the body with [`ScriptRef::with_content`].
pub fn interpret_script_reference(text: &str) -> ParseResult<ScriptRef> {
    let name = ARTIFACT_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ParseError::MissingArtifactName)?;

    let kind = detect_kind(text);
    tracing::debug!(name = %name, table = kind.table_name(), "interpreted script reference");

    Ok(ScriptRef {
        name,
        kind,
        content: String::new(),
    })
}

/// Kind named anywhere in the text, script include when none is.
pub fn detect_kind(text: &str) -> ScriptKind {
    first_match(&*KIND_PHRASES, text).unwrap_or_default()
}
