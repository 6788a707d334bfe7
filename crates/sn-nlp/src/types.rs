//! Value types produced by the interpreters.
//!
//! Everything here is built fresh from one input string and never mutated
//! afterwards. Serialized names follow the backend's table and field names so
//! callers can forward the values without remapping.

use serde::{Deserialize, Serialize};

/// Operator used by the backend for full-text matching in encoded queries.
pub const TEXT_QUERY_OPERATOR: &str = "123TEXTQUERY321";

/// Separator between clauses of an encoded query.
pub const CLAUSE_SEPARATOR: char = '^';

/// Result limit attached to every interpreted search.
pub const SEARCH_LIMIT: u32 = 10;

/// Close code set alongside a resolution note.
pub const CLOSE_CODE: &str = "Solved (Permanently)";

// ── Search ────────────────────────────────────────────────────

/// Record collection a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Collection {
    #[default]
    #[serde(rename = "incident")]
    Incident,
    #[serde(rename = "problem")]
    Problem,
    #[serde(rename = "change_request")]
    ChangeRequest,
    #[serde(rename = "task")]
    Task,
    #[serde(rename = "sys_user")]
    User,
    #[serde(rename = "sys_user_group")]
    Group,
}

impl Collection {
    /// Backend table holding this collection.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Incident => "incident",
            Self::Problem => "problem",
            Self::ChangeRequest => "change_request",
            Self::Task => "task",
            Self::User => "sys_user",
            Self::Group => "sys_user_group",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Interpreted search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Target collection (incident when the text names none).
    #[serde(rename = "table")]
    pub collection: Collection,
    /// Encoded filter: text, priority and state clauses joined by `^`.
    /// Empty means no filter.
    pub query: String,
    /// Maximum rows to return.
    pub limit: u32,
}

// ── Update ────────────────────────────────────────────────────

/// Numeric record states written by update commands.
pub struct RecordState;

impl RecordState {
    pub const NEW: u8 = 1;
    pub const IN_PROGRESS: u8 = 2;
    pub const RESOLVED: u8 = 6;
    pub const CLOSED: u8 = 7;

    /// Whether `state` ends the record lifecycle (eligible for close notes).
    pub fn is_terminal(state: u8) -> bool {
        state == Self::RESOLVED || state == Self::CLOSED
    }
}

/// Field changes extracted from an update command.
///
/// Unset fields are left out of the serialized map entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<u8>,
    /// Customer-visible comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Internal work note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_code: Option<String>,
}

impl UpdateFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Interpreted update command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSpec {
    /// Upper-cased record number, e.g. `INC0010001`.
    pub record_id: String,
    pub fields: UpdateFields,
}

impl UpdateSpec {
    /// Record type implied by the number prefix.
    pub fn prefix(&self) -> Option<RecordPrefix> {
        RecordPrefix::of(&self.record_id)
    }
}

/// Record-number prefixes the update interpreter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordPrefix {
    Inc,
    Prb,
    Chg,
    Task,
}

impl RecordPrefix {
    /// Prefix of an upper-cased record number.
    pub fn of(record_id: &str) -> Option<Self> {
        [Self::Inc, Self::Prb, Self::Chg, Self::Task]
            .into_iter()
            .find(|p| record_id.starts_with(p.as_str()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inc => "INC",
            Self::Prb => "PRB",
            Self::Chg => "CHG",
            Self::Task => "TASK",
        }
    }

    /// Backend table holding records with this prefix.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Inc => "incident",
            Self::Prb => "problem",
            Self::Chg => "change_request",
            Self::Task => "task",
        }
    }
}

// ── Script ────────────────────────────────────────────────────

/// Kind of script-like artifact, named after its backend table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScriptKind {
    #[default]
    #[serde(rename = "sys_script_include")]
    ScriptInclude,
    #[serde(rename = "sys_script")]
    BusinessRule,
    #[serde(rename = "sys_script_client")]
    ClientScript,
    #[serde(rename = "sys_ui_script")]
    UiScript,
    #[serde(rename = "sys_ui_action")]
    UiAction,
    #[serde(rename = "sys_ui_page")]
    UiPage,
    #[serde(rename = "sys_ui_macro")]
    UiMacro,
    #[serde(rename = "sysauto_script")]
    ScheduledJob,
    #[serde(rename = "sys_script_fix")]
    FixScript,
}

impl ScriptKind {
    /// Backend table the artifact lives in.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::ScriptInclude => "sys_script_include",
            Self::BusinessRule => "sys_script",
            Self::ClientScript => "sys_script_client",
            Self::UiScript => "sys_ui_script",
            Self::UiAction => "sys_ui_action",
            Self::UiPage => "sys_ui_page",
            Self::UiMacro => "sys_ui_macro",
            Self::ScheduledJob => "sysauto_script",
            Self::FixScript => "sys_script_fix",
        }
    }
}

impl std::fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Interpreted reference to a script artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    /// Artifact name with the `@` marker stripped.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScriptKind,
    /// Script body. Always empty from the interpreter.
    pub content: String,
}

impl ScriptRef {
    /// Attach the script body supplied by the caller.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}
