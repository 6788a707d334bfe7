//! Maps interpreter output to concrete record requests.
//!
//! Applies the collaborator rules to each interpreted value: collections and
//! script kinds become literal table names, encoded queries are forwarded
//! verbatim, and record numbers are routed to the table their prefix names.

use serde::{Deserialize, Serialize};

use sn_nlp::{
    ParseError, ScriptRef, SearchSpec, UpdateFields, UpdateSpec, interpret_script_reference,
    interpret_search, interpret_update,
};

use crate::error::AgentResult;

/// Which interpreter a sentence goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Search,
    Update,
    Script,
}

/// A backend request ready to execute (or to print in a dry run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RecordRequest {
    /// Query rows of `table` with an encoded filter.
    Query {
        table: String,
        query: String,
        limit: u32,
    },
    /// Look up `number` in `table`, then patch that row with `fields`.
    UpdateByNumber {
        table: String,
        number: String,
        fields: UpdateFields,
    },
    /// Create or update the script named `name` in `table`.
    UpsertScript {
        table: String,
        name: String,
        script: String,
    },
}

impl RecordRequest {
    /// Backend table the request targets.
    pub fn table(&self) -> &str {
        match self {
            Self::Query { table, .. }
            | Self::UpdateByNumber { table, .. }
            | Self::UpsertScript { table, .. } => table,
        }
    }
}

impl From<SearchSpec> for RecordRequest {
    fn from(spec: SearchSpec) -> Self {
        Self::Query {
            table: spec.collection.table_name().to_string(),
            query: spec.query,
            limit: spec.limit,
        }
    }
}

impl TryFrom<UpdateSpec> for RecordRequest {
    type Error = ParseError;

    fn try_from(spec: UpdateSpec) -> Result<Self, Self::Error> {
        let prefix = spec.prefix().ok_or(ParseError::MissingRecordId)?;
        Ok(Self::UpdateByNumber {
            table: prefix.table_name().to_string(),
            number: spec.record_id,
            fields: spec.fields,
        })
    }
}

impl From<ScriptRef> for RecordRequest {
    fn from(script: ScriptRef) -> Self {
        Self::UpsertScript {
            table: script.kind.table_name().to_string(),
            name: script.name,
            script: script.content,
        }
    }
}

pub fn plan_search(text: &str) -> RecordRequest {
    interpret_search(text).into()
}

pub fn plan_update(text: &str) -> AgentResult<RecordRequest> {
    let spec = interpret_update(text)?;
    Ok(RecordRequest::try_from(spec)?)
}

/// Plan a script upsert, attaching `content` as the script body.
pub fn plan_script(text: &str, content: &str) -> AgentResult<RecordRequest> {
    let script = interpret_script_reference(text)?.with_content(content);
    Ok(script.into())
}

/// Plan any command kind. `content` is only used for scripts.
pub fn plan(kind: CommandKind, text: &str, content: &str) -> AgentResult<RecordRequest> {
    match kind {
        CommandKind::Search => Ok(plan_search(text)),
        CommandKind::Update => plan_update(text),
        CommandKind::Script => plan_script(text, content),
    }
}
