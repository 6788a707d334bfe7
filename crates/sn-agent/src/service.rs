//! Natural-language service — interprets a sentence and forwards the
//! resulting request to the record API.
//!
//! The interpreters are pure, so any call here can be retried after a
//! backend failure without cleanup.

use serde_json::Value;

use sn_nlp::interpret_script_reference;

use crate::error::{AgentError, AgentResult};
use crate::plan::{self, RecordRequest};
use crate::record::{QueryOptions, Record, RecordApi};

/// Executes natural-language commands against a record API.
pub struct NaturalLanguageService<'a> {
    api: &'a dyn RecordApi,
}

impl<'a> NaturalLanguageService<'a> {
    pub fn new(api: &'a dyn RecordApi) -> Self {
        Self { api }
    }

    /// "find all incidents about email" → matching rows.
    pub async fn search(&self, text: &str) -> AgentResult<Vec<Record>> {
        tracing::info!(text, "natural language search");
        let request = plan::plan_search(text);
        let Value::Array(rows) = self.execute(&request).await? else {
            return Err(AgentError::Backend("query did not return rows".into()));
        };
        rows.into_iter().map(into_record).collect()
    }

    /// "Close INC0010002 with resolution: fixed" → the updated row.
    pub async fn update(&self, text: &str) -> AgentResult<Record> {
        tracing::info!(text, "natural language update");
        let request = plan::plan_update(text)?;
        into_record(self.execute(&request).await?)
    }

    /// "update @util.js, it's a ui script" + body → the created or updated row.
    pub async fn update_script(
        &self,
        text: &str,
        content: &str,
        description: Option<&str>,
    ) -> AgentResult<Record> {
        tracing::info!(text, "script update");
        let script = interpret_script_reference(text)?;
        self.upsert_script(script.kind.table_name(), &script.name, content, description)
            .await
    }

    /// Run a planned request.
    ///
    /// Queries return a JSON array of rows; updates and upserts return the
    /// stored row as a JSON object.
    pub async fn execute(&self, request: &RecordRequest) -> AgentResult<Value> {
        match request {
            RecordRequest::Query {
                table,
                query,
                limit,
            } => {
                tracing::info!(table = %table, query = %query, limit, "querying records");
                let rows = self
                    .api
                    .get_records(table, &QueryOptions::new(query.clone(), *limit))
                    .await?;
                tracing::info!(table = %table, count = rows.len(), "query complete");
                Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
            }
            RecordRequest::UpdateByNumber {
                table,
                number,
                fields,
            } => {
                let row = self
                    .api
                    .find_by_field(table, "number", number)
                    .await?
                    .ok_or_else(|| AgentError::NotFound(format!("{table} {number}")))?;
                let sys_id = sys_id_of(&row)?;
                let data = into_record(
                    serde_json::to_value(fields).map_err(|e| AgentError::Backend(e.to_string()))?,
                )?;
                tracing::info!(table = %table, number = %number, sys_id = %sys_id, ?fields, "updating record");
                let updated = self.api.update_record(table, &sys_id, data).await?;
                Ok(Value::Object(updated))
            }
            RecordRequest::UpsertScript {
                table,
                name,
                script,
            } => self
                .upsert_script(table, name, script, None)
                .await
                .map(Value::Object),
        }
    }

    async fn upsert_script(
        &self,
        table: &str,
        name: &str,
        script: &str,
        description: Option<&str>,
    ) -> AgentResult<Record> {
        let mut data = Record::new();
        data.insert("script".into(), Value::String(script.to_string()));
        if let Some(description) = description {
            data.insert("description".into(), Value::String(description.to_string()));
        }

        match self.api.find_by_field(table, "name", name).await? {
            Some(existing) => {
                let sys_id = sys_id_of(&existing)?;
                tracing::info!(table, name, sys_id = %sys_id, "updating existing script");
                self.api.update_record(table, &sys_id, data).await
            }
            None => {
                tracing::info!(table, name, "script not found, creating");
                data.insert("name".into(), Value::String(name.to_string()));
                self.api.create_record(table, data).await
            }
        }
    }
}

fn sys_id_of(row: &Record) -> AgentResult<String> {
    row.get("sys_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AgentError::Backend("record has no sys_id".into()))
}

fn into_record(value: Value) -> AgentResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AgentError::Backend(format!(
            "expected a record object, got {other}"
        ))),
    }
}
