//! Mock record API for testing — in-memory tables with call recording.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use sn_nlp::{CLAUSE_SEPARATOR, TEXT_QUERY_OPERATOR};

use crate::error::{AgentError, AgentResult};
use crate::record::{QueryOptions, Record, RecordApi};

/// Which trait method a recorded call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Get,
    Create,
    Update,
}

/// A recorded backend call.
#[derive(Debug, Clone)]
pub struct RecordCall {
    pub kind: CallKind,
    pub table: String,
    /// Encoded query for `Get`, `sys_id` for `Update`, empty for `Create`.
    pub target: String,
    /// Payload for `Create` / `Update`.
    pub data: Option<Record>,
}

/// In-memory implementation of `RecordApi`.
///
/// Encoded queries are evaluated clause by clause: `field=value` is an
/// equality filter on the string form of the field, and the text-query
/// clause matches rows with any string field containing the term
/// (case-insensitive). Thread-safe via `Mutex` (fine for test contexts).
pub struct MockRecordApi {
    tables: Mutex<HashMap<String, Vec<Record>>>,
    calls: Mutex<Vec<RecordCall>>,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a row, assigning a `sys_id` when it has none. Returns the `sys_id`.
    pub fn insert(&self, table: &str, row: Value) -> String {
        let mut record = match row {
            Value::Object(map) => map,
            _ => Record::new(),
        };
        let sys_id = match record.get("sys_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = new_sys_id();
                record.insert("sys_id".into(), Value::String(id.clone()));
                id
            }
        };
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record);
        sys_id
    }

    /// Create a mock seeded with a few rows in every table the shim targets.
    pub fn with_sample_data() -> Self {
        let m = Self::new();
        m.insert(
            "incident",
            json!({"sys_id": "a1", "number": "INC0010001", "short_description": "Email not syncing on mobile", "priority": "2", "state": "1"}),
        );
        m.insert(
            "incident",
            json!({"sys_id": "a2", "number": "INC0010002", "short_description": "SAP login failure", "priority": "1", "state": "2"}),
        );
        m.insert(
            "incident",
            json!({"sys_id": "a3", "number": "INC0010003", "short_description": "Printer jam on floor 3", "priority": "3", "state": "1"}),
        );
        m.insert(
            "problem",
            json!({"sys_id": "p1", "number": "PRB0040001", "short_description": "Recurring VPN drops", "priority": "2", "state": "1"}),
        );
        m.insert(
            "change_request",
            json!({"sys_id": "c1", "number": "CHG0030001", "short_description": "Firewall rule update", "priority": "3", "state": "1"}),
        );
        m.insert(
            "task",
            json!({"sys_id": "t1", "number": "TASK0000001", "short_description": "Replace badge reader", "state": "1"}),
        );
        m.insert(
            "sys_user",
            json!({"sys_id": "u1", "user_name": "admin", "name": "System Administrator"}),
        );
        m.insert(
            "sys_user_group",
            json!({"sys_id": "g1", "name": "Service Desk", "description": "First-line support"}),
        );
        m.insert(
            "sys_script_include",
            json!({"sys_id": "s1", "name": "my_script.js", "script": "var x = 1;"}),
        );
        m
    }

    /// All rows currently stored in `table`.
    pub fn rows(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<RecordCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls of one kind.
    pub fn calls_of(&self, kind: CallKind) -> Vec<RecordCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    /// Clear recorded calls (table contents are kept).
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record_call(&self, kind: CallKind, table: &str, target: &str, data: Option<Record>) {
        self.calls.lock().unwrap().push(RecordCall {
            kind,
            table: table.to_string(),
            target: target.to_string(),
            data,
        });
    }
}

impl Default for MockRecordApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn get_records(&self, table: &str, options: &QueryOptions) -> AgentResult<Vec<Record>> {
        self.record_call(CallKind::Get, table, &options.query, None);
        let tables = self.tables.lock().unwrap();
        let Some(rows) = tables.get(table) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .filter(|row| matches_query(row, &options.query))
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .cloned()
            .collect())
    }

    async fn create_record(&self, table: &str, data: Record) -> AgentResult<Record> {
        self.record_call(CallKind::Create, table, "", Some(data.clone()));
        let mut record = data;
        record.insert("sys_id".into(), Value::String(new_sys_id()));
        record.insert("sys_updated_on".into(), Value::String(timestamp()));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_record(&self, table: &str, sys_id: &str, data: Record) -> AgentResult<Record> {
        self.record_call(CallKind::Update, table, sys_id, Some(data.clone()));
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|r| r.get("sys_id").and_then(Value::as_str) == Some(sys_id))
            })
            .ok_or_else(|| AgentError::NotFound(format!("{table}/{sys_id}")))?;
        row.extend(data);
        row.insert("sys_updated_on".into(), Value::String(timestamp()));
        Ok(row.clone())
    }
}

fn new_sys_id() -> String {
    Uuid::now_v7().simple().to_string()
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn matches_query(row: &Record, query: &str) -> bool {
    query
        .split(CLAUSE_SEPARATOR)
        .filter(|clause| !clause.is_empty())
        .all(|clause| match clause.split_once('=') {
            Some((field, term)) if field == TEXT_QUERY_OPERATOR => {
                let term = term.to_lowercase();
                row.values()
                    .filter_map(Value::as_str)
                    .any(|v| v.to_lowercase().contains(&term))
            }
            Some((field, value)) => row.get(field).map(field_text).as_deref() == Some(value),
            None => true,
        })
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn equality_filter() {
        let api = MockRecordApi::with_sample_data();
        let rows = api
            .get_records("incident", &QueryOptions::new("number=INC0010002", 10))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["short_description"], "SAP login failure");
    }

    #[tokio::test]
    async fn text_query_is_case_insensitive() {
        let api = MockRecordApi::with_sample_data();
        let rows = api
            .get_records("incident", &QueryOptions::new("123TEXTQUERY321=EMAIL", 10))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["number"], "INC0010001");
    }

    #[tokio::test]
    async fn clauses_are_conjunctive() {
        let api = MockRecordApi::with_sample_data();
        let rows = api
            .get_records("incident", &QueryOptions::new("priority=3^state=1", 10))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["number"], "INC0010003");
    }

    #[tokio::test]
    async fn empty_query_honours_limit() {
        let api = MockRecordApi::with_sample_data();
        let rows = api
            .get_records("incident", &QueryOptions::new("", 2))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn unknown_table_is_empty() {
        let api = MockRecordApi::new();
        let rows = api
            .get_records("kb_knowledge", &QueryOptions::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let api = MockRecordApi::with_sample_data();
        let mut patch = Record::new();
        patch.insert("state".into(), json!(7));
        let row = api.update_record("incident", "a1", patch).await.unwrap();
        assert_eq!(row["state"], 7);
        assert_eq!(row["number"], "INC0010001");
        assert!(row.contains_key("sys_updated_on"));

        // Numeric values still match string-form equality filters.
        let rows = api
            .get_records("incident", &QueryOptions::new("state=7", 10))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_row_fails() {
        let api = MockRecordApi::with_sample_data();
        let result = api.update_record("incident", "zz", Record::new()).await;
        assert!(matches!(result, Err(AgentError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_assigns_sys_id_and_records_call() {
        let api = MockRecordApi::new();
        let mut data = Record::new();
        data.insert("name".into(), json!("new.js"));
        let row = api.create_record("sys_script", data).await.unwrap();
        assert!(row["sys_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(api.rows("sys_script").len(), 1);

        let creates = api.calls_of(CallKind::Create);
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].table, "sys_script");
        api.reset_calls();
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn find_by_field_returns_first() {
        let api = MockRecordApi::with_sample_data();
        let row = api
            .find_by_field("sys_user", "user_name", "admin")
            .await
            .unwrap();
        assert_eq!(row.unwrap()["sys_id"], "u1");
        let missing = api
            .find_by_field("sys_user", "user_name", "nobody")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
