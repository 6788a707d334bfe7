//! Record API abstraction — the backend table API the shim forwards to.
//!
//! Transport and authentication live behind this trait; the shim only needs
//! table-level query, create and update. `MockRecordApi` implements it for
//! tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentResult;

/// One backend row as a JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Paging and filter options for `get_records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Encoded query, forwarded verbatim. Empty means no filter.
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    10
}

impl QueryOptions {
    pub fn new(query: impl Into<String>, limit: u32) -> Self {
        Self {
            query: query.into(),
            limit,
            offset: 0,
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new("", default_limit())
    }
}

/// Table-oriented record API.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Rows of `table` matching the options.
    async fn get_records(&self, table: &str, options: &QueryOptions) -> AgentResult<Vec<Record>>;

    /// Insert a row and return it as stored (with its `sys_id`).
    async fn create_record(&self, table: &str, data: Record) -> AgentResult<Record>;

    /// Patch the row identified by `sys_id` and return it as stored.
    async fn update_record(&self, table: &str, sys_id: &str, data: Record) -> AgentResult<Record>;

    /// First row whose `field` equals `value`.
    async fn find_by_field(
        &self,
        table: &str,
        field: &str,
        value: &str,
    ) -> AgentResult<Option<Record>> {
        let options = QueryOptions::new(format!("{field}={value}"), 1);
        let rows = self.get_records(table, &options).await?;
        Ok(rows.into_iter().next())
    }
}
