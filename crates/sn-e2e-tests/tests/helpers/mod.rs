//! Shared harness for end-to-end tests.
//!
//! Wraps a seeded `MockRecordApi` so each test drives the real planner and
//! service code paths and then inspects what reached the backend.

#![allow(dead_code)]

use serde_json::Value;

use sn_agent::mock::{CallKind, RecordCall};
use sn_agent::{AgentResult, MockRecordApi, NaturalLanguageService, Record};

pub struct TestHarness {
    pub api: MockRecordApi,
}

impl TestHarness {
    /// Backend seeded with INC0010001..3, PRB0040001, CHG0030001,
    /// TASK0000001, one user, one group and `my_script.js`.
    pub fn with_sample_data() -> Self {
        Self {
            api: MockRecordApi::with_sample_data(),
        }
    }

    pub fn service(&self) -> NaturalLanguageService<'_> {
        NaturalLanguageService::new(&self.api)
    }

    pub async fn search(&self, text: &str) -> AgentResult<Vec<Record>> {
        self.service().search(text).await
    }

    pub async fn update(&self, text: &str) -> AgentResult<Record> {
        self.service().update(text).await
    }

    /// The single row of `table` whose `number` is `number`.
    pub fn row(&self, table: &str, number: &str) -> Record {
        self.api
            .rows(table)
            .into_iter()
            .find(|r| r.get("number").and_then(Value::as_str) == Some(number))
            .unwrap_or_else(|| panic!("{table} {number} missing from sample data"))
    }

    pub fn last_call(&self, kind: CallKind) -> RecordCall {
        self.api
            .calls_of(kind)
            .pop()
            .unwrap_or_else(|| panic!("no {kind:?} call recorded"))
    }
}
