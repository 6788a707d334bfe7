//! Service-desk shim library.
//!
//! Bridges operator sentences and the record API:
//! - `plan`: runs the `sn-nlp` interpreters and maps their output onto
//!   concrete record requests (table names, encoded queries).
//! - `service`: executes those requests against any `RecordApi`.
//! - `mock`: in-memory `RecordApi` used by tests and `--demo`.

pub mod config;
pub mod error;
pub mod mock;
pub mod plan;
pub mod record;
pub mod service;

pub use error::{AgentError, AgentResult};
pub use mock::MockRecordApi;
pub use plan::{CommandKind, RecordRequest};
pub use record::{QueryOptions, Record, RecordApi};
pub use service::NaturalLanguageService;
