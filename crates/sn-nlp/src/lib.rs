//! Natural-language interpretation for service-desk commands.
//!
//! Turns operator sentences into the structured parameters the record API
//! expects:
//! - [`interpret_search`]: free text → table, encoded query, result limit.
//! - [`interpret_update`]: free text → record number + field updates.
//! - [`interpret_script_reference`]: free text → artifact name + script table.
//!
//! Every interpreter is a pure function of its input. Precedence between
//! competing phrases lives in the ordered tables of [`rules`] and the
//! per-interpreter statics, never in the call order of ad-hoc conditionals.

pub mod error;
pub mod rules;
pub mod script;
pub mod search;
pub mod types;
pub mod update;

pub use error::{ParseError, ParseResult};
pub use script::interpret_script_reference;
pub use search::interpret_search;
pub use types::*;
pub use update::interpret_update;
