//! Agent configuration, loadable from TOML or environment.

use std::path::Path;

use serde::Deserialize;

use crate::error::{AgentError, AgentResult};

/// How the binary formats its own log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    fn parse(s: &str) -> AgentResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "plain" => Ok(Self::Text),
            other => Err(AgentError::Config(format!("unknown log format: {other}"))),
        }
    }
}

/// Top-level configuration for the agent binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Backend instance URL, echoed in output for traceability.
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Pretty-print JSON results.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_pretty() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            instance_url: None,
            pretty: default_pretty(),
            log_format: LogFormat::default(),
        }
    }
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from environment variables:
    /// `SERVICENOW_INSTANCE_URL`, `SN_AGENT_PRETTY`, `SN_AGENT_LOG_FORMAT`.
    pub fn from_env() -> AgentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AgentResult<Self> {
        let mut config = Self {
            instance_url: lookup("SERVICENOW_INSTANCE_URL").filter(|v| !v.is_empty()),
            ..Self::default()
        };
        if let Some(v) = lookup("SN_AGENT_PRETTY") {
            config.pretty = v.eq_ignore_ascii_case("true") || v == "1";
        }
        if let Some(v) = lookup("SN_AGENT_LOG_FORMAT") {
            config.log_format = LogFormat::parse(&v)?;
        }
        Ok(config)
    }
}
