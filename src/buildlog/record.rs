use crate::error::{Result, TravlogError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Rule kinds whose records describe real file dependencies: C and C++
/// compiles, executable links, shared-object links and static archives.
pub const DEFAULT_RULES: &[&str] = &["cc", "cxx", "link", "solink", "alink"];

/// One compiler or linker invocation from the build log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationRecord {
    #[serde(default)]
    pub rule: String,
    pub output: String,
    pub inputs: Vec<String>,
    /// Headers discovered during compilation, folded into the inputs
    #[serde(default)]
    pub headers: Vec<String>,
}

/// A build log element, kept as raw JSON until its rule is accepted.
///
/// Only `rule` is read up front, so records of unrelated rules never need to
/// match the [`CompilationRecord`] shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Value);

impl LogEntry {
    /// The `rule` string, or `""` when absent or not a string
    pub fn rule(&self) -> &str {
        self.0.get("rule").and_then(Value::as_str).unwrap_or_default()
    }

    /// Validate and type the entry. `index` is 1-based and only used in errors.
    pub fn to_record(&self, index: usize) -> Result<CompilationRecord> {
        for key in ["inputs", "output"] {
            if self.0.get(key).map_or(true, Value::is_null) {
                return Err(TravlogError::MalformedRecord { index, missing: key });
            }
        }
        CompilationRecord::deserialize(&self.0).map_err(|e| TravlogError::InvalidRecord {
            index,
            reason: e.to_string(),
        })
    }
}

impl From<Value> for LogEntry {
    fn from(value: Value) -> Self {
        LogEntry(value)
    }
}

impl From<CompilationRecord> for LogEntry {
    fn from(record: CompilationRecord) -> Self {
        LogEntry(json!({
            "rule": record.rule,
            "output": record.output,
            "inputs": record.inputs,
            "headers": record.headers,
        }))
    }
}

/// Parse the raw log bytes as a JSON array of entries.
pub fn parse_log(bytes: &[u8]) -> Result<Vec<LogEntry>> {
    serde_json::from_slice(bytes).map_err(|e| TravlogError::LogParse {
        reason: e.to_string(),
    })
}

/// Accepts a record only if its rule is on the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFilter {
    rules: Vec<String>,
}

impl RuleFilter {
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| r == rule)
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}

impl Default for RuleFilter {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.iter().copied())
    }
}
