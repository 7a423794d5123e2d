pub mod builder;
pub mod record;

pub use builder::build_graph;
pub use record::{parse_log, CompilationRecord, LogEntry, RuleFilter, DEFAULT_RULES};
