pub mod buildlog;
pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod hasher;
pub mod query;
pub mod report;
pub mod session;

pub use error::{Result, TravlogError};
pub use graph::{BuildGraph, NodeId};
pub use query::{Direction, NameFilter};
