pub mod descriptor;

pub use descriptor::{CacheDescriptor, ContentHash, GRAPH_BUILDER_VERSION};
