use sha2::{Digest, Sha256};
use std::fmt;

/// Version of the graph builder and cache layout. Bump whenever either
/// changes meaning, so caches written by older builds are discarded.
pub const GRAPH_BUILDER_VERSION: &str = "travlogs-g2";

/// SHA-256 digest of the raw build log bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({}..)", &self.to_hex()[..8])
    }
}

/// Builder version paired with the log's content hash.
///
/// A persisted graph is reused only when its stored token equals
/// [`CacheDescriptor::token`] exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDescriptor {
    pub builder_version: String,
    pub content_hash: ContentHash,
}

impl CacheDescriptor {
    pub fn new(builder_version: impl Into<String>, content_hash: ContentHash) -> Self {
        Self {
            builder_version: builder_version.into(),
            content_hash,
        }
    }

    /// Descriptor for `log_bytes` under the current builder version
    pub fn for_log(log_bytes: &[u8]) -> Self {
        Self::new(GRAPH_BUILDER_VERSION, ContentHash::of(log_bytes))
    }

    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.builder_version, self.content_hash)
    }
}
