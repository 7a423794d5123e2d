use crate::error::{Result, TravlogError};
use crate::graph::NodeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Line prefix of a registry entry in the serialized cache
pub const SIGIL: &str = "id";
/// Separator between id and name
pub const SEP: char = '^';

/// Bidirectional name <-> id map. Ever-growing; an inserted name keeps its id.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    name_to_id: HashMap<String, NodeId>,
    id_to_name: BTreeMap<NodeId, String>,
    /// Next id to assign
    counter: usize,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, minting one only if the name is new.
    pub fn insert(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = NodeId(self.counter);
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.insert(id, name.to_string());
        self.counter += 1;
        id
    }

    pub fn lookup_id(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    pub fn lookup_name(&self, id: NodeId) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.id_to_name.iter().map(|(&id, name)| (id, name.as_str()))
    }

    /// Rebuilds a registry from `id <n> ^ <name>` lines, skipping everything else.
    ///
    /// Only the single space written after the separator is stripped, so names
    /// keep any leading or trailing whitespace.
    pub fn from_repr(text: &str) -> Result<Self> {
        let mut registry = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let Some(rest) = line.strip_prefix(SIGIL).filter(|r| r.starts_with(' ')) else {
                continue;
            };
            let malformed = |reason: &str| TravlogError::CacheFormat {
                line: lineno + 1,
                reason: reason.to_string(),
            };
            let (id_str, name) = rest
                .split_once(SEP)
                .ok_or_else(|| malformed("missing separator in name entry"))?;
            let id = id_str
                .trim()
                .parse::<usize>()
                .map(NodeId)
                .map_err(|e| malformed(&format!("bad node id: {e}")))?;
            let raw = name.strip_prefix(' ').unwrap_or(name);
            let name = unescape(raw).ok_or_else(|| malformed("bad escape in name"))?;
            registry.name_to_id.insert(name.clone(), id);
            registry.id_to_name.insert(id, name);
            registry.counter = registry.counter.max(id.0 + 1);
        }
        Ok(registry)
    }
}

/// Backslash-escapes characters that would break the one-entry-per-line layout.
fn escape(name: &str) -> Cow<'_, str> {
    if !name.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(name);
    }
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(out)
}

impl fmt::Display for NameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, name) in self.iter() {
            writeln!(f, "{SIGIL} {id} {SEP} {}", escape(name))?;
        }
        Ok(())
    }
}
