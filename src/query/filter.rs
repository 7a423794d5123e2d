use glob::Pattern;

/// Name prefix of order-only dependencies; such nodes are never stepped to
pub const ORDER_ONLY_MARKER: &str = "||";

pub fn is_order_only(name: &str) -> bool {
    name.starts_with(ORDER_ONLY_MARKER)
}

/// Caller-side node filter built from glob exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    excludes: Vec<Pattern>,
}

impl NameFilter {
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Parse exclusion globs. Invalid patterns are reported, not skipped.
    pub fn exclude<I, S>(patterns: I) -> Result<Self, glob::PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excludes = patterns
            .into_iter()
            .map(|p| Pattern::new(p.as_ref().trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { excludes })
    }

    /// Returns false if any exclusion pattern matches the name
    pub fn accepts(&self, name: &str) -> bool {
        !self.excludes.iter().any(|p| p.matches(name))
    }

    pub fn is_empty(&self) -> bool {
        self.excludes.is_empty()
    }
}
