use std::collections::HashSet;

use serde::Deserialize;

/// Construction parameters of a [`PojoConvertor`](crate::PojoConvertor).
///
/// Deserializable so that a codec configuration file can carry it:
///
/// ```toml
/// excluded = ["password"]
/// from_json = false
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertorOptions {
    /// Property names left out of both the read and the write path.
    #[serde(default)]
    pub excluded: HashSet<String>,

    /// Enables the write path. A read-only convertor rejects `from_json`.
    #[serde(default = "default_from_json")]
    pub from_json: bool,
}

fn default_from_json() -> bool {
    true
}

impl Default for ConvertorOptions {
    fn default() -> Self {
        Self {
            excluded: HashSet::new(),
            from_json: default_from_json(),
        }
    }
}

impl ConvertorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn from_json(mut self, enabled: bool) -> Self {
        self.from_json = enabled;
        self
    }

    pub fn is_excluded(&self, property: &str) -> bool {
        self.excluded.contains(property)
    }
}
