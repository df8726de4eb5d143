// Namespace references: alias/bucket[/prefix]

use std::fmt;

use crate::settings::ConfigError;

/// A namespace named the way the storage client names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRef {
    pub alias: String,
    pub bucket: String,
    /// Key prefix inside the bucket. Empty means the whole bucket.
    pub prefix: String,
}

impl NamespaceRef {
    /// Parse `alias/bucket` or `alias/bucket/some/prefix`.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut parts = input.splitn(3, '/');
        let alias = parts.next().unwrap_or("");
        let bucket = parts.next().unwrap_or("");
        let prefix = parts.next().unwrap_or("");

        if alias.is_empty() || bucket.is_empty() {
            return Err(ConfigError::InvalidNamespace(input.to_string()));
        }

        Ok(Self {
            alias: alias.to_string(),
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

impl fmt::Display for NamespaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}/{}", self.alias, self.bucket)
        } else {
            write!(f, "{}/{}/{}", self.alias, self.bucket, self.prefix)
        }
    }
}
