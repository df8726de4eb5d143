// Configuration loading

pub mod namespace;
pub mod settings;

pub use namespace::NamespaceRef;
pub use settings::{AliasConfig, ConfigError, Settings};
