//! Turn a namespace argument into a loaded listing.

use std::path::Path;

use bucketlens_config::{NamespaceRef, Settings};
use bucketlens_recon::{FileListing, ListingProvider, VersionedRecord};

use crate::exit_codes::{config_exit_code, EXIT_LISTING};
use crate::CliError;

/// A namespace ready to enumerate.
pub struct ResolvedNamespace {
    pub label: String,
    pub listing: FileListing,
    pub prefix: String,
}

impl ResolvedNamespace {
    /// Enumerate the namespace in full. Any failure aborts the command.
    pub fn load(&self) -> Result<Vec<VersionedRecord>, CliError> {
        self.listing.list(&self.prefix).map_err(|e| {
            CliError::new(EXIT_LISTING, e.to_string())
                .with_hint(format!("while enumerating {}", self.label))
        })
    }
}

/// An existing file is loaded directly; anything else must be
/// `alias/bucket[/prefix]` resolvable through the settings.
pub fn resolve(
    arg: &str,
    prefix_override: Option<&str>,
    settings: &Settings,
) -> Result<ResolvedNamespace, CliError> {
    if arg.trim().is_empty() {
        return Err(CliError::args("namespace argument is empty"));
    }

    let path = Path::new(arg);
    if path.is_file() {
        let listing = FileListing::open(path).map_err(|e| CliError::new(EXIT_LISTING, e.to_string()))?;
        let prefix = prefix_override.unwrap_or("").to_string();
        tracing::debug!(
            listing = %listing.path().display(),
            format = ?listing.format(),
            prefix = %prefix,
            "using listing file"
        );
        return Ok(ResolvedNamespace {
            label: arg.to_string(),
            listing,
            prefix,
        });
    }

    let ns = NamespaceRef::parse(arg).map_err(|e| {
        CliError::new(config_exit_code(&e), e.to_string())
            .with_hint("pass a listing file, or alias/bucket[/prefix] with the alias defined in settings")
    })?;

    let listing_path = settings.resolve(&ns).map_err(|e| {
        let hint = format!("define [aliases.{}] with a listing_dir in the settings file", ns.alias);
        CliError::new(config_exit_code(&e), e.to_string()).with_hint(hint)
    })?;

    let listing = FileListing::open(&listing_path).map_err(|e| CliError::new(EXIT_LISTING, e.to_string()))?;
    let prefix = prefix_override.unwrap_or(&ns.prefix).to_string();
    tracing::debug!(
        namespace = %ns,
        listing = %listing_path.display(),
        prefix = %prefix,
        "resolved namespace"
    );

    Ok(ResolvedNamespace {
        label: ns.to_string(),
        listing,
        prefix,
    })
}
