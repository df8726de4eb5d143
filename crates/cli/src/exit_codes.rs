//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                   |
//! |------|-----------|-----------------------------------------------|
//! | 0    | Universal | Success (compare: every entry identical)      |
//! | 1    | compare   | Differences or missing objects found          |
//! | 2    | Universal | CLI usage error (bad args)                    |
//! | 3    | listing   | Listing export unreadable or malformed        |
//! | 4    | config    | Settings file unreadable or invalid           |
//! | 5    | namespace | Namespace reference cannot be resolved        |
//! | 6    | output    | Report could not be serialized or written     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use bucketlens_config::ConfigError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
/// clap exits with the same code for its own parse errors.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Compare
// =============================================================================

/// Compare found differences. Like `diff(1)`, exit 1 means "listings differ."
pub const EXIT_DIFFS: u8 = 1;

// =============================================================================
// Inputs (3-5)
// =============================================================================

/// A listing export could not be read or parsed, or the storage client
/// recorded an error while producing it.
pub const EXIT_LISTING: u8 = 3;

/// Settings file unreadable, malformed, or failing validation.
pub const EXIT_CONFIG: u8 = 4;

/// Namespace argument is neither an existing file nor a resolvable
/// `alias/bucket[/prefix]`.
pub const EXIT_NAMESPACE: u8 = 5;

// =============================================================================
// Output
// =============================================================================

/// The JSON report could not be serialized or written to `--output`.
pub const EXIT_OUTPUT: u8 = 6;

/// Map a ConfigError to its exit code.
pub fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Io { .. } | ConfigError::Parse(_) | ConfigError::Validation(_) => EXIT_CONFIG,
        ConfigError::UnknownAlias(_)
        | ConfigError::InvalidNamespace(_)
        | ConfigError::ListingNotFound { .. } => EXIT_NAMESPACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_split_between_config_and_namespace() {
        assert_eq!(config_exit_code(&ConfigError::Parse("x".into())), EXIT_CONFIG);
        assert_eq!(config_exit_code(&ConfigError::Validation("x".into())), EXIT_CONFIG);
        assert_eq!(config_exit_code(&ConfigError::UnknownAlias("x".into())), EXIT_NAMESPACE);
        assert_eq!(
            config_exit_code(&ConfigError::ListingNotFound {
                bucket: "b".into(),
                dir: "/d".into(),
            }),
            EXIT_NAMESPACE
        );
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_DIFFS,
            EXIT_USAGE,
            EXIT_LISTING,
            EXIT_CONFIG,
            EXIT_NAMESPACE,
            EXIT_OUTPUT,
        ];
        let unique: std::collections::HashSet<u8> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());
    }
}
