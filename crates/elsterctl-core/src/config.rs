//! Environment configuration keys and defaults
//!
//! Precedence everywhere is: command-line flag, then process environment,
//! then a `.env` file in the working directory (loaded by the CLI without
//! overriding variables that are already set), then the default below.

/// Path of the ERiC shared library. Required for `message send`.
pub const ENV_ERIC_LIB: &str = "ELSTER_ERIC_LIB";
/// Optional log directory handed to the engine at initialisation
pub const ENV_ERIC_LOG_DIR: &str = "ELSTER_ERIC_LOG_DIR";
/// Truthy value activates the forced-test policy
pub const ENV_FORCE_TEST_TRANSFER_MODE: &str = "ELSTER_FORCE_TEST_TRANSFER_MODE";
/// Certificate path fallback
pub const ENV_DEFAULT_CERTIFICATE: &str = "ELSTER_DEFAULT_CERTIFICATE";
/// Data type version fallback
pub const ENV_DEFAULT_DATA_TYPE_VERSION: &str = "ELSTER_DEFAULT_DATA_TYPE_VERSION";
/// Manufacturer id used for template generation
pub const ENV_HERSTELLER_ID: &str = "ELSTER_HERSTELLER_ID";
/// `json` selects the JSON log profile
pub const ENV_LOG_FORMAT: &str = "ELSTERCTL_LOG_FORMAT";

/// Name of the environment variable holding the certificate PIN, unless overridden
pub const DEFAULT_PIN_ENV: &str = "ELSTER_CERT_PIN";
/// Data type version submitted when none is configured
pub const DEFAULT_DATA_TYPE_VERSION: &str = "TH11";

/// Read an environment variable, treating empty values as unset
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
