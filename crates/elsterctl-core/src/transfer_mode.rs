//! Transfer mode and its resolution policy
//!
//! The effective mode of an invocation is derived from three inputs, highest
//! precedence first:
//!
//! 1. an explicit `--transfer-mode` value
//! 2. the `--test-transfer-mode` flag
//! 3. the `prod` default
//!
//! The forced-test policy is then applied on top: when active, anything
//! other than `test` is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ElsterError, Result};
use crate::policy::ForcePolicySource;

/// Payload element that marks a transfer as a non-binding test run
pub const TEST_MARKER_ELEMENT: &str = "<Testmerker>";

/// Target of a submission: the production tax system or the test path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferMode {
    #[serde(rename = "prod")]
    Production,
    #[serde(rename = "test")]
    Test,
}

impl TransferMode {
    /// Canonical short name, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Production => "prod",
            TransferMode::Test => "test",
        }
    }

    pub fn is_test(&self) -> bool {
        matches!(self, TransferMode::Test)
    }

    /// Whether payloads submitted in this mode must carry `TEST_MARKER_ELEMENT`
    pub fn requires_test_marker(&self) -> bool {
        self.is_test()
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferMode {
    type Err = ElsterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(TransferMode::Production),
            "test" => Ok(TransferMode::Test),
            _ => Err(ElsterError::InvalidTransferMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Resolve the effective transfer mode from its three inputs
///
/// Pure: the same inputs always produce the same outcome.
///
/// # Errors
///
/// Returns `ElsterError::ForcedTestMode` when `force_test_enabled` is set and
/// the resolved mode is not `test`. `policy_source` names what enabled the
/// policy so the message can point at it.
pub fn resolve_transfer_mode(
    explicit_mode: Option<TransferMode>,
    test_flag: bool,
    force_test_enabled: bool,
    policy_source: &str,
) -> Result<TransferMode> {
    let resolved = match explicit_mode {
        Some(mode) => mode,
        None if test_flag => TransferMode::Test,
        None => TransferMode::Production,
    };

    if force_test_enabled && !resolved.is_test() {
        return Err(ElsterError::ForcedTestMode {
            requested: resolved,
            policy_source: policy_source.to_string(),
        });
    }

    Ok(resolved)
}

/// Resolve the effective transfer mode, reading the force policy from `policy`
///
/// The policy source is consulted on every call.
pub fn resolve_with_policy(
    explicit_mode: Option<TransferMode>,
    test_flag: bool,
    policy: &dyn ForcePolicySource,
) -> Result<TransferMode> {
    let force_test_enabled = policy.force_test_enabled();
    let resolved = resolve_transfer_mode(
        explicit_mode,
        test_flag,
        force_test_enabled,
        policy.describe(),
    )?;

    tracing::debug!(
        component = module_path!(),
        op = "resolve_transfer_mode",
        transfer_mode = resolved.as_str(),
        force_test = force_test_enabled,
    );

    Ok(resolved)
}
