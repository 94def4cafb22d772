//! Policy loading functionality.
//!
//! Loads a [`LeavePolicy`] from a YAML file. Missing keys fall back to
//! the built-in defaults, so a deployment only specifies what it changes.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::LeavePolicy;

/// Loads and provides access to the leave policy.
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config/leave-policy.yaml").unwrap();
/// println!("casual entitlement: {}", loader.policy().entitlements.casual);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: LeavePolicy,
}

impl PolicyLoader {
    /// Loads the policy from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it contains invalid YAML or invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        let policy: LeavePolicy =
            serde_yaml::from_str(&raw).map_err(|e| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { policy })
    }

    /// Returns a reference to the loaded policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Consumes the loader and returns the policy.
    pub fn into_policy(self) -> LeavePolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_policy() {
        let path = write_temp(
            "leave-policy-full.yaml",
            r#"
entitlements:
  casual: "15.0"
  sick: "10.0"
  special: "3.0"
carry_forward:
  casual_cap: "7.0"
escalation:
  pending_hours: 48
"#,
        );
        let loader = PolicyLoader::load(&path).unwrap();
        assert_eq!(loader.policy().entitlements.casual, Decimal::new(150, 1));
        assert_eq!(loader.policy().carry_forward.casual_cap, Decimal::new(70, 1));
        assert_eq!(loader.policy().escalation.pending_hours, 48);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let path = write_temp(
            "leave-policy-partial.yaml",
            "escalation:\n  pending_hours: 12\n",
        );
        let policy = PolicyLoader::load(&path).unwrap().into_policy();
        assert_eq!(policy.escalation.pending_hours, 12);
        assert_eq!(policy.entitlements.casual, Decimal::new(12, 0));
        assert_eq!(policy.carry_forward.casual_cap, Decimal::new(5, 0));
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let err = PolicyLoader::load("/definitely/missing.yaml").unwrap_err();
        assert_eq!(err.code(), "CONFIG_NOT_FOUND");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let path = write_temp("leave-policy-bad.yaml", "entitlements: [not, a, map]");
        let err = PolicyLoader::load(&path).unwrap_err();
        assert_eq!(err.code(), "CONFIG_PARSE_ERROR");
    }
}
