//! TOML configuration
//!
//! ```toml
//! snapshot_path = "/var/lib/symbology/mappings.json"
//! policy = "strict-reject"
//! log_profile = "production"
//!
//! [http]
//! bind = "0.0.0.0:8080"
//! workers = 8
//! ```
//!
//! Every key is optional; missing keys take their defaults.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use symbology_core::errors::{ExError, ExErrorKind};
use symbology_core::logging_facility::Profile;
use symbology_core::ReassignmentPolicy;
use symbology_store::errors::{io_error, Result};

pub const DEFAULT_SNAPSHOT_PATH: &str = "mappings.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_WORKERS: usize = 4;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub bind: String,
    pub workers: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymbologyConfig {
    pub snapshot_path: PathBuf,
    pub policy: ReassignmentPolicy,
    pub log_profile: Profile,
    pub http: HttpConfig,
}

impl Default for SymbologyConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            policy: ReassignmentPolicy::default(),
            log_profile: Profile::default(),
            http: HttpConfig::default(),
        }
    }
}

impl SymbologyConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// `InvalidInput` for malformed TOML, unknown keys or a zero worker count.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_config")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or the defaults when no path is given
    ///
    /// A path that was asked for must exist.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise the errors of
    /// [`SymbologyConfig::from_toml_str`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
                Self::from_toml_str(&text)
            }
        }
    }

    /// # Errors
    /// `InvalidInput` for a zero worker count or an empty bind address.
    pub fn validate(&self) -> Result<()> {
        if self.http.workers == 0 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate_config")
                .with_message("http.workers must be at least 1"));
        }
        if self.http.bind.trim().is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate_config")
                .with_message("http.bind cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SymbologyConfig::default();
        assert_eq!(config.snapshot_path, PathBuf::from("mappings.json"));
        assert_eq!(config.policy, ReassignmentPolicy::StrictReject);
        assert_eq!(config.log_profile, Profile::Development);
        assert_eq!(config.http.bind, "127.0.0.1:8080");
        assert_eq!(config.http.workers, 4);
        assert_eq!(SymbologyConfig::load(None).unwrap(), config);
    }

    #[test]
    fn test_full_document() {
        let config = SymbologyConfig::from_toml_str(
            r#"
            snapshot_path = "/data/mappings.json"
            policy = "auto-terminate"
            log_profile = "production"

            [http]
            bind = "0.0.0.0:9000"
            workers = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("/data/mappings.json"));
        assert_eq!(config.policy, ReassignmentPolicy::AutoTerminate);
        assert_eq!(config.log_profile, Profile::Production);
        assert_eq!(config.http.bind, "0.0.0.0:9000");
        assert_eq!(config.http.workers, 16);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = SymbologyConfig::from_toml_str("[http]\nworkers = 2\n").unwrap();
        assert_eq!(config.http.workers, 2);
        assert_eq!(config.http.bind, DEFAULT_BIND);
        assert_eq!(config.policy, ReassignmentPolicy::StrictReject);
    }

    #[test]
    fn test_rejects_bad_documents() {
        for text in [
            "policy = \"sometimes\"",
            "unknown_key = 1",
            "[http]\nworkers = 0",
            "snapshot_path = ",
        ] {
            let err = SymbologyConfig::from_toml_str(text).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput, "accepted {:?}", text);
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("symbology.toml");
        fs::write(&path, "policy = \"strict-reject\"\n").unwrap();

        let config = SymbologyConfig::load(Some(&path)).unwrap();
        assert_eq!(config.policy, ReassignmentPolicy::StrictReject);

        let missing = SymbologyConfig::load(Some(&temp_dir.path().join("absent.toml")));
        assert_eq!(missing.unwrap_err().kind(), ExErrorKind::Io);
    }
}
