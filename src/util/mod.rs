//
//  screwdriver-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared across the CLI commands.
//!
//! ## Categories
//!
//! - **File Utilities**: [`read_yaml`]
//! - **Time Utilities**: [`format_timestamp`]

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

/// Reads a YAML definition file into a string.
///
/// Used by the validation commands to load `screwdriver.yaml` or
/// `sd-template.yaml` before shipping its content to the validator
/// endpoint. The content is passed through untouched; the service does the
/// actual YAML parsing.
///
/// # Parameters
///
/// * `path` - Path to the YAML file.
///
/// # Returns
///
/// The file content as a `String`.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be read.
///
/// # Example
///
/// ```rust,no_run
/// use screwdriver_cli::util::read_yaml;
///
/// let yaml = read_yaml("screwdriver.yaml")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn read_yaml(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Formats an RFC 3339 timestamp from the API into a local datetime string.
///
/// The service reports times like `2026-02-20T09:00:00.000Z`; for display
/// these are converted to the user's local timezone in
/// "YYYY-MM-DD HH:MM:SS" format.
///
/// # Parameters
///
/// * `timestamp` - An RFC 3339 timestamp string.
///
/// # Returns
///
/// The formatted local datetime, or the input unchanged when it does not
/// parse as RFC 3339.
///
/// # Example
///
/// ```rust
/// use screwdriver_cli::util::format_timestamp;
///
/// let formatted = format_timestamp("2026-02-20T09:00:00.000Z");
/// // Returns something like "2026-02-20 11:00:00" depending on local timezone
///
/// // Unparsable input passes through untouched.
/// assert_eq!(format_timestamp("not a time"), "not a time");
/// ```
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => {
            let local: DateTime<Local> = parsed.into();
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        }
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screwdriver.yaml");
        std::fs::write(&path, "jobs:\n  main:\n    image: node:18\n").unwrap();

        let yaml = read_yaml(&path).unwrap();
        assert!(yaml.starts_with("jobs:"));
    }

    #[test]
    fn test_read_yaml_missing_file() {
        let err = read_yaml("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp(""), "");
        assert_eq!(format_timestamp("not a time"), "not a time");
    }

    #[test]
    fn test_format_timestamp_parses_rfc3339() {
        let formatted = format_timestamp("2026-02-20T09:00:00.000Z");
        // Exact output depends on the local timezone; the date part and
        // shape are stable enough to check.
        assert_eq!(formatted.len(), "2026-02-20 09:00:00".len());
        assert!(formatted.starts_with("2026-02-"));
    }
}
