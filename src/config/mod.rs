//
//  screwdriver-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module manages the CLI's settings file: which Screwdriver instance
//! to talk to and the credentials for it, grouped into named contexts so a
//! user can hop between deployments.
//!
//! ## Overview
//!
//! The configuration is a single JSON dotfile with two parts:
//!
//! - **`current_context`**: The name of the context in use
//! - **`contexts`**: A map of context name to its settings (API token,
//!   API URL, cached JWT)
//!
//! ## Configuration File Location
//!
//! The file lives at `~/.sdctl` on every platform. It is created with a
//! blank `default` context the first time the CLI runs.
//!
//! ## Example Configuration File
//!
//! ```json
//! {
//!   "current_context": "default",
//!   "contexts": {
//!     "default": {
//!       "token": "your-api-token",
//!       "api": "https://api-cd.screwdriver.example",
//!       "jwt": "eyJhbGciOi..."
//!     },
//!     "staging": {
//!       "token": "your-staging-token",
//!       "api": "https://api-cd.staging.screwdriver.example",
//!       "jwt": ""
//!     }
//!   }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use screwdriver_cli::config::SdConfig;
//!
//! let mut config = SdConfig::load()?;
//! config.current_mut().api_url = "https://api-cd.screwdriver.example".to_string();
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};

/// Name of the dotfile under the user's home directory.
const CONFIG_FILE_NAME: &str = ".sdctl";

/// Name of the context used until the user creates another one.
const DEFAULT_CONTEXT: &str = "default";

/// Settings for one Screwdriver deployment.
///
/// The on-disk keys are the short names users already know from the
/// dotfile: `token`, `api`, and `jwt`.
///
/// # Fields
///
/// * `user_token` - Long-lived API token minted in the Screwdriver UI
/// * `api_url` - Base URL of the API host (e.g. `https://api-cd.example.com`)
/// * `jwt` - Last JWT obtained for this context; refreshed on demand
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SdContext {
    /// Long-lived user API token minted in the Screwdriver UI.
    #[serde(rename = "token", default)]
    pub user_token: String,

    /// Base URL of the Screwdriver API host.
    #[serde(rename = "api", default)]
    pub api_url: String,

    /// Last JWT obtained for this context.
    ///
    /// JWTs expire quickly; commands refresh this transparently and only
    /// `set jwt` writes a fresh one back to disk.
    #[serde(default)]
    pub jwt: String,
}

/// The complete CLI configuration: every known context plus the name of
/// the one in use.
///
/// # Examples
///
/// ```rust
/// use screwdriver_cli::config::SdConfig;
///
/// let config = SdConfig::default();
/// assert_eq!(config.current_context, "default");
/// assert!(config.contexts.contains_key("default"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdConfig {
    /// Name of the context commands operate on.
    #[serde(default = "default_context_name")]
    pub current_context: String,

    /// Map of context name to its settings.
    #[serde(default)]
    pub contexts: HashMap<String, SdContext>,
}

/// Returns the name of the context used when none has been chosen.
///
/// This function is used as the serde default for
/// [`SdConfig::current_context`].
fn default_context_name() -> String {
    DEFAULT_CONTEXT.to_string()
}

impl Default for SdConfig {
    /// Creates a configuration with a single blank `default` context.
    fn default() -> Self {
        let mut contexts = HashMap::new();
        contexts.insert(default_context_name(), SdContext::default());
        Self {
            current_context: default_context_name(),
            contexts,
        }
    }
}

impl SdConfig {
    /// Loads the configuration from `~/.sdctl`.
    ///
    /// If the file does not exist yet, a default configuration is written
    /// there first, so a fresh installation starts from a well-formed file.
    ///
    /// # Returns
    ///
    /// - `Ok(SdConfig)` - The loaded (or freshly initialized) configuration
    /// - `Err` - If the file cannot be read, written, or parsed
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use screwdriver_cli::config::SdConfig;
    ///
    /// let config = SdConfig::load()?;
    /// println!("Current context: {}", config.current_context);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// Behaves like [`SdConfig::load`] but against the given file, which
    /// keeps the I/O testable without touching the real home directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `~/.sdctl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path.
    ///
    /// The file is written as indented JSON so it stays pleasant to read
    /// and edit by hand. Parent directories are created when missing.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Rewrites `~/.sdctl` with the default blank state.
    ///
    /// Every stored context and credential is discarded. This is what
    /// `sd clear` runs after the user confirms.
    pub fn reset() -> Result<Self> {
        Self::reset_to(&Self::config_path()?)
    }

    /// Rewrites the given file with the default blank state.
    pub fn reset_to(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Returns the path of the configuration file (`~/.sdctl`).
    ///
    /// # Errors
    ///
    /// Returns an error if the user's home directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = UserDirs::new().context("could not determine the home directory")?;
        Ok(dirs.home_dir().join(CONFIG_FILE_NAME))
    }

    /// Returns a copy of the named context.
    ///
    /// A name with no matching entry yields a blank context rather than an
    /// error; commands that need credentials report the missing pieces with
    /// more useful messages than a lookup failure would give.
    pub fn context(&self, name: &str) -> SdContext {
        self.contexts.get(name).cloned().unwrap_or_default()
    }

    /// Returns a mutable reference to the named context, creating a blank
    /// entry for it if the map has none.
    ///
    /// Does not change which context is current, so a one-off `--context`
    /// override can write settings without permanently switching.
    pub fn context_mut(&mut self, name: &str) -> &mut SdContext {
        self.contexts.entry(name.to_string()).or_default()
    }

    /// Returns a copy of the context commands operate on by default.
    pub fn current(&self) -> SdContext {
        self.context(&self.current_context)
    }

    /// Returns a mutable reference to the current context, creating a blank
    /// entry for it if the map has none.
    pub fn current_mut(&mut self) -> &mut SdContext {
        self.contexts
            .entry(self.current_context.clone())
            .or_default()
    }

    /// Switches to the named context, creating a blank one when it does not
    /// exist yet.
    ///
    /// # Returns
    ///
    /// `true` if the context had to be created, `false` if it already
    /// existed.
    pub fn use_context(&mut self, name: &str) -> bool {
        let created = !self.contexts.contains_key(name);
        self.contexts.entry(name.to_string()).or_default();
        self.current_context = name.to_string();
        created
    }

    /// Returns all context names in alphabetical order.
    pub fn context_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.contexts.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_blank_default_context() {
        let config = SdConfig::default();
        assert_eq!(config.current_context, "default");
        let context = config.current();
        assert!(context.user_token.is_empty());
        assert!(context.api_url.is_empty());
        assert!(context.jwt.is_empty());
    }

    #[test]
    fn load_from_initializes_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sdctl");

        let config = SdConfig::load_from(&path).unwrap();

        assert!(path.exists(), "first load should write the dotfile");
        assert_eq!(config.current_context, "default");
    }

    #[test]
    fn save_and_load_round_trip_the_dotfile_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sdctl");

        let mut config = SdConfig::default();
        {
            let context = config.current_mut();
            context.user_token = "my-user-token".to_string();
            context.api_url = "https://api-cd.screwdriver.example".to_string();
            context.jwt = "some-jwt".to_string();
        }
        config.save_to(&path).unwrap();

        // The short key names users know from the dotfile survive on disk.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"token\": \"my-user-token\""));
        assert!(raw.contains("\"api\": \"https://api-cd.screwdriver.example\""));
        assert!(raw.contains("\"jwt\": \"some-jwt\""));

        let reloaded = SdConfig::load_from(&path).unwrap();
        let context = reloaded.current();
        assert_eq!(context.user_token, "my-user-token");
        assert_eq!(context.api_url, "https://api-cd.screwdriver.example");
        assert_eq!(context.jwt, "some-jwt");
    }

    #[test]
    fn use_context_reports_whether_it_created_the_entry() {
        let mut config = SdConfig::default();

        assert!(config.use_context("staging"), "staging is new");
        assert_eq!(config.current_context, "staging");

        assert!(!config.use_context("default"), "default already exists");
        assert_eq!(config.current_context, "default");
    }

    #[test]
    fn context_mut_leaves_the_current_context_alone() {
        let mut config = SdConfig::default();
        config.context_mut("staging").api_url = "https://api-cd.staging.example".to_string();

        assert_eq!(config.current_context, "default");
        assert_eq!(
            config.context("staging").api_url,
            "https://api-cd.staging.example"
        );
    }

    #[test]
    fn context_names_are_sorted() {
        let mut config = SdConfig::default();
        config.use_context("staging");
        config.use_context("alpha");

        assert_eq!(
            config.context_names(),
            vec![
                "alpha".to_string(),
                "default".to_string(),
                "staging".to_string()
            ]
        );
    }

    #[test]
    fn reset_to_discards_existing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sdctl");

        let mut config = SdConfig::default();
        config.use_context("staging");
        config.current_mut().user_token = "staging-token".to_string();
        config.save_to(&path).unwrap();

        SdConfig::reset_to(&path).unwrap();

        let reloaded = SdConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.current_context, "default");
        assert!(!reloaded.contexts.contains_key("staging"));
    }

    #[test]
    fn load_from_rejects_a_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sdctl");
        std::fs::write(&path, "not json at all").unwrap();

        let err = SdConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn unknown_current_context_yields_a_blank_context() {
        let config = SdConfig {
            current_context: "missing".to_string(),
            contexts: HashMap::new(),
        };
        let context = config.current();
        assert!(context.user_token.is_empty());
    }
}
