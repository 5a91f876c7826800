//! Pipeline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings controlling declaration generation.
///
/// Loaded from `styletype.toml` at the workspace root. Every field has a
/// default, so a missing or empty file still configures a working pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Require the `@type` marker before a style sheet is processed.
    pub require_comment: bool,

    /// Extra load paths for SCSS `@use` and `@import` resolution, resolved
    /// against the workspace root when relative.
    pub include_paths: Vec<PathBuf>,

    /// Emit one `export const` per class instead of a single default object.
    pub named_exports: bool,

    /// Command rendering Less source to CSS, fed the source on stdin.
    pub less_command: Vec<String>,

    /// Command formatting the generated declaration text, fed the text on
    /// stdin. Empty disables the pass; a failing formatter aborts the run.
    pub format_command: Vec<String>,

    /// Optional lint-fix pass over the generated declaration text.
    pub lint: Option<LintSettings>,
}

/// External lint-fix pass configuration.
///
/// The command runs in the artifact's directory and receives the declaration
/// text on stdin. When `config_file` is set it is passed to the command as
/// `--config <path>`, resolved against the workspace root when relative. A
/// failing lint pass keeps the pre-lint text instead of aborting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSettings {
    /// Command piping the declaration text through the lint fixer.
    pub command: Vec<String>,
    /// Lint configuration file handed to the command.
    pub config_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            require_comment: true,
            include_paths: vec![],
            named_exports: false,
            less_command: vec!["lessc".to_string(), "-".to_string()],
            format_command: vec![],
            lint: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        toml::from_str(&text).map_err(|e| Error::settings(path, e.to_string()))
    }

    /// Save settings as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text =
            toml::to_string_pretty(self).map_err(|e| Error::settings(path, e.to_string()))?;
        std::fs::write(path, text).map_err(|e| Error::io(path, e))
    }
}
