//! Typed declaration generation.
//!
//! Turns normalized CSS into the bytes of the companion declaration file:
//! class names are extracted, rendered deterministically and optionally
//! piped through external format and lint-fix passes.

mod extract;
mod render;

pub use extract::class_names;

use std::path::{Path, PathBuf};

use crate::exec::pipe_through;
use crate::settings::Settings;
use crate::{Error, Result};

/// Generates declaration file contents from plain CSS.
///
/// One generator is built per pipeline and shared by concurrent runs; it
/// holds only resolved configuration, never per-file state.
pub struct DeclarationGenerator {
    named_exports: bool,
    format_command: Vec<String>,
    lint_command: Vec<String>,
    lint_config: Option<PathBuf>,
}

impl DeclarationGenerator {
    /// Build a generator from settings, resolving the lint config file
    /// against `root` when relative.
    pub fn new(settings: &Settings, root: &Path) -> Self {
        let (lint_command, lint_config) = match &settings.lint {
            Some(lint) => {
                let config = lint.config_file.as_ref().map(|p| {
                    if p.is_absolute() {
                        p.clone()
                    } else {
                        root.join(p)
                    }
                });
                (lint.command.clone(), config)
            }
            None => (vec![], None),
        };

        Self {
            named_exports: settings.named_exports,
            format_command: settings.format_command.clone(),
            lint_command,
            lint_config,
        }
    }

    /// Generate declaration bytes for `css`.
    ///
    /// `output_path` is where the artifact will land; the lint pass runs in
    /// its directory so project-local lint configuration applies. A failing
    /// formatter aborts generation, a failing lint pass does not.
    pub async fn generate(&self, css: &str, output_path: &Path) -> Result<Vec<u8>> {
        let classes = class_names(css);
        let mut text = render::render(&classes, self.named_exports);

        if !self.format_command.is_empty() {
            text = pipe_through(&self.format_command, &text, None)
                .await
                .map_err(Error::generation)?;
        }

        if !self.lint_command.is_empty() {
            text = self.lint_fix(&text, output_path).await;
        }

        Ok(text.into_bytes())
    }

    /// Pipe `text` through the lint fixer, keeping the input on failure.
    async fn lint_fix(&self, text: &str, output_path: &Path) -> String {
        let mut command = self.lint_command.clone();
        if let Some(config) = &self.lint_config {
            command.push("--config".to_string());
            command.push(config.to_string_lossy().into_owned());
        }

        // A bare file name has an empty parent; run in the process cwd then.
        let cwd = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        match pipe_through(&command, text, cwd).await {
            Ok(fixed) => fixed,
            Err(message) => {
                tracing::warn!("lint pass failed, keeping unlinted text: {message}");
                text.to_string()
            }
        }
    }
}
