//! Style-sheet normalization to plain CSS.
//!
//! Declaration generation only understands plain CSS, so every source is
//! normalized first: CSS passes through unchanged, SCSS is compiled
//! in-process and Less is rendered by an external command.

mod less;
mod scss;

use std::path::{Path, PathBuf};

use crate::Result;
use crate::dialect::Dialect;
use crate::settings::Settings;

/// Normalizes style-sheet sources to plain CSS.
///
/// Holds the configuration resolved once at construction; one instance is
/// shared by every pipeline run.
pub struct Normalizer {
    include_paths: Vec<PathBuf>,
    less_command: Vec<String>,
}

impl Normalizer {
    /// Build a normalizer from settings, resolving relative include paths
    /// against `root`.
    pub fn new(settings: &Settings, root: &Path) -> Self {
        let include_paths = settings
            .include_paths
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    root.join(p)
                }
            })
            .collect();

        Self {
            include_paths,
            less_command: settings.less_command.clone(),
        }
    }

    /// Normalize `source` to plain CSS according to its dialect.
    ///
    /// Engine rejections come back as [`Error::Compile`](crate::Error)
    /// carrying the engine's message.
    pub async fn to_css(&self, dialect: Dialect, source: &str) -> Result<String> {
        match dialect {
            Dialect::Css => Ok(source.to_string()),
            Dialect::Scss => scss::compile(source, &self.include_paths),
            Dialect::Less => less::render(source, &self.less_command).await,
        }
    }
}
