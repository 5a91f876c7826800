//! The file-processing pipeline.
//!
//! One [`Pipeline`] is built per workspace and shared by every trigger
//! surface. Each invocation runs the same stages: gate, normalize,
//! generate, write, report. Failures never escape a run; they surface as
//! warnings through the injected [`Reporter`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::compile::Normalizer;
use crate::dialect::Dialect;
use crate::gate::{self, Decision, SkipReason};
use crate::generate::DeclarationGenerator;
use crate::report::Reporter;
use crate::settings::Settings;
use crate::write::{artifact_path, write_if_changed};
use crate::{Error, Result};

/// Orchestrates declaration generation for saved style sheets.
pub struct Pipeline {
    settings: Settings,
    normalizer: Normalizer,
    generator: DeclarationGenerator,
    reporter: Arc<dyn Reporter>,
}

impl Pipeline {
    /// Build a pipeline rooted at `root`.
    ///
    /// Relative include paths and the lint config file are resolved against
    /// the root here, once; nothing is resolved lazily later.
    pub fn new(settings: Settings, root: impl Into<PathBuf>, reporter: Arc<dyn Reporter>) -> Self {
        let root = root.into();
        let normalizer = Normalizer::new(&settings, &root);
        let generator = DeclarationGenerator::new(&settings, &root);

        Self {
            settings,
            normalizer,
            generator,
            reporter,
        }
    }

    /// Process a document already held in memory.
    ///
    /// `force` marks a manual invocation: skip reasons and the completion
    /// message are surfaced. Warnings are surfaced either way. Errors never
    /// propagate out; a failed run reports and stops.
    pub async fn process(&self, path: &Path, text: &str, force: bool) {
        match gate::evaluate(path, text, &self.settings) {
            Decision::Proceed(dialect) => {
                if let Err(e) = self.run(path, text, dialect, force).await {
                    self.reporter.warn(&e.to_string());
                }
            }
            Decision::SkipSilent => {}
            Decision::SkipNotify(reason) => {
                if force {
                    self.reporter.info(&skip_message(path, &reason));
                }
            }
        }
    }

    /// Read `path` and process its contents.
    pub async fn process_file(&self, path: &Path, force: bool) {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => self.process(path, &text, force).await,
            Err(e) => self.reporter.warn(&Error::io(path, e).to_string()),
        }
    }

    /// The post-gate stages. Any error aborts the run with no partial write.
    async fn run(&self, path: &Path, text: &str, dialect: Dialect, force: bool) -> Result<()> {
        let css = self.normalizer.to_css(dialect, text).await?;
        if css.is_empty() {
            // An empty compilation result produces no artifact and no
            // message, even when forced.
            tracing::debug!("empty normalized css for {}, nothing to do", path.display());
            return Ok(());
        }

        let output = artifact_path(path);
        let bytes = self.generator.generate(&css, &output).await?;
        let outcome = write_if_changed(&output, &bytes).await?;
        tracing::debug!("{}: {:?}", output.display(), outcome);

        if force {
            // Completion message, shown whether or not the bytes changed.
            self.reporter
                .info(&format!("Typings written to {}", output.display()));
        }

        Ok(())
    }
}

fn skip_message(path: &Path, reason: &SkipReason) -> String {
    match reason {
        SkipReason::UnsupportedExtension(ext) => {
            format!("{ext} is not supported")
        }
        SkipReason::MarkerMissing => {
            format!("@type annotation not found in {}", path.display())
        }
    }
}
