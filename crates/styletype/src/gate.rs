//! Processing gate for saved documents.
//!
//! The gate decides, from the document alone, whether the pipeline should
//! run. It is a total function of the path, the text and the settings; the
//! force flag never reaches it. Callers decide whether a skip reason is
//! surfaced to the user.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::dialect::{Dialect, path_extension};
use crate::settings::Settings;

/// Outcome of gating a saved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Process the document as the given dialect.
    Proceed(Dialect),
    /// Skip without any user-visible message, even in force mode.
    SkipSilent,
    /// Skip; the reason may be surfaced to the user in force mode.
    SkipNotify(SkipReason),
}

/// Why a document was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The extension maps to no supported dialect.
    UnsupportedExtension(String),
    /// Settings require the opt-in marker and the text has none.
    MarkerMissing,
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s/*]*@type").expect("marker pattern is valid"))
}

/// Returns true if the text opts into declaration generation.
///
/// The match is intentionally loose: `@type` anywhere in the text counts,
/// whether or not it sits inside a comment.
pub fn has_marker(text: &str) -> bool {
    marker_regex().is_match(text)
}

/// Decide whether a document should be processed.
pub fn evaluate(path: &Path, text: &str, settings: &Settings) -> Decision {
    let ext = match path_extension(path) {
        Some(ext) => ext,
        None => return Decision::SkipSilent,
    };

    let dialect = match Dialect::from_extension(&ext) {
        Some(dialect) => dialect,
        None => return Decision::SkipNotify(SkipReason::UnsupportedExtension(ext)),
    };

    if settings.require_comment && !has_marker(text) {
        return Decision::SkipNotify(SkipReason::MarkerMissing);
    }

    Decision::Proceed(dialect)
}
