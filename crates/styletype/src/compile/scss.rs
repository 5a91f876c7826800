//! SCSS compilation via the `grass` engine.

use std::path::PathBuf;

use crate::dialect::Dialect;
use crate::{Error, Result};

/// Compile SCSS source to plain CSS.
///
/// Compilation is synchronous string compilation; `include_paths` are
/// searched when resolving `@use` and `@import` targets.
pub(super) fn compile(source: &str, include_paths: &[PathBuf]) -> Result<String> {
    let mut options = grass::Options::default();
    for path in include_paths {
        options = options.load_path(path);
    }

    grass::from_string(source.to_string(), &options)
        .map_err(|e| Error::compile(Dialect::Scss, e.to_string()))
}
