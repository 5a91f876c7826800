//! Typed declaration generation for style sheets.
//!
//! `styletype` turns saved CSS, Less and SCSS sources into companion `.d.ts`
//! declaration files listing the class names each style sheet exports, so
//! code referencing those classes gets compile-time name checking. It
//! features:
//!
//! - **Gating**: only supported dialects are processed, optionally behind an
//!   opt-in `@type` marker comment
//! - **Normalization**: Less and SCSS sources are rendered to plain CSS
//!   before class extraction
//! - **Extraction**: class names are collected from selector preludes with a
//!   real CSS tokenizer
//! - **Idempotent writes**: the artifact is rewritten only when its bytes
//!   change
//! - **Watch mode**: regenerate on save during development
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use styletype::prelude::*;
//!
//! let settings = Settings::load("styletype.toml")?;
//! let pipeline = Pipeline::new(settings, ".", Arc::new(ConsoleReporter));
//!
//! // A manual invocation surfaces informational messages (force mode).
//! pipeline.process_file(Path::new("src/button.module.scss"), true).await;
//! ```

pub mod dialect;
pub mod gate;
pub mod settings;
pub mod compile;
pub mod generate;
pub mod write;
pub mod report;
pub mod pipeline;

#[cfg(feature = "watch")]
pub mod watch;

mod error;
mod exec;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::compile::Normalizer;
    pub use crate::dialect::Dialect;
    pub use crate::gate::{Decision, SkipReason, evaluate};
    pub use crate::generate::DeclarationGenerator;
    pub use crate::pipeline::Pipeline;
    pub use crate::report::{ConsoleReporter, NullReporter, Reporter};
    pub use crate::settings::{LintSettings, Settings};
    pub use crate::write::{WriteOutcome, artifact_path, write_if_changed};
    pub use crate::{Error, Result};

    #[cfg(feature = "watch")]
    pub use crate::watch::SaveWatcher;
}
