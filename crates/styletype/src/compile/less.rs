//! Less rendering through an external engine.

use crate::dialect::Dialect;
use crate::exec::pipe_through;
use crate::{Error, Result};

/// Render Less source to CSS with the configured command.
///
/// The source is piped to the engine's stdin and compiled CSS read back from
/// stdout, so the default `lessc -` invocation works without temp files.
pub(super) async fn render(source: &str, command: &[String]) -> Result<String> {
    pipe_through(command, source, None)
        .await
        .map_err(|message| Error::compile(Dialect::Less, message))
}
