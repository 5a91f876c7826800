//! User-visible outcome reporting.

/// Sink for user-visible pipeline messages.
///
/// The pipeline calls [`info`](Reporter::info) only for forced (manual)
/// runs, and [`warn`](Reporter::warn) for every run that hits a problem.
/// Implementations decide where the messages land: a console, an editor
/// notification, a test recorder.
pub trait Reporter: Send + Sync {
    /// An informational outcome worth showing for a manual invocation.
    fn info(&self, message: &str);

    /// A problem the user should see regardless of invocation mode.
    fn warn(&self, message: &str);
}

/// Reporter printing info to stdout and warnings to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}
