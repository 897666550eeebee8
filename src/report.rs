use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User-facing notifications emitted at fixed points in the pipeline.
/// Kept behind a trait so tests can record instead of printing.
pub trait Reporter {
    fn report(&self, severity: Severity, message: &str);
}

/// Prints to stderr so generated messages on stdout stay pipeable.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => eprintln!("{message}"),
            Severity::Warning => eprintln!("{} {message}", "warning:".yellow().bold()),
            Severity::Error => eprintln!("{} {message}", "error:".red().bold()),
        }
    }
}
