//! Human-readable probe report
//!
//! All stdout rendering lives here. The sink is generic so tests can capture
//! the report in a `Vec<u8>`. Write failures are logged and dropped: a broken
//! pipe must not abort the run.

use crate::conversation::ChatMessage;
use crate::runner::{BatterySummary, RunOutcome};
use std::fmt;
use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 40;

/// Report writer over any `io::Write` sink
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and return the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, model: &str, base_url: &str) {
        self.line(format_args!(
            "Starting role test for model: {} at {}",
            model, base_url
        ));
    }

    /// Separator, roles list and every message, printed before the request goes out
    pub fn request(&mut self, messages: &[ChatMessage]) {
        self.separator();
        self.line(format_args!(
            "Testing with roles: {}",
            format_roles(messages)
        ));
        self.line(format_args!("Sending messages:"));
        for msg in messages {
            self.line(format_args!("  - {}: {}", msg.role(), msg.content()));
        }
    }

    /// Response or error lines followed by the closing separator
    pub fn outcome(&mut self, outcome: &RunOutcome, endpoint: &str) {
        match outcome {
            RunOutcome::Response(content) => {
                self.line(format_args!("\nModel Response:"));
                self.line(format_args!("{}", content));
            }
            RunOutcome::TransportError(err) => {
                self.line(format_args!(
                    "\nError connecting to chat API at {}: {}",
                    endpoint, err
                ));
                self.line(format_args!(
                    "Please ensure the server is running and accessible at the specified URL."
                ));
            }
            RunOutcome::UnexpectedError(err) => {
                self.line(format_args!("\nAn unexpected error occurred: {}", err));
            }
        }
        self.separator();
        self.line(format_args!(""));
    }

    pub fn footer(&mut self, summary: &BatterySummary) {
        self.line(format_args!("Tests finished."));
        self.line(format_args!(
            "{} succeeded, {} transport errors, {} unexpected errors",
            summary.succeeded, summary.transport_errors, summary.unexpected_errors
        ));
    }

    pub fn separator(&mut self) {
        self.line(format_args!("{}", "-".repeat(SEPARATOR_WIDTH)));
    }

    pub fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            tracing::warn!(error = %e, "Failed to write report line");
        }
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "Failed to flush report output");
        }
    }
}

/// `[user, system, user]`
pub fn format_roles(messages: &[ChatMessage]) -> String {
    let roles: Vec<&str> = messages.iter().map(|m| m.role().as_str()).collect();
    format!("[{}]", roles.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_request_lists_roles_and_messages() {
        let messages = vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("What is the capital of France?"),
        ];
        let out = render(|r| r.request(&messages));
        assert_eq!(
            out,
            "----------------------------------------\n\
             Testing with roles: [system, user]\n\
             Sending messages:\n  \
             - system: You are a helpful assistant.\n  \
             - user: What is the capital of France?\n"
        );
    }

    #[test]
    fn test_empty_conversation_lists_no_roles() {
        let out = render(|r| r.request(&[]));
        assert!(out.contains("Testing with roles: []\nSending messages:\n"));
    }

    #[test]
    fn test_response_outcome() {
        let out = render(|r| r.outcome(&RunOutcome::Response("Paris".to_string()), "http://e"));
        assert_eq!(
            out,
            "\nModel Response:\nParis\n----------------------------------------\n\n"
        );
    }

    #[test]
    fn test_transport_outcome_names_endpoint() {
        let out = render(|r| {
            r.outcome(
                &RunOutcome::TransportError("connection refused".to_string()),
                "http://localhost:10000/v1/chat/completions",
            )
        });
        assert!(out.contains(
            "Error connecting to chat API at http://localhost:10000/v1/chat/completions: connection refused"
        ));
        assert!(out.contains("Please ensure the server is running"));
        assert!(out.ends_with("----------------------------------------\n\n"));
    }

    #[test]
    fn test_unexpected_outcome() {
        let out = render(|r| r.outcome(&RunOutcome::UnexpectedError("bad json".to_string()), "e"));
        assert!(out.contains("An unexpected error occurred: bad json"));
        assert!(out.ends_with("----------------------------------------\n\n"));
    }

    #[test]
    fn test_footer_summary() {
        let summary = BatterySummary {
            succeeded: 3,
            transport_errors: 1,
            unexpected_errors: 1,
        };
        let out = render(|r| r.footer(&summary));
        assert_eq!(
            out,
            "Tests finished.\n3 succeeded, 1 transport errors, 1 unexpected errors\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let mut reporter = Reporter::new(BrokenPipe);
        reporter.banner("m", "http://h");
        reporter.request(&[ChatMessage::user("hi")]);
        reporter.flush();
    }
}
