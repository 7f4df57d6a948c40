//! Request runner
//!
//! Sends each conversation to the chat-completion endpoint and reports the
//! result. Calls are strictly sequential and no error escapes [`Runner::run`].

use crate::client::CompletionClient;
use crate::config::ProbeConfig;
use crate::conversation::{ChatMessage, Conversation};
use crate::error::{ProbeError, ProbeResult};
use crate::report::Reporter;
use std::io::Write;

/// Result of one call, already classified for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 2xx response; model content or the no-content sentinel
    Response(String),
    /// Connection failure, timeout or non-2xx status
    TransportError(String),
    /// Anything else, e.g. a malformed response body
    UnexpectedError(String),
}

impl From<ProbeResult<String>> for RunOutcome {
    fn from(result: ProbeResult<String>) -> Self {
        match result {
            Ok(content) => Self::Response(content),
            Err(e) if e.is_transport() => Self::TransportError(e.to_string()),
            Err(e) => Self::UnexpectedError(e.to_string()),
        }
    }
}

/// Outcome counts for a full battery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatterySummary {
    pub succeeded: usize,
    pub transport_errors: usize,
    pub unexpected_errors: usize,
}

impl BatterySummary {
    pub fn record(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Response(_) => self.succeeded += 1,
            RunOutcome::TransportError(_) => self.transport_errors += 1,
            RunOutcome::UnexpectedError(_) => self.unexpected_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.transport_errors + self.unexpected_errors
    }
}

/// Stateless runner bound to one endpoint
pub struct Runner {
    client: CompletionClient,
}

impl Runner {
    pub fn new(config: &ProbeConfig) -> ProbeResult<Self> {
        Ok(Self {
            client: CompletionClient::new(config)?,
        })
    }

    /// Send one conversation and report the outcome
    ///
    /// Empty conversations are sent as-is; the server decides what to do.
    pub async fn run<W: Write>(
        &self,
        messages: &[ChatMessage],
        reporter: &mut Reporter<W>,
    ) -> RunOutcome {
        reporter.request(messages);
        reporter.flush();

        let outcome = RunOutcome::from(self.client.complete(messages).await);

        match &outcome {
            RunOutcome::Response(_) => {}
            RunOutcome::TransportError(e) => tracing::warn!(
                endpoint = %self.client.endpoint(),
                error = %e,
                "Chat completion request failed"
            ),
            RunOutcome::UnexpectedError(e) => tracing::warn!(
                endpoint = %self.client.endpoint(),
                error = %e,
                "Unexpected error handling chat completion"
            ),
        }

        reporter.outcome(&outcome, self.client.endpoint());
        reporter.flush();
        outcome
    }

    /// Run every conversation in order, one at a time
    pub async fn run_battery<W: Write>(
        &self,
        conversations: &[Conversation],
        reporter: &mut Reporter<W>,
    ) -> BatterySummary {
        let mut summary = BatterySummary::default();

        for (index, conversation) in conversations.iter().enumerate() {
            tracing::debug!(
                case = index + 1,
                label = conversation.label(),
                "Running conversation"
            );
            let outcome = self.run(conversation.messages(), reporter).await;
            summary.record(&outcome);
        }

        summary
    }
}

/// Pick battery cases by 1-based number, keeping battery order
///
/// An empty selection keeps every case.
pub fn select_cases(
    battery: Vec<Conversation>,
    selection: &[usize],
) -> ProbeResult<Vec<Conversation>> {
    if selection.is_empty() {
        return Ok(battery);
    }

    if let Some(bad) = selection.iter().find(|&&n| n == 0 || n > battery.len()) {
        return Err(ProbeError::Config(format!(
            "case {} does not exist (valid cases: 1-{})",
            bad,
            battery.len()
        )));
    }

    Ok(battery
        .into_iter()
        .enumerate()
        .filter(|(i, _)| selection.contains(&(i + 1)))
        .map(|(_, c)| c)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::battery;

    #[test]
    fn test_outcome_from_success() {
        let outcome = RunOutcome::from(Ok("Paris".to_string()));
        assert_eq!(outcome, RunOutcome::Response("Paris".to_string()));
    }

    #[test]
    fn test_outcome_from_transport_error() {
        let outcome = RunOutcome::from(Err(ProbeError::Transport {
            endpoint: "http://e".to_string(),
            reason: "connection refused".to_string(),
        }));
        assert!(matches!(outcome, RunOutcome::TransportError(ref m) if m.contains("connection refused")));
    }

    #[test]
    fn test_outcome_from_status_error_is_transport() {
        let outcome = RunOutcome::from(Err(ProbeError::Status {
            endpoint: "http://e".to_string(),
            status: 503,
            body: String::new(),
        }));
        assert!(matches!(outcome, RunOutcome::TransportError(_)));
    }

    #[test]
    fn test_outcome_from_unexpected_error() {
        let outcome = RunOutcome::from(Err(ProbeError::Unexpected("bad json".to_string())));
        assert_eq!(outcome, RunOutcome::UnexpectedError("bad json".to_string()));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatterySummary::default();
        summary.record(&RunOutcome::Response("a".to_string()));
        summary.record(&RunOutcome::TransportError("b".to_string()));
        summary.record(&RunOutcome::TransportError("c".to_string()));
        summary.record(&RunOutcome::UnexpectedError("d".to_string()));
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.transport_errors, 2);
        assert_eq!(summary.unexpected_errors, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_select_cases_empty_keeps_all() {
        assert_eq!(select_cases(battery(), &[]).unwrap().len(), 5);
    }

    #[test]
    fn test_select_cases_keeps_battery_order() {
        let picked = select_cases(battery(), &[5, 1]).unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].label(), "User only");
        assert_eq!(
            picked[1].label(),
            "System message appearing later (potentially problematic)"
        );
    }

    #[test]
    fn test_select_cases_rejects_out_of_range() {
        assert!(select_cases(battery(), &[0]).is_err());
        let err = select_cases(battery(), &[6]).unwrap_err();
        assert!(err.to_string().contains("case 6 does not exist"));
    }
}
