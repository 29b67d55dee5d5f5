//! Failure contract shared by the three retrieval ports.

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while retrieving users or folders from upstream.
    pub enum RetrievalError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "upstream transport failed: {message}",
        /// The upstream call exceeded its timeout.
        Timeout { message: String } =>
            "upstream request timed out: {message}",
        /// The upstream answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "upstream returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "upstream response decode failed: {message}",
        /// The response decoded but carried values the domain rejects.
        InvalidPayload { message: String } =>
            "upstream payload invalid: {message}",
    }
}

impl RetrievalError {
    /// Whether the failure happened before any response was received.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RetrievalError::transport("refused"), true)]
    #[case(RetrievalError::timeout("10s"), true)]
    #[case(RetrievalError::upstream_status(502_u16, "bad gateway"), false)]
    #[case(RetrievalError::decode("eof"), false)]
    #[case(RetrievalError::invalid_payload("blank name"), false)]
    fn classifies_transport_failures(#[case] error: RetrievalError, #[case] expected: bool) {
        assert_eq!(error.is_transport_failure(), expected);
    }

    #[rstest]
    fn status_errors_render_code_and_message() {
        let error = RetrievalError::upstream_status(503_u16, "maintenance");
        assert_eq!(
            error.to_string(),
            "upstream returned status 503: maintenance"
        );
    }
}
