use std::{io, time::Duration};

/// Coarse error classification for retry and routing logic.
///
/// Use [`TargetError::class`] to get this. `Temporary` and `Empty` errors are
/// generally retryable; `BadRequest` means the caller must fix the request
/// shape first; `Internal` means a code or environment bug.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself was malformed.
    BadRequest,
    /// The human submitted nothing; asking again may produce an answer.
    Empty,
    /// Transient failure (rate limit, server 5xx) — retry may help.
    Temporary,
    /// A bug in the calling code or a broken terminal environment.
    Internal,
}

/// Failure from a [`PromptChatTarget::send_prompt`](crate::PromptChatTarget::send_prompt) call.
///
/// The variants split along what the caller should do about them:
///
/// 1. **[`InvalidRequest`](TargetError::InvalidRequest)** — the request shape
///    violates the single-piece/text-only invariant. Raised before any dialog
///    is shown. **Not retryable** — the same request fails the same way.
/// 2. **[`EmptyResponse`](TargetError::EmptyResponse)** — the operator
///    submitted nothing or dismissed the dialog. Retryable; a first-class
///    outcome, not a crash.
/// 3. **[`RateLimit`](TargetError::RateLimit)** / **[`Http`](TargetError::Http)**
///    — raised by wrapping decorators or remote collaborators, never by the
///    human target itself. Passed through unchanged so outer retry policy can
///    see them.
/// 4. **[`Dialog`](TargetError::Dialog)** — the terminal machinery failed.
///
/// Use [`is_retryable`](TargetError::is_retryable) for retry logic and
/// [`class`](TargetError::class) for coarse [`ErrorClass`] bucketing.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// The request shape is not something this target supports.
    #[error("invalid prompt request: {reason}")]
    InvalidRequest { reason: String },

    /// The operator submitted an empty reply or dismissed the dialog.
    #[error("the target returned an empty response")]
    EmptyResponse,

    /// A throttling collaborator rejected the call.
    #[error("rate limited by target")]
    RateLimit { retry_after: Option<Duration> },

    /// An HTTP-backed collaborator returned an unexpected status.
    #[error("invalid response from target: HTTP {status}")]
    Http { status: u16, body: String },

    /// The input dialog could not be presented or torn down.
    #[error("input dialog failed")]
    Dialog {
        #[source]
        source: io::Error,
    },
}

impl TargetError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidRequest { .. } => ErrorClass::BadRequest,
            Self::EmptyResponse => ErrorClass::Empty,
            Self::RateLimit { .. } => ErrorClass::Temporary,
            Self::Http { status, .. } if *status >= 500 => ErrorClass::Temporary,
            Self::Http { .. } => ErrorClass::BadRequest,
            Self::Dialog { .. } => ErrorClass::Internal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidRequest { .. } => false,
            Self::EmptyResponse => true,
            Self::RateLimit { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Dialog { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_response_is_retryable() {
        assert!(TargetError::EmptyResponse.is_retryable());
        assert_eq!(TargetError::EmptyResponse.class(), ErrorClass::Empty);
    }

    #[test]
    fn invalid_request_is_not_retryable() {
        let err = TargetError::invalid_request("two pieces");
        assert!(!err.is_retryable());
        assert_eq!(err.class(), ErrorClass::BadRequest);
    }

    #[rstest]
    #[case(500, true)]
    #[case(503, true)]
    #[case(429, false)]
    #[case(400, false)]
    fn http_retryability_follows_status(#[case] status: u16, #[case] retryable: bool) {
        let err = TargetError::Http {
            status,
            body: String::new(),
        };
        assert_eq!(err.is_retryable(), retryable);
    }

    #[test]
    fn rate_limit_is_temporary() {
        let err = TargetError::RateLimit {
            retry_after: Some(Duration::from_secs(2)),
        };
        assert!(err.is_retryable());
        assert_eq!(err.class(), ErrorClass::Temporary);
    }
}
