/// Failure taxonomy for talking to the Expense Tracker API.
///
/// `Rejected` and `Connection` surface to the user with different
/// wording; `Decode` is a malformed success response and is reported
/// like a rejection; stats-path failures are swallowed upstream.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("connection failed: {0}")]
    Connection(reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stats fetch thread panicked")]
    Join,
}

impl ApiError {
    /// True for transport-level failures, which get the generic
    /// connection-error message instead of a per-action one.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
