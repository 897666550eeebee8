use thiserror::Error;

/// Failures surfaced by the generation pipeline. Each variant maps to one
/// user-visible message at the binary boundary; nothing propagates uncaught.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No git repository found. Open a folder containing a git repository first.")]
    NoRepository,

    #[error("Could not analyze changes: {0}")]
    DiffUnavailable(String),

    #[error("No OpenRouter API key stored. Run `cmg auth` to set one.")]
    MissingCredential,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures from the completion endpoint. None of these are retried; a
/// single attempt is made per invocation.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Rate limited by the completion API (HTTP 429). Try again in a moment.")]
    RateLimited,

    #[error("The stored API key was rejected (HTTP 401). Run `cmg auth` to replace it.")]
    InvalidCredential,

    #[error("Insufficient account balance for this model (HTTP 402). Top up or pick a free model.")]
    InsufficientBalance,

    #[error("Completion API returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Completion API returned an unusable response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}. Check your internet connection.")]
    NetworkUnreachable(String),

    #[error("Request timed out after {0} ms.")]
    Timeout(u64),
}
