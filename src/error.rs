use thiserror::Error;

/// Unified failure type for every AI service operation.
///
/// The service never half-succeeds: a call either yields a typed payload or
/// one of these. Callers decide how to present it; nothing is swallowed into
/// empty placeholder results.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("service returned no usable text")]
    EmptyResponse,

    #[error("could not parse service payload (near `{excerpt}`)")]
    MalformedPayload {
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn malformed(payload: &str, source: serde_json::Error) -> Self {
        let excerpt: String = payload.chars().take(80).collect();
        ApiError::MalformedPayload { excerpt, source }
    }
}
