/// Core error type for the reporter.
///
/// Adapter crates map their specific errors into this type so the binary can
/// print one diagnostic per failed run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID")]
    MissingCredentials,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Vnstat(String),

    #[error("external error: {0}")]
    External(String),

    /// A pipeline stage failed; displayed as `"<stage> error: <cause>"`.
    #[error("{stage} error: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn stage(stage: &'static str, source: Error) -> Self {
        Self::Stage {
            stage,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
