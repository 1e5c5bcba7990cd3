use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Model {0} returned an empty reply")]
    EmptyReply(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ChatLogError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Chat log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chat log is not a valid JSON array: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ChatLogResult<T> = Result<T, ChatLogError>;
