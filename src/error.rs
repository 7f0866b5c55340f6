use thiserror::Error;

pub type AResult<T> = Result<T, ChatError>;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend answered with status {0}")]
    BadStatus(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("io fail {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("cannot locate the home directory")]
    NoHome,
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("the reply channel went down")]
    ChannelDown,
}

impl ChatError {
    /// True for failures of a single chat exchange. These end up in the transcript as
    /// the fallback reply instead of propagating.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(
            self,
            ChatError::Network(_) | ChatError::BadStatus(_) | ChatError::MalformedBody(_)
        )
    }
}

impl<T> From<crossbeam::channel::SendError<T>> for ChatError {
    fn from(_: crossbeam::channel::SendError<T>) -> Self {
        ChatError::ChannelDown
    }
}
