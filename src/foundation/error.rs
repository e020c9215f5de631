pub type CelebrationResult<T> = Result<T, CelebrationError>;

#[derive(thiserror::Error, Debug)]
pub enum CelebrationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CelebrationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<gif::EncodingError> for CelebrationError {
    fn from(err: gif::EncodingError) -> Self {
        match err {
            gif::EncodingError::Io(e) => Self::Io(e),
            other => Self::encode(other.to_string()),
        }
    }
}

impl From<image::ImageError> for CelebrationError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::Io(e),
            other => Self::encode(other.to_string()),
        }
    }
}
