#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    #[error("Context not found")]
    ContextNotFound,

    #[error("Context already exists")]
    ContextAlreadyExists,

    #[error("Context limit exceeded")]
    ContextLimitExceeded,
}
