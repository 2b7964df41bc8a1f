use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync cycle already in progress")]
    CycleInProgress,

    #[error("Mirror directory unusable: {0}")]
    MirrorUnusable(String),

    #[error("Publish failed during {step}: {message}")]
    Publish { step: String, message: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;
