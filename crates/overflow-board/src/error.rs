use overflow_db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
