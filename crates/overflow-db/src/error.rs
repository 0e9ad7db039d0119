use overflow_types::{AnswerId, QuestionId, UserId, VoteTarget};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("answer not found: {0}")]
    AnswerNotFound(AnswerId),

    #[error("stored vote has invalid direction {0}")]
    InvalidDirection(i64),

    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn target_not_found(target: VoteTarget) -> Self {
        match target {
            VoteTarget::Question(id) => Self::QuestionNotFound(id),
            VoteTarget::Answer(id) => Self::AnswerNotFound(id),
        }
    }

    /// True for the missing-record variants. Callers recover from these;
    /// everything else is a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::QuestionNotFound(_) | Self::AnswerNotFound(_)
        )
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
