pub mod events;
pub mod models;

pub use events::{BoardEvent, EventEnvelope};
pub use models::{
    Answer, AnswerId, AnswerVote, Direction, Question, QuestionId, QuestionVote, User, UserId,
    VoteOutcome, VoteTarget,
};
