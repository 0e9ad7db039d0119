use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnswerId, Direction, QuestionId, UserId, VoteOutcome, VoteTarget};

/// Board state changes, emitted by the session after each write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BoardEvent {
    /// A nickname was registered for the session user
    UserRegistered { user_id: UserId, nickname: String },

    /// A new question was stored
    QuestionAsked {
        question_id: QuestionId,
        asker_id: UserId,
        title: String,
    },

    /// A new answer was stored
    AnswerPosted {
        answer_id: AnswerId,
        question_id: QuestionId,
        responder_id: UserId,
    },

    /// A vote reached a ledger. Self-votes are reported too, with
    /// `outcome: SelfVoteIgnored`.
    VoteCast {
        voter_id: UserId,
        target: VoteTarget,
        direction: Direction,
        outcome: VoteOutcome,
    },
}

impl BoardEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::QuestionAsked { .. } => "question_asked",
            Self::AnswerPosted { .. } => "answer_posted",
            Self::VoteCast { .. } => "vote_cast",
        }
    }

    /// Returns the voted-on target for vote events.
    pub fn target(&self) -> Option<VoteTarget> {
        match self {
            Self::VoteCast { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Timestamped event, as written to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: BoardEvent,
}

impl EventEnvelope {
    pub fn now(event: BoardEvent) -> Self {
        Self {
            at: Utc::now(),
            event,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
