use overflow_types::{
    AnswerId, AnswerVote, Direction, QuestionId, QuestionVote, UserId, VoteOutcome, VoteTarget,
};
use rusqlite::Connection;
use tracing::debug;

use crate::queries::{OptionalExt, query_answer, query_question, query_user};
use crate::{Result, Store, StoreError};

/// Table layout of one vote ledger. Both ledgers run the same algorithm and
/// differ only in the target column.
struct Ledger {
    table: &'static str,
    target_column: &'static str,
}

const QUESTION_LEDGER: Ledger = Ledger {
    table: "question_votes",
    target_column: "question_id",
};

const ANSWER_LEDGER: Ledger = Ledger {
    table: "answer_votes",
    target_column: "answer_id",
};

fn ledger_for(target: VoteTarget) -> &'static Ledger {
    match target {
        VoteTarget::Question(_) => &QUESTION_LEDGER,
        VoteTarget::Answer(_) => &ANSWER_LEDGER,
    }
}

impl Store {
    pub fn upvote(&self, voter_id: UserId, target: VoteTarget) -> Result<VoteOutcome> {
        self.vote(voter_id, target, Direction::Up)
    }

    pub fn downvote(&self, voter_id: UserId, target: VoteTarget) -> Result<VoteOutcome> {
        self.vote(voter_id, target, Direction::Down)
    }

    /// Records `voter_id`'s vote on `target`.
    ///
    /// A voter holds at most one record per target: voting again overwrites
    /// the direction. Votes on the voter's own question or answer are dropped
    /// without touching the ledger. Fails with a not-found error when the
    /// voter or the target does not exist.
    pub fn vote(
        &self,
        voter_id: UserId,
        target: VoteTarget,
        direction: Direction,
    ) -> Result<VoteOutcome> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            if query_user(&tx, voter_id)?.is_none() {
                return Err(StoreError::UserNotFound(voter_id));
            }

            let owner_id = query_owner(&tx, target)?;
            if owner_id == voter_id {
                debug!(voter_id = voter_id.0, %target, "self-vote ignored");
                return Ok(VoteOutcome::SelfVoteIgnored);
            }

            let ledger = ledger_for(target);
            let existing: Option<i64> = tx
                .query_row(
                    &format!(
                        "SELECT rowid FROM {} WHERE voter_id = ?1 AND {} = ?2",
                        ledger.table, ledger.target_column
                    ),
                    (voter_id.0, target.raw_id()),
                    |row| row.get(0),
                )
                .optional()?;

            let outcome = if let Some(rowid) = existing {
                tx.execute(
                    &format!("UPDATE {} SET direction = ?1 WHERE rowid = ?2", ledger.table),
                    (direction.value(), rowid),
                )?;
                VoteOutcome::Updated
            } else {
                tx.execute(
                    &format!(
                        "INSERT INTO {} (voter_id, {}, direction) VALUES (?1, ?2, ?3)",
                        ledger.table, ledger.target_column
                    ),
                    (voter_id.0, target.raw_id(), direction.value()),
                )?;
                VoteOutcome::Recorded
            };

            tx.commit()?;
            debug!(voter_id = voter_id.0, %target, ?direction, ?outcome, "vote applied");
            Ok(outcome)
        })
    }

    /// Net score of a target; 0 when nobody voted on it.
    pub fn popularity(&self, target: VoteTarget) -> Result<i64> {
        let ledger = ledger_for(target);
        self.with_conn(|conn| {
            let score = conn.query_row(
                &format!(
                    "SELECT COALESCE(SUM(direction), 0) FROM {} WHERE {} = ?1",
                    ledger.table, ledger.target_column
                ),
                [target.raw_id()],
                |row| row.get(0),
            )?;
            Ok(score)
        })
    }

    /// Number of records `voter_id` holds for `target`. Never more than one.
    pub fn votes_by(&self, voter_id: UserId, target: VoteTarget) -> Result<usize> {
        let ledger = ledger_for(target);
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE voter_id = ?1 AND {} = ?2",
                    ledger.table, ledger.target_column
                ),
                (voter_id.0, target.raw_id()),
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }

    pub fn question_votes(&self, question_id: QuestionId) -> Result<Vec<QuestionVote>> {
        self.with_conn(|conn| {
            query_directions(conn, &QUESTION_LEDGER, question_id.0)?
                .into_iter()
                .map(|(voter, direction)| {
                    Ok(QuestionVote {
                        voter_id: UserId(voter),
                        question_id,
                        direction: parse_direction(direction)?,
                    })
                })
                .collect()
        })
    }

    pub fn answer_votes(&self, answer_id: AnswerId) -> Result<Vec<AnswerVote>> {
        self.with_conn(|conn| {
            query_directions(conn, &ANSWER_LEDGER, answer_id.0)?
                .into_iter()
                .map(|(voter, direction)| {
                    Ok(AnswerVote {
                        voter_id: UserId(voter),
                        answer_id,
                        direction: parse_direction(direction)?,
                    })
                })
                .collect()
        })
    }
}

/// Author of the question or answer being voted on.
fn query_owner(conn: &Connection, target: VoteTarget) -> Result<UserId> {
    let owner = match target {
        VoteTarget::Question(id) => query_question(conn, id)?.map(|q| q.asker_id),
        VoteTarget::Answer(id) => query_answer(conn, id)?.map(|a| a.responder_id),
    };
    owner.ok_or_else(|| StoreError::target_not_found(target))
}

fn query_directions(conn: &Connection, ledger: &Ledger, target_id: i64) -> Result<Vec<(i64, i64)>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT voter_id, direction FROM {} WHERE {} = ?1 ORDER BY rowid",
        ledger.table, ledger.target_column
    ))?;
    let rows = stmt
        .query_map([target_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn parse_direction(value: i64) -> Result<Direction> {
    Direction::from_value(value).ok_or(StoreError::InvalidDirection(value))
}
