use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY,
            nickname    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS questions (
            id          INTEGER PRIMARY KEY,
            asker_id    INTEGER NOT NULL REFERENCES users(id),
            title       TEXT NOT NULL,
            body        TEXT NOT NULL
        );

        -- question_id is not a foreign key: answers are
        -- accepted for any question id.
        CREATE TABLE IF NOT EXISTS answers (
            id              INTEGER PRIMARY KEY,
            question_id     INTEGER NOT NULL,
            responder_id    INTEGER NOT NULL REFERENCES users(id),
            body            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_answers_question
            ON answers(question_id, id);

        CREATE TABLE IF NOT EXISTS question_votes (
            voter_id        INTEGER NOT NULL REFERENCES users(id),
            question_id     INTEGER NOT NULL REFERENCES questions(id),
            direction       INTEGER NOT NULL CHECK (direction IN (-1, 1)),
            UNIQUE(voter_id, question_id)
        );

        CREATE INDEX IF NOT EXISTS idx_question_votes_question
            ON question_votes(question_id);

        CREATE TABLE IF NOT EXISTS answer_votes (
            voter_id        INTEGER NOT NULL REFERENCES users(id),
            answer_id       INTEGER NOT NULL REFERENCES answers(id),
            direction       INTEGER NOT NULL CHECK (direction IN (-1, 1)),
            UNIQUE(voter_id, answer_id)
        );

        CREATE INDEX IF NOT EXISTS idx_answer_votes_answer
            ON answer_votes(answer_id);
        ",
    )?;

    info!("Store schema ready");
    Ok(())
}

/// Loads the fixture board every session starts from.
pub fn seed(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        INSERT OR IGNORE INTO users (id, nickname) VALUES
            (1, 'Warrior'),
            (2, 'EtherealCereal'),
            (3, 'AgentSmith'),
            (4, 'WeaponX'),
            (5, 'ManOnTheRun'),
            (6, 'ButtersFromSouthPark'),
            (7, 'Avenger');

        INSERT OR IGNORE INTO questions (id, asker_id, title, body) VALUES
            (1, 4, 'Iterating Over an Array in Ruby', 'How to do it?'),
            (2, 7, 'Substituting Variables Into Strings in Ruby', 'How to do it?'),
            (3, 1, 'Generating Random Numbers in Ruby', 'How to do it?'),
            (4, 2, 'Validating an Email Address in Ruby', 'How to do it?'),
            (5, 4, 'Generating Prime Numbers in Ruby', 'How to do it?'),
            (6, 5, 'Performing Date Arithmetic in Ruby', 'How to do it?'),
            (7, 1, 'Removing Duplicate Elements from an Array in Ruby', 'How to do it?'),
            (8, 6, 'Using Symbols as Hash Keys in Ruby', 'How to do it?'),
            (9, 4, 'Writing an Infinite Loop in Ruby', 'How to do it?');

        -- Answer ids start at 10 and skip 13.
        INSERT OR IGNORE INTO answers (id, question_id, responder_id, body) VALUES
            (10, 1, 5, 'Try this: your_array.each { |x| ... }'),
            (11, 2, 3, 'Try this: #{variable_to_interpolate}'),
            (12, 5, 1, 'You need the mathn gem.'),
            (14, 9, 7, 'Try this: loop do ... end');

        INSERT OR IGNORE INTO question_votes (voter_id, question_id, direction) VALUES
            (1, 1, 1), (2, 1, 1), (3, 1, 1), (5, 1, 1), (7, 1, 1),
            (1, 2, 1), (2, 2, 1), (3, 2, 1), (4, 2, 1),
            (2, 3, 1), (3, 3, 1), (4, 3, 1), (5, 3, 1), (6, 3, 1), (7, 3, 1),
            (1, 9, -1), (2, 9, -1), (3, 9, -1), (5, 9, -1), (6, 9, -1), (7, 9, -1);

        INSERT OR IGNORE INTO answer_votes (voter_id, answer_id, direction) VALUES
            (1, 10, 1), (2, 10, 1), (3, 10, 1),
            (1, 11, 1), (4, 11, 1), (5, 11, 1), (7, 11, 1),
            (2, 12, 1), (3, 12, 1), (4, 12, 1), (5, 12, 1), (6, 12, 1),
            (4, 14, -1), (5, 14, -1);
        ",
    )?;

    info!("Fixture data seeded");
    Ok(())
}
