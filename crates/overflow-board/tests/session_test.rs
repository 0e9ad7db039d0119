use std::io::Cursor;

use overflow_board::{EventSink, MemorySink, NullSink, Session, StdTerminal, run_session};
use overflow_db::{QUESTION_PLACEHOLDER_BODY, Store};
use overflow_types::{
    AnswerId, BoardEvent, Direction, QuestionId, User, UserId, VoteOutcome, VoteTarget,
};

const Q10: VoteTarget = VoteTarget::Question(QuestionId(10));

/// Runs one whole session over `script` and returns everything it printed.
fn play(store: &Store, sink: &dyn EventSink, script: &str) -> String {
    let mut term = StdTerminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    run_session(store, sink, &mut term).unwrap();
    String::from_utf8(term.into_output()).unwrap()
}

/// Like `play`, but resumes an existing user instead of registering one.
fn play_as(store: &Store, user: User, script: &str) -> String {
    let mut term = StdTerminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
    Session::new(store, &NullSink, user).run(&mut term).unwrap();
    String::from_utf8(term.into_output()).unwrap()
}

#[test]
fn register_ask_and_open_question() {
    let store = Store::open_in_memory().unwrap();
    let sink = MemorySink::new();

    let out = play(&store, &sink, "Tester\n2\nTest Q\n1\n10\nq\n");

    assert_eq!(store.nickname_of(UserId(8)).unwrap(), "Tester");
    let question = store.find_question(QuestionId(10)).unwrap().unwrap();
    assert_eq!(question.asker_id, UserId(8));
    assert_eq!(question.title, "Test Q");
    assert_eq!(question.body, QUESTION_PLACEHOLDER_BODY);

    assert!(out.starts_with("Hello there! Choose a nickname:\nLogged in as: Tester\n"));
    assert!(out.contains("Ask a question:\n"));
    assert!(out.contains("10) Test Q\n"));
    assert!(out.contains(
        "Title:    Test Q\nBody:     Any ideas?\nVotes:    0\nAsked by: Tester\n\n1) Upvote"
    ));

    assert_eq!(
        sink.events(),
        vec![
            BoardEvent::UserRegistered {
                user_id: UserId(8),
                nickname: "Tester".into(),
            },
            BoardEvent::QuestionAsked {
                question_id: QuestionId(10),
                asker_id: UserId(8),
                title: "Test Q".into(),
            },
        ]
    );
}

#[test]
fn asker_cannot_move_their_own_score() {
    let store = Store::open_in_memory().unwrap();

    let out = play(&store, &NullSink, "Tester\n2\nTest Q\n1\n10\n1\n1\n2\nq\n");

    assert_eq!(store.popularity(Q10).unwrap(), 0);
    assert_eq!(store.votes_by(UserId(8), Q10).unwrap(), 0);
    assert!(!out.contains("Votes:    1"));
    assert!(!out.contains("Votes:    -1"));
}

#[test]
fn repeated_votes_keep_one_record() {
    let store = Store::open_in_memory().unwrap();
    play(&store, &NullSink, "Tester\n2\nTest Q\nq\n");

    let sink = MemorySink::new();
    let out = play(&store, &sink, "Voter\n1\n10\n1\n1\nq\n");

    let voter = UserId(9);
    assert_eq!(store.popularity(Q10).unwrap(), 1);
    assert_eq!(store.votes_by(voter, Q10).unwrap(), 1);
    assert!(out.contains("Votes:    1\nAsked by: Tester\n"));

    let outcomes: Vec<VoteOutcome> = sink
        .events()
        .into_iter()
        .filter_map(|e| match e {
            BoardEvent::VoteCast { outcome, .. } => Some(outcome),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes, vec![VoteOutcome::Recorded, VoteOutcome::Updated]);

    play(&store, &NullSink, "Voter again\n1\n10\n2\nq\n");
    play(&store, &NullSink, "Flipper\n1\n10\n1\n2\nq\n");
    assert_eq!(store.popularity(Q10).unwrap(), -1);
    assert_eq!(store.votes_by(UserId(11), Q10).unwrap(), 1);
    let flipped = store
        .question_votes(QuestionId(10))
        .unwrap()
        .into_iter()
        .find(|v| v.voter_id == UserId(11))
        .unwrap();
    assert_eq!(flipped.direction, Direction::Down);
}

#[test]
fn answer_and_vote_on_it() {
    let store = Store::open_in_memory().unwrap();

    let out = play(&store, &NullSink, "Helper\n1\n4\n3\nUse a regex\nq\n");
    assert!(out.contains("Provide an answer:\n"));
    let answer = store.find_answer(AnswerId(15)).unwrap().unwrap();
    assert_eq!(answer.question_id, QuestionId(4));
    assert_eq!(answer.responder_id, UserId(8));

    // The responder's own vote is ignored, another user's counts.
    let helper = User {
        id: UserId(8),
        nickname: "Helper".into(),
    };
    play_as(&store, helper, "1\n4\n4\n15\n1\nq\n");
    let a15 = VoteTarget::Answer(AnswerId(15));
    assert_eq!(store.popularity(a15).unwrap(), 0);

    let out = play(&store, &NullSink, "Reader\n1\n4\nm\n1\n4\n4\n15\n1\nq\n");
    assert_eq!(store.popularity(a15).unwrap(), 1);
    assert!(out.contains("Select an answer:\n"));
    assert!(out.contains("Voting on answer 15\n"));
    assert!(out.contains("15) Answer:\nUse a regex\nVotes: 1 (answer provided by Helper)\n"));
}

#[test]
fn session_ends_cleanly_when_input_runs_out() {
    let store = Store::open_in_memory().unwrap();

    let out = play(&store, &NullSink, "");
    assert_eq!(out, "Hello there! Choose a nickname:\n");
    assert_eq!(store.find_user(UserId(8)).unwrap(), None);

    play(&store, &NullSink, "Drifter\n1\n3\n");
    assert_eq!(store.nickname_of(UserId(8)).unwrap(), "Drifter");
}
