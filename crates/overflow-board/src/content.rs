use overflow_db::{Result, Store, StoreError};
use overflow_types::{QuestionId, VoteTarget};

/// Display lines for one question: title, body, score and asker, followed by
/// every answer with its score and responder, in ascending answer id order.
pub fn content_for_single_question(store: &Store, question_id: QuestionId) -> Result<Vec<String>> {
    let question = store
        .find_question(question_id)?
        .ok_or(StoreError::QuestionNotFound(question_id))?;

    let mut lines = vec![
        format!("Title:    {}", question.title),
        format!("Body:     {}", question.body),
        format!("Votes:    {}", store.popularity(VoteTarget::Question(question_id))?),
        format!("Asked by: {}", store.nickname_of(question.asker_id)?),
    ];

    for (answer_id, answer) in store.answers_for_question(question_id)? {
        lines.push(String::new());
        lines.push(format!("{}) Answer:", answer_id));
        lines.push(answer.body);
        lines.push(format!(
            "Votes: {} (answer provided by {})",
            store.popularity(VoteTarget::Answer(answer_id))?,
            store.nickname_of(answer.responder_id)?,
        ));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_seeded_question_with_answer() {
        let store = Store::open_in_memory().unwrap();
        let lines = content_for_single_question(&store, QuestionId(9)).unwrap();
        assert_eq!(
            lines,
            vec![
                "Title:    Writing an Infinite Loop in Ruby",
                "Body:     How to do it?",
                "Votes:    -6",
                "Asked by: WeaponX",
                "",
                "14) Answer:",
                "Try this: loop do ... end",
                "Votes: -2 (answer provided by Avenger)",
            ]
        );
    }

    #[test]
    fn question_without_answers_has_four_lines() {
        let store = Store::open_in_memory().unwrap();
        let lines = content_for_single_question(&store, QuestionId(4)).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "Votes:    0");
        assert_eq!(lines[3], "Asked by: EtherealCereal");
    }

    #[test]
    fn new_answers_follow_seeded_ones() {
        let store = Store::open_in_memory().unwrap();
        let tester = store.create_user("Tester").unwrap();
        store.create_answer(QuestionId(1), tester, "arr.each_with_index").unwrap();

        let lines = content_for_single_question(&store, QuestionId(1)).unwrap();
        assert_eq!(lines[5], "10) Answer:");
        assert_eq!(lines[9], "15) Answer:");
        assert_eq!(lines[10], "arr.each_with_index");
        assert_eq!(lines[11], "Votes: 0 (answer provided by Tester)");
    }

    #[test]
    fn missing_question_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = content_for_single_question(&store, QuestionId(12)).unwrap_err();
        assert!(matches!(err, StoreError::QuestionNotFound(QuestionId(12))));
    }
}
