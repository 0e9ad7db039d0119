use overflow_db::Store;
use overflow_types::{AnswerId, BoardEvent, Direction, QuestionId, User, VoteTarget};
use tracing::{debug, info, warn};

use crate::content::content_for_single_question;
use crate::error::SessionError;
use crate::sink::EventSink;
use crate::terminal::Terminal;

const NICKNAME_PROMPT: &str = "Hello there! Choose a nickname:";
const OPTION_PROMPT: &str = "Select an option:";
const QUESTION_PROMPT: &str = "Ask a question:";
const ANSWER_PROMPT: &str = "Provide an answer:";
const ANSWER_SELECT_PROMPT: &str = "Select an answer:";

/// Where the user is in the menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    MainMenu,
    /// Question listing, captured when the state was entered.
    AllQuestions { listing: Vec<String> },
    SingleQuestion { question_id: QuestionId },
    /// An answer was picked from a question's page and awaits a one-shot
    /// up/down choice.
    AnswerSelected {
        question_id: QuestionId,
        answer_id: AnswerId,
    },
}

impl NavState {
    pub fn banner(&self) -> String {
        match self {
            Self::MainMenu => "Main menu".to_string(),
            Self::AllQuestions { .. } => "Showing all questions".to_string(),
            Self::SingleQuestion { .. } => {
                "Showing single question (and its answers, if there are any)".to_string()
            }
            Self::AnswerSelected { answer_id, .. } => format!("Voting on answer {}", answer_id),
        }
    }

    pub fn options(&self) -> Vec<String> {
        let options: &[&str] = match self {
            Self::MainMenu => &["1) Show all questions", "2) Ask a question"],
            Self::AllQuestions { listing } => return listing.clone(),
            Self::SingleQuestion { .. } => &[
                "1) Upvote the question   (not possible if you authored it)",
                "2) Downvote the question (not possible if you authored it)",
                "3) Provide an answer",
                "4) Select an answer to upvote/downvote",
            ],
            Self::AnswerSelected { .. } => &[
                "1) Upvote the selected answer   (not possible if you authored it)",
                "2) Downvote the selected answer (not possible if you authored it)",
            ],
        };
        options.iter().map(|o| o.to_string()).collect()
    }

    /// The question whose page is shown, if any.
    pub fn selected_question(&self) -> Option<QuestionId> {
        match self {
            Self::SingleQuestion { question_id } | Self::AnswerSelected { question_id, .. } => {
                Some(*question_id)
            }
            _ => None,
        }
    }
}

/// Whether the session loop keeps going after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One user's pass through the menus.
pub struct Session<'a> {
    store: &'a Store,
    sink: &'a dyn EventSink,
    user: User,
    state: NavState,
}

impl<'a> Session<'a> {
    /// Starts a session for an already registered user, at the main menu.
    pub fn new(store: &'a Store, sink: &'a dyn EventSink, user: User) -> Self {
        Self {
            store,
            sink,
            user,
            state: NavState::MainMenu,
        }
    }

    /// Asks for a nickname and registers it. Returns `None` when input ends
    /// before a nickname was given.
    pub fn register(
        store: &'a Store,
        sink: &'a dyn EventSink,
        term: &mut dyn Terminal,
    ) -> Result<Option<Self>, SessionError> {
        term.clear()?;
        let Some(nickname) = term.prompt(NICKNAME_PROMPT)? else {
            return Ok(None);
        };

        let user_id = store.create_user(&nickname)?;
        info!(user_id = user_id.0, "Registered {}", nickname);
        sink.emit(BoardEvent::UserRegistered {
            user_id,
            nickname: nickname.clone(),
        });

        Ok(Some(Self::new(
            store,
            sink,
            User {
                id: user_id,
                nickname,
            },
        )))
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Lines of the current screen, without the trailing option prompt.
    pub fn render(&self) -> Result<Vec<String>, SessionError> {
        let mut lines = vec![
            format!("Logged in as: {}", self.user.nickname),
            String::new(),
            self.state.banner(),
        ];

        if let Some(question_id) = self.state.selected_question() {
            lines.push(String::new());
            lines.extend(content_for_single_question(self.store, question_id)?);
        }

        lines.push(String::new());
        lines.extend(self.state.options());
        lines.push(String::new());
        if self.state != NavState::MainMenu {
            lines.push("m) Main menu".to_string());
        }
        lines.push("q) Quit".to_string());
        lines.push(String::new());

        Ok(lines)
    }

    /// Renders, reads and applies inputs until the user quits or input ends.
    pub fn run(&mut self, term: &mut dyn Terminal) -> Result<(), SessionError> {
        loop {
            term.clear()?;
            term.show(&self.render()?)?;

            let Some(input) = term.prompt(OPTION_PROMPT)? else {
                debug!("input closed");
                return Ok(());
            };

            if self.handle(&input, term)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Applies one line of menu input. Sub-prompts (question title, answer
    /// text, answer id) are read from `term`.
    pub fn handle(&mut self, input: &str, term: &mut dyn Terminal) -> Result<Flow, SessionError> {
        if input == "q" {
            info!(user_id = self.user.id.0, "Quit");
            return Ok(Flow::Quit);
        }

        if input == "m" && self.state != NavState::MainMenu {
            self.transition(NavState::MainMenu);
            return Ok(Flow::Continue);
        }

        match (&self.state, input) {
            (NavState::MainMenu, "1") => {
                let listing = self.store.question_listing()?;
                self.transition(NavState::AllQuestions { listing });
            }
            (NavState::MainMenu, "2") => {
                term.clear()?;
                let Some(title) = term.prompt(QUESTION_PROMPT)? else {
                    return Ok(Flow::Quit);
                };
                let question_id = self.store.create_question(self.user.id, &title)?;
                self.sink.emit(BoardEvent::QuestionAsked {
                    question_id,
                    asker_id: self.user.id,
                    title,
                });
            }
            (NavState::AllQuestions { .. }, choice) => {
                if let Some(id) = parse_id(choice) {
                    let question_id = QuestionId(id);
                    if self.store.question_exists(question_id)? {
                        self.transition(NavState::SingleQuestion { question_id });
                    }
                }
            }
            (NavState::SingleQuestion { question_id }, "1") => {
                let target = VoteTarget::Question(*question_id);
                self.cast_vote(target, Direction::Up)?;
            }
            (NavState::SingleQuestion { question_id }, "2") => {
                let target = VoteTarget::Question(*question_id);
                self.cast_vote(target, Direction::Down)?;
            }
            (NavState::SingleQuestion { question_id }, "3") => {
                let question_id = *question_id;
                let Some(body) = term.prompt(ANSWER_PROMPT)? else {
                    return Ok(Flow::Quit);
                };
                let answer_id = self.store.create_answer(question_id, self.user.id, &body)?;
                self.sink.emit(BoardEvent::AnswerPosted {
                    answer_id,
                    question_id,
                    responder_id: self.user.id,
                });
            }
            (NavState::SingleQuestion { question_id }, "4") => {
                let question_id = *question_id;
                let Some(choice) = term.prompt(ANSWER_SELECT_PROMPT)? else {
                    return Ok(Flow::Quit);
                };
                if let Some(id) = parse_id(&choice) {
                    let answer_id = AnswerId(id);
                    if self.store.answer_exists(answer_id)? {
                        self.transition(NavState::AnswerSelected {
                            question_id,
                            answer_id,
                        });
                    }
                }
            }
            (NavState::AnswerSelected { question_id, answer_id }, choice) => {
                let question_id = *question_id;
                let target = VoteTarget::Answer(*answer_id);
                match choice {
                    "1" => self.cast_vote(target, Direction::Up)?,
                    "2" => self.cast_vote(target, Direction::Down)?,
                    _ => {}
                }
                self.transition(NavState::SingleQuestion { question_id });
            }
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn transition(&mut self, next: NavState) {
        debug!(from = %self.state.banner(), to = %next.banner(), "navigate");
        self.state = next;
    }

    /// Applies a vote. A missing target aborts the vote and keeps the session
    /// alive; self-votes pass through silently.
    fn cast_vote(&self, target: VoteTarget, direction: Direction) -> Result<(), SessionError> {
        match self.store.vote(self.user.id, target, direction) {
            Ok(outcome) => {
                self.sink.emit(BoardEvent::VoteCast {
                    voter_id: self.user.id,
                    target,
                    direction,
                    outcome,
                });
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                warn!(%target, "Vote aborted: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Registers a user and runs their session to completion.
pub fn run_session(
    store: &Store,
    sink: &dyn EventSink,
    term: &mut dyn Terminal,
) -> Result<(), SessionError> {
    match Session::register(store, sink, term)? {
        Some(mut session) => session.run(term),
        None => Ok(()),
    }
}

/// Menu input as an id. Anything that is not a plain integer matches no id.
fn parse_id(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}
