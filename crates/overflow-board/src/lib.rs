//! Terminal front end of the board: renders questions, reads menu input and
//! applies it to an [`overflow_db::Store`].
//!
//! - [`content`] renders a single question with its answers and scores.
//! - [`session`] is the navigation state machine driving one user's session.
//! - [`terminal`] is the line-based I/O seam the session talks through.
//! - [`sink`] receives a [`overflow_types::BoardEvent`] for every write.

pub mod content;
pub mod error;
pub mod session;
pub mod sink;
pub mod terminal;

pub use content::content_for_single_question;
pub use error::SessionError;
pub use session::{Flow, NavState, Session, run_session};
pub use sink::{EventSink, MemorySink, NullSink, TracingSink};
pub use terminal::{StdTerminal, Terminal};
