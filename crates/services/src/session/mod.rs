mod events;
mod service;
mod summary;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use events::{Transition, TransitionListener};
pub use service::QuizSession;
pub use summary::QuizSummary;
