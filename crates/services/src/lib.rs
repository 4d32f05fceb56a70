#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod session;

pub use quiz_core::Clock;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use session::{QuizSession, QuizSummary, Transition, TransitionListener};
