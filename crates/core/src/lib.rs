#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod generator;
pub mod grader;
pub mod model;
pub mod random;
pub mod settings;
pub mod time;

pub use error::Error;
pub use generator::{GenerateError, TopicEntry, generate};
pub use grader::{GradeError, grade};
pub use random::{ChaChaSource, Draws, RandomSource, ScriptedSource};
pub use settings::{QuizSettings, SettingsError};
pub use time::Clock;
