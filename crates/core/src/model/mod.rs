mod chart;
mod grade;
mod history;
mod ids;
mod input;
mod question;
mod value;

pub use chart::{
    GridTable, PictogramChart, PictogramRow, SymbolShape, Table, TallyChart, TallyRow,
};
pub use grade::{Cell, GradeResult, RowFeedback, UnitGrade};
pub use history::{History, HistoryError, HistoryRecord, Installed};
pub use ids::{ParseTopicError, TopicId};
pub use input::{
    Board, LearnerInput, PartInput, Snapshot, SymbolToken, TallyGroup, Token, TokenError,
};
pub use question::{
    CloserTarget, CoordinateQuestion, Expected, FaultExplanation, FaultKind, FractionQuestion,
    FractionTask, LabeledPoint, MultiPartQuestion, OrderDirection, Part, PictogramQuestion,
    Question, QuestionError, SimpleQuestion, SubPart, SymbolTarget, TabularQuestion,
};
pub use value::{Answer, Fraction};
