//! Reports built from repository reads.

pub mod grouped;

pub use grouped::{
    AnswerEntry, AnswerGroup, FormAnswerReport, GroupedAnswerReport, QuestionAnswers, UNGROUPED,
};
