//! Forms, their questions and the answers profiles submit.

pub mod answer;
pub mod kind;
pub mod model;
pub mod question;

pub use answer::{ANSWER, Answer, NewAnswer};
pub use kind::QuestionKind;
pub use model::{FORM, Form, NewForm};
pub use question::{NewQuestion, QUESTION, Question};
