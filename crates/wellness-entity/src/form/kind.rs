//! Question input kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free text.
    Text,
    /// One option out of `options`.
    SingleChoice,
    /// Any number of options out of `options`.
    MultipleChoice,
    /// Integer score on a fixed scale.
    Scale,
    /// Yes or no.
    Boolean,
}

impl QuestionKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SingleChoice => "single_choice",
            Self::MultipleChoice => "multiple_choice",
            Self::Scale => "scale",
            Self::Boolean => "boolean",
        }
    }

    /// Whether answers pick from the question's options.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultipleChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
