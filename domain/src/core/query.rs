//! Query value object

use serde::{Deserialize, Serialize};

/// What shape of answer the question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// True/false judgment of a single statement (VERDADEIRO/FALSO)
    Binary,
    /// Multiple choice with alternatives A through E
    MultipleChoice,
    /// Open-ended question answered with free text
    Discursive,
}

impl QuestionKind {
    /// Token budget for a provider reply to this kind of question.
    ///
    /// Closed-set answers only need a few tokens; discursive answers get a
    /// real budget.
    pub fn max_tokens(&self) -> u32 {
        match self {
            QuestionKind::Binary | QuestionKind::MultipleChoice => 50,
            QuestionKind::Discursive => 1000,
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QuestionKind::Binary => "binary",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::Discursive => "discursive",
        };
        write!(f, "{s}")
    }
}

/// Identifier of one question item within a sheet (e.g. "1", "2", "37")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::new(s)
    }
}

/// One question to be answered by the provider pool (Value Object)
///
/// Immutable once built. The kind decides which prompt template is rendered
/// and how replies are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
    item: ItemId,
    kind: QuestionKind,
}

impl Query {
    /// Create a new query
    ///
    /// # Panics
    /// Panics if the question text is empty or only whitespace
    pub fn new(text: impl Into<String>, item: impl Into<ItemId>, kind: QuestionKind) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Question text cannot be empty");
        Self {
            text,
            item: item.into(),
            kind,
        }
    }

    /// Try to create a query, returning None if the text is blank
    pub fn try_new(
        text: impl Into<String>,
        item: impl Into<ItemId>,
        kind: QuestionKind,
    ) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self {
                text,
                item: item.into(),
                kind,
            })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }
}
