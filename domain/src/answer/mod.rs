//! Canonical answer types and reply normalization

mod normalize;

pub use normalize::{normalize_answer, normalize_binary, normalize_choice};

use serde::{Deserialize, Serialize};

/// True/false judgment of a binary item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
}

impl Verdict {
    /// Canonical rendering used in prompts and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "VERDADEIRO",
            Verdict::False => "FALSO",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the five multiple-choice alternatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    /// All letters in alternative order (A first)
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::E];

    pub fn as_char(&self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
        }
    }

    /// Parse a letter, accepting either case
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            _ => None,
        }
    }

    /// Canonical phrase form, e.g. "A alternativa correta é (B)"
    pub fn canonical_phrase(&self) -> String {
        format!("A alternativa correta é ({})", self.as_char())
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A provider's final reduced answer for one query.
///
/// Closed-set questions normalize to a canonical token; when no token can be
/// extracted the raw trimmed reply is kept as an opaque answer rather than
/// treated as an error. Discursive replies are always `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizedAnswer {
    Verdict(Verdict),
    Choice(Letter),
    Text(String),
}

impl NormalizedAnswer {
    /// The canonical token if one was extracted
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            NormalizedAnswer::Verdict(v) => Some(*v),
            _ => None,
        }
    }

    pub fn letter(&self) -> Option<Letter> {
        match self {
            NormalizedAnswer::Choice(l) => Some(*l),
            _ => None,
        }
    }

    /// Whether a canonical token was extracted (not an opaque fallback)
    pub fn is_canonical(&self) -> bool {
        !matches!(self, NormalizedAnswer::Text(_))
    }

    /// Render the answer as presentation text
    pub fn display_text(&self) -> String {
        match self {
            NormalizedAnswer::Verdict(v) => v.as_str().to_string(),
            NormalizedAnswer::Choice(l) => l.canonical_phrase(),
            NormalizedAnswer::Text(t) => t.clone(),
        }
    }
}

impl std::fmt::Display for NormalizedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
