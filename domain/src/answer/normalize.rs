//! Reply normalization for each question kind.
//!
//! These functions reduce free-form provider replies into canonical answer
//! tokens. They are pure domain logic — no I/O, no session state, just text
//! pattern matching. When no known pattern matches, the raw trimmed reply is
//! returned as an opaque answer: an unparseable reply is still a reply, not
//! an error.

use super::{Letter, NormalizedAnswer, Verdict};
use crate::core::query::QuestionKind;
use regex::Regex;
use std::sync::LazyLock;

/// "A alternativa correta é (X)" and close variants ("eh", "é:", no parens)
static ALTERNATIVE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)alternativa correta [éeh\s:]+\(?([A-Ea-e])\)?").expect("valid regex")
});

/// A bare parenthesized letter, e.g. "(B)"
static PAREN_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Ea-e])\)").expect("valid regex"));

/// The whole reply is a single letter, possibly wrapped in punctuation
static STANDALONE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^A-Za-z]*([A-Ea-e])[^A-Za-z]*$").expect("valid regex"));

/// "letra B", "opção C", "alternativa D"
static LETTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:letra|opção|alternativa)\s+([A-Ea-e])").expect("valid regex")
});

/// Last resort: any candidate letter, either case, followed by a non-letter
static ANY_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Ea-e])[^A-Za-z]").expect("valid regex"));

/// Normalize a raw reply according to the question kind
pub fn normalize_answer(kind: QuestionKind, raw: &str) -> NormalizedAnswer {
    match kind {
        QuestionKind::Binary => normalize_binary(raw),
        QuestionKind::MultipleChoice => normalize_choice(raw),
        QuestionKind::Discursive => NormalizedAnswer::Text(raw.trim().to_string()),
    }
}

/// Extract a VERDADEIRO/FALSO verdict from a reply.
///
/// Markers are searched case-sensitively, in priority order: the Portuguese
/// tokens, then the English equivalents, then a single V/F either surrounded
/// by whitespace or standing as the entire trimmed reply. The first match
/// wins; a reply with no marker is kept verbatim.
pub fn normalize_binary(raw: &str) -> NormalizedAnswer {
    let text = raw.trim();

    if text.contains("VERDADEIRO") {
        return NormalizedAnswer::Verdict(Verdict::True);
    }
    if text.contains("FALSO") {
        return NormalizedAnswer::Verdict(Verdict::False);
    }

    if text.contains("TRUE") {
        return NormalizedAnswer::Verdict(Verdict::True);
    }
    if text.contains("FALSE") {
        return NormalizedAnswer::Verdict(Verdict::False);
    }

    if text.contains(" V ") || text == "V" {
        return NormalizedAnswer::Verdict(Verdict::True);
    }
    if text.contains(" F ") || text == "F" {
        return NormalizedAnswer::Verdict(Verdict::False);
    }

    NormalizedAnswer::Text(text.to_string())
}

/// Extract an A–E alternative from a reply.
///
/// Patterns are tried in priority order: the explicit canonical phrase, a
/// bare parenthesized letter, a standalone letter, a "letra/opção X"
/// reference, and finally any candidate letter adjacent to a non-letter
/// character. The first match wins and is re-rendered into the canonical
/// phrase form.
pub fn normalize_choice(raw: &str) -> NormalizedAnswer {
    let text = raw.trim();

    let patterns: [&Regex; 5] = [
        &ALTERNATIVE_PHRASE,
        &PAREN_LETTER,
        &STANDALONE_LETTER,
        &LETTER_REFERENCE,
        &ANY_LETTER,
    ];

    for pattern in patterns {
        if let Some(caps) = pattern.captures(text)
            && let Some(m) = caps.get(1)
            && let Some(letter) = m.as_str().chars().next().and_then(Letter::from_char)
        {
            return NormalizedAnswer::Choice(letter);
        }
    }

    NormalizedAnswer::Text(text.to_string())
}
