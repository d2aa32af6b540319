//! Ballot types — provider-tagged answers for one query.
//!
//! A [`Ballot`] collects what every configured provider answered (or failed
//! to answer) for a single query, together with each provider's voting
//! weight. It is transient: built by the dispatcher, consumed immediately by
//! the consensus resolver, and carried inside the final result only for
//! auditability.

use crate::answer::NormalizedAnswer;
use crate::core::provider::ProviderId;
use serde::{Deserialize, Serialize};

/// One provider's contribution to a ballot.
///
/// `answer` is `None` when the provider was unconfigured or every candidate
/// model failed — an absence, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAnswer {
    /// Which provider this entry belongs to
    pub provider: ProviderId,
    /// The provider's voting weight
    pub weight: u32,
    /// The normalized answer, if the provider produced one
    pub answer: Option<NormalizedAnswer>,
}

impl ProviderAnswer {
    pub fn answered(provider: ProviderId, weight: u32, answer: NormalizedAnswer) -> Self {
        Self {
            provider,
            weight,
            answer: Some(answer),
        }
    }

    pub fn absent(provider: ProviderId, weight: u32) -> Self {
        Self {
            provider,
            weight,
            answer: None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.answer.is_none()
    }
}

/// All provider answers (including absences) for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    entries: Vec<ProviderAnswer>,
}

impl Ballot {
    pub fn new(entries: Vec<ProviderAnswer>) -> Self {
        Self { entries }
    }

    /// Every entry, present or absent, in dispatch order
    pub fn entries(&self) -> &[ProviderAnswer] {
        &self.entries
    }

    /// Entries that carry an answer, in dispatch order
    pub fn answered(&self) -> impl Iterator<Item = &ProviderAnswer> {
        self.entries.iter().filter(|e| e.answer.is_some())
    }

    /// Number of providers that produced any answer
    pub fn answered_count(&self) -> usize {
        self.answered().count()
    }

    /// Look up one provider's answer
    pub fn answer_of(&self, provider: ProviderId) -> Option<&NormalizedAnswer> {
        self.entries
            .iter()
            .find(|e| e.provider == provider)
            .and_then(|e| e.answer.as_ref())
    }

    /// Human-readable tally line for logging, e.g. "claude=VERDADEIRO gpt=-"
    pub fn tally_line(&self) -> String {
        self.entries
            .iter()
            .map(|e| match &e.answer {
                Some(a) => format!("{}={}", e.provider, a.display_text()),
                None => format!("{}=-", e.provider),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{NormalizedAnswer, Verdict};

    #[test]
    fn test_ballot_counts() {
        let ballot = Ballot::new(vec![
            ProviderAnswer::answered(
                ProviderId::Claude,
                5,
                NormalizedAnswer::Verdict(Verdict::True),
            ),
            ProviderAnswer::absent(ProviderId::Gpt, 4),
        ]);

        assert_eq!(ballot.entries().len(), 2);
        assert_eq!(ballot.answered_count(), 1);
        assert!(ballot.answer_of(ProviderId::Gpt).is_none());
        assert_eq!(
            ballot.answer_of(ProviderId::Claude),
            Some(&NormalizedAnswer::Verdict(Verdict::True))
        );
    }

    #[test]
    fn test_tally_line_marks_absences() {
        let ballot = Ballot::new(vec![
            ProviderAnswer::answered(
                ProviderId::Gemini,
                6,
                NormalizedAnswer::Verdict(Verdict::False),
            ),
            ProviderAnswer::absent(ProviderId::Maritaca, 3),
        ]);

        assert_eq!(ballot.tally_line(), "gemini=FALSO maritaca=-");
    }
}
