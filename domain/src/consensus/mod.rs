//! Weighted-majority consensus over a ballot.
//!
//! [`resolve`] reduces a [`Ballot`] into one winning answer. It is a pure
//! function and it never fails: every error condition upstream has already
//! been absorbed into an absence, so the only "negative" outcome here is
//! `None`, meaning no provider produced any answer at all.
//!
//! The decision rules are deliberately literal about their ordering — in
//! particular, the vote-count tie-break by summed weight runs BEFORE the
//! high-trust pair agreement check. Both conditions can hold at once and the
//! order decides the winner, so it must not be "improved".

use crate::answer::{Letter, NormalizedAnswer, Verdict};
use crate::ballot::{Ballot, ProviderAnswer};
use crate::core::provider::ProviderId;
use crate::core::query::QuestionKind;
use serde::{Deserialize, Serialize};

/// Longest-answer scoring cap for discursive queries, in characters.
///
/// Answers longer than this still win against shorter ones, but do not gain
/// further advantage among themselves.
pub const DISCURSIVE_SCORE_CAP: usize = 500;

/// Vote threshold for a strong (outright) majority
const STRONG_MAJORITY: usize = 3;

/// Provider pairs whose agreement settles a two-vote tie, in priority order
const CONSENSUS_PAIRS: [(ProviderId, ProviderId); 6] = [
    (ProviderId::Claude, ProviderId::Gemini),
    (ProviderId::Claude, ProviderId::Gpt),
    (ProviderId::Claude, ProviderId::Grok),
    (ProviderId::Gemini, ProviderId::Gpt),
    (ProviderId::Gemini, ProviderId::Grok),
    (ProviderId::Gpt, ProviderId::Grok),
];

/// The winning answer for one query, with the full ballot kept for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// The winning canonical answer (or raw text when nothing normalized)
    pub answer: NormalizedAnswer,
    /// Every provider's contribution, for transparency and debugging
    pub ballot: Ballot,
}

impl ConsensusResult {
    fn new(answer: NormalizedAnswer, ballot: Ballot) -> Self {
        Self { answer, ballot }
    }
}

/// Reduce a ballot into one consensus answer.
///
/// Returns `None` only when every provider failed to produce an answer.
/// With exactly one answer present it is returned verbatim, canonical or
/// not. With two or more, the kind-specific voting rules apply.
pub fn resolve(kind: QuestionKind, ballot: Ballot) -> Option<ConsensusResult> {
    let answered: Vec<(&ProviderAnswer, &NormalizedAnswer)> = ballot
        .entries()
        .iter()
        .filter_map(|e| e.answer.as_ref().map(|a| (e, a)))
        .collect();

    if answered.is_empty() {
        return None;
    }

    if answered.len() == 1 {
        let answer = answered[0].1.clone();
        return Some(ConsensusResult::new(answer, ballot));
    }

    let answer = match kind {
        QuestionKind::Binary => resolve_binary(&answered),
        QuestionKind::MultipleChoice => resolve_choice(&answered),
        QuestionKind::Discursive => resolve_discursive(&answered),
    };

    Some(ConsensusResult::new(answer, ballot))
}

/// First answer in dispatch order, used when nothing normalizes.
///
/// Keeps the invariant that at least one produced answer means a non-null
/// result: an opaque reply beats no reply.
fn first_raw(answered: &[(&ProviderAnswer, &NormalizedAnswer)]) -> NormalizedAnswer {
    answered[0].1.clone()
}

// ============================================================================
// Binary (VERDADEIRO/FALSO)
// ============================================================================

fn resolve_binary(answered: &[(&ProviderAnswer, &NormalizedAnswer)]) -> NormalizedAnswer {
    let votes: Vec<(ProviderId, u32, Verdict)> = answered
        .iter()
        .filter_map(|(e, a)| a.verdict().map(|v| (e.provider, e.weight, v)))
        .collect();

    if votes.is_empty() {
        return first_raw(answered);
    }

    let true_count = votes.iter().filter(|(_, _, v)| *v == Verdict::True).count();
    let false_count = votes.len() - true_count;
    let true_weight: u32 = votes
        .iter()
        .filter(|(_, _, v)| *v == Verdict::True)
        .map(|(_, w, _)| *w)
        .sum();
    let false_weight: u32 = votes
        .iter()
        .filter(|(_, _, v)| *v == Verdict::False)
        .map(|(_, w, _)| *w)
        .sum();

    // 1. Strong majority: 3+ votes on one side, strictly ahead
    if true_count >= STRONG_MAJORITY && true_count > false_count {
        return NormalizedAnswer::Verdict(Verdict::True);
    }
    if false_count >= STRONG_MAJORITY && false_count > true_count {
        return NormalizedAnswer::Verdict(Verdict::False);
    }

    // 2. Equal vote counts: higher summed weight wins; FALSO on a full tie
    if true_count == false_count {
        return if true_weight > false_weight {
            NormalizedAnswer::Verdict(Verdict::True)
        } else {
            NormalizedAnswer::Verdict(Verdict::False)
        };
    }

    // 3. The two most trusted providers agreeing settle it
    let claude = verdict_of(&votes, ProviderId::Claude);
    let gemini = verdict_of(&votes, ProviderId::Gemini);
    if let (Some(c), Some(g)) = (claude, gemini)
        && c == g
    {
        return NormalizedAnswer::Verdict(c);
    }

    // 4. Plain majority
    if true_count > false_count {
        NormalizedAnswer::Verdict(Verdict::True)
    } else {
        NormalizedAnswer::Verdict(Verdict::False)
    }
}

fn verdict_of(votes: &[(ProviderId, u32, Verdict)], provider: ProviderId) -> Option<Verdict> {
    votes
        .iter()
        .find(|(p, _, _)| *p == provider)
        .map(|(_, _, v)| *v)
}

// ============================================================================
// Multiple choice (A–E)
// ============================================================================

fn resolve_choice(answered: &[(&ProviderAnswer, &NormalizedAnswer)]) -> NormalizedAnswer {
    let votes: Vec<(ProviderId, u32, Letter)> = answered
        .iter()
        .filter_map(|(e, a)| a.letter().map(|l| (e.provider, e.weight, l)))
        .collect();

    if votes.is_empty() {
        return first_raw(answered);
    }

    let count_of = |letter: Letter| votes.iter().filter(|(_, _, l)| *l == letter).count();
    let weight_of = |letter: Letter| -> u32 {
        votes
            .iter()
            .filter(|(_, _, l)| *l == letter)
            .map(|(_, w, _)| *w)
            .sum()
    };
    let voters_of = |letter: Letter| -> Vec<ProviderId> {
        votes
            .iter()
            .filter(|(_, _, l)| *l == letter)
            .map(|(p, _, _)| *p)
            .collect()
    };

    // 1. Strong majority: letters with 3+ votes
    let strong: Vec<Letter> = Letter::ALL
        .into_iter()
        .filter(|l| count_of(*l) >= STRONG_MAJORITY)
        .collect();

    if strong.len() == 1 {
        return NormalizedAnswer::Choice(strong[0]);
    }
    if strong.len() > 1 {
        // Several letters at 3+ votes: highest summed weight wins. Letters
        // are scanned A→E and only a strictly greater weight displaces the
        // leader, so an exact weight tie goes to the lowest letter.
        return NormalizedAnswer::Choice(heaviest(&strong, weight_of));
    }

    // 2. Partial consensus: letters with exactly 2 votes
    let pairs: Vec<Letter> = Letter::ALL
        .into_iter()
        .filter(|l| count_of(*l) == 2)
        .collect();

    if pairs.len() == 1 {
        let letter = pairs[0];
        if voters_of(letter).iter().any(|p| p.is_principal()) {
            return NormalizedAnswer::Choice(letter);
        }
    }

    if pairs.len() > 1 {
        // First agreeing high-trust pair among the tied letters wins
        for (a, b) in CONSENSUS_PAIRS {
            if let Some(letter) = pairs.iter().copied().find(|l| {
                let voters = voters_of(*l);
                voters.contains(&a) && voters.contains(&b)
            }) {
                return NormalizedAnswer::Choice(letter);
            }
        }
        return NormalizedAnswer::Choice(heaviest(&pairs, weight_of));
    }

    // 3. No consensus: first provider in trust-priority order that voted
    for provider in ProviderId::priority_order() {
        if let Some((_, _, letter)) = votes.iter().find(|(p, _, _)| *p == provider) {
            return NormalizedAnswer::Choice(*letter);
        }
    }

    // Unreachable with a closed provider set, but keep the raw fallback
    first_raw(answered)
}

fn heaviest(letters: &[Letter], weight_of: impl Fn(Letter) -> u32) -> Letter {
    let mut best = letters[0];
    let mut best_weight = weight_of(best);
    for &letter in &letters[1..] {
        let w = weight_of(letter);
        if w > best_weight {
            best = letter;
            best_weight = w;
        }
    }
    best
}

// ============================================================================
// Discursive (open-ended)
// ============================================================================

/// No voting for open-ended queries: pick the longest non-empty answer.
///
/// Length is scored as `min(chars, DISCURSIVE_SCORE_CAP)`; a later answer
/// must score strictly higher to displace an earlier one, so ties go to
/// encounter order.
fn resolve_discursive(answered: &[(&ProviderAnswer, &NormalizedAnswer)]) -> NormalizedAnswer {
    let mut best: Option<&NormalizedAnswer> = None;
    let mut best_score = 0usize;

    for &(_, answer) in answered {
        let len = answer.display_text().chars().count();
        if len == 0 {
            continue;
        }
        let score = len.min(DISCURSIVE_SCORE_CAP);
        if score > best_score {
            best = Some(answer);
            best_score = score;
        }
    }

    match best {
        Some(answer) => answer.clone(),
        None => first_raw(answered),
    }
}
