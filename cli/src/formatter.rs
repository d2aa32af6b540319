//! Console output formatter for consensus results

use colored::Colorize;
use gabarito_application::SheetOutcome;
use gabarito_domain::{ConsensusResult, ItemId, NormalizedAnswer, Verdict};

/// Formats consensus results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one item's result with its full ballot
    pub fn format_result(item: &ItemId, result: Option<&ConsensusResult>) -> String {
        let mut output = String::new();

        match result {
            Some(result) => {
                output.push_str(&format!(
                    "{} {}\n",
                    format!("Item {}:", item).cyan().bold(),
                    Self::colored_answer(&result.answer)
                ));
                for entry in result.ballot.entries() {
                    let answer = match &entry.answer {
                        Some(a) => a.display_text(),
                        None => "sem resposta".dimmed().to_string(),
                    };
                    output.push_str(&format!(
                        "  {} (peso {}): {}\n",
                        entry.provider.as_str().yellow(),
                        entry.weight,
                        answer
                    ));
                }
            }
            None => {
                output.push_str(&format!(
                    "{} {}\n",
                    format!("Item {}:", item).cyan().bold(),
                    "nenhum provedor respondeu".red()
                ));
            }
        }

        output
    }

    /// Format a whole sheet run
    pub fn format_sheet(outcome: &SheetOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "RESULTADO DA ANÁLISE".cyan().bold()));

        for (item, result) in &outcome.results {
            output.push_str(&Self::format_result(item, result.as_ref()));
            output.push('\n');
        }

        if let Some(path) = &outcome.saved_to {
            output.push_str(&format!(
                "{} {}\n",
                "Relatório salvo em:".green(),
                path.display()
            ));
        }

        output
    }

    fn colored_answer(answer: &NormalizedAnswer) -> String {
        match answer {
            NormalizedAnswer::Verdict(Verdict::True) => "VERDADEIRO".green().bold().to_string(),
            NormalizedAnswer::Verdict(Verdict::False) => "FALSO".red().bold().to_string(),
            NormalizedAnswer::Choice(letter) => {
                letter.canonical_phrase().as_str().green().bold().to_string()
            }
            NormalizedAnswer::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gabarito_domain::{Ballot, ProviderAnswer, ProviderId};

    #[test]
    fn test_format_result_shows_ballot() {
        colored::control::set_override(false);

        let result = ConsensusResult {
            answer: NormalizedAnswer::Verdict(Verdict::True),
            ballot: Ballot::new(vec![
                ProviderAnswer::answered(
                    ProviderId::Claude,
                    5,
                    NormalizedAnswer::Verdict(Verdict::True),
                ),
                ProviderAnswer::absent(ProviderId::Maritaca, 3),
            ]),
        };

        let text = ConsoleFormatter::format_result(&ItemId::new("1"), Some(&result));
        assert!(text.contains("Item 1: VERDADEIRO"));
        assert!(text.contains("claude (peso 5): VERDADEIRO"));
        assert!(text.contains("maritaca (peso 3): sem resposta"));
    }

    #[test]
    fn test_format_result_without_answers() {
        colored::control::set_override(false);

        let text = ConsoleFormatter::format_result(&ItemId::new("2"), None);
        assert!(text.contains("nenhum provedor respondeu"));
    }
}
