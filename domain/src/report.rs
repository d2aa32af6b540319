//! Plain-text sheet report.
//!
//! Renders the per-item consensus answers of a whole sheet into the text
//! block that is printed and persisted after a run.

use crate::consensus::ConsensusResult;
use crate::core::query::ItemId;

/// Format all item results as a "RESULTADO DA ANÁLISE" report.
///
/// Items are rendered in the order given. `None` marks an item where no
/// provider produced any answer.
pub fn format_sheet_report(results: &[(ItemId, Option<ConsensusResult>)]) -> String {
    if results.is_empty() {
        return "Não foi possível analisar as questões".to_string();
    }

    let mut out = String::from("RESULTADO DA ANÁLISE:\n\n");
    for (item, result) in results {
        match result {
            Some(r) => {
                out.push_str(&format!("Item {}: {}\n", item, r.answer.display_text()));
                out.push_str(&format!("Votos: {}\n\n", r.ballot.tally_line()));
            }
            None => {
                out.push_str(&format!("Item {}: sem resposta\n\n", item));
            }
        }
    }
    out
}
