//! Extracted exam document parsing
//!
//! The vision extraction step upstream emits one of two JSON shapes: a
//! binary sheet (`texto_principal` + `itens`) or a multiple-choice question
//! (`enunciado` + `alternativas`). This module turns either into queries.

use gabarito_application::{QuestionSource, SourceError};
use gabarito_domain::{Query, QuestionKind};
use serde::Deserialize;

/// Parser for the extraction JSON formats
#[derive(Debug, Default)]
pub struct JsonQuestionSource;

impl JsonQuestionSource {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtractedDoc {
    Binary {
        texto_principal: String,
        itens: Vec<BinaryItem>,
    },
    Choice {
        enunciado: String,
        alternativas: Vec<Alternative>,
        #[serde(default)]
        numero_questao: Option<ItemNumber>,
    },
}

#[derive(Deserialize)]
struct BinaryItem {
    numero: ItemNumber,
    afirmacao: String,
}

#[derive(Deserialize)]
struct Alternative {
    letra: String,
    texto: String,
}

/// Item numbers show up both as JSON numbers and as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemNumber {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemNumber::Number(n) => write!(f, "{n}"),
            ItemNumber::Text(s) => write!(f, "{s}"),
        }
    }
}

impl QuestionSource for JsonQuestionSource {
    fn questions(&self, raw: &str) -> Result<Vec<Query>, SourceError> {
        let doc: ExtractedDoc = serde_json::from_str(raw)
            .map_err(|e| SourceError::InvalidDocument(e.to_string()))?;

        let queries = match doc {
            ExtractedDoc::Binary {
                texto_principal,
                itens,
            } => itens
                .into_iter()
                .filter_map(|item| {
                    let text = format!(
                        "{}\n\nItem {}: {}",
                        texto_principal, item.numero, item.afirmacao
                    );
                    Query::try_new(text, item.numero.to_string().as_str(), QuestionKind::Binary)
                })
                .collect::<Vec<_>>(),
            ExtractedDoc::Choice {
                enunciado,
                alternativas,
                numero_questao,
            } => {
                let item = numero_questao
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "1".to_string());
                let mut text = enunciado;
                for alt in &alternativas {
                    text.push_str(&format!("\n{}) {}", alt.letra, alt.texto));
                }
                Query::try_new(text, item.as_str(), QuestionKind::MultipleChoice)
                    .into_iter()
                    .collect()
            }
        };

        if queries.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(queries)
    }
}
