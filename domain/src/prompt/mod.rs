//! Prompt templates for querying providers.
//!
//! Every provider receives the same instruction block for a given question
//! kind, so replies converge on the canonical formats the normalizer expects.
//! The instruction text is Portuguese because the exams are.

use crate::core::query::{Query, QuestionKind};

/// Templates rendering a [`Query`] into provider messages
pub struct PromptTemplate;

impl PromptTemplate {
    /// User prompt: the question text plus the format instructions for its kind
    pub fn user_prompt(query: &Query) -> String {
        match query.kind() {
            QuestionKind::Binary => Self::binary_prompt(query),
            QuestionKind::MultipleChoice => Self::choice_prompt(query),
            QuestionKind::Discursive => Self::discursive_prompt(query),
        }
    }

    /// System prompt for providers that accept a system role
    pub fn system_prompt(kind: QuestionKind) -> &'static str {
        match kind {
            QuestionKind::Binary => {
                "Você é um assistente especializado em julgar itens como verdadeiros ou falsos."
            }
            QuestionKind::MultipleChoice => {
                "Você é um assistente especializado em responder questões de múltipla escolha."
            }
            QuestionKind::Discursive => {
                "Você é um assistente especializado em responder questões discursivas com precisão e objetividade."
            }
        }
    }

    /// Reinforced system prompt for providers that drift from the format
    pub fn strict_system_prompt(kind: QuestionKind) -> &'static str {
        match kind {
            QuestionKind::MultipleChoice => {
                "Você é um assistente especializado em responder questões de múltipla escolha com extrema precisão e concisão. Siga EXATAMENTE o formato solicitado."
            }
            _ => Self::system_prompt(kind),
        }
    }

    fn binary_prompt(query: &Query) -> String {
        format!(
            r#"{}

INSTRUÇÕES IMPORTANTES:
- Avalie se o item {} é VERDADEIRO ou FALSO com base no texto acima
- Responda APENAS com "VERDADEIRO" ou "FALSO" (em maiúsculas)
- NÃO forneça explicações ou justificativas
- Seja direto e objetivo
"#,
            query.text(),
            query.item()
        )
    }

    fn choice_prompt(query: &Query) -> String {
        format!(
            r#"{}

INSTRUÇÕES IMPORTANTES:
- Responda APENAS com a letra da alternativa correta (A, B, C, D ou E)
- NÃO forneça explicações ou justificativas
- Retorne SOMENTE a alternativa correta, ex: "A alternativa correta é (B)"
- Seja direto e objetivo
"#,
            query.text()
        )
    }

    /// Stricter variant of the choice instructions, for providers that tend
    /// to ignore the softer block and reply with full explanations
    pub fn choice_prompt_strict(query: &Query) -> String {
        format!(
            r#"{}

INSTRUÇÕES IMPORTANTÍSSIMAS (SIGA EXATAMENTE ESTE FORMATO):
1. FORMATO OBRIGATÓRIO: "A alternativa correta é (X)" onde X é a letra A, B, C, D ou E.
2. NÃO REPITA o texto das alternativas.
3. NÃO inclua explicações ou justificativas.
4. NÃO use formatação adicional.
5. APENAS retorne a resposta no formato solicitado.
"#,
            query.text()
        )
    }

    fn discursive_prompt(query: &Query) -> String {
        format!(
            r#"{}

INSTRUÇÕES IMPORTANTES:
- Responda a questão {} de forma completa e objetiva
- Seja claro e fundamente a resposta no texto acima quando aplicável
"#,
            query.text(),
            query.item()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Query;

    #[test]
    fn test_binary_prompt_contains_question_and_item() {
        let query = Query::new("O Brasil é uma república.", "3", QuestionKind::Binary);
        let prompt = PromptTemplate::user_prompt(&query);
        assert!(prompt.contains("O Brasil é uma república."));
        assert!(prompt.contains("item 3"));
        assert!(prompt.contains("VERDADEIRO"));
    }

    #[test]
    fn test_choice_prompt_asks_for_canonical_format() {
        let query = Query::new("Qual é a capital?", "1", QuestionKind::MultipleChoice);
        let prompt = PromptTemplate::user_prompt(&query);
        assert!(prompt.contains("A alternativa correta é (B)"));
    }

    #[test]
    fn test_strict_choice_prompt_is_stricter() {
        let query = Query::new("Qual é a capital?", "1", QuestionKind::MultipleChoice);
        let prompt = PromptTemplate::choice_prompt_strict(&query);
        assert!(prompt.contains("IMPORTANTÍSSIMAS"));
        assert!(prompt.contains("FORMATO OBRIGATÓRIO"));
    }

    #[test]
    fn test_discursive_prompt_keeps_question() {
        let query = Query::new("Explique a fotossíntese.", "2", QuestionKind::Discursive);
        let prompt = PromptTemplate::user_prompt(&query);
        assert!(prompt.contains("Explique a fotossíntese."));
        assert!(!prompt.contains("VERDADEIRO"));
    }

    #[test]
    fn test_system_prompt_varies_by_kind() {
        assert_ne!(
            PromptTemplate::system_prompt(QuestionKind::Binary),
            PromptTemplate::system_prompt(QuestionKind::MultipleChoice)
        );
        assert!(
            PromptTemplate::strict_system_prompt(QuestionKind::MultipleChoice)
                .contains("EXATAMENTE")
        );
    }
}
