use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{DreResult, DreTable};

pub const PERSONA: &str = "Você é uma consultora contábil sênior.";

const INSTRUCTIONS: &str = "\
Analise a DRE abaixo e gere um resumo executivo com os seguintes pontos:
1. Lucro Bruto
2. Margem Operacional
3. Principais Despesas
4. Eficiência de Custos
5. Recomendações contábeis
Responda de forma objetiva, usando tópicos numerados, e evite repetir valores já visíveis na tabela.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A text-completion backend: takes a conversation, returns the reply text.
pub trait CompletionService {
    fn complete(&self, messages: &[ChatMessage]) -> DreResult<String>;
}

/// Renders the table as right-aligned text columns under the given headers.
pub fn render_table(table: &DreTable, description_column: &str, value_column: &str) -> String {
    let values: Vec<String> = table
        .items()
        .iter()
        .map(|item| item.value.to_string())
        .collect();

    let desc_width = table
        .items()
        .iter()
        .map(|item| item.description.chars().count())
        .chain(std::iter::once(description_column.chars().count()))
        .max()
        .unwrap_or_default();
    let value_width = values
        .iter()
        .map(|v| v.chars().count())
        .chain(std::iter::once(value_column.chars().count()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "{:>desc_width$} {:>value_width$}",
        description_column, value_column
    );
    for (item, value) in table.items().iter().zip(&values) {
        out.push('\n');
        out.push_str(&format!(
            "{:>desc_width$} {:>value_width$}",
            item.description, value
        ));
    }
    out
}

pub fn build_prompt(table_text: &str) -> String {
    format!("{PERSONA} {INSTRUCTIONS}\nDRE:\n{table_text}\n")
}

/// Asks the completion service for an executive summary of the table and
/// returns the reply untouched.
pub fn summarize<S: CompletionService + ?Sized>(
    table: &DreTable,
    description_column: &str,
    value_column: &str,
    service: &S,
) -> DreResult<String> {
    let prompt = build_prompt(&render_table(table, description_column, value_column));
    let messages = [ChatMessage::system(PERSONA), ChatMessage::user(prompt)];
    info!(lines = table.len(), "requesting executive summary");
    service.complete(&messages)
}
