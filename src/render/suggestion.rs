//! 改进建议面板

use std::fmt;

use serde::Serialize;

use crate::api::SuggestFixResult;

pub const NO_ISSUES_MESSAGE: &str = "No major issues detected";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionItem {
    /// 建议类型（大写，作为标题）
    pub heading: String,
    pub target: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionView {
    pub items: Vec<SuggestionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub fn render_suggestions(result: &SuggestFixResult) -> SuggestionView {
    let items: Vec<SuggestionItem> = result
        .recommendations
        .iter()
        .map(|r| SuggestionItem {
            heading: r.kind.to_uppercase(),
            target: r.target.clone(),
            suggestion: r.suggestion.clone(),
        })
        .collect();
    let message = items.is_empty().then_some(NO_ISSUES_MESSAGE);
    SuggestionView { items, message }
}

impl fmt::Display for SuggestionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Improvement Suggestions ==")?;
        if let Some(msg) = self.message {
            return writeln!(f, "{msg}");
        }
        for item in &self.items {
            writeln!(f, "[{}] {}", item.heading, item.target)?;
            writeln!(f, "    {}", item.suggestion)?;
        }
        Ok(())
    }
}
