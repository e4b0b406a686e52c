//! Free-text identifier list parsing.
//!
//! Converts user-edited text (a textarea commit, a CLI argument) into an
//! ordered identifier sequence before it is handed to the mutation layer.

/// Split free text into identifier tokens.
///
/// Splits on any run of whitespace and/or commas, drops empty tokens, and
/// preserves order. Deliberately does **not** deduplicate — uniqueness is
/// enforced when the sequence is merged into a rule list's set.
pub fn parse_id_list(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
