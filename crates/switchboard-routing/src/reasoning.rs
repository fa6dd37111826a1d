//! Name-based detection of reasoning models.
//!
//! Used when a catalog entry does not state `reasoning_model` explicitly.

/// Whether a provider/model pair names an extended chain-of-thought model.
pub fn is_reasoning_model(provider: &str, model: &str) -> bool {
    if model.is_empty() {
        return false;
    }
    let model_lower = model.to_lowercase();
    let mentions_reasoning = model_lower.contains("reasoner") || model_lower.contains("reasoning");

    match provider {
        "openai" | "deepseek" | "openrouter" => {
            mentions_reasoning || model_lower.starts_with("gpt-5") || is_o_series(&model_lower)
        }
        "grok" => {
            mentions_reasoning
                || model_lower == "grok-4"
                || model_lower.starts_with("grok-3-mini")
                || model_lower.starts_with("grok-code")
        }
        "groq" => mentions_reasoning || model_lower.contains("gpt-oss"),
        _ => false,
    }
}

/// `o1`, `o3`, `o4-mini` and any later `o<digit>` family.
fn is_o_series(model_lower: &str) -> bool {
    let mut chars = model_lower.chars();
    chars.next() == Some('o') && chars.next().is_some_and(|next| next.is_ascii_digit())
}
