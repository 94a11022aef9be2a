use crate::error::CodegenError;

/// Reject empty or whitespace-only prompts. Accepted prompts are returned as given.
pub fn validate_prompt(prompt: &str) -> Result<&str, CodegenError> {
    if prompt.trim().is_empty() {
        return Err(CodegenError::Validation("Prompt is required".to_string()));
    }
    Ok(prompt)
}

/// Pick the requested model, or the configured default when none (or a blank
/// one) was given.
pub fn resolve_model(requested: Option<&str>, default: &str) -> String {
    requested
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Build the instruction sent to the model.
///
/// The template is fixed: the same `prompt` and `language` always produce the
/// same text.
pub fn build_prompt(prompt: &str, language: &str) -> String {
    format!(
        "You are an expert {language} programmer. Generate clean, well-commented {language} code for the following request:\n\n\
         {prompt}\n\n\
         Please provide only the code without explanations, but include helpful comments in the code.\n\n\
         Code:"
    )
}
