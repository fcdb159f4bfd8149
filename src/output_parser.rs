//! Decoding of free-form model output into typed records.
//!
//! The model is asked (through [`format_instructions`]) to answer with a JSON
//! object matching the schema of the target type. Its answer is then either
//! decoded into that type or rejected with an [`OutputParseError`].

use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use thiserror::Error;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum OutputParseError {
    #[error("model output contained no JSON")]
    Empty,
    #[error("model output did not match the expected shape: {source}; output was: {output}")]
    Mismatch {
        output: String,
        source: serde_json::Error,
    },
}

/// Instructions appended to a prompt telling the model which shape to answer in.
pub fn format_instructions<T: JsonSchema>() -> Result<String, serde_json::Error> {
    let schema = serde_json::to_string(&schema_for!(T))?;
    Ok(format!(
        "Respond only with a JSON object that conforms to the JSON Schema below, \
         wrapped in a markdown code block.\n\n{FENCE}json\n{schema}\n{FENCE}"
    ))
}

/// Picks the JSON candidate out of the model output: the body of the first
/// fenced code block if there is one, the whole trimmed text otherwise.
fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let Some(start) = text.find(FENCE) else {
        return text;
    };
    let body = &text[start + FENCE.len()..];
    let body = body.strip_prefix("json").unwrap_or(body);
    let end = body.find(FENCE).unwrap_or(body.len());
    body[..end].trim()
}

pub fn parse<T: DeserializeOwned>(text: &str) -> Result<T, OutputParseError> {
    let candidate = extract_json(text);
    if candidate.is_empty() {
        return Err(OutputParseError::Empty);
    }
    serde_json::from_str(candidate).map_err(|source| OutputParseError::Mismatch {
        output: candidate.to_string(),
        source,
    })
}
