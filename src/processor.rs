use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::lesson::AarohOutput;
use crate::llm::{API_KEY_ENV, GeminiClient, StructuredGenerator, StructuredRequest};

pub const MODEL: &str = "gemini-2.5-flash";
pub const TEMPERATURE: f32 = 0.4;

pub const SYSTEM_PROMPT: &str = concat!(
    "You are Project Aaroh, a friendly and extremely patient teacher. ",
    "Your mission is to explain complex topics and phrases in a way that a five-year-old child ",
    "can easily and instantly understand. Use simple words, short sentences, and common, ",
    "everyday examples (like toys, food, or pets). Avoid all technical jargon. ",
    "Your output must still be in the requested JSON structure: ",
    "1. **Simple Explanation:** The ELI5 explanation for the topic. ",
    "2. **Analogy:** A single, perfect, and easy-to-visualize analogy for a child. ",
    "3. **Quiz:** Three simple questions a five-year-old could answer to check understanding. ",
    "Ensure the output strictly adheres to the provided JSON Schema."
);

#[derive(Debug, Error)]
pub enum AarohError {
    #[error(
        "Initialization Error: Could not connect to Gemini API. Check your {env}. Details: {0:#}",
        env = API_KEY_ENV
    )]
    Initialization(anyhow::Error),
    #[error("LLM Processing Error: Failed to generate content. Details: {0:#}")]
    Processing(anyhow::Error),
}

/// What `process` hands back: the lesson on success, the error text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProcessResult {
    Lesson(AarohOutput),
    Error(String),
}

impl ProcessResult {
    pub fn lesson(&self) -> Option<&AarohOutput> {
        match self {
            ProcessResult::Lesson(output) => Some(output),
            ProcessResult::Error(_) => None,
        }
    }
}

/// Builds a fresh Gemini client from the environment and runs one request.
pub async fn process(complex_text: &str) -> (ProcessResult, bool) {
    process_with(GeminiClient::from_env, complex_text).await
}

pub async fn process_with<G, F>(init: F, complex_text: &str) -> (ProcessResult, bool)
where
    G: StructuredGenerator,
    F: FnOnce() -> anyhow::Result<G>,
{
    match try_process_with(init, complex_text).await {
        Ok(output) => (ProcessResult::Lesson(output), true),
        Err(err) => {
            warn!("{err}");
            (ProcessResult::Error(err.to_string()), false)
        }
    }
}

pub async fn try_process(complex_text: &str) -> Result<AarohOutput, AarohError> {
    try_process_with(GeminiClient::from_env, complex_text).await
}

pub async fn try_process_with<G, F>(init: F, complex_text: &str) -> Result<AarohOutput, AarohError>
where
    G: StructuredGenerator,
    F: FnOnce() -> anyhow::Result<G>,
{
    let generator = init().map_err(AarohError::Initialization)?;
    generate_lesson(&generator, complex_text)
        .await
        .map_err(AarohError::Processing)
}

async fn generate_lesson(
    generator: &dyn StructuredGenerator,
    complex_text: &str,
) -> anyhow::Result<AarohOutput> {
    let schema = AarohOutput::response_schema();
    let request = StructuredRequest {
        model: MODEL,
        system_instruction: SYSTEM_PROMPT,
        content: complex_text,
        schema: &schema,
        temperature: TEMPERATURE,
    };

    let text = generator.generate_structured(&request).await?;
    let output = AarohOutput::from_json(&text)?;
    info!(
        quiz_questions = output.quiz_questions.len(),
        "Generated learning aids"
    );
    Ok(output)
}
