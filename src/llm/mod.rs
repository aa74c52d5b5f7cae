pub mod gemini;
pub mod provider;
pub mod secrets;

pub use gemini::GeminiClient;
pub use provider::{StructuredGenerator, StructuredRequest};
pub use secrets::{API_KEY_ENV, api_key_from_env};
