use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Everything a provider needs to produce one schema-constrained JSON reply.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRequest<'a> {
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub content: &'a str,
    pub schema: &'a Value,
    pub temperature: f32,
}

#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Returns the raw JSON text produced by the model. Decoding is left to
    /// the caller.
    async fn generate_structured(&self, request: &StructuredRequest<'_>) -> Result<String>;
}

#[async_trait]
impl<T: StructuredGenerator + ?Sized> StructuredGenerator for &T {
    async fn generate_structured(&self, request: &StructuredRequest<'_>) -> Result<String> {
        (**self).generate_structured(request).await
    }
}
