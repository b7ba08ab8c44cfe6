use std::time::Duration;

use async_trait::async_trait;

use crate::generation::GenerationFailure;

pub mod openai;

#[cfg(test)]
pub mod fake;

/// A text generation backend that turns a prompt into natural language.
///
/// Implementations classify their own failures; an empty string is a valid
/// return here and is rejected by the caller.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    async fn generate(
        &self,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> Result<String, GenerationFailure>;
}
