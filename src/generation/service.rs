use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::generation::prompt::build_prompt;
use crate::generation::{GenerationFailure, GenerationRequest, GenerationResult};
use crate::provider::TextProvider;

/// Turns one request into one email through exactly one provider call.
///
/// Holds no mutable state, a single instance is shared by every request.
pub struct EmailGenerator {
    provider: Arc<dyn TextProvider>,
    timeout: Duration,
}

impl EmailGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, timeout: Duration) -> Self {
        EmailGenerator { provider, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[tracing::instrument(level = "info", skip_all, fields(provider = self.provider.name()))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationFailure> {
        request.validate()?;
        let prompt = build_prompt(request);

        let start = Instant::now();
        let outcome =
            tokio::time::timeout(self.timeout, self.provider.generate(&prompt, Some(self.timeout)))
                .await;
        let elapsed = start.elapsed();

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(failure)) => {
                warn!(kind = %failure.kind, "Provider call failed after {} ms", round_millis(elapsed));
                return Err(failure);
            }
            Err(_) => {
                warn!("Provider call exceeded {} ms", self.timeout.as_millis());
                return Err(GenerationFailure::timeout(self.timeout));
            }
        };

        if text.trim().is_empty() {
            warn!("Provider returned no text");
            return Err(GenerationFailure::provider("provider returned empty text"));
        }

        let ai_response_time_ms = round_millis(elapsed);
        info!(ai_response_time_ms, "Email generated");
        Ok(GenerationResult {
            email: text,
            ai_response_time_ms,
        })
    }
}

fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}
