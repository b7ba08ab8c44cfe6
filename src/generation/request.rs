use serde::Serialize;

use crate::generation::failure::GenerationFailure;

/// The three inputs of one email draft, trimmed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    purpose: String,
    recipient_name: String,
    tone: String,
}

impl GenerationRequest {
    pub fn new(
        purpose: impl AsRef<str>,
        recipient_name: impl AsRef<str>,
        tone: impl AsRef<str>,
    ) -> Self {
        GenerationRequest {
            purpose: purpose.as_ref().trim().to_string(),
            recipient_name: recipient_name.as_ref().trim().to_string(),
            tone: tone.as_ref().trim().to_string(),
        }
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    /// Fails with `InvalidInput` naming every blank field.
    pub fn validate(&self) -> Result<(), GenerationFailure> {
        let blank: Vec<&str> = [
            ("purpose", &self.purpose),
            ("recipient_name", &self.recipient_name),
            ("tone", &self.tone),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !blank.is_empty() {
            return Err(GenerationFailure::invalid_input(format!(
                "blank fields: {}",
                blank.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub email: String,
    pub ai_response_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::failure::FailureKind;

    #[test]
    fn test_fields_are_trimmed() {
        let request = GenerationRequest::new("  follow up\n", "\tAlex ", " friendly");
        assert_eq!(request.purpose(), "follow up");
        assert_eq!(request.recipient_name(), "Alex");
        assert_eq!(request.tone(), "friendly");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_is_invalid() {
        let request = GenerationRequest::new("follow up", "   ", "");
        let failure = request.validate().unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidInput);
        assert_eq!(
            failure.message.as_deref(),
            Some("blank fields: recipient_name, tone")
        );
    }

    #[test]
    fn test_result_serializes_contract_fields() {
        let result = GenerationResult {
            email: "Hi Alex, ...".into(),
            ai_response_time_ms: 12,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "Hi Alex, ...", "ai_response_time_ms": 12})
        );
    }
}
