use crate::generation::request::GenerationRequest;

/// System message sent ahead of every prompt by chat style providers.
pub const SYSTEM_PROMPT: &str =
    "You are an assistant that writes professional, ready to send emails. \
     Reply with the email only, without commentary.";

/// Builds the provider prompt. Same request, same prompt.
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        "Write an email with the following details.\n\
         Purpose: {}\n\
         Recipient name: {}\n\
         Tone: {}\n\
         Include a subject line, a greeting that addresses the recipient by name, \
         a concise body and a closing.",
        request.purpose(),
        request.recipient_name(),
        request.tone()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_all_fields() {
        let request = GenerationRequest::new("follow up", "Alex", "friendly");
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Purpose: follow up\n"));
        assert!(prompt.contains("Recipient name: Alex\n"));
        assert!(prompt.contains("Tone: friendly\n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = GenerationRequest::new("thank you note", "Sam", "formal");
        let b = GenerationRequest::new(" thank you note ", "Sam", "formal ");
        assert_eq!(build_prompt(&a), build_prompt(&a));
        assert_eq!(build_prompt(&a), build_prompt(&b));
    }

    #[test]
    fn test_prompt_differs_per_tone() {
        let formal = GenerationRequest::new("meeting", "Sam", "formal");
        let casual = GenerationRequest::new("meeting", "Sam", "casual");
        assert_ne!(build_prompt(&formal), build_prompt(&casual));
    }
}
