use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading placed before the system instruction when a prompt is rendered as
/// one string
pub const INSTRUCTION_HEADER: &str = "INSTRUCTION:";

/// Text sent to a backend, with an optional system instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl Prompt {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            system: None,
        }
    }

    /// Returns a copy carrying the given system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(system) = &self.system {
            write!(f, "{}\n\n{}\n", INSTRUCTION_HEADER, system)?;
        }
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_system() {
        assert_eq!(Prompt::new("Summarise this.").to_string(), "Summarise this.");
    }

    #[test]
    fn test_display_with_system() {
        let prompt = Prompt::new("Summarise this.").with_system("Be brief.");
        assert_eq!(
            prompt.to_string(),
            "INSTRUCTION:\n\nBe brief.\nSummarise this."
        );
    }

    #[test]
    fn test_serialize_skips_missing_system() {
        let json = serde_json::to_value(Prompt::new("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hi" }));
    }
}
