use thiserror::Error;

/// Mismatch between a template's variables and the supplied parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// Template variables with no matching parameter
    #[error("Missing parameters: {}", .missing.join(", "))]
    MissingParameters { missing: Vec<String> },

    /// Parameters the template never uses
    #[error("Extra parameters: {}", .extra.join(", "))]
    ExtraParameters { extra: Vec<String> },

    /// Both of the above at once
    #[error(
        "Missing parameters: {}; extra parameters: {}",
        .missing.join(", "),
        .extra.join(", ")
    )]
    MismatchedParameters {
        missing: Vec<String>,
        extra: Vec<String>,
    },
}

impl PromptError {
    /// Builds the error for the given lists, or `None` when both are empty
    pub fn from_lists(missing: Vec<String>, extra: Vec<String>) -> Option<Self> {
        match (missing.is_empty(), extra.is_empty()) {
            (true, true) => None,
            (false, true) => Some(PromptError::MissingParameters { missing }),
            (true, false) => Some(PromptError::ExtraParameters { extra }),
            (false, false) => Some(PromptError::MismatchedParameters { missing, extra }),
        }
    }

    pub fn missing(&self) -> &[String] {
        match self {
            PromptError::MissingParameters { missing }
            | PromptError::MismatchedParameters { missing, .. } => missing,
            PromptError::ExtraParameters { .. } => &[],
        }
    }

    pub fn extra(&self) -> &[String] {
        match self {
            PromptError::ExtraParameters { extra }
            | PromptError::MismatchedParameters { extra, .. } => extra,
            PromptError::MissingParameters { .. } => &[],
        }
    }
}
