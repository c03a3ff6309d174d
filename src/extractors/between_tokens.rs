//! Extraction of text enclosed between two literal tokens

/// Markers used by the description preset
pub const DESCRIPTION_BEGIN: &str = "START_DESC";
pub const DESCRIPTION_END: &str = "END_DESC";

/// Markers used by the fenced Python code preset
pub const PYTHON_CODE_BEGIN: &str = "```python";
pub const PYTHON_CODE_END: &str = "```";

/// Pulls out every span found between a begin token and the next end token.
///
/// Tokens are matched literally. Spans may cross newlines, each span stops at
/// the first end token after its begin token, and results are trimmed of
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetweenTokens {
    begin: String,
    end: String,
}

impl BetweenTokens {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// `START_DESC ... END_DESC`
    pub fn description() -> Self {
        Self::new(DESCRIPTION_BEGIN, DESCRIPTION_END)
    }

    /// Fenced ```` ```python ... ``` ```` blocks
    pub fn python_code() -> Self {
        Self::new(PYTHON_CODE_BEGIN, PYTHON_CODE_END)
    }

    pub fn begin(&self) -> &str {
        &self.begin
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn extract_elements(&self, text: &str) -> Vec<String> {
        let mut elements = Vec::new();
        if self.begin.is_empty() || self.end.is_empty() {
            return elements;
        }

        let mut rest = text;
        while let Some(start) = rest.find(&self.begin) {
            let after_begin = &rest[start + self.begin.len()..];
            let Some(stop) = after_begin.find(&self.end) else {
                break;
            };
            elements.push(after_begin[..stop].trim().to_string());
            rest = &after_begin[stop + self.end.len()..];
        }

        elements
    }

    /// Wraps a value in this extractor's tokens
    pub fn wrap(&self, value: &str) -> String {
        format!("{}{}{}", self.begin, value, self.end)
    }
}
