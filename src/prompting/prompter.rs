use super::error::PromptError;
use super::prompt::Prompt;
use super::template::Template;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Named values bound into a template
pub type Params = BTreeMap<String, String>;

/// Builds prompts from a template, requiring an exact match between the
/// template's variables and the supplied parameters
#[derive(Debug, Clone)]
pub struct Prompter {
    template: Template,
}

impl Prompter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: Template::new(template),
        }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(source))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn variables(&self) -> &[String] {
        self.template.variables()
    }

    /// Reports every missing and every extra name together
    pub fn check_params(&self, params: &Params) -> Result<(), PromptError> {
        let missing: Vec<String> = self
            .template
            .variables()
            .iter()
            .filter(|var| !params.contains_key(var.as_str()))
            .cloned()
            .collect();

        let extra: Vec<String> = params
            .keys()
            .filter(|key| !self.template.has_variable(key))
            .cloned()
            .collect();

        match PromptError::from_lists(missing, extra) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn prompt(&self, params: &Params) -> Result<Prompt, PromptError> {
        self.check_params(params)?;

        let content = self.template.render(params);
        debug!(
            "Filled template with {} parameters ({} chars)",
            params.len(),
            content.len()
        );

        Ok(Prompt::new(content))
    }
}
