use super::prompter::Params;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// `{{` and `}}` are escaped braces, `{word}` is a placeholder. Alternation
/// order matters: escapes must win over placeholders at the same offset.
fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\{\{|\}\}|\{(\w+)\}").expect("valid regex"))
}

/// A string template with `{name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    variables: Vec<String>,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut variables: Vec<String> = Vec::new();

        for caps in token_regex().captures_iter(&source) {
            if let Some(name) = caps.get(1) {
                if !variables.iter().any(|v| v == name.as_str()) {
                    variables.push(name.as_str().to_string());
                }
            }
        }

        Self { source, variables }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names in order of first appearance
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    /// Substitutes placeholders and unescapes doubled braces. Placeholders
    /// without a value are left untouched.
    pub(crate) fn render(&self, params: &Params) -> String {
        token_regex()
            .replace_all(&self.source, |caps: &Captures<'_>| match caps.get(1) {
                Some(name) => params
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string()),
                None if &caps[0] == "{{" => "{".to_string(),
                None => "}".to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_variables_in_order_without_duplicates() {
        let template = Template::new("{b} and {a}, then {b} again");
        assert_eq!(template.variables(), ["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_placeholders_at_edges_are_found() {
        let template = Template::new("{greeting}, world {name}");
        assert_eq!(
            template.variables(),
            ["greeting".to_string(), "name".to_string()]
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        let template = Template::new("{a}{b}");
        assert_eq!(template.variables(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_escaped_braces_are_not_variables() {
        let template = Template::new("literal {{braces}} and dict {{'k': {value}}}");
        assert_eq!(template.variables(), ["value".to_string()]);
    }

    #[test]
    fn test_non_word_braces_are_ignored() {
        let template = Template::new("fn main() { println!(\"{}\"); } {x y}");
        assert!(template.variables().is_empty());
    }

    #[test]
    fn test_render_unescapes_braces() {
        let template = Template::new("{{{name}}} {{name}}");
        assert_eq!(template.render(&params(&[("name", "v")])), "{v} {name}");
    }

    #[test]
    fn test_render_does_not_reexpand_values() {
        let template = Template::new("x={x}");
        assert_eq!(template.render(&params(&[("x", "{x}{{")])), "x={x}{{");
    }

    #[test]
    fn test_unicode_identifiers() {
        let template = Template::new("Grüße {naïve_name}!");
        assert!(template.has_variable("naïve_name"));
    }
}
