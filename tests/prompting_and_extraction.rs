//! Properties of prompt building and text extraction through the public API

use async_trait::async_trait;
use promptpipe::extractors::{BetweenTokens, ExtractorKind};
use promptpipe::llm::{BackendError, LLMClient, LLMRequest, LLMResponse};
use promptpipe::{
    get_extractor_by_name, ConcatenationMode, ExtractionError, Params, Prompt, PromptError,
    Prompter,
};
use yare::parameterized;

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_hello_scenario() {
    let prompter = Prompter::new("Hello, {name}! Today is {day}.");
    let prompt = prompter
        .prompt(&params(&[("name", "Ada"), ("day", "Monday")]))
        .unwrap();

    assert_eq!(prompt.content, "Hello, Ada! Today is Monday.");
    assert!(prompt.system.is_none());
}

#[parameterized(
    single = { "{a}", &[("a", "1")] },
    start_and_end = { "{a} middle {b}", &[("a", "1"), ("b", "2")] },
    adjacent = { "{a}{b}{a}", &[("a", "x"), ("b", "y")] },
    multiline = { "line {a}\n{b}\n", &[("a", "1"), ("b", "2")] },
    none = { "no variables here", &[] },
)]
fn test_exact_params_leave_no_placeholders(template: &str, pairs: &[(&str, &str)]) {
    let prompt = Prompter::new(template).prompt(&params(pairs)).unwrap();
    for (name, _) in pairs {
        assert!(!prompt.content.contains(&format!("{{{}}}", name)));
    }
}

#[parameterized(
    one = { "{a} {b}", &[("a", "1")], &["b"] },
    all = { "{a} {b}", &[], &["a", "b"] },
    repeated = { "{a} {a} {b}", &[("b", "2")], &["a"] },
)]
fn test_missing_parameters_named_exactly(
    template: &str,
    pairs: &[(&str, &str)],
    expected: &[&str],
) {
    let err = Prompter::new(template).prompt(&params(pairs)).unwrap_err();
    assert!(matches!(err, PromptError::MissingParameters { .. }));
    assert_eq!(err.missing(), expected);
}

#[parameterized(
    one = { "{a}", &[("a", "1"), ("z", "2")], &["z"] },
    no_variables = { "plain", &[("y", "1"), ("x", "2")], &["x", "y"] },
)]
fn test_extra_parameters_named_exactly(template: &str, pairs: &[(&str, &str)], expected: &[&str]) {
    let err = Prompter::new(template).prompt(&params(pairs)).unwrap_err();
    assert!(matches!(err, PromptError::ExtraParameters { .. }));
    assert_eq!(err.extra(), expected);
}

#[test]
fn test_python_code_join_scenario() {
    let text = "```python\nprint(1)\n```\nignored\n```python\nprint(2)\n```";
    let extractor = get_extractor_by_name("python_code", ConcatenationMode::Join).unwrap();
    assert_eq!(extractor.extract(text).unwrap(), "print(1)\n\nprint(2)");
}

#[test]
fn test_description_first_without_markers_scenario() {
    let extractor = get_extractor_by_name("description", ConcatenationMode::First).unwrap();
    let err = extractor.extract("nothing to see").unwrap_err();
    assert!(matches!(err, ExtractionError::EmptyResult { .. }));
}

#[test]
fn test_unknown_extractor_scenario() {
    let err = get_extractor_by_name("nonexistent", ConcatenationMode::Join).unwrap_err();
    assert_eq!(err, ExtractionError::NotFound("nonexistent".to_string()));
    assert!(err.to_string().contains("'nonexistent'"));
}

#[parameterized(
    description = { ExtractorKind::Description, "a START_DESC one END_DESC b START_DESC\ntwo\nEND_DESC" },
    python = { ExtractorKind::PythonCode, "```python\nx = 1\n```\n```python\n\ny = 2\n\n```" },
)]
fn test_between_tokens_reextraction(kind: ExtractorKind, text: &str) {
    let tokens = match kind {
        ExtractorKind::Description => BetweenTokens::description(),
        _ => BetweenTokens::python_code(),
    };
    let elements = tokens.extract_elements(text);
    assert_eq!(elements.len(), 2);

    let rewrapped: String = elements.iter().map(|e| tokens.wrap(e)).collect();
    assert_eq!(tokens.extract_elements(&rewrapped), elements);
}

#[parameterized(
    description = { "description", "START_DESC single END_DESC" },
    python = { "python_code", "```python\nsingle\n```" },
    class = { "class", "class single:\n    pass\n" },
)]
fn test_first_and_last_agree_on_one_match(name: &str, text: &str) {
    let first = get_extractor_by_name(name, ConcatenationMode::First).unwrap();
    let last = get_extractor_by_name(name, ConcatenationMode::Last).unwrap();
    assert_eq!(first.extract(text).unwrap(), last.extract(text).unwrap());
}

struct BrokenTransport;

#[async_trait]
impl LLMClient for BrokenTransport {
    async fn chat(&self, _request: LLMRequest) -> Result<LLMResponse, BackendError> {
        Err(BackendError::NetworkError {
            message: "socket hang up".to_string(),
        })
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[tokio::test]
async fn test_transport_error_becomes_unsuccessful_request() {
    let prompt = Prompt::new("hi");

    let err = BrokenTransport.query(&prompt).await.unwrap_err();
    assert_eq!(err.backend(), "broken");
    assert!(err.to_string().contains("socket hang up"));
    assert!(matches!(err.cause(), BackendError::NetworkError { .. }));
}
