// Registry of named extraction strategies
use super::between_tokens::BetweenTokens;
use super::class_snippet::ClassSnippet;
use super::error::ExtractionError;
use super::mode::ConcatenationMode;
use std::fmt;
use tracing::debug;

/// Separator placed between elements in `join` mode
pub const JOIN_SEPARATOR: &str = "\n\n";

/// The strategies that can be requested by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    /// Whole text, unchanged
    Default,
    /// Python class definitions
    Class,
    /// `START_DESC ... END_DESC` spans
    Description,
    /// Fenced ```` ```python ```` blocks
    PythonCode,
}

/// Lookup table, matched case-insensitively. The `*extractor` spellings keep
/// older configuration files working.
const REGISTRY: &[(&str, ExtractorKind)] = &[
    ("default", ExtractorKind::Default),
    ("defaultextractor", ExtractorKind::Default),
    ("class", ExtractorKind::Class),
    ("classextractor", ExtractorKind::Class),
    ("description", ExtractorKind::Description),
    ("descriptionextractor", ExtractorKind::Description),
    ("python_code", ExtractorKind::PythonCode),
    ("pythoncode", ExtractorKind::PythonCode),
    ("pythoncodeextractor", ExtractorKind::PythonCode),
];

impl ExtractorKind {
    pub fn from_name(name: &str) -> Result<Self, ExtractionError> {
        let wanted = name.trim().to_lowercase();
        REGISTRY
            .iter()
            .find(|(registered, _)| *registered == wanted)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ExtractionError::NotFound(name.to_string()))
    }

    /// Canonical registry name
    pub fn name(&self) -> &'static str {
        match self {
            ExtractorKind::Default => "default",
            ExtractorKind::Class => "class",
            ExtractorKind::Description => "description",
            ExtractorKind::PythonCode => "python_code",
        }
    }

    pub fn all() -> &'static [ExtractorKind] {
        &[
            ExtractorKind::Default,
            ExtractorKind::Class,
            ExtractorKind::Description,
            ExtractorKind::PythonCode,
        ]
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            ExtractorKind::Default => Strategy::Identity,
            ExtractorKind::Class => Strategy::ClassSnippet(ClassSnippet),
            ExtractorKind::Description => Strategy::BetweenTokens(BetweenTokens::description()),
            ExtractorKind::PythonCode => Strategy::BetweenTokens(BetweenTokens::python_code()),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How elements are pulled out of the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Identity,
    ClassSnippet(ClassSnippet),
    BetweenTokens(BetweenTokens),
}

impl Strategy {
    pub fn extract_elements(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        match self {
            Strategy::Identity => Ok(vec![text.to_string()]),
            Strategy::ClassSnippet(classes) => classes.extract_elements(text),
            Strategy::BetweenTokens(tokens) => Ok(tokens.extract_elements(text)),
        }
    }
}

/// A strategy paired with the mode used to combine its elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    name: String,
    strategy: Strategy,
    mode: ConcatenationMode,
}

impl Extractor {
    pub fn new(kind: ExtractorKind, mode: ConcatenationMode) -> Self {
        Self {
            name: kind.name().to_string(),
            strategy: kind.strategy(),
            mode,
        }
    }

    /// Used when an input declares no extractor
    pub fn identity() -> Self {
        Self::new(ExtractorKind::Default, ConcatenationMode::Join)
    }

    /// Builds an extractor around a strategy that is not in the registry,
    /// e.g. `BetweenTokens` with custom markers
    pub fn with_strategy(
        name: impl Into<String>,
        strategy: Strategy,
        mode: ConcatenationMode,
    ) -> Self {
        Self {
            name: name.into(),
            strategy,
            mode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ConcatenationMode {
        self.mode
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn extract_elements(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        self.strategy.extract_elements(text)
    }

    pub fn extract(&self, text: &str) -> Result<String, ExtractionError> {
        let elements = self.extract_elements(text)?;
        debug!(
            extractor = %self.name,
            mode = %self.mode,
            "Extracted {} elements",
            elements.len()
        );

        let picked = match self.mode {
            ConcatenationMode::Join => return Ok(elements.join(JOIN_SEPARATOR)),
            ConcatenationMode::First => elements.into_iter().next(),
            ConcatenationMode::Last => elements.into_iter().last(),
        };

        picked.ok_or_else(|| ExtractionError::EmptyResult {
            extractor: self.name.clone(),
            mode: self.mode,
        })
    }
}

/// Resolves a registered extractor by case-insensitive name
pub fn get_extractor_by_name(
    name: &str,
    mode: ConcatenationMode,
) -> Result<Extractor, ExtractionError> {
    ExtractorKind::from_name(name).map(|kind| Extractor::new(kind, mode))
}
