use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the elements produced by an extractor are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatenationMode {
    /// Join every element with a blank line
    #[default]
    Join,
    /// Keep only the first element
    First,
    /// Keep only the last element
    Last,
}

impl ConcatenationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcatenationMode::Join => "join",
            ConcatenationMode::First => "first",
            ConcatenationMode::Last => "last",
        }
    }
}

impl fmt::Display for ConcatenationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcatenationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" => Ok(ConcatenationMode::Join),
            "first" => Ok(ConcatenationMode::First),
            "last" => Ok(ConcatenationMode::Last),
            _ => Err(format!(
                "Invalid concatenation mode: {}. Valid options: join, first, last",
                s
            )),
        }
    }
}
