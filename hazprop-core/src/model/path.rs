use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DataError;

/// The two halves of a logic-tree realization path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicTreeHalf {
    /// Source-specific characteristics (left of the `~`).
    Ssc,
    /// Ground-motion characteristics (right of the `~`).
    Gmc,
}

/// One full logic-tree realization, parsed from its path string
/// `"<SSC branch chars>~<GMC branch chars>"`.
///
/// The parsed halves are kept as per-level branch characters so that
/// patterns match by direct positional comparison instead of regex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RealizationPath {
    raw: String,
    ssc: Vec<char>,
    gmc: Vec<char>,
}

impl RealizationPath {
    /// Parse a path string. Exactly one `~` separator is required.
    pub fn parse(raw: &str) -> Result<Self, DataError> {
        let mut parts = raw.split('~');
        let (ssc, gmc) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ssc), Some(gmc), None) => (ssc, gmc),
            _ => {
                return Err(DataError::MalformedPath {
                    path: raw.to_string(),
                })
            }
        };
        Ok(Self {
            raw: raw.to_string(),
            ssc: ssc.chars().collect(),
            gmc: gmc.chars().collect(),
        })
    }

    /// Branch characters of one half, one per logic-tree level.
    pub fn half(&self, half: LogicTreeHalf) -> &[char] {
        match half {
            LogicTreeHalf::Ssc => &self.ssc,
            LogicTreeHalf::Gmc => &self.gmc,
        }
    }

    /// The original path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RealizationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for RealizationPath {
    type Error = DataError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<RealizationPath> for String {
    fn from(path: RealizationPath) -> Self {
        path.raw
    }
}

/// Wildcard selector for one branch value at one uncertainty: a literal
/// branch character at one position of one half, anything elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    pub half: LogicTreeHalf,
    pub position: usize,
    pub literal: char,
}

impl Pattern {
    pub fn new(half: LogicTreeHalf, position: usize, literal: char) -> Self {
        Self {
            half,
            position,
            literal,
        }
    }

    /// Positional comparison against a parsed path.
    pub fn matches(&self, path: &RealizationPath) -> bool {
        path.half(self.half).get(self.position) == Some(&self.literal)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.half {
            LogicTreeHalf::Ssc => "ssc",
            LogicTreeHalf::Gmc => "gmc",
        };
        write!(f, "{}[{}]={}", half, self.position, self.literal)
    }
}
