use serde::{Deserialize, Serialize};
use std::fmt;

/// Exam year a question directory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Year(pub u16);

impl Year {
    /// Parses a partition directory name. Only exactly four ASCII digits qualify.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        if name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()) {
            name.parse().ok().map(Year)
        } else {
            None
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Name of the directory holding a single question inside `<year>/questions/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub letter: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Fields such as `file` or `isCorrect`, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Parsed `details.json` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub alternatives_introduction: Option<String>,
    pub alternatives: Vec<Alternative>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Question {
    /// Checks the constraints JSON typing alone cannot express.
    pub fn check_alternatives(&self) -> std::result::Result<(), String> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            if alternative.letter.chars().count() != 1 {
                return Err(format!(
                    "alternative letter '{}' must be a single character",
                    alternative.letter
                ));
            }
            if seen.contains(&alternative.letter.as_str()) {
                return Err(format!("duplicate alternative letter '{}'", alternative.letter));
            }
            seen.push(&alternative.letter);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Context,
    Alternative,
}

/// A question that matched the keyword, with where the match happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(skip)]
    pub year: Year,
    #[serde(skip)]
    pub question_id: QuestionId,
    #[serde(flatten)]
    pub question: Question,
    pub matched_in: Vec<MatchSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_alternatives: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub year: Option<Year>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchOptions {
    pub const DEFAULT_LIMIT: usize = 10;
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            year: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub results: Vec<MatchRecord>,
    /// Matches across the whole selected scope, before pagination.
    pub total: usize,
}
