use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest confidence score the service may report
pub const MAX_SCORE: u8 = 100;
/// Emotions the service is asked to return at most
pub const MAX_EMOTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All classes in display order (Positive, Neutral, Negative)
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Wire name used in the response schema enum
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Three-letter label for compact tallies
    pub fn short_label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Pos",
            Sentiment::Negative => "Neg",
            Sentiment::Neutral => "Neu",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint broken by a payload that otherwise parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultViolation {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(i64),
    #[error("{0} emotions reported, at most 3 expected")]
    TooManyEmotions(usize),
}

/// Raw payload as the service returns it. `score` is kept wide so out-of-range
/// values can be reported instead of failing inside serde.
#[derive(Debug, Deserialize)]
pub(crate) struct RawAnalysis {
    pub sentiment: Sentiment,
    pub score: i64,
    pub reasoning: String,
    pub emotions: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysis")]
pub struct AnalysisResult {
    sentiment: Sentiment,
    score: u8,
    reasoning: String,
    emotions: Vec<String>,
    keywords: Vec<String>,
}

impl AnalysisResult {
    /// Build a result, enforcing the schema constraints the service is asked to honor.
    pub fn new(
        sentiment: Sentiment,
        score: i64,
        reasoning: impl Into<String>,
        emotions: Vec<String>,
        keywords: Vec<String>,
    ) -> Result<Self, ResultViolation> {
        let score = u8::try_from(score)
            .ok()
            .filter(|s| *s <= MAX_SCORE)
            .ok_or(ResultViolation::ScoreOutOfRange(score))?;
        if emotions.len() > MAX_EMOTIONS {
            return Err(ResultViolation::TooManyEmotions(emotions.len()));
        }

        Ok(Self { sentiment, score, reasoning: reasoning.into(), emotions, keywords })
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn emotions(&self) -> &[String] {
        &self.emotions
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl TryFrom<RawAnalysis> for AnalysisResult {
    type Error = ResultViolation;

    fn try_from(raw: RawAnalysis) -> Result<Self, Self::Error> {
        Self::new(raw.sentiment, raw.score, raw.reasoning, raw.emotions, raw.keywords)
    }
}
