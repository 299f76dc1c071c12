use serde::{Deserialize, Serialize};
use std::fmt;

/// Rubric thresholds mapping monthly consistency onto the 1-3 rating scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Share of observed days that must qualify for the top rating.
    pub upper_ratio: f32,
    /// Share of observed days that must qualify for the middle rating.
    pub lower_ratio: f32,
    pub roll_up: RollUpPolicy,
    /// Denominator for the final percentage score.
    pub max_score: u32,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            upper_ratio: 0.8,
            lower_ratio: 0.5,
            roll_up: RollUpPolicy::Average,
            max_score: 90,
        }
    }
}

impl RubricConfig {
    pub fn validate(&self) -> Result<(), RubricError> {
        let in_range = |ratio: f32| (0.0..=1.0).contains(&ratio);
        if !in_range(self.upper_ratio) || !in_range(self.lower_ratio) {
            return Err(RubricError::RatioOutOfRange);
        }
        if self.lower_ratio > self.upper_ratio {
            return Err(RubricError::InvertedThresholds);
        }
        if self.max_score == 0 {
            return Err(RubricError::ZeroMaxScore);
        }
        Ok(())
    }
}

/// How a composite category derives its own rating from its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollUpPolicy {
    /// Mean of the component ratings, rounded half up.
    Average,
    /// Lowest component rating.
    Weakest,
}

impl RollUpPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "average" | "mean" | "rata-rata" => Some(Self::Average),
            "weakest" | "min" | "minimum" => Some(Self::Weakest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricError {
    RatioOutOfRange,
    InvertedThresholds,
    ZeroMaxScore,
}

impl fmt::Display for RubricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricError::RatioOutOfRange => write!(f, "rubric ratios must be between 0 and 1"),
            RubricError::InvertedThresholds => {
                write!(f, "lower rubric ratio must not exceed the upper ratio")
            }
            RubricError::ZeroMaxScore => write!(f, "rubric max score must be greater than zero"),
        }
    }
}

impl std::error::Error for RubricError {}
