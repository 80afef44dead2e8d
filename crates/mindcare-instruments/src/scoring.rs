use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use mindcare_core::models::answers::AnswerSet;

/// The dimension a question contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dimension {
    Depression,
    Anxiety,
    Stress,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Depression, Dimension::Anxiety, Dimension::Stress];

    /// Inclusive upper bounds for Normal, Mild, Moderate and Severe. Anything
    /// above the last bound is Extremely Severe.
    ///
    /// These are the published DASS-42-equivalent cut points (after doubling)
    /// and must not be tuned.
    fn band_upper_bounds(self) -> [i64; 4] {
        match self {
            Dimension::Depression => [9, 13, 20, 27],
            Dimension::Anxiety => [7, 9, 14, 19],
            Dimension::Stress => [14, 18, 25, 33],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Depression => "Depression",
            Dimension::Anxiety => "Anxiety",
            Dimension::Stress => "Stress",
        }
    }
}

/// Allowed answer values for a question, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scale {
    pub min: u8,
    pub max: u8,
}

impl Scale {
    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Four-point frequency scale: never, sometimes, often, almost always.
pub const FREQUENCY_SCALE: Scale = Scale { min: 0, max: 3 };

/// One immutable questionnaire item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u8,
    pub dimension: Dimension,
    pub prompt: String,
    pub scale: Scale,
}

/// Per-dimension scores after doubling. Each lies in [0, 42] for DASS-21.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoreResult {
    pub depression_score: u32,
    pub anxiety_score: u32,
    pub stress_score: u32,
}

impl ScoreResult {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Depression => self.depression_score,
            Dimension::Anxiety => self.anxiety_score,
            Dimension::Stress => self.stress_score,
        }
    }
}

/// Severity band for a single dimension, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    #[serde(rename = "Extremely Severe")]
    ExtremelySevere,
}

impl Severity {
    const BANDS: [Severity; 5] = [
        Severity::Normal,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
        Severity::ExtremelySevere,
    ];

    /// Normal = 0 through Extremely Severe = 4.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::ExtremelySevere => "Extremely Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall level across the three dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OverallLevel {
    Good,
    #[serde(rename = "Mild Concern")]
    MildConcern,
    #[serde(rename = "Moderate Concern")]
    ModerateConcern,
    #[serde(rename = "Significant Concern")]
    SignificantConcern,
}

impl OverallLevel {
    pub fn label(self) -> &'static str {
        match self {
            OverallLevel::Good => "Good",
            OverallLevel::MildConcern => "Mild Concern",
            OverallLevel::ModerateConcern => "Moderate Concern",
            OverallLevel::SignificantConcern => "Significant Concern",
        }
    }
}

impl fmt::Display for OverallLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    #[error("question {question_id} has no answer")]
    MissingAnswer { question_id: u8 },

    #[error("question {question_id}: value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        question_id: u8,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("question {question_id} is not part of this questionnaire")]
    UnknownQuestion { question_id: u8 },

    #[error("score {score} is negative")]
    NegativeScore { score: i64 },
}

/// Score a complete answer set.
///
/// Questions are checked in table order, so the error names the first
/// missing or out-of-range question. Answers for ids absent from the table
/// are rejected after that. Each dimension's sum is doubled.
pub fn compute_scores(
    answers: &AnswerSet,
    questions: &[Question],
) -> Result<ScoreResult, ValidationError> {
    let mut sums = [0u32; 3];

    for question in questions {
        let value = *answers.get(&question.id).ok_or(ValidationError::MissingAnswer {
            question_id: question.id,
        })?;
        if !question.scale.contains(value) {
            return Err(ValidationError::OutOfRange {
                question_id: question.id,
                value,
                min: question.scale.min,
                max: question.scale.max,
            });
        }
        sums[question.dimension as usize] += u32::from(value);
    }

    if let Some(&question_id) = answers
        .keys()
        .find(|id| !questions.iter().any(|q| q.id == **id))
    {
        return Err(ValidationError::UnknownQuestion { question_id });
    }

    Ok(ScoreResult {
        depression_score: sums[Dimension::Depression as usize] * 2,
        anxiety_score: sums[Dimension::Anxiety as usize] * 2,
        stress_score: sums[Dimension::Stress as usize] * 2,
    })
}

/// Resolve the severity band for a score. A score equal to a cut point
/// belongs to the lower band. Scores above the theoretical maximum still
/// resolve to Extremely Severe.
pub fn severity_of(score: i64, dimension: Dimension) -> Result<Severity, ValidationError> {
    if score < 0 {
        return Err(ValidationError::NegativeScore { score });
    }
    let band = dimension
        .band_upper_bounds()
        .iter()
        .position(|upper| score <= *upper)
        .unwrap_or(Severity::BANDS.len() - 1);
    Ok(Severity::BANDS[band])
}

/// Combine three dimension bands into an overall level.
///
/// Buckets the mean ordinal at <1, <2 and <3. The comparison is done on the
/// ordinal sum against 3, 6 and 9, which is the same partition without
/// floating point.
pub fn aggregate_overall_assessment(
    depression: Severity,
    anxiety: Severity,
    stress: Severity,
) -> OverallLevel {
    let sum: u8 = [depression, anxiety, stress]
        .iter()
        .map(|s| s.ordinal())
        .sum();
    match sum {
        0..=2 => OverallLevel::Good,
        3..=5 => OverallLevel::MildConcern,
        6..=8 => OverallLevel::ModerateConcern,
        _ => OverallLevel::SignificantConcern,
    }
}

/// A score together with its derived band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DimensionScore {
    pub score: u32,
    pub severity: Severity,
}

/// Display view of a score result. Always derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultSummary {
    pub depression: DimensionScore,
    pub anxiety: DimensionScore,
    pub stress: DimensionScore,
    pub overall: OverallLevel,
}

impl ResultSummary {
    pub fn from_scores(scores: &ScoreResult) -> Self {
        let dimension = |d: Dimension| {
            let score = scores.get(d);
            DimensionScore {
                score,
                severity: band_for_unsigned(score, d),
            }
        };
        let depression = dimension(Dimension::Depression);
        let anxiety = dimension(Dimension::Anxiety);
        let stress = dimension(Dimension::Stress);
        Self {
            depression,
            anxiety,
            stress,
            overall: aggregate_overall_assessment(
                depression.severity,
                anxiety.severity,
                stress.severity,
            ),
        }
    }
}

// Unsigned scores cannot hit the negative-score precondition.
fn band_for_unsigned(score: u32, dimension: Dimension) -> Severity {
    severity_of(i64::from(score), dimension).unwrap_or(Severity::ExtremelySevere)
}
