//! mindcare-instruments
//!
//! Self-assessment questionnaire definitions and the scoring engine. Pure
//! data and pure functions, no I/O. Defines the questions, their category
//! assignment, and the severity tables used to interpret scores.

pub mod error;
pub mod instruments;
pub mod scoring;

use mindcare_core::models::answers::AnswerSet;

use error::InstrumentError;
use scoring::{Dimension, Question, ScoreResult, ValidationError, severity_of};

/// Trait implemented by each self-assessment questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "dass21").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "DASS-21").
    fn name(&self) -> &str;

    /// The fixed question table, ordered by question id.
    fn questions(&self) -> &[Question];

    /// Check an answer set for completeness and range without keeping the
    /// scores.
    fn validate_answers(&self, answers: &AnswerSet) -> Result<(), ValidationError> {
        self.score(answers).map(|_| ())
    }

    /// Score a complete answer set against this instrument's question table.
    fn score(&self, answers: &AnswerSet) -> Result<ScoreResult, ValidationError> {
        scoring::compute_scores(answers, self.questions())
    }

    /// Format scores as structured text for inclusion in a model prompt.
    fn to_structured_input(&self, scores: &ScoreResult) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for dimension in Dimension::ALL {
            let score = scores.get(dimension);
            match severity_of(i64::from(score), dimension) {
                Ok(band) => {
                    output.push_str(&format!("- {}: {score} ({band})\n", dimension.label()))
                }
                Err(_) => output.push_str(&format!("- {}: {score}\n", dimension.label())),
            }
        }
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::dass21::Dass21)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument and score `answers` with it.
pub fn score_with(
    instrument_id: &str,
    answers: &AnswerSet,
) -> Result<ScoreResult, InstrumentError> {
    let instrument = get_instrument(instrument_id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(instrument_id.to_string()))?;
    Ok(instrument.score(answers)?)
}
