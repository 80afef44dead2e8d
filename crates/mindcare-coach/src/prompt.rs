use mindcare_core::models::wellness::RecommendationRequest;
use mindcare_instruments::scoring::{Dimension, severity_of};

pub const SYSTEM_PROMPT: &str = "You answer as a concise JSON-generating assistant.";

const RESPONSE_SHAPE: &str = r#"Respond with this JSON, and ONLY this JSON:
{
  "meditations": [{"title": "...", "url": "..."}, ...],
  "musics": [{"title": "...","url": "..."},...],
  "quotes": ["...","..."],
  "affirmations": ["...","..."],
  "tips": ["...","..."]
}
No explanation, comments, or markdown."#;

/// Build the coach prompt. Scores are annotated with their severity band so
/// the model does not have to know the DASS-21 cut points.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let mut prompt = String::from(
        "You are a digital wellness coach for a mental health app.\nGiven scores:\n",
    );

    for (dimension, score) in [
        (Dimension::Depression, request.depression),
        (Dimension::Anxiety, request.anxiety),
        (Dimension::Stress, request.stress),
    ] {
        let line = match score {
            Some(score) => match severity_of(i64::from(score), dimension) {
                Ok(band) => format!("- {}: {score} ({band})\n", dimension.label()),
                Err(_) => format!("- {}: {score}\n", dimension.label()),
            },
            None => format!("- {}: not provided\n", dimension.label()),
        };
        prompt.push_str(&line);
    }

    let mood = request
        .mood
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("not provided");
    prompt.push_str(&format!("- Mood: {mood}\n\n"));
    prompt.push_str(RESPONSE_SHAPE);
    prompt
}
