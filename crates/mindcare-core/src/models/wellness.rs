use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Scores and mood the wellness coach is asked to respond to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub depression: Option<u32>,
    #[serde(default)]
    pub anxiety: Option<u32>,
    #[serde(default)]
    pub stress: Option<u32>,
    #[serde(default)]
    pub mood: Option<String>,
}

/// A titled link to a meditation or music track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MediaLink {
    pub title: String,
    pub url: String,
}

/// Structured wellness content shown on the activities screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WellnessContent {
    pub meditations: Vec<MediaLink>,
    pub musics: Vec<MediaLink>,
    pub quotes: Vec<String>,
    pub affirmations: Vec<String>,
    pub tips: Vec<String>,
}
