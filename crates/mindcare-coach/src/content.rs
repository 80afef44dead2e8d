use mindcare_core::models::wellness::{MediaLink, WellnessContent};

fn link(title: &str, url: &str) -> MediaLink {
    MediaLink {
        title: title.to_string(),
        url: url.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed content served whenever the model cannot be used.
pub fn fallback_content() -> WellnessContent {
    WellnessContent {
        meditations: vec![
            link(
                "Practice Mindfulness",
                "https://www.youtube.com/embed/O-6f5wQXSu8",
            ),
            link(
                "Deep Breathing",
                "https://youtu.be/acUZdGd_3Dg?si=Fym8bGyVpDbHdE97",
            ),
        ],
        musics: vec![
            link(
                "Calm Piano",
                "https://youtu.be/hlWiI4xVXKY?si=Hpgf_9TGtkBU8ZAY",
            ),
            link(
                "Nature Sounds",
                "https://www.youtube.com/embed/eKFTSSKCzWA",
            ),
        ],
        quotes: strings(&[
            "Do something today that your future self will thank you for.",
            "It always seems impossible until it's done.",
        ]),
        affirmations: strings(&["You are enough.", "Breathe, and let go."]),
        tips: strings(&[
            "Take a short mindful walk outdoors.",
            "Try 5 minutes of deep breathing.",
        ]),
    }
}
