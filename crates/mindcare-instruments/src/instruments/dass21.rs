use crate::Instrument;
use crate::scoring::{Dimension, FREQUENCY_SCALE, Question};

/// DASS-21: Depression Anxiety Stress Scales, 21-item short form.
/// Seven items per dimension, each rated 0–3 for the past week. Dimension
/// sums are doubled for comparison with DASS-42 norms.
pub struct Dass21;

impl Instrument for Dass21 {
    fn id(&self) -> &str {
        "dass21"
    }

    fn name(&self) -> &str {
        "DASS-21"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            use Dimension::{Anxiety, Depression, Stress};

            let items = [
                (1, Stress, "I found it hard to wind down"),
                (2, Anxiety, "I was aware of dryness of my mouth"),
                (3, Depression, "I couldn't seem to experience any positive feeling at all"),
                (4, Anxiety, "I experienced breathing difficulty (e.g. excessively rapid breathing, breathlessness in the absence of physical exertion)"),
                (5, Depression, "I found it difficult to work up the initiative to do things"),
                (6, Stress, "I tended to over-react to situations"),
                (7, Anxiety, "I experienced trembling (e.g. in the hands)"),
                (8, Stress, "I felt that I was using a lot of nervous energy"),
                (9, Anxiety, "I was worried about situations in which I might panic and make a fool of myself"),
                (10, Depression, "I felt that I had nothing to look forward to"),
                (11, Stress, "I found myself getting agitated"),
                (12, Stress, "I found it difficult to relax"),
                (13, Depression, "I felt down-hearted and blue"),
                (14, Stress, "I was intolerant of anything that kept me from getting on with what I was doing"),
                (15, Anxiety, "I felt I was close to panic"),
                (16, Depression, "I was unable to become enthusiastic about anything"),
                (17, Depression, "I felt I wasn't worth much as a person"),
                (18, Stress, "I felt that I was rather touchy"),
                (19, Anxiety, "I was aware of the action of my heart in the absence of physical exertion (e.g. sense of heart rate increase, heart missing a beat)"),
                (20, Anxiety, "I felt scared without any good reason"),
                (21, Depression, "I felt that life was meaningless"),
            ];

            items
                .iter()
                .map(|(id, dimension, prompt)| Question {
                    id: *id,
                    dimension: *dimension,
                    prompt: prompt.to_string(),
                    scale: FREQUENCY_SCALE,
                })
                .collect()
        });
        &QUESTIONS
    }
}
