use std::collections::BTreeMap;

/// Selected scale value per question id.
///
/// Keys are question ids (1..=21 for DASS-21), values are the chosen scale
/// points. Serialized as a JSON object with string keys, e.g. `{"1": 2}`.
pub type AnswerSet = BTreeMap<u8, u8>;
