//! Shaping model output into exactly three follow-up questions.

use crate::config::FOLLOW_UP_COUNT;

/// Characters removed from the start of each line ("1. ", "2.", ...).
const NUMBERING_CHARS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ' '];

/// Filler used when the model returns fewer than three questions.
pub fn padding_question(question: &str) -> String {
    format!("What else can you tell me about {question}?")
}

/// The triple returned when the follow-up completion fails.
pub fn fallback_follow_ups(question: &str) -> Vec<String> {
    vec![
        padding_question(question),
        format!("Why is {question} significant?"),
        format!("How does {question} affect us?"),
    ]
}

/// Removes leading list numbering and surrounding whitespace.
pub fn strip_numbering(line: &str) -> &str {
    line.trim().trim_start_matches(NUMBERING_CHARS).trim()
}

/// Turns a raw completion into exactly three plain questions.
///
/// Lines are trimmed and de-numbered; lines left empty are dropped. The
/// first three survivors are kept and the rest padded with
/// [`padding_question`].
pub fn parse_follow_ups(question: &str, text: &str) -> Vec<String> {
    let mut questions: Vec<String> = text
        .lines()
        .map(strip_numbering)
        .filter(|line| !line.is_empty())
        .take(FOLLOW_UP_COUNT)
        .map(str::to_string)
        .collect();

    while questions.len() < FOLLOW_UP_COUNT {
        questions.push(padding_question(question));
    }

    questions
}
