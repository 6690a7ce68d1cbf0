//! Prompt templates for the answer and follow-up completions.

use super::Mode;

/// Prefix that asks the model to reason before answering.
const THINK_HARD_PREFIX: &str = "Take a deep breath and think carefully.";

/// Builds the user prompt for the answer completion.
pub fn build_answer_prompt(mode: Mode, question: &str, context: &str) -> String {
    match mode {
        Mode::AdaptToQuestion => format!(
            "Based on the following context, answer the question: {question}\n\nContext: {context}"
        ),
        Mode::ThinkHard => format!(
            "{THINK_HARD_PREFIX} Analyze the following context step-by-step and provide a well-reasoned answer to the question: {question}\n\nContext: {context}"
        ),
    }
}

/// Builds the user prompt asking for three numbered follow-up questions.
pub fn build_follow_up_prompt(mode: Mode, question: &str, answer: &str) -> String {
    let request = format!(
        "Given the following question and answer, generate exactly three concise follow-up questions that a user might ask to explore the topic further.\n\n\
         Original Question: {question}\n\
         Answer: {answer}\n\n\
         Provide the questions in a numbered list (1., 2., 3.). Do not include any additional text or explanations."
    );

    match mode {
        Mode::AdaptToQuestion => request,
        Mode::ThinkHard => format!(
            "{THINK_HARD_PREFIX} Step by step, consider what the user still needs to understand. {request}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapt_answer_prompt() {
        let prompt = build_answer_prompt(Mode::AdaptToQuestion, "Why?", "Because.");
        assert_eq!(
            prompt,
            "Based on the following context, answer the question: Why?\n\nContext: Because."
        );
    }

    #[test]
    fn test_think_hard_answer_prompt() {
        let prompt = build_answer_prompt(Mode::ThinkHard, "Why?", "Because.");
        assert_eq!(
            prompt,
            "Take a deep breath and think carefully. Analyze the following context step-by-step and provide a well-reasoned answer to the question: Why?\n\nContext: Because."
        );
    }

    #[test]
    fn test_follow_up_prompt_lines() {
        let prompt = build_follow_up_prompt(Mode::AdaptToQuestion, "Q", "A");
        assert!(prompt.starts_with("Given the following question and answer"));
        assert!(prompt.contains("\n\nOriginal Question: Q\nAnswer: A\n\n"));
        assert!(prompt.ends_with("Do not include any additional text or explanations."));
    }

    #[test]
    fn test_think_hard_follow_up_prompt_keeps_instructions() {
        let direct = build_follow_up_prompt(Mode::AdaptToQuestion, "Q", "A");
        let careful = build_follow_up_prompt(Mode::ThinkHard, "Q", "A");
        assert!(careful.starts_with(THINK_HARD_PREFIX));
        assert!(careful.ends_with(&direct));
    }
}
