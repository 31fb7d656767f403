//! Prompt templating for blog generation.
//!
//! The caller's prompt is embedded verbatim between a fixed writer
//! instruction and the `Blog Content:` label. Models typically echo that
//! final prompt back before the completion, so [`strip_echo`] removes it.

pub const SYSTEM_PROMPT: &str = "
You are a professional blog writer.
Write clear, SEO-friendly, well-structured content.
Use headings and conclusion.
";

const DEFAULT_WORD_COUNT: u32 = 500;
const DEFAULT_TONE: &str = "informative";

/// Builds the exact text handed to the generation pipeline.
pub fn final_prompt(user_prompt: &str) -> String {
    format!("\n{SYSTEM_PROMPT}\n\nUser Request:\n{user_prompt}\n\nBlog Content:\n")
}

/// Drops a leading copy of `final_prompt` from `generated` and trims the rest.
///
/// Output that does not start with the final prompt is returned whole,
/// trimmed.
pub fn strip_echo(generated: &str, final_prompt: &str) -> String {
    generated
        .strip_prefix(final_prompt)
        .unwrap_or(generated)
        .trim()
        .to_string()
}

/// Composes a writing prompt from a topic, an optional target length and an
/// optional tone.
pub fn brief_prompt(topic: &str, word_count: Option<u32>, tone: Option<&str>) -> String {
    let word_count = word_count
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_WORD_COUNT);
    let tone = tone
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TONE);
    format!(
        "Write a {word_count}-word blog.\nTopic: {}\nTone: {tone}\nInclude headings and conclusion.",
        topic.trim()
    )
}
