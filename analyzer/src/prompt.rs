use llm_interface::{ChatMessage, PromptRequest};
use psyche_core::CommentBatch;
use std::fmt::Write;

pub const INTERESTS_INSTRUCTION: &str = "\
You are reading the public comment history of a Reddit user.

Work out the person's core interests, hobbies and recurring obsessions. Go beyond the \
names of the subreddits they post in and focus on what they actually care about and \
engage with in depth.

Use these signals:
- Subreddit context (posting in r/AskPhysics suggests an interest in physics)
- What the comments say and how they say it
- Themes, topics and lines of thought that keep coming back

Output format:
A comma-separated list of 5-10 interests or concepts. Lowercase only. No spaces. \
Example: philosophy,webdev,anarchism,slowcooking,standupcomedy

Return the list and nothing else. No explanations, no extra formatting.
";

pub const SUMMARY_INSTRUCTION: &str = "\
You are a brutally honest psychologist with a sharp tongue and zero patience for \
pretence. You have just read a Reddit user's public comment history.

Psychoanalyse this person with unfiltered accuracy. Be funny, but the truth comes \
first. If they perform virtue, call out the performance. If they play it cool, name the \
insecurity underneath. Praise is rare and has to be earned. Insight is not optional.

Look at:
- How they present themselves online (attention-seeking, insecure, hyper-logical, \
eager to please, passive-aggressive, ...)
- What their choice of subreddits says about their real values rather than the ones \
they claim
- Tone, writing style and emotional patterns (condescending, overly polite, smug, \
defensive, hungry for approval?)

Mock them if it is deserved, but never lie. Imagine you are describing them to their \
face at a roast and they are not allowed to interrupt.

Write a personality summary of 4 to 6 sentences. Tight, punchy, honest.
";

/// Low temperature keeps the categorical interest list stable between runs.
pub const INTERESTS_TEMPERATURE: f32 = 0.5;
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// A fixed system instruction paired with the temperature it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub instruction: String,
    pub temperature: f32,
}

impl PromptTemplate {
    pub fn interests() -> Self {
        Self {
            instruction: INTERESTS_INSTRUCTION.to_string(),
            temperature: INTERESTS_TEMPERATURE,
        }
    }

    pub fn summary() -> Self {
        Self {
            instruction: SUMMARY_INSTRUCTION.to_string(),
            temperature: SUMMARY_TEMPERATURE,
        }
    }
}

/// Serializes comments one per line as `[r/<subreddit>] <body>`.
///
/// Bodies are copied verbatim, embedded newlines included.
pub fn render_transcript(comments: &CommentBatch) -> String {
    let mut transcript = String::new();
    for comment in comments {
        // Writing into a String cannot fail.
        let _ = writeln!(transcript, "[r/{}] {}", comment.subreddit, comment.body);
    }
    transcript
}

pub fn build_prompt(
    model: &str,
    template: &PromptTemplate,
    comments: &CommentBatch,
) -> PromptRequest {
    PromptRequest {
        model: model.to_string(),
        temperature: template.temperature,
        messages: vec![
            ChatMessage::system(template.instruction.as_str()),
            ChatMessage::user(render_transcript(comments)),
        ],
    }
}
