//! Topic Splitting
//!
//! Turns the multi-line topics completion into an ordered list.

use serde::{Deserialize, Serialize};

/// How strictly the topic list is held to the requested count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicPolicy {
    /// Keep every line the model returned
    AsReturned,
    /// Drop blank lines and keep at most `count` topics
    Enforce { count: usize },
}

/// Split on line boundaries without trimming, deduplicating or counting.
///
/// `\n` is the only separator, so `split(&split(x).join("\n")) == split(x)`.
pub fn split(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

/// Split and apply `policy`
pub fn split_with_policy(raw: &str, policy: TopicPolicy) -> Vec<String> {
    let topics = split(raw);
    match policy {
        TopicPolicy::AsReturned => topics,
        TopicPolicy::Enforce { count } => topics
            .into_iter()
            .filter(|topic| !topic.trim().is_empty())
            .take(count)
            .collect(),
    }
}
