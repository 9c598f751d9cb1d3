//! Prompt Builder
//!
//! Maps a generation task and the form inputs to the three pieces sent to the
//! completion service: a system message, an instruction prompt and a content
//! block. Pure and deterministic.
//!
//! The user message is the prompt followed by a labeled content block:
//!
//! ```text
//! <prompt>
//!
//! 內容：<content>
//! ```

use crate::constants::prompt as prompt_constants;
use crate::types::{GenerationTask, InputRecord};

/// Label placed in front of the content block of the user message
pub const CONTENT_LABEL: &str = "內容：";

/// System message, instruction prompt and content for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTriple {
    pub system_message: String,
    pub prompt: String,
    pub content: String,
}

impl PromptTriple {
    /// Text carried by the user role
    pub fn user_message(&self) -> String {
        format!("{}\n\n{}{}", self.prompt, CONTENT_LABEL, self.content)
    }
}

/// Builds prompts for every [`GenerationTask`]
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    topic_count: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(prompt_constants::DEFAULT_TOPIC_COUNT)
    }
}

impl PromptBuilder {
    pub fn new(topic_count: usize) -> Self {
        Self { topic_count }
    }

    /// Number of topics requested by the topics prompt
    pub fn topic_count(&self) -> usize {
        self.topic_count
    }

    /// Build the prompt triple for `task`.
    ///
    /// `strategy` is only read for [`GenerationTask::ContentTopics`], whose
    /// content block is the strategy text. Without one, the topics prompt falls
    /// back to the form fields.
    pub fn build(
        &self,
        task: GenerationTask,
        input: &InputRecord,
        strategy: Option<&str>,
    ) -> PromptTriple {
        match task {
            GenerationTask::BuyerPersonas => PromptTriple {
                system_message: "You are an expert in creating detailed buyer personas for targeted marketing campaigns.".to_string(),
                prompt: "Generate 3 detailed buyer personas with demographics, interests, and pain points.".to_string(),
                content: full_profile(input),
            },
            GenerationTask::ContentStrategy => PromptTriple {
                system_message: "You are a marketing strategist specializing in crafting content strategies that align with business goals and audience preferences.".to_string(),
                prompt: "Develop a detailed content strategy to achieve the business goal.".to_string(),
                content: full_profile(input),
            },
            GenerationTask::ContentTopics => PromptTriple {
                system_message: "You are a creative marketing strategist brainstorming unique and impactful content topics.".to_string(),
                prompt: format!(
                    "Generate {} unique content topics that align with the business goal: {}",
                    self.topic_count, input.business_goal
                ),
                content: strategy
                    .map(str::to_string)
                    .unwrap_or_else(|| full_profile(input)),
            },
            GenerationTask::ContentTypesAndPlatforms => PromptTriple {
                system_message: "You are a creative marketer suggesting impactful content types and platforms for audience engagement.".to_string(),
                prompt: "Suggest preferred content types (e.g., blogs, videos, podcasts) and platforms (e.g., Instagram, LinkedIn, YouTube).".to_string(),
                content: field_block(&[
                    (InputRecord::TARGET_AUDIENCE_LABEL, &input.target_audience),
                    (InputRecord::BUSINESS_GOAL_LABEL, &input.business_goal),
                ]),
            },
        }
    }
}

fn full_profile(input: &InputRecord) -> String {
    field_block(&[
        (InputRecord::BRAND_LABEL, &input.brand),
        (InputRecord::TARGET_AUDIENCE_LABEL, &input.target_audience),
        (InputRecord::BUSINESS_GOAL_LABEL, &input.business_goal),
        (InputRecord::SPECIAL_FEATURE_LABEL, &input.special_feature),
    ])
}

/// One `Label: value` line per field, preceded by a newline
fn field_block(fields: &[(&str, &str)]) -> String {
    let mut block = String::from("\n");
    for (label, value) in fields {
        block.push_str(&format!("{}: {}\n", label, value));
    }
    block
}
