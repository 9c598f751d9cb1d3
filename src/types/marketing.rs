//! Form inputs, generation tasks and their results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{IdeaError, ValidationError};

// =============================================================================
// Input Record
// =============================================================================

/// The four marketing inputs collected from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub brand: String,
    pub target_audience: String,
    pub business_goal: String,
    pub special_feature: String,
}

impl InputRecord {
    pub const BRAND_LABEL: &'static str = "Brand";
    pub const TARGET_AUDIENCE_LABEL: &'static str = "Target Audience";
    pub const BUSINESS_GOAL_LABEL: &'static str = "Business Goal";
    pub const SPECIAL_FEATURE_LABEL: &'static str = "Special Feature";

    pub fn new(
        brand: impl Into<String>,
        target_audience: impl Into<String>,
        business_goal: impl Into<String>,
        special_feature: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            target_audience: target_audience.into(),
            business_goal: business_goal.into(),
            special_feature: special_feature.into(),
        }
    }

    /// Labels of the fields that are empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (Self::BRAND_LABEL, &self.brand),
            (Self::TARGET_AUDIENCE_LABEL, &self.target_audience),
            (Self::BUSINESS_GOAL_LABEL, &self.business_goal),
            (Self::SPECIAL_FEATURE_LABEL, &self.special_feature),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    /// Fails with the list of empty fields.
    ///
    /// Only the empty string counts as missing; whitespace is content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

// =============================================================================
// Generation Task
// =============================================================================

/// The four generation actions offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationTask {
    BuyerPersonas,
    ContentStrategy,
    ContentTopics,
    ContentTypesAndPlatforms,
}

impl GenerationTask {
    pub const ALL: [GenerationTask; 4] = [
        GenerationTask::BuyerPersonas,
        GenerationTask::ContentStrategy,
        GenerationTask::ContentTopics,
        GenerationTask::ContentTypesAndPlatforms,
    ];

    /// Heading shown above the result, also used as the export document title
    pub fn title(&self) -> &'static str {
        match self {
            Self::BuyerPersonas => "Buyer Personas",
            Self::ContentStrategy => "Content Strategy",
            Self::ContentTopics => "Content Topics",
            Self::ContentTypesAndPlatforms => "Content Types and Platforms",
        }
    }

    /// Message shown while the task is running
    pub fn busy_message(&self) -> &'static str {
        match self {
            Self::BuyerPersonas => "Generating Buyer Personas...",
            Self::ContentStrategy => "Creating Content Strategy...",
            Self::ContentTopics => "Generating Content Topics...",
            Self::ContentTypesAndPlatforms => "Suggesting Content Types and Platforms...",
        }
    }

    /// Short command-line name
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BuyerPersonas => "personas",
            Self::ContentStrategy => "strategy",
            Self::ContentTopics => "topics",
            Self::ContentTypesAndPlatforms => "platforms",
        }
    }

    /// Stable position in [`GenerationTask::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Self::BuyerPersonas => 0,
            Self::ContentStrategy => 1,
            Self::ContentTopics => 2,
            Self::ContentTypesAndPlatforms => 3,
        }
    }

    /// Whether the completion is post-processed into a list of lines
    pub fn yields_list(&self) -> bool {
        matches!(self, Self::ContentTopics)
    }
}

impl fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl std::str::FromStr for GenerationTask {
    type Err = IdeaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "personas" | "buyer-personas" => Ok(Self::BuyerPersonas),
            "strategy" | "content-strategy" => Ok(Self::ContentStrategy),
            "topics" | "content-topics" => Ok(Self::ContentTopics),
            "platforms" | "content-types" => Ok(Self::ContentTypesAndPlatforms),
            _ => Err(IdeaError::UnknownTask(s.to_string())),
        }
    }
}

// =============================================================================
// Results and Export Requests
// =============================================================================

/// Text produced by one successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub task: GenerationTask,
    pub title: String,
    /// Flattened text (topic lists are newline-joined)
    pub body: String,
}

impl GenerationResult {
    pub fn new(task: GenerationTask, body: impl Into<String>) -> Self {
        Self {
            task,
            title: task.title().to_string(),
            body: body.into(),
        }
    }
}

/// Everything the exporter needs for one export call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub content: String,
    pub title: String,
    pub folder_id: String,
}

impl ExportRequest {
    pub fn from_result(result: &GenerationResult, folder_id: impl Into<String>) -> Self {
        Self {
            content: result.body.clone(),
            title: result.title.clone(),
            folder_id: folder_id.into(),
        }
    }
}

/// Identifier of a document created by the document service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
