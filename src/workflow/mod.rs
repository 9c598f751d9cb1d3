//! Workflow Controller
//!
//! Drives the four generation tasks from discrete user events. Each task has
//! its own state machine:
//!
//! ```text
//! Idle → Validating → Generating → Displaying → Exporting → ExportDone | ExportFailed
//! ```
//!
//! Validation failures are reported through the presenter and return to
//! `Idle` without any remote call. Generation failures propagate to the caller
//! as `Err`. Export failures are caught here and shown as an error
//! notification.

pub mod presenter;

pub use presenter::{BusyGuard, Presenter};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::ai::prompt::PromptBuilder;
use crate::ai::provider::SharedCompletionClient;
use crate::ai::topics::{self, TopicPolicy};
use crate::config::Config;
use crate::export::DocumentExporter;
use crate::types::{
    DocumentId, ExportRequest, GenerationResult, GenerationTask, InputRecord, Result,
    ValidationError,
};

/// Per-task state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Idle,
    Validating,
    Generating,
    Displaying,
    Exporting,
    ExportDone,
    ExportFailed,
}

impl TaskState {
    /// Whether a held result may be exported from this state
    pub fn can_export(&self) -> bool {
        matches!(self, Self::Displaying | Self::ExportDone | Self::ExportFailed)
    }
}

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    Generate(GenerationTask),
    Export {
        task: GenerationTask,
        folder_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Result rendered and held for export
    Displayed(GenerationResult),
    /// Required fields were empty; nothing was sent
    Incomplete(ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(DocumentId),
    /// Export attempted and failed; carries the shown detail
    Failed(String),
    /// No displayed result for the task
    NothingToExport,
    /// Folder id was empty
    MissingFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Generation(GenerationOutcome),
    Export(ExportOutcome),
}

/// Model and topic handling for a controller
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub model: String,
    pub topic_count: usize,
    pub topic_policy: TopicPolicy,
}

impl WorkflowSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.llm.model.clone(),
            topic_count: config.topics.count,
            topic_policy: config.topics.policy(),
        }
    }
}

#[derive(Debug, Default)]
struct TaskSlot {
    state: TaskState,
    result: Option<GenerationResult>,
}

pub struct WorkflowController {
    prompts: PromptBuilder,
    completion: SharedCompletionClient,
    exporter: Option<DocumentExporter>,
    presenter: Arc<dyn Presenter>,
    model: String,
    topic_policy: TopicPolicy,
    slots: [TaskSlot; 4],
}

impl WorkflowController {
    /// `exporter` is `None` when no document credentials are configured
    pub fn new(
        completion: SharedCompletionClient,
        exporter: Option<DocumentExporter>,
        presenter: Arc<dyn Presenter>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            prompts: PromptBuilder::new(settings.topic_count),
            completion,
            exporter,
            presenter,
            model: settings.model,
            topic_policy: settings.topic_policy,
            slots: Default::default(),
        }
    }

    pub fn state(&self, task: GenerationTask) -> TaskState {
        self.slots[task.index()].state
    }

    /// Last successful result for `task`
    pub fn result(&self, task: GenerationTask) -> Option<&GenerationResult> {
        self.slots[task.index()].result.as_ref()
    }

    pub fn can_export(&self) -> bool {
        self.exporter.is_some()
    }

    /// Dispatch one user event
    pub async fn handle(
        &mut self,
        input: &InputRecord,
        event: WorkflowEvent,
    ) -> Result<WorkflowOutcome> {
        match event {
            WorkflowEvent::Generate(task) => {
                self.generate(task, input).await.map(WorkflowOutcome::Generation)
            }
            WorkflowEvent::Export { task, folder_id } => Ok(WorkflowOutcome::Export(
                self.export(task, &folder_id).await,
            )),
        }
    }

    /// Run one generation task.
    ///
    /// Completion failures are returned as `Err` and leave the task `Idle`
    /// with no held result.
    pub async fn generate(
        &mut self,
        task: GenerationTask,
        input: &InputRecord,
    ) -> Result<GenerationOutcome> {
        self.transition(task, TaskState::Validating);

        if let Err(missing) = input.validate() {
            self.reset(task);
            self.presenter.warning(&missing.to_string());
            return Ok(GenerationOutcome::Incomplete(missing));
        }

        self.transition(task, TaskState::Generating);
        debug!("Running task {}", task);

        let presenter = Arc::clone(&self.presenter);
        let body = {
            let _busy = BusyGuard::enter(presenter.as_ref(), task.busy_message());
            self.run_task(task, input).await
        };

        let body = match body {
            Ok(body) => body,
            Err(e) => {
                self.reset(task);
                return Err(e);
            }
        };

        let result = GenerationResult::new(task, body);
        let slot = &mut self.slots[task.index()];
        slot.result = Some(result.clone());
        slot.state = TaskState::Displaying;

        self.presenter.show_result(&result);
        Ok(GenerationOutcome::Displayed(result))
    }

    /// Export the held result for `task`. Never fails: problems become
    /// notifications and an [`ExportOutcome`].
    pub async fn export(&mut self, task: GenerationTask, folder_id: &str) -> ExportOutcome {
        let slot = &self.slots[task.index()];
        let result = match (&slot.result, slot.state.can_export()) {
            (Some(result), true) => result.clone(),
            _ => {
                self.presenter.warning(&format!(
                    "Generate {} before exporting it",
                    task.title()
                ));
                return ExportOutcome::NothingToExport;
            }
        };

        let folder_id = folder_id.trim();
        if folder_id.is_empty() {
            self.presenter
                .warning("Enter a Google Drive folder ID before exporting");
            return ExportOutcome::MissingFolder;
        }

        let Some(exporter) = self.exporter.clone() else {
            let detail = "document export is not configured (set GOOGLE_ACCESS_TOKEN)";
            self.transition(task, TaskState::ExportFailed);
            self.presenter.error(&format!("Failed to export: {}", detail));
            return ExportOutcome::Failed(detail.to_string());
        };

        self.transition(task, TaskState::Exporting);
        let request = ExportRequest::from_result(&result, folder_id);

        let presenter = Arc::clone(&self.presenter);
        let exported = {
            let _busy = BusyGuard::enter(
                presenter.as_ref(),
                &format!("Exporting {} to Google Drive...", result.title),
            );
            exporter.export(&request).await
        };

        match exported {
            Ok(document_id) => {
                self.transition(task, TaskState::ExportDone);
                self.presenter.success(&format!(
                    "{} exported successfully to Google Drive!",
                    result.title
                ));
                ExportOutcome::Exported(document_id)
            }
            Err(e) => {
                warn!("Export of {} failed: {}", task, e);
                self.transition(task, TaskState::ExportFailed);
                let detail = e.to_string();
                self.presenter.error(&format!("Failed to export: {}", detail));
                ExportOutcome::Failed(detail)
            }
        }
    }

    async fn run_task(&self, task: GenerationTask, input: &InputRecord) -> Result<String> {
        if task.yields_list() {
            // Topics are brainstormed from a freshly generated strategy
            let strategy_prompt = self
                .prompts
                .build(GenerationTask::ContentStrategy, input, None);
            let strategy = self
                .completion
                .complete(&strategy_prompt, &self.model)
                .await?;

            let topics_prompt = self.prompts.build(task, input, Some(&strategy));
            let raw = self.completion.complete(&topics_prompt, &self.model).await?;

            Ok(topics::split_with_policy(&raw, self.topic_policy).join("\n"))
        } else {
            let prompt = self.prompts.build(task, input, None);
            self.completion.complete(&prompt, &self.model).await
        }
    }

    fn transition(&mut self, task: GenerationTask, state: TaskState) {
        self.slots[task.index()].state = state;
    }

    fn reset(&mut self, task: GenerationTask) {
        self.slots[task.index()] = TaskSlot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::presenter::testing::{RecordingPresenter, capture_logs};
    use super::*;
    use crate::ai::prompt::PromptTriple;
    use crate::ai::provider::CompletionClient;
    use crate::export::testing::{Call, FailAt, RecordingBackend};
    use crate::types::{ErrorCategory, IdeaError, Service, UpstreamError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed reply (or failure) and records every prompt
    struct StubCompletion {
        reply: std::result::Result<String, UpstreamError>,
        prompts: Mutex<Vec<PromptTriple>>,
    }

    impl StubCompletion {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(UpstreamError::new(
                    Service::Completion,
                    ErrorCategory::Auth,
                    "Incorrect API key provided",
                )
                .with_status(401)),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for StubCompletion {
        async fn complete(&self, prompt: &PromptTriple, _model: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.reply.clone().map_err(IdeaError::from)
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct Harness {
        controller: WorkflowController,
        completion: Arc<StubCompletion>,
        backend: Arc<RecordingBackend>,
        presenter: Arc<RecordingPresenter>,
    }

    fn harness(completion: Arc<StubCompletion>, fail_at: FailAt) -> Harness {
        harness_with(completion, fail_at, TopicPolicy::AsReturned)
    }

    fn harness_with(
        completion: Arc<StubCompletion>,
        fail_at: FailAt,
        topic_policy: TopicPolicy,
    ) -> Harness {
        let backend = RecordingBackend::new(fail_at);
        let presenter = Arc::new(RecordingPresenter::default());
        let controller = WorkflowController::new(
            completion.clone(),
            Some(DocumentExporter::new(backend.clone())),
            presenter.clone(),
            WorkflowSettings {
                model: "gpt-4o-mini".to_string(),
                topic_count: 10,
                topic_policy,
            },
        );
        Harness {
            controller,
            completion,
            backend,
            presenter,
        }
    }

    fn complete_input() -> InputRecord {
        InputRecord::new("Acme", "Remote workers", "Grow subscriptions", "Fresh beans")
    }

    #[tokio::test]
    async fn test_incomplete_input_makes_no_completion_call() {
        let mut h = harness(StubCompletion::replying("unused"), FailAt::Nothing);
        let input = InputRecord::new("", "A", "B", "C");

        for task in GenerationTask::ALL {
            let outcome = h.controller.generate(task, &input).await.unwrap();
            assert!(matches!(outcome, GenerationOutcome::Incomplete(ref e) if e.missing == vec!["Brand"]));
            assert_eq!(h.controller.state(task), TaskState::Idle);
        }

        assert_eq!(h.completion.calls(), 0);
        assert_eq!(h.presenter.with_prefix("warning:").len(), 4);
        assert!(h.presenter.with_prefix("busy:").is_empty());
    }

    #[tokio::test]
    async fn test_generation_displays_and_holds_result() {
        let mut h = harness(StubCompletion::replying("Persona A"), FailAt::Nothing);

        let outcome = h
            .controller
            .generate(GenerationTask::BuyerPersonas, &complete_input())
            .await
            .unwrap();

        let expected = GenerationResult::new(GenerationTask::BuyerPersonas, "Persona A");
        assert_eq!(outcome, GenerationOutcome::Displayed(expected.clone()));
        assert_eq!(
            h.controller.state(GenerationTask::BuyerPersonas),
            TaskState::Displaying
        );
        assert_eq!(
            h.controller.result(GenerationTask::BuyerPersonas),
            Some(&expected)
        );
        assert_eq!(
            h.presenter.events(),
            vec![
                "busy:Generating Buyer Personas...",
                "idle",
                "result:Buyer Personas:Persona A",
            ]
        );
    }

    #[tokio::test]
    async fn test_topics_round_trip_through_splitter() {
        let mut h = harness(
            StubCompletion::replying("Persona A\nPersona B\nPersona C"),
            FailAt::Nothing,
        );

        let outcome = h
            .controller
            .generate(GenerationTask::ContentTopics, &complete_input())
            .await
            .unwrap();

        match outcome {
            GenerationOutcome::Displayed(result) => {
                assert_eq!(result.body, "Persona A\nPersona B\nPersona C");
                assert_eq!(result.title, "Content Topics");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        // Strategy first, then topics built on the strategy text
        let prompts = h.completion.prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].prompt.contains("content strategy"));
        assert_eq!(prompts[1].content, "Persona A\nPersona B\nPersona C");
    }

    #[tokio::test]
    async fn test_topics_enforced_count() {
        let mut h = harness_with(
            StubCompletion::replying("1\n\n2\n3\n4"),
            FailAt::Nothing,
            TopicPolicy::Enforce { count: 2 },
        );

        let outcome = h
            .controller
            .generate(GenerationTask::ContentTopics, &complete_input())
            .await
            .unwrap();
        assert!(matches!(outcome, GenerationOutcome::Displayed(r) if r.body == "1\n2"));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates_and_releases_busy() {
        let mut h = harness(StubCompletion::failing(), FailAt::Nothing);

        let err = h
            .controller
            .generate(GenerationTask::ContentStrategy, &complete_input())
            .await
            .unwrap_err();

        let upstream = err.as_upstream().expect("upstream error");
        assert_eq!(upstream.category, ErrorCategory::Auth);
        assert_eq!(
            h.controller.state(GenerationTask::ContentStrategy),
            TaskState::Idle
        );
        assert!(h.controller.result(GenerationTask::ContentStrategy).is_none());
        assert_eq!(
            h.presenter.events(),
            vec!["busy:Creating Content Strategy...", "idle"]
        );
    }

    #[tokio::test]
    async fn test_handle_propagates_generation_error() {
        let mut h = harness(StubCompletion::failing(), FailAt::Nothing);
        let result = h
            .controller
            .handle(
                &complete_input(),
                WorkflowEvent::Generate(GenerationTask::BuyerPersonas),
            )
            .await;
        assert!(matches!(result, Err(IdeaError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_export_insert_failure_is_caught_and_shown() {
        let mut h = harness(StubCompletion::replying("Persona A"), FailAt::Insert);
        h.controller
            .generate(GenerationTask::BuyerPersonas, &complete_input())
            .await
            .unwrap();

        let outcome = h
            .controller
            .handle(
                &complete_input(),
                WorkflowEvent::Export {
                    task: GenerationTask::BuyerPersonas,
                    folder_id: "folder-1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Export(ExportOutcome::Failed(ref d)) if d.contains("insert exploded")));
        assert_eq!(h.backend.count(|c| matches!(c, Call::Create(_))), 1);
        assert_eq!(
            h.controller.state(GenerationTask::BuyerPersonas),
            TaskState::ExportFailed
        );

        let errors = h.presenter.with_prefix("error:");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("error:Failed to export: "));
        assert!(errors[0].contains("insert exploded"));

        // Busy indicator released after the failed export as well
        let events = h.presenter.events();
        assert_eq!(events.iter().filter(|e| e.starts_with("busy:")).count(), 2);
        assert_eq!(events.iter().filter(|e| *e == "idle").count(), 2);
    }

    #[tokio::test]
    async fn test_export_success() {
        let mut h = harness(StubCompletion::replying("Plan"), FailAt::Nothing);
        h.controller
            .generate(GenerationTask::ContentStrategy, &complete_input())
            .await
            .unwrap();

        let outcome = h
            .controller
            .export(GenerationTask::ContentStrategy, "folder-7")
            .await;

        assert_eq!(outcome, ExportOutcome::Exported(DocumentId::new("doc-1")));
        assert_eq!(
            h.controller.state(GenerationTask::ContentStrategy),
            TaskState::ExportDone
        );
        assert_eq!(
            h.presenter.with_prefix("success:"),
            vec!["success:Content Strategy exported successfully to Google Drive!"]
        );
        assert!(h
            .backend
            .calls()
            .contains(&Call::Insert("doc-1".to_string(), 1, "Plan".to_string())));
        assert_eq!(h.backend.count(|c| *c == Call::Session), 1);
    }

    #[tokio::test]
    async fn test_export_trims_folder_id() {
        let mut h = harness(StubCompletion::replying("Plan"), FailAt::Nothing);
        h.controller
            .generate(GenerationTask::ContentStrategy, &complete_input())
            .await
            .unwrap();

        let outcome = h
            .controller
            .export(GenerationTask::ContentStrategy, " 1AbC \n")
            .await;

        assert_eq!(outcome, ExportOutcome::Exported(DocumentId::new("doc-1")));
        assert!(h
            .backend
            .calls()
            .contains(&Call::Attach("doc-1".to_string(), "1AbC".to_string())));
    }

    #[tokio::test]
    async fn test_busy_work_logs_nothing_at_info() {
        let (subscriber, logs) = capture_logs(tracing::Level::INFO);
        let _default = tracing::subscriber::set_default(subscriber);

        let mut h = harness(StubCompletion::replying("A\nB"), FailAt::Nothing);
        h.controller
            .generate(GenerationTask::ContentTopics, &complete_input())
            .await
            .unwrap();
        h.controller
            .export(GenerationTask::ContentTopics, "folder-7")
            .await;

        let logs = logs.lock().unwrap();
        assert!(logs.is_empty(), "{}", String::from_utf8_lossy(&logs));
    }

    #[tokio::test]
    async fn test_export_without_result_does_nothing() {
        let mut h = harness(StubCompletion::replying("Plan"), FailAt::Nothing);

        let outcome = h
            .controller
            .export(GenerationTask::ContentTypesAndPlatforms, "folder-7")
            .await;

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_export_requires_folder() {
        let mut h = harness(StubCompletion::replying("Plan"), FailAt::Nothing);
        h.controller
            .generate(GenerationTask::ContentStrategy, &complete_input())
            .await
            .unwrap();

        let outcome = h.controller.export(GenerationTask::ContentStrategy, "  ").await;
        assert_eq!(outcome, ExportOutcome::MissingFolder);
        assert!(h.backend.calls().is_empty());
        assert_eq!(
            h.controller.state(GenerationTask::ContentStrategy),
            TaskState::Displaying
        );
    }

    #[tokio::test]
    async fn test_export_without_exporter_reports_error() {
        let presenter = Arc::new(RecordingPresenter::default());
        let mut controller = WorkflowController::new(
            StubCompletion::replying("Plan"),
            None,
            presenter.clone(),
            WorkflowSettings {
                model: "gpt-4o-mini".to_string(),
                topic_count: 10,
                topic_policy: TopicPolicy::AsReturned,
            },
        );
        controller
            .generate(GenerationTask::ContentStrategy, &complete_input())
            .await
            .unwrap();

        let outcome = controller
            .export(GenerationTask::ContentStrategy, "folder")
            .await;
        assert!(matches!(outcome, ExportOutcome::Failed(_)));
        assert_eq!(presenter.with_prefix("error:").len(), 1);
    }

    #[tokio::test]
    async fn test_tasks_are_independent() {
        let mut h = harness(StubCompletion::replying("Text"), FailAt::Nothing);
        h.controller
            .generate(GenerationTask::BuyerPersonas, &complete_input())
            .await
            .unwrap();

        assert_eq!(
            h.controller.state(GenerationTask::BuyerPersonas),
            TaskState::Displaying
        );
        for task in [
            GenerationTask::ContentStrategy,
            GenerationTask::ContentTopics,
            GenerationTask::ContentTypesAndPlatforms,
        ] {
            assert_eq!(h.controller.state(task), TaskState::Idle);
            assert!(h.controller.result(task).is_none());
        }
    }

    #[tokio::test]
    async fn test_generate_and_export_over_http() {
        use crate::ai::provider::OpenAiClient;
        use crate::config::{Credentials, DocumentsConfig, LlmConfig};
        use crate::export::GoogleWorkspace;
        use serde_json::json;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Reels on Instagram"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documentId": "d-9"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/documents/d-9:batchUpdate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/drive/v3/files/d-9"))
            .and(query_param("addParents", "folder-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "d-9"})))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Credentials::new(Some("sk-test"), Some("ya29.test"));
        let llm = LlmConfig {
            api_base: format!("{}/v1", server.uri()),
            ..LlmConfig::default()
        };
        let documents = DocumentsConfig {
            docs_api_base: server.uri(),
            drive_api_base: server.uri(),
            ..DocumentsConfig::default()
        };

        let presenter = Arc::new(RecordingPresenter::default());
        let mut controller = WorkflowController::new(
            Arc::new(OpenAiClient::new(&llm, &credentials).unwrap()),
            Some(DocumentExporter::new(Arc::new(
                GoogleWorkspace::new(&documents, &credentials).unwrap(),
            ))),
            presenter.clone(),
            WorkflowSettings {
                model: "gpt-4o-mini".to_string(),
                topic_count: 10,
                topic_policy: TopicPolicy::AsReturned,
            },
        );

        let task = GenerationTask::ContentTypesAndPlatforms;
        controller.generate(task, &complete_input()).await.unwrap();
        let outcome = controller.export(task, "folder-3").await;

        assert_eq!(outcome, ExportOutcome::Exported(DocumentId::new("d-9")));
        assert_eq!(
            presenter.with_prefix("success:"),
            vec!["success:Content Types and Platforms exported successfully to Google Drive!"]
        );
    }
}
