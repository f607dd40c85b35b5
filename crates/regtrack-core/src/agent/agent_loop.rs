//! Bounded multi-round tool-calling loop

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AgentSettings;
use crate::dispatch::Dispatcher;
use crate::logging::Logger;
use crate::{log_info, log_warn};
use crate::providers::{CompletionOptions, Provider, ProviderError};
use crate::transport::Transport;
use crate::types::{ChatMessage, ToolCall, ToolResult};
use super::conversation::ConversationState;

/// Errors that end a run
///
/// Tool failures never appear here; they are fed back to the model.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Conversation timed out after {0:?}")]
    Timeout(Duration),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// When the tool list is attached to completion requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolExposure {
    /// Only the first request carries tools
    #[default]
    FirstRound,
    /// Every request carries tools (stateless providers)
    EveryRound,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationReason {
    /// The model answered without requesting tools
    ModelFinished,
    /// The round budget ran out while the model still wanted tools
    RoundLimitReached,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::ModelFinished => "model-finished",
            TerminationReason::RoundLimitReached => "round-limit-reached",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOptions {
    /// Maximum completion calls per run; values below 1 are treated as 1
    pub max_rounds: u32,
    /// Execute the calls of one round concurrently
    pub parallel_tools: bool,
    pub tool_exposure: ToolExposure,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Wall-clock limit applied by [`AgentLoop::ask`]
    pub timeout: Option<Duration>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            parallel_tools: true,
            tool_exposure: ToolExposure::FirstRound,
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Final answer, or the best partial answer when truncated
    pub final_text: String,
    pub termination_reason: TerminationReason,
    /// Completion calls made
    pub rounds: u32,
    /// Tool calls executed across all rounds
    pub tool_executions: usize,
    /// Full transcript including the initial messages
    pub messages: Vec<ChatMessage>,
}

impl RunOutcome {
    pub fn is_truncated(&self) -> bool {
        self.termination_reason == TerminationReason::RoundLimitReached
    }
}

/// Drives a model through tool-calling rounds
pub struct AgentLoop {
    dispatcher: Arc<Dispatcher>,
    provider: Arc<dyn Provider>,
    transport: Arc<dyn Transport>,
    options: AgentOptions,
    system_prompt: Option<String>,
    logger: Arc<dyn Logger>,
}

impl AgentLoop {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        provider: Arc<dyn Provider>,
        transport: Arc<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            dispatcher,
            provider,
            transport,
            options: AgentOptions::default(),
            system_prompt: None,
            logger,
        }
    }

    /// Build a loop with the options and system prompt from loaded settings
    pub fn from_settings(
        settings: &AgentSettings,
        dispatcher: Arc<Dispatcher>,
        provider: Arc<dyn Provider>,
        transport: Arc<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let agent = Self::new(dispatcher, provider, transport, logger).with_options(settings.agent_options());
        match &settings.system_prompt {
            Some(prompt) => agent.with_system_prompt(prompt.clone()),
            None => agent,
        }
    }

    pub fn with_options(mut self, options: AgentOptions) -> Self {
        self.options = options;
        self
    }

    /// System prompt prepended by [`ask`](Self::ask)
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Run a single user question, within the configured timeout if any
    pub async fn ask(&self, prompt: impl Into<String>) -> AgentResult<RunOutcome> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));
        match self.options.timeout {
            Some(limit) => self.run_with_timeout(messages, limit).await,
            None => self.run(messages).await,
        }
    }

    /// Run the loop from the given conversation
    pub async fn run(&self, initial: Vec<ChatMessage>) -> AgentResult<RunOutcome> {
        let max_rounds = self.options.max_rounds.max(1);
        let tools = self.dispatcher.model_tools();
        let mut state = ConversationState::new(initial);
        let mut rounds: u32 = 0;
        let mut tool_executions = 0;

        loop {
            let offer_tools = match self.options.tool_exposure {
                ToolExposure::FirstRound => rounds == 0,
                ToolExposure::EveryRound => true,
            };
            let options = CompletionOptions {
                tools: offer_tools.then(|| tools.clone()),
                temperature: self.options.temperature,
                max_tokens: self.options.max_tokens,
            };

            let mut completion = self.provider.complete(state.messages(), options).await?;
            rounds += 1;

            if !completion.has_tool_calls() {
                log_info!(self.logger, "[AgentLoop] Model finished after {} rounds", rounds);
                state.record_completion(&completion);
                return Ok(RunOutcome {
                    final_text: completion.text,
                    termination_reason: TerminationReason::ModelFinished,
                    rounds,
                    tool_executions,
                    messages: state.into_messages(),
                });
            }

            assign_missing_ids(&mut completion.tool_calls, rounds);
            state.record_completion(&completion);

            if rounds >= max_rounds {
                log_warn!(
                    self.logger,
                    "[AgentLoop] Round limit {} reached with {} tool calls outstanding",
                    max_rounds,
                    completion.tool_calls.len()
                );
                let final_text = state.last_assistant_text().unwrap_or_else(|| {
                    format!(
                        "Stopped after {} rounds without a final answer from the model.",
                        rounds
                    )
                });
                return Ok(RunOutcome {
                    final_text,
                    termination_reason: TerminationReason::RoundLimitReached,
                    rounds,
                    tool_executions,
                    messages: state.into_messages(),
                });
            }

            log_info!(
                self.logger,
                "[AgentLoop] Round {}: executing {} tool calls",
                rounds,
                completion.tool_calls.len()
            );
            let results = self.execute_tools(&completion.tool_calls).await;
            tool_executions += results.len();
            state.record_results(&results);
        }
    }

    /// Run with a wall-clock limit
    pub async fn run_with_timeout(&self, initial: Vec<ChatMessage>, limit: Duration) -> AgentResult<RunOutcome> {
        match tokio::time::timeout(limit, self.run(initial)).await {
            Ok(result) => result,
            Err(_) => {
                log_warn!(self.logger, "[AgentLoop] Timed out after {:?}", limit);
                Err(AgentError::Timeout(limit))
            }
        }
    }

    /// Execute one round of calls; results keep request order
    async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let transport = self.transport.as_ref();
        if self.options.parallel_tools {
            join_all(calls.iter().map(|call| self.dispatcher.execute_call(call, transport))).await
        } else {
            let mut results = Vec::with_capacity(calls.len());
            for call in calls {
                results.push(self.dispatcher.execute_call(call, transport).await);
            }
            results
        }
    }
}

/// Give every call a usable correlation id
fn assign_missing_ids(calls: &mut [ToolCall], round: u32) {
    for (index, call) in calls.iter_mut().enumerate() {
        if !call.has_id() {
            call.id = format!("call_{}_{}", round, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::providers::{Completion, MockProvider, ProviderResult};
    use crate::transport::MockTransport;
    use crate::types::MessageRole;
    use async_trait::async_trait;
    use serde_json::json;

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn dispatcher() -> Arc<Dispatcher> {
        Arc::new(Dispatcher::builtin(logger()).unwrap())
    }

    fn agent(provider: Arc<MockProvider>, transport: Arc<MockTransport>) -> AgentLoop {
        AgentLoop::new(dispatcher(), provider, transport, logger())
    }

    #[tokio::test]
    async fn test_two_round_conversation() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then_tool_calls(vec![ToolCall::new("c1", "get_regulation", json!({ "regulation_id": 7 }))])
                .then_text("GDPR is in force."),
        );
        let transport = Arc::new(MockTransport::new().respond("/regulations/7", json!({ "title": "GDPR" })));

        let outcome = agent(provider.clone(), transport.clone())
            .run(vec![ChatMessage::user("Tell me about regulation 7")])
            .await
            .unwrap();

        assert_eq!(outcome.termination_reason, TerminationReason::ModelFinished);
        assert_eq!(outcome.termination_reason.to_string(), "model-finished");
        assert_eq!(outcome.final_text, "GDPR is in force.");
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.tool_executions, 1);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(transport.call_count(), 1);

        // user, assistant tool-use, tool result, assistant answer
        assert_eq!(outcome.messages.len(), 4);
        assert_eq!(outcome.messages[2].role, MessageRole::Tool);
        assert_eq!(outcome.messages[2].tool_result_id(), Some("c1"));
    }

    #[tokio::test]
    async fn test_round_limit() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then_tool_calls(vec![ToolCall::new("loop", "list_alerts", json!({}))])
                .repeating(),
        );
        let transport = Arc::new(MockTransport::new());

        let outcome = agent(provider.clone(), transport.clone())
            .with_options(AgentOptions {
                max_rounds: 3,
                ..AgentOptions::default()
            })
            .run(vec![ChatMessage::user("Keep checking alerts")])
            .await
            .unwrap();

        assert_eq!(outcome.termination_reason, TerminationReason::RoundLimitReached);
        assert_eq!(outcome.termination_reason.as_str(), "round-limit-reached");
        assert!(outcome.is_truncated());
        assert_eq!(provider.call_count(), 3);
        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.tool_executions, 2);
        assert_eq!(transport.call_count(), 2);
        assert!(outcome.final_text.contains("3 rounds"));
    }

    #[tokio::test]
    async fn test_round_limit_returns_partial_text() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then(
                    Completion::tool_calls(vec![ToolCall::new("a", "list_tags", json!({}))])
                        .with_text("Found some tags, checking more"),
                )
                .then_tool_calls(vec![ToolCall::new("b", "list_tags", json!({}))]),
        );
        let transport = Arc::new(MockTransport::new());

        let outcome = agent(provider, transport)
            .with_options(AgentOptions {
                max_rounds: 2,
                ..AgentOptions::default()
            })
            .run(vec![ChatMessage::user("tags?")])
            .await
            .unwrap();

        assert!(outcome.is_truncated());
        assert_eq!(outcome.final_text, "Found some tags, checking more");
    }

    #[tokio::test]
    async fn test_results_correlate_with_calls() {
        let calls: Vec<ToolCall> = (1..=4)
            .map(|i| ToolCall::new(format!("call-{}", i), "get_alert", json!({ "alert_id": i })))
            .collect();
        let provider = Arc::new(MockProvider::new(logger()).then_tool_calls(calls).then_text("done"));
        let mut transport = MockTransport::new();
        for i in 1..=4 {
            transport = transport.respond(format!("/alerts/{}", i), json!({ "id": i }));
        }
        let transport = Arc::new(transport);

        let outcome = agent(provider, transport)
            .run(vec![ChatMessage::user("summarize alerts 1-4")])
            .await
            .unwrap();

        assert_eq!(outcome.tool_executions, 4);
        let results: Vec<_> = outcome
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::Tool)
            .collect();
        assert_eq!(results.len(), 4);
        for (i, message) in results.iter().enumerate() {
            let n = i + 1;
            assert_eq!(message.tool_result_id(), Some(format!("call-{}", n).as_str()));
            let rendered = serde_json::to_string(&message.content).unwrap();
            assert!(rendered.contains(&format!("{{\\\"id\\\":{}}}", n)));
        }
    }

    #[tokio::test]
    async fn test_sequential_execution() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then_tool_calls(vec![
                    ToolCall::new("a", "get_alert", json!({ "alert_id": 1 })),
                    ToolCall::new("b", "get_alert", json!({ "alert_id": 2 })),
                ])
                .then_text("ok"),
        );
        let transport = Arc::new(MockTransport::new());

        agent(provider, transport.clone())
            .with_options(AgentOptions {
                parallel_tools: false,
                ..AgentOptions::default()
            })
            .run(vec![ChatMessage::user("alerts")])
            .await
            .unwrap();

        let paths: Vec<_> = transport.calls().into_iter().map(|c| c.path).collect();
        assert_eq!(paths, vec!["/alerts/1", "/alerts/2"]);
    }

    #[tokio::test]
    async fn test_tool_errors_are_fed_back() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then_tool_calls(vec![
                    ToolCall::new("bad", "no_such_tool", json!({})),
                    ToolCall::new("fail", "get_report", json!({ "report_id": 3 })),
                ])
                .then_text("Sorry, I could not fetch that."),
        );
        let transport = Arc::new(MockTransport::new().fail("/reports/3", 404, "report 3 not found"));

        let outcome = agent(provider.clone(), transport)
            .run(vec![ChatMessage::user("report 3")])
            .await
            .unwrap();

        assert_eq!(outcome.termination_reason, TerminationReason::ModelFinished);
        let last_request = provider.requests().pop().unwrap();
        let last = serde_json::to_string(&last_request.last_message.unwrap()).unwrap();
        assert!(last.contains("report 3 not found"));
        assert!(last.contains("\"is_error\":true"));
    }

    #[tokio::test]
    async fn test_tool_exposure() {
        let script = |p: MockProvider| {
            p.then_tool_calls(vec![ToolCall::new("a", "list_teams", json!({}))])
                .then_text("done")
        };

        let provider = Arc::new(script(MockProvider::new(logger())));
        agent(provider.clone(), Arc::new(MockTransport::new()))
            .run(vec![ChatMessage::user("teams")])
            .await
            .unwrap();
        let requests = provider.requests();
        assert!(requests[0].offered_tools());
        assert!(!requests[1].offered_tools());

        let provider = Arc::new(script(MockProvider::new(logger())));
        agent(provider.clone(), Arc::new(MockTransport::new()))
            .with_options(AgentOptions {
                tool_exposure: ToolExposure::EveryRound,
                ..AgentOptions::default()
            })
            .run(vec![ChatMessage::user("teams")])
            .await
            .unwrap();
        assert!(provider.requests().iter().all(|r| r.offered_tools()));
    }

    #[tokio::test]
    async fn test_missing_call_ids_are_assigned() {
        let provider = Arc::new(
            MockProvider::new(logger())
                .then_tool_calls(vec![
                    ToolCall::new("", "list_tags", json!({})),
                    ToolCall::new("", "list_teams", json!({})),
                ])
                .then_text("done"),
        );
        let outcome = agent(provider, Arc::new(MockTransport::new()))
            .run(vec![ChatMessage::user("x")])
            .await
            .unwrap();
        let ids: Vec<_> = outcome.messages.iter().filter_map(|m| m.tool_result_id()).collect();
        assert_eq!(ids, vec!["call_1_0", "call_1_1"]);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockProvider::new(logger()).then_error("model unavailable"));
        let err = agent(provider, Arc::new(MockTransport::new()))
            .run(vec![ChatMessage::user("x")])
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Provider(_)));
    }

    #[tokio::test]
    async fn test_ask_prepends_system_prompt() {
        let provider = Arc::new(MockProvider::new(logger()));
        let outcome = agent(provider.clone(), Arc::new(MockTransport::new()))
            .with_system_prompt("You are a compliance assistant.")
            .ask("ping")
            .await
            .unwrap();
        assert_eq!(outcome.final_text, "ping");
        assert_eq!(provider.requests()[0].message_count, 2);
        assert_eq!(outcome.messages[0].role, MessageRole::System);
    }

    struct SlowProvider;

    #[async_trait]
    impl Provider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }

        async fn complete(&self, _messages: &[ChatMessage], _options: CompletionOptions) -> ProviderResult<Completion> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Completion::text("too late"))
        }
    }

    #[tokio::test]
    async fn test_run_with_timeout() {
        let agent = AgentLoop::new(dispatcher(), Arc::new(SlowProvider), Arc::new(MockTransport::new()), logger());
        let err = agent
            .run_with_timeout(vec![ChatMessage::user("x")], Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_from_settings_applies_prompt_and_options() {
        let settings = AgentSettings {
            max_rounds: 2,
            system_prompt: Some("Answer with regulation ids.".to_string()),
            ..AgentSettings::default()
        };
        let provider = Arc::new(MockProvider::new(logger()));
        let agent = AgentLoop::from_settings(&settings, dispatcher(), provider.clone(), Arc::new(MockTransport::new()), logger());
        assert_eq!(agent.options().max_rounds, 2);

        let outcome = agent.ask("ping").await.unwrap();
        let request = &provider.requests()[0];
        assert_eq!(request.message_count, 2);
        assert_eq!(outcome.messages[0].role, MessageRole::System);
        assert_eq!(outcome.messages[0].plain_text(), "Answer with regulation ids.");
    }

    #[tokio::test]
    async fn test_ask_honors_configured_timeout() {
        let agent = AgentLoop::new(dispatcher(), Arc::new(SlowProvider), Arc::new(MockTransport::new()), logger())
            .with_options(AgentOptions {
                timeout: Some(Duration::from_millis(20)),
                ..AgentOptions::default()
            });
        let err = agent.ask("x").await.unwrap_err();
        assert!(matches!(err, AgentError::Timeout(limit) if limit == Duration::from_millis(20)));
    }
}
