//! Command suggestions
//!
//! Autocomplete candidates come from an external text-completion service.
//! The service is best effort: callers go through
//! [`get_command_suggestions`], which turns every failure into an empty list.

pub mod fetcher;

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub use fetcher::SuggestionFetcher;

/// Suggestions returned by [`LocalProvider`] at most.
pub const MAX_LOCAL_SUGGESTIONS: usize = 5;

/// What the service is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub user_input: String,
    /// Past commands, most recent last.
    pub command_history: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    #[error("suggestion service failed: {0}")]
    Service(String),

    #[error("malformed suggestion reply: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError>;
}

/// Ask `provider` for suggestions. Failures are logged and yield no suggestions.
pub async fn get_command_suggestions(
    provider: &dyn SuggestionProvider,
    request: &SuggestionRequest,
) -> Vec<String> {
    match provider.suggest(request).await {
        Ok(response) => response.suggestions,
        Err(e) => {
            error!("Error getting command suggestions: {}", e);
            Vec::new()
        }
    }
}

/// Render the prompt sent to a text-completion model.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let mut prompt = String::from(
        "You are a helpful terminal assistant. Your task is to suggest shell commands \
         to the user based on their current input and past command history.\n\n",
    );
    prompt.push_str("Here's the user's current input:\n");
    prompt.push_str(&request.user_input);
    prompt.push_str("\n\nHere's the user's command history:\n");
    for command in &request.command_history {
        prompt.push_str(&format!("- {}\n", command));
    }
    prompt.push_str(
        "\nSuggest a list of commands that the user might want to execute next. \
         Be concise and only suggest relevant commands.\n\n\
         Your response should be a JSON array of strings.",
    );
    prompt
}

/// Parse a model reply: a JSON array of strings or `{"suggestions": [...]}`,
/// optionally inside a fenced code block.
pub fn parse_suggestions(raw: &str) -> Result<Vec<String>, SuggestError> {
    let body = strip_code_fence(raw.trim());

    if let Ok(list) = serde_json::from_str::<Vec<String>>(body) {
        return Ok(list);
    }
    serde_json::from_str::<SuggestionResponse>(body)
        .map(|response| response.suggestions)
        .map_err(|e| SuggestError::Malformed(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = rest.find('\n').map_or("", |i| &rest[i + 1..]);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Callback performing one text completion: prompt in, raw reply out.
pub type CompleteFn = Arc<dyn Fn(String)
    -> Pin<Box<dyn Future<Output = Result<String, String>> + Send>> + Send + Sync>;

/// Provider backed by an injected text-completion callback.
pub struct CompletionProvider {
    complete: CompleteFn,
}

impl CompletionProvider {
    pub fn new(complete: CompleteFn) -> Self {
        Self { complete }
    }
}

#[async_trait]
impl SuggestionProvider for CompletionProvider {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError> {
        let prompt = build_prompt(request);
        debug!(input = %request.user_input, "requesting completion");
        let reply = (self.complete)(prompt).await.map_err(SuggestError::Service)?;
        Ok(SuggestionResponse { suggestions: parse_suggestions(&reply)? })
    }
}

/// Offline provider: history entries and command names extending the input.
pub struct LocalProvider {
    commands: Vec<String>,
}

impl LocalProvider {
    pub fn new(commands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { commands: commands.into_iter().map(Into::into).collect() }
    }

    /// Provider over the built-in command names.
    pub fn builtin() -> Self {
        Self::new(crate::interpreter::default_registry().names())
    }
}

#[async_trait]
impl SuggestionProvider for LocalProvider {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError> {
        let input = request.user_input.trim_start();
        let mut seen = HashSet::new();

        let suggestions = request
            .command_history
            .iter()
            .rev()
            .chain(self.commands.iter())
            .filter(|candidate| candidate.starts_with(input) && candidate.as_str() != input)
            .filter(|candidate| seen.insert(*candidate))
            .take(MAX_LOCAL_SUGGESTIONS)
            .cloned()
            .collect();

        Ok(SuggestionResponse { suggestions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(input: &str, history: &[&str]) -> SuggestionRequest {
        SuggestionRequest {
            user_input: input.to_string(),
            command_history: history.iter().map(|s| s.to_string()).collect(),
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SuggestionProvider for FailingProvider {
        async fn suggest(&self, _request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError> {
            Err(SuggestError::Service("offline".to_string()))
        }
    }

    fn canned(reply: Result<&'static str, &'static str>) -> CompleteFn {
        Arc::new(move |_prompt: String| {
            let reply = reply.map(String::from).map_err(String::from);
            Box::pin(async move { reply })
                as Pin<Box<dyn Future<Output = Result<String, String>> + Send>>
        })
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_string(&request("ca", &["ls"])).unwrap();
        assert_eq!(json, r#"{"userInput":"ca","commandHistory":["ls"]}"#);
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt(&request("cat no", &["cd documents", "ls"]));
        assert!(prompt.contains("current input:\ncat no\n"));
        assert!(prompt.contains("- cd documents\n- ls\n"));
        assert!(prompt.ends_with("JSON array of strings."));
    }

    #[test]
    fn test_parse_array() {
        assert_eq!(parse_suggestions(r#"["ls", "pwd"]"#).unwrap(), vec!["ls", "pwd"]);
    }

    #[test]
    fn test_parse_object() {
        assert_eq!(
            parse_suggestions(r#"{"suggestions": ["cat notes.txt"]}"#).unwrap(),
            vec!["cat notes.txt"]
        );
    }

    #[test]
    fn test_parse_fenced() {
        let raw = "```json\n[\"cd ..\"]\n```";
        assert_eq!(parse_suggestions(raw).unwrap(), vec!["cd .."]);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_suggestions("try ls"), Err(SuggestError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_failures_become_empty() {
        let suggestions = get_command_suggestions(&FailingProvider, &request("ls", &[])).await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_completion_provider() {
        let provider = CompletionProvider::new(canned(Ok(r#"["cat plan.md", "cd .."]"#)));
        let suggestions = get_command_suggestions(&provider, &request("ca", &[])).await;
        assert_eq!(suggestions, vec!["cat plan.md", "cd .."]);
    }

    #[tokio::test]
    async fn test_completion_provider_service_error() {
        let provider = CompletionProvider::new(canned(Err("quota exceeded")));
        let err = provider.suggest(&request("ca", &[])).await.unwrap_err();
        assert_eq!(err, SuggestError::Service("quota exceeded".to_string()));
        assert!(get_command_suggestions(&provider, &request("ca", &[])).await.is_empty());
    }

    #[tokio::test]
    async fn test_local_provider_prefers_recent_history() {
        let provider = LocalProvider::builtin();
        let req = request("c", &["cat welcome.txt", "ls", "cd documents"]);
        let suggestions = provider.suggest(&req).await.unwrap().suggestions;
        assert_eq!(
            suggestions,
            vec!["cd documents", "cat welcome.txt", "cat", "cd", "clear"]
        );
    }

    #[tokio::test]
    async fn test_local_provider_dedups_and_skips_exact() {
        let provider = LocalProvider::new(["echo"]);
        let req = request("ec", &["echo", "echo hi", "echo hi"]);
        let suggestions = provider.suggest(&req).await.unwrap().suggestions;
        assert_eq!(suggestions, vec!["echo hi", "echo"]);

        let req = request("echo", &["echo"]);
        assert!(provider.suggest(&req).await.unwrap().suggestions.is_empty());
    }
}
