//! Debounced suggestion fetching
//!
//! Every keystroke may schedule a fetch. A new schedule supersedes the
//! previous one: the pending task is aborted and, should it still finish,
//! its result is dropped because its generation is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::trace;

use super::{get_command_suggestions, SuggestionProvider, SuggestionRequest};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Inputs this short (after trimming) clear the suggestions instead of fetching.
const MIN_INPUT_CHARS: usize = 2;

pub struct SuggestionFetcher {
    provider: Arc<dyn SuggestionProvider>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    latest: Arc<RwLock<Vec<String>>>,
    pending: Option<JoinHandle<()>>,
}

impl SuggestionFetcher {
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        Self {
            provider,
            debounce: DEFAULT_DEBOUNCE,
            generation: Arc::new(AtomicU64::new(0)),
            latest: Arc::new(RwLock::new(Vec::new())),
            pending: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Schedule a fetch for `input`, superseding any earlier one.
    ///
    /// `history` is ordered most recent last. Returns the request's generation.
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, input: &str, history: Vec<String>) -> u64 {
        let generation = self.supersede();

        let provider = Arc::clone(&self.provider);
        let current = Arc::clone(&self.generation);
        let latest = Arc::clone(&self.latest);
        let debounce = self.debounce;
        let request = SuggestionRequest {
            user_input: input.to_string(),
            command_history: history,
        };

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let suggestions = if request.user_input.trim().chars().count() >= MIN_INPUT_CHARS {
                get_command_suggestions(provider.as_ref(), &request).await
            } else {
                Vec::new()
            };

            let mut slot = latest.write().await;
            if current.load(Ordering::SeqCst) == generation {
                *slot = suggestions;
            } else {
                trace!(generation, "discarding stale suggestions");
            }
        }));

        generation
    }

    /// Wait for the pending fetch, if any, to finish.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            // An aborted task is expected here, not a failure.
            let _ = handle.await;
        }
    }

    /// The most recently published suggestions.
    pub async fn latest(&self) -> Vec<String> {
        self.latest.read().await.clone()
    }

    /// Drop any pending fetch and forget the current suggestions.
    pub async fn clear(&mut self) {
        self.supersede();
        self.latest.write().await.clear();
    }

    fn supersede(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Drop for SuggestionFetcher {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::{SuggestError, SuggestionResponse};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Echoes the input back after `delay`, counting calls.
    struct EchoProvider {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl EchoProvider {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self { delay, calls: AtomicUsize::new(0) })
        }
    }

    #[async_trait]
    impl SuggestionProvider for EchoProvider {
        async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, SuggestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(SuggestionResponse { suggestions: vec![format!("{} --suggested", request.user_input)] })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_after_debounce() {
        let provider = EchoProvider::new(Duration::ZERO);
        let mut fetcher = SuggestionFetcher::new(provider.clone());

        fetcher.schedule("ls", vec![]);
        assert!(fetcher.latest().await.is_empty());
        fetcher.settle().await;

        assert_eq!(fetcher.latest().await, vec!["ls --suggested"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_is_debounced() {
        let provider = EchoProvider::new(Duration::ZERO);
        let mut fetcher = SuggestionFetcher::new(provider.clone());

        fetcher.schedule("c", vec![]);
        fetcher.schedule("ca", vec![]);
        fetcher.schedule("cat", vec![]);
        fetcher.settle().await;

        assert_eq!(fetcher.latest().await, vec!["cat --suggested"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_request_is_superseded() {
        let provider = EchoProvider::new(Duration::from_secs(5));
        let mut fetcher = SuggestionFetcher::new(provider.clone());

        fetcher.schedule("pwd", vec![]);
        // Past the debounce: the first request is now in flight.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        fetcher.schedule("echo", vec![]);
        fetcher.settle().await;

        assert_eq!(fetcher.latest().await, vec!["echo --suggested"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_clears() {
        let provider = EchoProvider::new(Duration::ZERO);
        let mut fetcher = SuggestionFetcher::new(provider.clone());

        fetcher.schedule("ls", vec![]);
        fetcher.settle().await;
        assert!(!fetcher.latest().await.is_empty());

        fetcher.schedule(" l ", vec![]);
        fetcher.settle().await;
        assert!(fetcher.latest().await.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending() {
        let provider = EchoProvider::new(Duration::ZERO);
        let mut fetcher = SuggestionFetcher::new(provider.clone());

        fetcher.schedule("help", vec![]);
        fetcher.clear().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(fetcher.latest().await.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generations_increase() {
        let mut fetcher = SuggestionFetcher::new(EchoProvider::new(Duration::ZERO))
            .with_debounce(Duration::from_millis(10));
        let first = fetcher.schedule("ls", vec![]);
        let second = fetcher.schedule("ls -", vec![]);
        assert!(second > first);
        fetcher.settle().await;
        assert_eq!(fetcher.latest().await, vec!["ls - --suggested"]);
    }
}
