//! Middleware pipeline.
//!
//! Middleware are asynchronous predicates evaluated strictly in registration
//! order before a candidate's authorization check and handler. The first
//! predicate to return `Ok(false)` aborts the candidate; a predicate that
//! *fails* propagates as a fatal engine error and is never converted into a
//! normal rejection.
//!
//! Each middleware owns its private state behind the trait — the fixed-window
//! rate limiter in [`Throttle`] keeps its counters that way rather than in a
//! captured closure environment.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::trace;

use herald_core::{BoxedClient, InboundMessage};

use crate::error::BoxError;
use crate::registry::RegisteredCommand;

/// What a middleware predicate sees: the message, the matched command, and
/// the transport client handle.
///
/// Cheap to clone; everything inside is shared.
#[derive(Clone)]
pub struct MiddlewareContext {
    /// The inbound message being dispatched.
    pub message: Arc<InboundMessage>,
    /// The candidate command the message matched.
    pub command: Arc<RegisteredCommand>,
    /// The transport client handle.
    pub client: BoxedClient,
}

/// An asynchronous dispatch predicate.
///
/// Predicates may produce side effects (send a notice, count an invocation)
/// but must not mutate shared registry state.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Returns `Ok(true)` to let the dispatch continue, `Ok(false)` to reject
    /// it, or an error to abort the whole dispatch fatally.
    async fn allow(&self, ctx: &MiddlewareContext) -> Result<bool, BoxError>;
}

/// Wraps a plain async closure as a [`Middleware`].
///
/// ```rust,ignore
/// engine.middleware(middleware_fn(|ctx| async move {
///     Ok(!ctx.message.content.contains("spam"))
/// }));
/// ```
pub fn middleware_fn<F, Fut>(f: F) -> Arc<dyn Middleware>
where
    F: Fn(MiddlewareContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
{
    type BoxedPredicate =
        Box<dyn Fn(MiddlewareContext) -> BoxFuture<'static, Result<bool, BoxError>> + Send + Sync>;

    struct FnMiddleware(BoxedPredicate);

    #[async_trait]
    impl Middleware for FnMiddleware {
        async fn allow(&self, ctx: &MiddlewareContext) -> Result<bool, BoxError> {
            (self.0)(ctx.clone()).await
        }
    }

    Arc::new(FnMiddleware(Box::new(move |ctx| f(ctx).boxed())))
}

/// The ordered middleware pipeline.
///
/// Entries run in the order they were added; that order is never changed.
#[derive(Default, Clone)]
pub struct Pipeline {
    entries: Vec<Arc<dyn Middleware>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware.
    pub fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.entries.push(middleware);
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no middleware is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every predicate in registration order.
    ///
    /// Returns `Ok(true)` when all predicates allowed the dispatch and
    /// `Ok(false)` as soon as one rejected it — no subsequent predicate runs.
    /// A failing predicate short-circuits with its error.
    pub async fn run(&self, ctx: &MiddlewareContext) -> Result<bool, BoxError> {
        for (index, middleware) in self.entries.iter().enumerate() {
            if !middleware.allow(ctx).await? {
                trace!(index, command = ctx.command.name(), "middleware rejected dispatch");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Fixed-window per-sender rate limiter.
///
/// Allows up to `limit` dispatches per sender within each window; the counter
/// resets when a window elapses. The count is a plain increment-then-compare
/// under a mutex, no fairness across windows is attempted.
pub struct Throttle {
    limit: u32,
    window: Duration,
    counters: Mutex<HashMap<String, WindowState>>,
}

struct WindowState {
    started: Instant,
    count: u32,
}

impl Throttle {
    /// Creates a throttle allowing `limit` dispatches per `window` per sender.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Middleware for Throttle {
    async fn allow(&self, ctx: &MiddlewareContext) -> Result<bool, BoxError> {
        let mut counters = self.counters.lock();
        let state = counters
            .entry(ctx.message.sender.clone())
            .or_insert_with(|| WindowState {
                started: Instant::now(),
                count: 0,
            });

        if state.started.elapsed() >= self.window {
            state.started = Instant::now();
            state.count = 0;
        }
        state.count += 1;

        Ok(state.count <= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use herald_core::{Client, ClientError, ClientResult, Level};
    use serde_json::Value;

    use crate::command::Command;
    use crate::registry::Registry;

    struct NullClient;

    #[async_trait]
    impl Client for NullClient {
        fn id(&self) -> &str {
            "bot"
        }

        async fn send(&self, _channel: &str, _text: &str) -> ClientResult<String> {
            Err(ClientError::NotConnected)
        }

        async fn send_embed(&self, _channel: &str, _embed: Value) -> ClientResult<String> {
            Err(ClientError::NotConnected)
        }

        async fn schedule_delete(
            &self,
            _channel: &str,
            _message_id: &str,
            _delay: Duration,
        ) -> ClientResult<()> {
            Ok(())
        }

        async fn guild_owner(&self, _guild: &str) -> ClientResult<Option<String>> {
            Ok(None)
        }

        async fn member_roles(&self, _guild: &str, _user: &str) -> ClientResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn context(sender: &str) -> MiddlewareContext {
        let mut registry = Registry::new();
        let id = registry
            .register(Command::new(["ping"]).min_level(Level::None).handler(|_| async { Ok(()) }))
            .unwrap();
        let command = registry.resolve("ping", "!ping").unwrap().remove(0);
        assert_eq!(command.id(), id);

        MiddlewareContext {
            message: Arc::new(InboundMessage::new("m1", sender, "chan", "!ping")),
            command,
            client: Arc::new(NullClient),
        }
    }

    #[tokio::test]
    async fn test_pipeline_runs_in_order_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut pipeline = Pipeline::new();

        let c1 = Arc::clone(&calls);
        pipeline.push(middleware_fn(move |_| {
            let c = Arc::clone(&c1);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
        }));
        let c2 = Arc::clone(&calls);
        pipeline.push(middleware_fn(move |_| {
            let c = Arc::clone(&c2);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            }
        }));
        let c3 = Arc::clone(&calls);
        pipeline.push(middleware_fn(move |_| {
            let c = Arc::clone(&c3);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
        }));

        let allowed = pipeline.run(&context("alice")).await.unwrap();
        assert!(!allowed);
        // p1 and p2 ran, p3 never did.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_pipeline_allows() {
        let pipeline = Pipeline::new();
        assert!(pipeline.run(&context("alice")).await.unwrap());
    }

    #[tokio::test]
    async fn test_failing_predicate_propagates_error() {
        let mut pipeline = Pipeline::new();
        pipeline.push(middleware_fn(|_| async {
            Err::<bool, BoxError>("backend exploded".into())
        }));

        assert!(pipeline.run(&context("alice")).await.is_err());
    }

    #[tokio::test]
    async fn test_throttle_counts_per_sender_window() {
        let throttle = Throttle::new(2, Duration::from_secs(60));
        let alice = context("alice");
        let bob = context("bob");

        assert!(throttle.allow(&alice).await.unwrap());
        assert!(throttle.allow(&alice).await.unwrap());
        assert!(!throttle.allow(&alice).await.unwrap());
        // Separate sender, separate window.
        assert!(throttle.allow(&bob).await.unwrap());
    }

    #[tokio::test]
    async fn test_throttle_window_resets() {
        let throttle = Throttle::new(1, Duration::from_millis(10));
        let alice = context("alice");

        assert!(throttle.allow(&alice).await.unwrap());
        assert!(!throttle.allow(&alice).await.unwrap());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(throttle.allow(&alice).await.unwrap());
    }
}
