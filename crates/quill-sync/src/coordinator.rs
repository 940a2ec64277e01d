use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use quill_store::{PostStore, StoreState};

use crate::transport::PostsSource;

/// Terminal state observed by a [`FetchCoordinator::fetch_all_posts`] caller.
///
/// Every caller attached to the same fetch observes the same outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The store already held a clean load; no network access happened.
    Cached,
    /// A fetch completed and the store now holds fresh data.
    Fetched,
    /// A fetch failed; the message is also recorded in the store.
    Failed(String),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Coordinator state, as reported by [`FetchCoordinator::phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    Loaded,
    Failed,
}

const ABANDONED: &str = "fetch task ended before completing";

enum Phase {
    Idle,
    Fetching {
        generation: u64,
        was_loaded: bool,
        done: watch::Receiver<Option<FetchOutcome>>,
    },
    Loaded,
    Failed,
}

/// What a caller does after the guarded entry check.
enum Entry {
    Cached,
    Join {
        generation: u64,
        done: watch::Receiver<Option<FetchOutcome>>,
    },
    Start {
        generation: u64,
        was_loaded: bool,
        done: watch::Receiver<Option<FetchOutcome>>,
        settle: watch::Sender<Option<FetchOutcome>>,
    },
}

struct Inner {
    store: Arc<PostStore>,
    source: Arc<dyn PostsSource>,
    phase: Mutex<Phase>,
    generation: AtomicU64,
    network_calls: AtomicU64,
}

/// Single-flight loader for the full post collection.
///
/// State machine:
///
/// ```text
///   Idle ──start──▶ Fetching ──ok──▶ Loaded
///     ▲                 │             │ (store no longer clean)
///     │                 └──err──▶ Failed ◀─┘
///     └── a fetch starts only from Idle, Failed, or a stale Loaded
/// ```
///
/// Callers arriving while a fetch is in flight attach to its completion
/// channel instead of starting another. The fetch itself runs on a spawned
/// task, so dropping any caller's future never cancels it. There is no
/// retry, backoff, or timeout here.
#[derive(Clone)]
pub struct FetchCoordinator {
    inner: Arc<Inner>,
}

impl FetchCoordinator {
    pub fn new(store: Arc<PostStore>, source: Arc<dyn PostsSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                source,
                phase: Mutex::new(Phase::Idle),
                generation: AtomicU64::new(0),
                network_calls: AtomicU64::new(0),
            }),
        }
    }

    pub fn store(&self) -> &Arc<PostStore> {
        &self.inner.store
    }

    /// Ensure the store is populated.
    ///
    /// Resolves immediately when the store holds a clean load; joins the
    /// in-flight fetch if one exists; otherwise starts exactly one fetch.
    /// Never returns an error: failures are recorded in the store's `error`
    /// and reported as [`FetchOutcome::Failed`].
    ///
    /// Must be called within a tokio runtime.
    pub async fn fetch_all_posts(&self) -> FetchOutcome {
        let (generation, mut done) = match self.enter() {
            Entry::Cached => {
                debug!("posts already loaded");
                return FetchOutcome::Cached;
            }
            Entry::Join { generation, done } => {
                debug!(generation, "joining in-flight fetch");
                (generation, done)
            }
            Entry::Start {
                generation,
                was_loaded,
                done,
                settle,
            } => {
                self.inner.store.update(StoreState::begin_loading);
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    inner.run(generation, was_loaded, settle).await;
                });
                (generation, done)
            }
        };

        let settled = done
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|outcome| (*outcome).clone());
        match settled {
            Some(outcome) => outcome,
            None => {
                self.inner.abandon(generation);
                FetchOutcome::Failed(ABANDONED.into())
            }
        }
    }

    /// Guarded entry action, taken under the phase lock.
    fn enter(&self) -> Entry {
        let mut phase = self.inner.phase.lock().expect("phase lock poisoned");
        if let Phase::Fetching {
            generation, done, ..
        } = &*phase
        {
            return Entry::Join {
                generation: *generation,
                done: done.clone(),
            };
        }

        let state = self.inner.store.snapshot();
        if state.is_ready() {
            *phase = Phase::Loaded;
            return Entry::Cached;
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (settle, done) = watch::channel(None);
        *phase = Phase::Fetching {
            generation,
            was_loaded: state.is_loaded,
            done: done.clone(),
        };
        Entry::Start {
            generation,
            was_loaded: state.is_loaded,
            done,
            settle,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        match &*self.inner.phase.lock().expect("phase lock poisoned") {
            Phase::Idle => FetchPhase::Idle,
            Phase::Fetching { .. } => FetchPhase::Fetching,
            Phase::Loaded => FetchPhase::Loaded,
            Phase::Failed => FetchPhase::Failed,
        }
    }

    /// Number of network retrievals started by this coordinator.
    pub fn network_calls(&self) -> u64 {
        self.inner.network_calls.load(Ordering::SeqCst)
    }
}

impl Inner {
    async fn run(
        &self,
        generation: u64,
        was_loaded: bool,
        settle: watch::Sender<Option<FetchOutcome>>,
    ) {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        info!(generation, "fetching all posts");

        let outcome = match self.source.fetch_all().await {
            Ok(data) => {
                let count = data.posts.len();
                self.store.update(|s| s.finish_loaded(data));
                info!(generation, count, "posts loaded");
                FetchOutcome::Fetched
            }
            Err(err) => {
                let message = err.to_string();
                warn!(generation, error = %message, "fetching posts failed");
                self.store
                    .update(|s| s.finish_failed(message.clone(), was_loaded));
                FetchOutcome::Failed(message)
            }
        };

        self.settle(generation, &outcome);
        settle.send_replace(Some(outcome));
    }

    /// Leave `Fetching` for the terminal phase matching `outcome`, clearing
    /// the in-flight marker.
    fn settle(&self, generation: u64, outcome: &FetchOutcome) {
        let mut phase = self.phase.lock().expect("phase lock poisoned");
        if matches!(&*phase, Phase::Fetching { generation: g, .. } if *g == generation) {
            *phase = match outcome {
                FetchOutcome::Failed(_) => Phase::Failed,
                _ => Phase::Loaded,
            };
        }
    }

    /// The fetch task went away without settling. Record a failure once so
    /// the next caller can start over.
    fn abandon(&self, generation: u64) {
        let was_loaded = {
            let mut phase = self.phase.lock().expect("phase lock poisoned");
            match &*phase {
                Phase::Fetching {
                    generation: g,
                    was_loaded,
                    ..
                } if *g == generation => {
                    let was_loaded = *was_loaded;
                    *phase = Phase::Failed;
                    was_loaded
                }
                _ => return,
            }
        };
        warn!(generation, "fetch task abandoned");
        self.store
            .update(|s| s.finish_failed(ABANDONED, was_loaded));
    }
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("phase", &self.phase())
            .field("network_calls", &self.network_calls())
            .finish()
    }
}
