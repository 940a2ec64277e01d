use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;
use tracing::debug;

use quill_types::Post;

use crate::state::StoreState;

type Observer = Box<dyn Fn(&StoreState) + Send + Sync>;

/// Registered observers, in subscription order.
#[derive(Default)]
struct ObserverList {
    next_id: u64,
    entries: Vec<(u64, Observer)>,
}

impl ObserverList {
    fn insert(&mut self, observer: Observer) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn notify(&self, state: &StoreState) {
        for (_, observer) in &self.entries {
            observer(state);
        }
    }
}

/// Handle returned by [`PostStore::subscribe`].
///
/// Detaches its observer on [`Subscription::unsubscribe`] or when dropped.
/// Detaching is permanent.
#[must_use = "dropping a Subscription detaches its observer"]
pub struct Subscription {
    id: u64,
    observers: Weak<Mutex<ObserverList>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observers) = self.observers.upgrade() {
            let removed = observers
                .lock()
                .expect("observer lock poisoned")
                .remove(self.id);
            if removed {
                debug!(id = self.id, "observer detached");
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// The shared post store.
///
/// State lives in a `watch` channel so async consumers can await changes via
/// [`PostStore::watch`]; callback observers registered with
/// [`PostStore::subscribe`] are notified synchronously on every update. The
/// observer lock is held across each read-transform-replace-notify cycle,
/// which serializes writers and keeps notifications in call order.
pub struct PostStore {
    state: watch::Sender<StoreState>,
    observers: Arc<Mutex<ObserverList>>,
}

impl PostStore {
    /// Create a store in the initial, not-yet-loaded state.
    pub fn new() -> Self {
        Self::with_state(StoreState::default())
    }

    /// Create a store seeded with `state`.
    pub fn with_state(state: StoreState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            state: sender,
            observers: Arc::new(Mutex::new(ObserverList::default())),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Atomically replace the state with `transform(current)` and notify
    /// every observer with the result.
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(&StoreState) -> StoreState,
    {
        let observers = self.observers.lock().expect("observer lock poisoned");
        let next = {
            let current = self.state.borrow();
            transform(&current)
        };
        self.state.send_replace(next.clone());
        debug!(
            is_loaded = next.is_loaded,
            is_loading = next.is_loading,
            error = next.error.as_deref(),
            posts = next.data.posts.len(),
            "store updated"
        );
        observers.notify(&next);
    }

    /// Register `observer`. It is invoked immediately with the current state
    /// and again after every later update until the returned handle is
    /// dropped or unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&StoreState) + Send + Sync + 'static,
    {
        let mut observers = self.observers.lock().expect("observer lock poisoned");
        let current = self.snapshot();
        observer(&current);
        let id = observers.insert(Box::new(observer));
        Subscription {
            id,
            observers: Arc::downgrade(&self.observers),
        }
    }

    /// A change-notification channel. The receiver starts at the current
    /// state; `changed()` resolves on each later update.
    pub fn watch(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Look up a post in the cached collection.
    ///
    /// Returns `None` both when no post has this slug and when nothing has
    /// been loaded yet. Check [`StoreState::is_loaded`] to tell them apart.
    pub fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        self.state.borrow().data.find(slug).cloned()
    }

    /// Number of attached callback observers.
    pub fn subscriber_count(&self) -> usize {
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .entries
            .len()
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PostStore")
            .field("is_loaded", &state.is_loaded)
            .field("is_loading", &state.is_loading)
            .field("error", &state.error)
            .field("post_count", &state.data.posts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_types::PostsData;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn post(id: i64, slug: &str) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            slug: slug.into(),
            excerpt: String::new(),
            content: String::new(),
            featured_image: String::new(),
            published_date: "2024-03-01 14:30:00".into(),
            updated_date: None,
            tags: vec!["rust".into()],
        }
    }

    fn loaded_store(slugs: &[&str]) -> PostStore {
        let posts = slugs
            .iter()
            .enumerate()
            .map(|(i, s)| post(i as i64 + 1, s))
            .collect();
        let state = StoreState::default().finish_loaded(PostsData {
            posts,
            ..Default::default()
        });
        PostStore::with_state(state)
    }

    #[test]
    fn subscriber_gets_current_state_immediately() {
        let store = loaded_store(&["a", "b"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |s| sink.lock().unwrap().push(s.posts().len()));
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn subscriber_sees_every_transition_in_order() {
        let store = PostStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |s| sink.lock().unwrap().push((s.is_loading, s.is_loaded)));

        store.update(StoreState::begin_loading);
        store.update(|s| s.finish_loaded(PostsData::default()));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(false, false), (true, false), (false, true)]
        );
    }

    #[test]
    fn unsubscribe_detaches_permanently() {
        let store = PostStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(store.subscriber_count(), 1);
        sub.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        store.update(StoreState::begin_loading);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let store = PostStore::new();
        {
            let _sub = store.subscribe(|_| {});
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = PostStore::new();
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
    }

    #[test]
    fn get_post_by_slug_found() {
        let store = loaded_store(&["hello-world", "second"]);
        let found = store.get_post_by_slug("hello-world").unwrap();
        assert_eq!(found.slug, "hello-world");
        assert_eq!(found.id, 1);
    }

    #[test]
    fn get_post_by_slug_missing_when_loaded() {
        let store = loaded_store(&["hello-world"]);
        assert!(store.get_post_by_slug("goodbye").is_none());
    }

    #[test]
    fn get_post_by_slug_missing_when_not_loaded() {
        let store = PostStore::new();
        assert!(store.get_post_by_slug("hello-world").is_none());
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = Arc::new(PostStore::new());
        let mut handles = Vec::new();
        for t in 0..8i64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..50i64 {
                    store.update(|s| {
                        let mut data = (*s.data).clone();
                        data.posts.push(post(t * 100 + i, &format!("p-{t}-{i}")));
                        StoreState {
                            data: Arc::new(data),
                            ..s.clone()
                        }
                    });
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.snapshot().posts().len(), 400);
    }

    #[test]
    fn observers_see_monotonic_counts_under_contention() {
        let store = Arc::new(PostStore::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |s| sink.lock().unwrap().push(s.posts().len()));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        store.update(|s| {
                            let mut data = (*s.data).clone();
                            data.posts.push(post(t * 100 + i, "x"));
                            StoreState {
                                data: Arc::new(data),
                                ..s.clone()
                            }
                        });
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 101);
        assert!(seen.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[tokio::test]
    async fn watch_receiver_observes_updates() {
        let store = PostStore::new();
        let mut rx = store.watch();
        assert!(!rx.borrow().is_loaded);

        store.update(|s| s.finish_loaded(PostsData::default()));
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_loaded);
    }

    #[test]
    fn debug_output_summarizes() {
        let store = loaded_store(&["a"]);
        let dbg = format!("{store:?}");
        assert!(dbg.contains("post_count: 1"));
    }
}
