use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::domain::{Post, PostKind};
use crate::listing::Listing;
use crate::repository::PostRepository;
use crate::service::seed;

/// Kind-scoped invalidation broadcast. Admin mutations publish the kind they
/// touched; each cached listing re-fetches only when its own kind fires.
pub struct InvalidationBus {
    tx: broadcast::Sender<PostKind>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn publish(&self, kind: PostKind) {
        tracing::debug!("Publishing invalidation for {}", kind.as_str());
        // No receivers is fine; the listings may not be warmed up yet.
        let _ = self.tx.send(kind);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PostKind> {
        self.tx.subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the showcase index by one step, wrapping at the showcase length.
fn advance(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

/// Background rotation for one listing's showcase. The task is aborted and
/// respawned whenever the showcase length changes, so it never ticks against
/// a stale modulus, and aborted on drop.
struct Rotation {
    index: Arc<AtomicUsize>,
    len: usize,
    handle: Option<JoinHandle<()>>,
}

impl Rotation {
    fn new() -> Self {
        Self {
            index: Arc::new(AtomicUsize::new(0)),
            len: 0,
            handle: None,
        }
    }

    fn restart(&mut self, len: usize, interval: Duration) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }

        self.len = len;
        self.index.store(0, Ordering::Relaxed);

        if len > 1 {
            let index = Arc::clone(&self.index);
            self.handle = Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.tick().await; // the first tick fires immediately
                loop {
                    ticker.tick().await;
                    let current = index.load(Ordering::Relaxed);
                    index.store(advance(current, len), Ordering::Relaxed);
                }
            }));
        }
    }

    fn current(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }
}

impl Drop for Rotation {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

struct KindState {
    listing: RwLock<Listing>,
    /// Issues one token per refresh attempt.
    generation: AtomicU64,
    /// Token of the refresh currently applied; anything older is stale.
    applied: AtomicU64,
    rotation: Mutex<Rotation>,
}

/// Caches one built [`Listing`] per content kind, refreshing from the posts
/// store and degrading to the bundled seed dataset when the store fails.
pub struct ListingService {
    post_repo: Arc<dyn PostRepository>,
    rotation_interval: Duration,
    states: HashMap<PostKind, KindState>,
}

impl ListingService {
    pub fn new(post_repo: Arc<dyn PostRepository>, rotation_interval: Duration) -> Self {
        let today = Utc::now().date_naive();
        let states = PostKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    KindState {
                        listing: RwLock::new(Listing::build(kind, Vec::new(), today)),
                        generation: AtomicU64::new(0),
                        applied: AtomicU64::new(0),
                        rotation: Mutex::new(Rotation::new()),
                    },
                )
            })
            .collect();

        Self {
            post_repo,
            rotation_interval,
            states,
        }
    }

    fn state(&self, kind: PostKind) -> &KindState {
        // All three kinds are inserted in new(); this cannot miss.
        &self.states[&kind]
    }

    /// One fetch, one fallback, no retries. A degraded listing beats an
    /// error screen.
    async fn fetch_with_fallback(&self, kind: PostKind) -> Vec<Post> {
        match self.post_repo.list_published(kind).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!(
                    "Failed to load {} posts, serving seed dataset: {}",
                    kind.as_str(),
                    e
                );
                seed::fallback_posts(kind)
            }
        }
    }

    /// Re-fetch one kind and swap the listing. Refreshes carry a monotonic
    /// generation token; if a newer refresh finished while this one was in
    /// flight, this result is discarded instead of clobbering it.
    pub async fn refresh(&self, kind: PostKind) {
        let state = self.state(kind);
        let token = state.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let items = self.fetch_with_fallback(kind).await;
        let today = Utc::now().date_naive();

        let mut listing = state.listing.write().await;
        if state.applied.load(Ordering::SeqCst) >= token {
            tracing::debug!("Discarding stale {} refresh", kind.as_str());
            return;
        }

        listing.replace_items(items, today);
        state.applied.store(token, Ordering::SeqCst);

        let showcase_len = listing.showcase().len();
        drop(listing);

        let mut rotation = state.rotation.lock().await;
        if rotation.len != showcase_len {
            rotation.restart(showcase_len, self.rotation_interval);
        }
    }

    pub async fn refresh_all(&self) {
        for kind in PostKind::ALL {
            self.refresh(kind).await;
        }
    }

    /// Run a closure against the cached listing for `kind`, with exclusive
    /// access so filter and page changes are applied consistently.
    pub async fn with_listing<R>(&self, kind: PostKind, f: impl FnOnce(&mut Listing) -> R) -> R {
        let mut listing = self.state(kind).listing.write().await;
        f(&mut listing)
    }

    /// The showcase slot the rotation timer currently points at.
    pub async fn showcase_index(&self, kind: PostKind) -> usize {
        self.state(kind).rotation.lock().await.current()
    }

    /// Listen for kind-scoped invalidations and re-fetch as they arrive.
    pub fn spawn_invalidation_listener(
        self: &Arc<Self>,
        bus: &InvalidationBus,
    ) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let service = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(kind) => service.refresh(kind).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Invalidation listener lagged by {}, refreshing all", skipped);
                        service.refresh_all().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_at_length() {
        assert_eq!(advance(0, 3), 1);
        assert_eq!(advance(1, 3), 2);
        assert_eq!(advance(2, 3), 0);
    }

    #[test]
    fn test_advance_handles_degenerate_lengths() {
        assert_eq!(advance(0, 0), 0);
        assert_eq!(advance(0, 1), 0);
        assert_eq!(advance(5, 1), 0);
    }
}
