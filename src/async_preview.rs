// Background preview rendering with an LRU cache keyed by photo and card size

use crate::domain::{Locator, PhotoRef};
use crate::preview::{generate_photo_preview, PhotoPreview};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, warn};

/// Maximum number of cached previews
const CACHE_SIZE: usize = 12;
/// Capacity of the worker's request queue
const REQUEST_QUEUE: usize = 32;

/// Represents a preview loading state
#[derive(Debug, Clone)]
pub enum PreviewState {
    /// Preview is loading
    Loading,
    /// Preview is ready to draw
    Ready(PhotoPreview),
    /// Preview failed with error
    Error(String),
}

/// A rendered preview only fits the card size it was rendered for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub locator: Locator,
    pub cols: u16,
    pub rows: u16,
}

impl PreviewKey {
    pub fn new(photo: &PhotoRef, cols: u16, rows: u16) -> Self {
        Self {
            locator: photo.locator.clone(),
            cols,
            rows,
        }
    }
}

/// Message types for the preview worker
enum PreviewRequest {
    Render {
        photo: PhotoRef,
        key: PreviewKey,
        response_tx: Option<oneshot::Sender<PreviewState>>,
    },
    Shutdown,
}

/// LRU-like cache for previews, plus the keys the worker still has queued
#[derive(Debug)]
struct PreviewCache {
    cache: HashMap<PreviewKey, PhotoPreview>,
    /// Most recent at end
    access_order: Vec<PreviewKey>,
    max_size: usize,
    /// At most one queued render per key
    pending: HashSet<PreviewKey>,
}

impl PreviewCache {
    fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            access_order: Vec::new(),
            max_size,
            pending: HashSet::new(),
        }
    }

    fn get(&mut self, key: &PreviewKey) -> Option<PhotoPreview> {
        let preview = self.cache.get(key)?.clone();
        self.access_order.retain(|k| k != key);
        self.access_order.push(key.clone());
        Some(preview)
    }

    fn insert(&mut self, key: PreviewKey, preview: PhotoPreview) {
        if self.cache.contains_key(&key) {
            self.access_order.retain(|k| k != &key);
        } else if self.cache.len() >= self.max_size && !self.access_order.is_empty() {
            let oldest = self.access_order.remove(0);
            self.cache.remove(&oldest);
        }

        self.cache.insert(key.clone(), preview);
        self.access_order.push(key);
    }

    fn contains(&self, key: &PreviewKey) -> bool {
        self.cache.contains_key(key)
    }

    fn is_pending(&self, key: &PreviewKey) -> bool {
        self.pending.contains(key)
    }
}

/// Handle for sending requests to the preview worker
#[derive(Clone)]
struct PreviewWorker {
    request_tx: mpsc::Sender<PreviewRequest>,
    cache: Arc<Mutex<PreviewCache>>,
}

impl PreviewWorker {
    fn spawn(handle: &Handle) -> Self {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_QUEUE);
        let cache = Arc::new(Mutex::new(PreviewCache::new(CACHE_SIZE)));

        let worker_cache = Arc::clone(&cache);
        let worker_handle = handle.clone();
        handle.spawn(async move {
            Self::run(request_rx, worker_cache, worker_handle).await;
        });

        Self { request_tx, cache }
    }

    /// Queues a render and marks its key pending. The caller holds the cache
    /// lock so the pending set and the queue stay in step.
    fn enqueue(
        &self,
        cache: &mut PreviewCache,
        photo: &PhotoRef,
        key: PreviewKey,
        response_tx: Option<oneshot::Sender<PreviewState>>,
    ) -> bool {
        let request = PreviewRequest::Render {
            photo: photo.clone(),
            key: key.clone(),
            response_tx,
        };
        match self.request_tx.try_send(request) {
            Ok(()) => {
                cache.pending.insert(key);
                true
            }
            Err(e) => {
                debug!(error = %e, "preview queue full");
                false
            }
        }
    }

    async fn run(
        mut request_rx: mpsc::Receiver<PreviewRequest>,
        cache: Arc<Mutex<PreviewCache>>,
        handle: Handle,
    ) {
        while let Some(request) = request_rx.recv().await {
            let (photo, key, response_tx) = match request {
                PreviewRequest::Render {
                    photo,
                    key,
                    response_tx,
                } => (photo, key, response_tx),
                PreviewRequest::Shutdown => break,
            };

            // A prefetch may already have rendered this one
            let cached = {
                let mut cache = cache.lock().await;
                let cached = cache.get(&key);
                if cached.is_some() {
                    cache.pending.remove(&key);
                }
                cached
            };
            if let Some(preview) = cached {
                if let Some(tx) = response_tx {
                    let _ = tx.send(PreviewState::Ready(preview));
                }
                continue;
            }

            let (cols, rows) = (key.cols, key.rows);
            let result = handle
                .spawn_blocking(move || generate_photo_preview(&photo, cols, rows))
                .await;

            let state = {
                let mut cache = cache.lock().await;
                cache.pending.remove(&key);
                match result {
                    Ok(Ok(preview)) => {
                        cache.insert(key.clone(), preview.clone());
                        PreviewState::Ready(preview)
                    }
                    Ok(Err(e)) => {
                        warn!(photo = %key.locator, error = %e, "preview failed");
                        PreviewState::Error(e.to_string())
                    }
                    Err(e) => PreviewState::Error(format!("Task panicked: {}", e)),
                }
            };

            if let Some(tx) = response_tx {
                let _ = tx.send(state);
            }
        }
        debug!("preview worker stopped");
    }
}

/// Polling front end for the preview worker, driven by the synchronous UI loop
pub struct PreviewManager {
    worker: PreviewWorker,
    current_state: PreviewState,
    current_key: Option<PreviewKey>,
    receiver: Option<oneshot::Receiver<PreviewState>>,
}

impl PreviewManager {
    /// Spawns the worker on `handle`. Must not be called from inside the runtime's own threads.
    pub fn new(handle: &Handle) -> Self {
        Self {
            worker: PreviewWorker::spawn(handle),
            current_state: PreviewState::Loading,
            current_key: None,
            receiver: None,
        }
    }

    /// Request a preview for the card on screen, returns current state (non-blocking).
    ///
    /// While the state is `Loading` every call checks the cache again and
    /// resends the request if the queue had no room last time.
    pub fn request_preview(&mut self, photo: &PhotoRef, cols: u16, rows: u16) -> &PreviewState {
        let key = PreviewKey::new(photo, cols, rows);

        if self.current_key.as_ref() != Some(&key) {
            self.current_key = Some(key.clone());
            self.current_state = PreviewState::Loading;
            self.receiver = None;
        }

        if let Some(rx) = self.receiver.as_mut() {
            match rx.try_recv() {
                Ok(state) => {
                    self.current_state = state;
                    self.receiver = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.current_state = PreviewState::Error("Preview channel closed".to_string());
                    self.receiver = None;
                }
            }
        }

        if matches!(self.current_state, PreviewState::Loading) && self.receiver.is_none() {
            let mut cache = self.worker.cache.blocking_lock();
            if let Some(cached) = cache.get(&key) {
                self.current_state = PreviewState::Ready(cached);
            } else if !cache.is_pending(&key) {
                let (tx, rx) = oneshot::channel();
                if self.worker.enqueue(&mut cache, photo, key, Some(tx)) {
                    self.receiver = Some(rx);
                }
            }
        }

        &self.current_state
    }

    /// Renders `photo` into the cache ahead of time so the next card appears instantly
    pub fn prefetch(&self, photo: &PhotoRef, cols: u16, rows: u16) {
        let key = PreviewKey::new(photo, cols, rows);
        let mut cache = self.worker.cache.blocking_lock();
        if cache.contains(&key) || cache.is_pending(&key) {
            return;
        }
        self.worker.enqueue(&mut cache, photo, key, None);
    }

    /// Forget the current request, e.g. when a new batch is loaded
    pub fn reset(&mut self) {
        self.current_key = None;
        self.current_state = PreviewState::Loading;
        self.receiver = None;
    }

    pub fn shutdown(&self) {
        let _ = self.worker.request_tx.try_send(PreviewRequest::Shutdown);
    }
}
