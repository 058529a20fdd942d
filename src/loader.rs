// Background photo loading with progress reporting
//
// Exactly one load may be outstanding. The UI polls `poll()` every frame and
// reads `progress()` to draw the gauge, so the event loop never blocks on the
// library.

use crate::domain::{DiscoveryOptions, LoadProgress, PhotoRef};
use crate::error::{PswpError, Result};
use crate::library::PhotoLibrary;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

/// State of a load that has been handed to the runtime
struct PendingLoad {
    label: String,
    progress_rx: watch::Receiver<LoadProgress>,
    result_rx: oneshot::Receiver<Result<Vec<PhotoRef>>>,
}

/// Runs photo library requests off the UI thread
pub struct PhotoLoader {
    handle: Handle,
    pending: Option<PendingLoad>,
}

impl PhotoLoader {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            pending: None,
        }
    }

    /// Starts fetching from `library`.
    ///
    /// Fails with [`PswpError::LoadBusy`] while another load is outstanding.
    pub fn start(
        &mut self,
        library: Arc<dyn PhotoLibrary>,
        options: DiscoveryOptions,
    ) -> Result<()> {
        if self.pending.is_some() {
            warn!("load requested while another is in flight");
            return Err(PswpError::LoadBusy);
        }

        let label = library.label();
        debug!(source = %label, "starting photo load");

        let (progress_tx, progress_rx) = watch::channel(LoadProgress::default());
        let (result_tx, result_rx) = oneshot::channel();

        self.handle.spawn_blocking(move || {
            let result = library.request_photos(&options, &|progress| {
                let _ = progress_tx.send(progress);
            });
            let _ = result_tx.send(result);
        });

        self.pending = Some(PendingLoad {
            label,
            progress_rx,
            result_rx,
        });
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Latest progress reported by the outstanding load
    pub fn progress(&self) -> Option<LoadProgress> {
        self.pending.as_ref().map(|p| *p.progress_rx.borrow())
    }

    /// Returns the result once the outstanding load has finished (non-blocking)
    pub fn poll(&mut self) -> Option<Result<Vec<PhotoRef>>> {
        let pending = self.pending.as_mut()?;

        match pending.result_rx.try_recv() {
            Ok(result) => {
                debug!(source = %pending.label, ok = result.is_ok(), "photo load finished");
                self.pending = None;
                Some(result)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!(source = %pending.label, "photo load dropped its result");
                self.pending = None;
                Some(Err(PswpError::Unavailable(
                    "photo load ended without a result".to_string(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::DemoLibrary;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Library that blocks until the test releases it
    struct GatedLibrary {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl PhotoLibrary for GatedLibrary {
        fn label(&self) -> String {
            "gated".to_string()
        }

        fn request_photos(
            &self,
            _options: &DiscoveryOptions,
            on_progress: &dyn Fn(LoadProgress),
        ) -> Result<Vec<PhotoRef>> {
            on_progress(LoadProgress {
                loaded: 1,
                total: 2,
            });
            let _ = self.gate.lock().unwrap().recv();
            Ok(vec![PhotoRef::demo(0, "gated")])
        }
    }

    struct DeniedLibrary;

    impl PhotoLibrary for DeniedLibrary {
        fn label(&self) -> String {
            "denied".to_string()
        }

        fn request_photos(
            &self,
            _options: &DiscoveryOptions,
            _on_progress: &dyn Fn(LoadProgress),
        ) -> Result<Vec<PhotoRef>> {
            Err(PswpError::PermissionDenied("photos".to_string()))
        }
    }

    fn wait_for(loader: &mut PhotoLoader) -> Result<Vec<PhotoRef>> {
        for _ in 0..100 {
            if let Some(result) = loader.poll() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("load did not finish in time");
    }

    #[test]
    fn test_loader_delivers_photos() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut loader = PhotoLoader::new(runtime.handle().clone());

        assert!(!loader.is_loading());
        loader
            .start(Arc::new(DemoLibrary), DiscoveryOptions::default())
            .unwrap();
        assert!(loader.is_loading());

        let photos = wait_for(&mut loader).unwrap();
        assert_eq!(photos.len(), 8);
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_loader_rejects_second_load_and_reports_progress() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut loader = PhotoLoader::new(runtime.handle().clone());

        let (release, gate) = mpsc::channel();
        let library = Arc::new(GatedLibrary {
            gate: Mutex::new(gate),
        });
        loader
            .start(library, DiscoveryOptions::default())
            .unwrap();

        let second = loader.start(Arc::new(DemoLibrary), DiscoveryOptions::default());
        assert!(matches!(second, Err(PswpError::LoadBusy)));

        let mut saw_progress = false;
        for _ in 0..100 {
            if loader.progress() == Some(LoadProgress { loaded: 1, total: 2 }) {
                saw_progress = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(saw_progress, "progress should be visible while loading");
        assert!(loader.poll().is_none());

        release.send(()).unwrap();
        let photos = wait_for(&mut loader).unwrap();
        assert_eq!(photos.len(), 1);
        assert!(loader.progress().is_none());
    }

    #[test]
    fn test_loader_surfaces_library_errors() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut loader = PhotoLoader::new(runtime.handle().clone());

        loader
            .start(Arc::new(DeniedLibrary), DiscoveryOptions::default())
            .unwrap();

        let result = wait_for(&mut loader);
        assert!(matches!(result, Err(PswpError::PermissionDenied(_))));
        assert!(!loader.is_loading());
    }
}
