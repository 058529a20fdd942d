//! Application state: wires the session, the swipe surface and the
//! collaborators together and routes input to them.
//!
//! All time-dependent methods take `now` so the run loop and the tests share
//! one clock source.

use crate::async_preview::PreviewManager;
use crate::cli::AppConfig;
use crate::config::UserConfig;
use crate::domain::{
    DiscoveryOptions, GestureEnd, PhotoRef, SessionController, SessionState, SwipeConfig,
    SwipeDirection, SwipePhase, SwipeSurface,
};
use crate::error::{PswpError, Result};
use crate::feedback::{HapticKind, Haptics, NoticeBoard, NoticeIcon};
use crate::file_opener::open_photo;
use crate::library::{DemoLibrary, PhotoLibrary};
use crate::loader::PhotoLoader;
use crate::tui::input::{KeyAction, PointerAction};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Frame interval while something on screen is moving
pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Idle poll interval
pub const IDLE_FRAME: Duration = Duration::from_millis(100);

/// Overlay state on top of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Browsing,
    Help,
    Welcome,
}

/// Which full screen is shown, derived from the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Review,
    Completed,
}

/// Where a photo batch comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Device,
    Demo,
}

/// Clickable regions registered by the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Card,
    KeepButton,
    DeleteButton,
    LoadPhotosButton,
    LoadDemoButton,
    ReviewAgainButton,
    LoadNewButton,
}

pub struct App {
    session: SessionController,
    surface: SwipeSurface,
    swipe_config: SwipeConfig,
    notices: NoticeBoard,
    haptics: Box<dyn Haptics>,
    loader: PhotoLoader,
    loading_source: Option<LoadSource>,
    previews: PreviewManager,
    device_library: Arc<dyn PhotoLibrary>,
    discovery: DiscoveryOptions,
    user_config: UserConfig,
    view: ViewState,
    hit_targets: Vec<(Rect, HitTarget)>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        handle: Handle,
        device_library: Arc<dyn PhotoLibrary>,
        haptics: Box<dyn Haptics>,
        user_config: UserConfig,
    ) -> Self {
        let view = if config.show_welcome || !user_config.welcome_shown {
            ViewState::Welcome
        } else {
            ViewState::Browsing
        };
        let swipe_config = config.swipe_config();

        Self {
            session: SessionController::new(),
            surface: SwipeSurface::new(swipe_config.clone()),
            swipe_config,
            notices: NoticeBoard::default(),
            haptics,
            previews: PreviewManager::new(&handle),
            loader: PhotoLoader::new(handle),
            loading_source: None,
            device_library,
            discovery: config.discovery_options(),
            user_config,
            view,
            hit_targets: Vec::new(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn surface(&self) -> &SwipeSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut SwipeSurface {
        &mut self.surface
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn previews_mut(&mut self) -> &mut PreviewManager {
        &mut self.previews
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn device_label(&self) -> String {
        self.device_library.label()
    }

    pub fn screen(&self) -> Screen {
        match self.session.state() {
            SessionState::Empty => Screen::Start,
            SessionState::Active => Screen::Review,
            SessionState::Completed => Screen::Completed,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn loading_source(&self) -> Option<LoadSource> {
        self.loading_source
    }

    /// Progress of the outstanding load as a 0..=1 ratio and a label
    pub fn load_progress(&self) -> Option<(f64, String)> {
        self.loader
            .progress()
            .map(|p| (p.ratio(), format!("{}/{}", p.loaded, p.total)))
    }

    /// Starts fetching a photo batch. Ignored while another load is running.
    pub fn start_load(&mut self, source: LoadSource) -> Result<()> {
        let library: Arc<dyn PhotoLibrary> = match source {
            LoadSource::Device => Arc::clone(&self.device_library),
            LoadSource::Demo => Arc::new(DemoLibrary),
        };
        self.loader.start(library, self.discovery.clone())?;
        info!(?source, "photo load started");
        self.loading_source = Some(source);
        Ok(())
    }

    /// Applies the result of a finished load. Failures leave the queue untouched.
    pub fn finish_load(&mut self, result: Result<Vec<PhotoRef>>, now: Instant) {
        let source = self.loading_source.take();

        match result {
            Ok(photos) => {
                let count = photos.len();
                self.previews.reset();
                self.surface = SwipeSurface::new(self.swipe_config.clone());
                self.session.load(photos);

                let message = match source {
                    Some(LoadSource::Demo) => format!("Loaded {} demo photos", count),
                    _ => format!("Loaded {} photos from your device!", count),
                };
                self.notices.show(message, NoticeIcon::Success, now);
                self.haptics.notify(HapticKind::Success);
            }
            Err(err) => {
                warn!(error = %err, ?source, "photo load failed");
                let message = match &err {
                    PswpError::PermissionDenied(_) => {
                        "Could not access photos. Please allow photo permissions.".to_string()
                    }
                    PswpError::NoPhotos(dir) => {
                        format!("No photos found in {}", dir.display())
                    }
                    other => format!("Could not load photos: {}", other),
                };
                self.notices.show(message, NoticeIcon::Error, now);
            }
        }
    }

    /// Advances timers and collects background results. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        if let Some(result) = self.loader.poll() {
            self.finish_load(result, now);
        }

        if let Some(direction) = self.surface.tick(now) {
            self.apply_outcome(direction, now);
        }

        self.notices.expire(now);
    }

    /// How long the run loop may sleep before the next frame is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = IDLE_FRAME;
        if self.surface.is_animating() || self.is_loading() {
            timeout = ANIMATION_FRAME;
        }
        if let Some(deadline) = self.surface.next_deadline(now) {
            timeout = timeout.min(deadline);
        }
        if let Some(deadline) = self.notices.next_deadline(now) {
            timeout = timeout.min(deadline);
        }
        timeout
    }

    fn apply_outcome(&mut self, direction: SwipeDirection, now: Instant) {
        let Some(report) = self.session.handle_outcome(direction) else {
            return;
        };

        match report.direction {
            SwipeDirection::Right => {
                self.haptics.notify(HapticKind::Medium);
                self.notices.show("Photo saved!", NoticeIcon::Success, now);
            }
            SwipeDirection::Left => {
                self.haptics.notify(HapticKind::Heavy);
                self.notices.show("Photo deleted", NoticeIcon::Delete, now);
            }
        }

        if report.completed {
            self.haptics.notify(HapticKind::Success);
            self.notices
                .show("All photos reviewed!", NoticeIcon::Success, now);
        }
    }

    /// Commits the card from a key press or button
    fn commit(&mut self, direction: SwipeDirection, now: Instant) {
        if self.screen() != Screen::Review {
            return;
        }
        if !self.surface.trigger(direction, now) {
            debug!(?direction, "commit ignored, card already leaving");
        }
    }

    pub fn handle_key(&mut self, action: KeyAction, now: Instant) {
        match self.view {
            ViewState::Welcome => {
                self.dismiss_welcome();
                if action == KeyAction::Quit {
                    self.should_quit = true;
                }
                return;
            }
            ViewState::Help => {
                match action {
                    KeyAction::Quit => self.should_quit = true,
                    _ => self.view = ViewState::Browsing,
                }
                return;
            }
            ViewState::Browsing => {}
        }

        match action {
            KeyAction::Quit | KeyAction::Back => self.should_quit = true,
            KeyAction::Help => {
                // An overlay must not leave a card hanging or let it commit behind it
                self.surface.cancel_drag(now);
                self.view = ViewState::Help;
            }
            KeyAction::Keep => self.commit(SwipeDirection::Right, now),
            KeyAction::Delete => self.commit(SwipeDirection::Left, now),
            KeyAction::LoadPhotos => self.request_load(LoadSource::Device),
            KeyAction::LoadDemo => self.request_load(LoadSource::Demo),
            KeyAction::ReviewAgain => self.review_again(),
            KeyAction::LoadNew => self.load_new(),
            KeyAction::Open => self.open_current(now),
            KeyAction::None => {}
        }
    }

    fn request_load(&mut self, source: LoadSource) {
        if self.screen() != Screen::Start {
            return;
        }
        if let Err(e) = self.start_load(source) {
            debug!(error = %e, "load trigger ignored");
        }
    }

    fn review_again(&mut self) {
        if self.screen() != Screen::Completed {
            return;
        }
        self.surface = SwipeSurface::new(self.swipe_config.clone());
        self.previews.reset();
        self.session.restart();
    }

    fn load_new(&mut self) {
        if self.screen() != Screen::Completed {
            return;
        }
        self.surface = SwipeSurface::new(self.swipe_config.clone());
        self.previews.reset();
        self.session.reset();
    }

    fn open_current(&mut self, now: Instant) {
        if self.screen() != Screen::Review {
            return;
        }
        let Some(photo) = self.session.current_photo() else {
            return;
        };
        if let Err(e) = open_photo(photo) {
            warn!(error = %e, "could not open photo");
            self.notices.show(e.to_string(), NoticeIcon::Error, now);
        }
    }

    fn dismiss_welcome(&mut self) {
        self.view = ViewState::Browsing;
        if self.user_config.welcome_shown {
            return;
        }
        self.user_config.welcome_shown = true;
        if let Err(e) = self.user_config.save() {
            warn!(error = %e, "failed to save user config");
        }
    }

    /// Forgets last frame's clickable regions
    pub fn clear_hit_targets(&mut self) {
        self.hit_targets.clear();
    }

    pub fn register_hit_target(&mut self, area: Rect, target: HitTarget) {
        self.hit_targets.push((area, target));
    }

    /// Topmost target under a cell
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.hit_targets
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    pub fn handle_pointer(&mut self, action: PointerAction, now: Instant) {
        match action {
            PointerAction::Press { column, row } => {
                if self.view != ViewState::Browsing {
                    self.handle_key(KeyAction::Back, now);
                    return;
                }
                match self.hit_test(column, row) {
                    Some(HitTarget::Card) if self.screen() == Screen::Review => {
                        self.surface.pointer_down(column as f32, row as f32, now);
                    }
                    Some(HitTarget::KeepButton) => self.commit(SwipeDirection::Right, now),
                    Some(HitTarget::DeleteButton) => self.commit(SwipeDirection::Left, now),
                    Some(HitTarget::LoadPhotosButton) => self.request_load(LoadSource::Device),
                    Some(HitTarget::LoadDemoButton) => self.request_load(LoadSource::Demo),
                    Some(HitTarget::ReviewAgainButton) => self.review_again(),
                    Some(HitTarget::LoadNewButton) => self.load_new(),
                    _ => {}
                }
            }
            PointerAction::Drag { column, row } => {
                if self.view != ViewState::Browsing {
                    return;
                }
                if self.surface.pointer_move(column as f32, row as f32) {
                    self.haptics.notify(HapticKind::Light);
                }
            }
            PointerAction::Release { .. } => {
                if self.surface.phase() != SwipePhase::Dragging {
                    return;
                }
                if self.view != ViewState::Browsing {
                    self.surface.cancel_drag(now);
                    return;
                }
                match self.surface.pointer_up(now) {
                    GestureEnd::Committed(direction) => {
                        debug!(?direction, "drag committed");
                    }
                    GestureEnd::Cancelled | GestureEnd::Ignored => {}
                }
            }
            PointerAction::None => {}
        }
    }
}
