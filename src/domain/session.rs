use super::{PhotoRef, SwipeDirection};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

/// Lifecycle of a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No photo set loaded yet
    Empty,
    /// A photo is being presented
    Active,
    /// Every photo in the queue has an outcome
    Completed,
}

/// Keep / delete counters for the current pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub kept: usize,
    pub deleted: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.kept + self.deleted
    }
}

/// What a single outcome did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeReport {
    pub direction: SwipeDirection,
    pub photo: PhotoRef,
    /// Whether the photo entered the deletion candidate set
    pub marked: bool,
    /// Whether this outcome finished the queue
    pub completed: bool,
}

/// Owns the review queue, the cursor, the tallies and the deletion
/// candidates.
///
/// The cursor only moves forward within a pass and always stays in
/// `0..=len`. `restart` and `reset` are the only ways back.
#[derive(Debug, Default)]
pub struct SessionController {
    queue: Vec<PhotoRef>,
    cursor: usize,
    tally: Tally,
    candidates: IndexSet<PhotoRef>,
    started: bool,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with a freshly loaded photo set.
    ///
    /// An empty set is accepted and completes the session immediately.
    pub fn load(&mut self, photos: Vec<PhotoRef>) {
        info!(count = photos.len(), "loading review queue");
        self.queue = photos;
        self.cursor = 0;
        self.tally = Tally::default();
        self.candidates.clear();
        self.started = true;
    }

    /// Applies the resolved outcome for the photo under the cursor.
    ///
    /// Returns `None` when no photo is being presented.
    pub fn handle_outcome(&mut self, direction: SwipeDirection) -> Option<OutcomeReport> {
        if self.state() != SessionState::Active {
            warn!(?direction, state = ?self.state(), "outcome ignored outside an active session");
            return None;
        }

        let photo = self.queue[self.cursor].clone();
        let mut marked = false;

        match direction {
            SwipeDirection::Right => self.tally.kept += 1,
            SwipeDirection::Left => {
                self.tally.deleted += 1;
                if !photo.is_demo() {
                    marked = self.candidates.insert(photo.clone());
                }
            }
        }

        self.cursor += 1;
        let completed = self.cursor >= self.queue.len();

        debug!(
            ?direction,
            cursor = self.cursor,
            kept = self.tally.kept,
            deleted = self.tally.deleted,
            "outcome applied"
        );
        if completed {
            info!(
                kept = self.tally.kept,
                deleted = self.tally.deleted,
                candidates = self.candidates.len(),
                "all photos reviewed"
            );
        }

        Some(OutcomeReport {
            direction,
            photo,
            marked,
            completed,
        })
    }

    /// Starts another pass over the same queue.
    ///
    /// The deletion candidates are cleared with the tallies so they always
    /// describe the current pass.
    pub fn restart(&mut self) {
        if !self.started {
            warn!("restart ignored: no photos loaded");
            return;
        }
        info!(count = self.queue.len(), "restarting review");
        self.cursor = 0;
        self.tally = Tally::default();
        self.candidates.clear();
    }

    /// Drops the queue and returns to the pre-session state
    pub fn reset(&mut self) {
        info!("session reset");
        *self = Self::default();
    }

    pub fn state(&self) -> SessionState {
        if !self.started {
            SessionState::Empty
        } else if self.cursor >= self.queue.len() {
            SessionState::Completed
        } else {
            SessionState::Active
        }
    }

    pub fn current_photo(&self) -> Option<&PhotoRef> {
        self.queue.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn photos(&self) -> &[PhotoRef] {
        &self.queue
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Photos marked for removal in this pass, in the order they were marked
    pub fn candidates(&self) -> impl Iterator<Item = &PhotoRef> {
        self.candidates.iter()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Fraction of the queue that has an outcome
    pub fn progress(&self) -> f64 {
        if self.queue.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.queue.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locator;
    use std::path::PathBuf;

    fn photo(name: &str) -> PhotoRef {
        PhotoRef {
            locator: Locator::Path(PathBuf::from(format!("/photos/{}", name))),
            display_name: Some(name.to_string()),
            size: 1024,
            modified_date: None,
        }
    }

    fn photos(names: &[&str]) -> Vec<PhotoRef> {
        names.iter().map(|n| photo(n)).collect()
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_new_session_is_empty() {
            let session = SessionController::new();
            assert_eq!(session.state(), SessionState::Empty);
            assert_eq!(session.cursor(), 0);
            assert!(session.current_photo().is_none());
            assert_eq!(session.tally(), Tally::default());
        }

        #[test]
        fn test_load_activates() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg", "b.jpg"]));

            assert_eq!(session.state(), SessionState::Active);
            assert_eq!(session.len(), 2);
            assert_eq!(session.current_photo(), Some(&photo("a.jpg")));
        }

        #[test]
        fn test_load_empty_completes_immediately() {
            let mut session = SessionController::new();
            session.load(vec![]);

            assert_eq!(session.state(), SessionState::Completed);
            assert!(session.current_photo().is_none());
            assert!(session.handle_outcome(SwipeDirection::Right).is_none());
        }

        #[test]
        fn test_load_replaces_previous_queue() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg", "b.jpg", "c.jpg"]));
            session.handle_outcome(SwipeDirection::Left);
            session.handle_outcome(SwipeDirection::Right);

            session.load(photos(&["x.jpg"]));

            assert_eq!(session.len(), 1);
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.tally(), Tally::default());
            assert_eq!(session.candidate_count(), 0);
            assert_eq!(session.current_photo(), Some(&photo("x.jpg")));
        }

        #[test]
        fn test_reset_returns_to_empty() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg", "b.jpg"]));
            session.handle_outcome(SwipeDirection::Left);

            session.reset();

            assert_eq!(session.state(), SessionState::Empty);
            assert_eq!(session.len(), 0);
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.tally(), Tally::default());
            assert_eq!(session.candidate_count(), 0);
        }

        #[test]
        fn test_reset_from_completed() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg"]));
            session.handle_outcome(SwipeDirection::Right);
            assert_eq!(session.state(), SessionState::Completed);

            session.reset();
            assert_eq!(session.state(), SessionState::Empty);
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_keep_increments_kept() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg", "b.jpg"]));

            let report = session.handle_outcome(SwipeDirection::Right).unwrap();

            assert_eq!(report.direction, SwipeDirection::Right);
            assert_eq!(report.photo, photo("a.jpg"));
            assert!(!report.marked);
            assert!(!report.completed);
            assert_eq!(session.tally(), Tally { kept: 1, deleted: 0 });
            assert_eq!(session.cursor(), 1);
            assert_eq!(session.candidate_count(), 0);
        }

        #[test]
        fn test_delete_marks_candidate() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg", "b.jpg"]));

            let report = session.handle_outcome(SwipeDirection::Left).unwrap();

            assert!(report.marked);
            assert_eq!(session.tally(), Tally { kept: 0, deleted: 1 });
            assert_eq!(session.candidates().collect::<Vec<_>>(), vec![&photo("a.jpg")]);
        }

        #[test]
        fn test_delete_demo_asset_counts_but_is_not_marked() {
            let mut session = SessionController::new();
            session.load(vec![PhotoRef::demo(0, "Alpine Lake"), photo("b.jpg")]);

            let report = session.handle_outcome(SwipeDirection::Left).unwrap();

            assert!(!report.marked);
            assert_eq!(session.tally().deleted, 1);
            assert_eq!(session.candidate_count(), 0);
            assert_eq!(session.cursor(), 1);
        }

        #[test]
        fn test_scenario_delete_keep_delete() {
            let mut session = SessionController::new();
            session.load(photos(&["A", "B", "C"]));

            session.handle_outcome(SwipeDirection::Left);
            session.handle_outcome(SwipeDirection::Right);
            let last = session.handle_outcome(SwipeDirection::Left).unwrap();

            assert!(last.completed);
            assert_eq!(session.tally(), Tally { kept: 1, deleted: 2 });
            assert_eq!(session.cursor(), 3);
            assert_eq!(session.state(), SessionState::Completed);

            let candidates: Vec<_> = session.candidates().cloned().collect();
            assert_eq!(candidates, vec![photo("A"), photo("C")]);
        }

        #[test]
        fn test_n_outcomes_complete_the_session() {
            for n in 0..8usize {
                let names: Vec<String> = (0..n).map(|i| format!("{}.jpg", i)).collect();
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

                let mut session = SessionController::new();
                session.load(photos(&refs));

                for i in 0..n {
                    assert_eq!(session.state(), SessionState::Active);
                    let direction = if i % 3 == 0 {
                        SwipeDirection::Left
                    } else {
                        SwipeDirection::Right
                    };
                    session.handle_outcome(direction).unwrap();
                    assert!(session.cursor() <= session.len());
                }

                assert_eq!(session.state(), SessionState::Completed);
                assert_eq!(session.tally().total(), n);
                assert_eq!(session.cursor(), n);
            }
        }

        #[test]
        fn test_outcome_after_completion_is_ignored() {
            let mut session = SessionController::new();
            session.load(photos(&["a.jpg"]));
            session.handle_outcome(SwipeDirection::Right);

            assert!(session.handle_outcome(SwipeDirection::Left).is_none());
            assert_eq!(session.cursor(), 1);
            assert_eq!(session.tally(), Tally { kept: 1, deleted: 0 });
        }

        #[test]
        fn test_outcome_on_empty_session_is_ignored() {
            let mut session = SessionController::new();
            assert!(session.handle_outcome(SwipeDirection::Right).is_none());
            assert_eq!(session.state(), SessionState::Empty);
        }

        #[test]
        fn test_progress() {
            let mut session = SessionController::new();
            assert_eq!(session.progress(), 0.0);

            session.load(photos(&["a", "b", "c", "d"]));
            session.handle_outcome(SwipeDirection::Right);
            assert_eq!(session.progress(), 0.25);
        }
    }

    mod restart_tests {
        use super::*;

        #[test]
        fn test_restart_keeps_queue_and_zeroes_counters() {
            let mut session = SessionController::new();
            session.load(photos(&["a", "b", "c"]));
            session.handle_outcome(SwipeDirection::Left);
            session.handle_outcome(SwipeDirection::Right);
            session.handle_outcome(SwipeDirection::Left);

            session.restart();

            assert_eq!(session.state(), SessionState::Active);
            assert_eq!(session.len(), 3);
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.tally(), Tally::default());
            assert_eq!(session.current_photo(), Some(&photo("a")));
        }

        #[test]
        fn test_restart_clears_candidates() {
            let mut session = SessionController::new();
            session.load(photos(&["a", "b"]));
            session.handle_outcome(SwipeDirection::Left);
            assert_eq!(session.candidate_count(), 1);

            session.restart();
            assert_eq!(session.candidate_count(), 0);
        }

        #[test]
        fn test_restart_mid_pass() {
            let mut session = SessionController::new();
            session.load(photos(&["a", "b", "c"]));
            session.handle_outcome(SwipeDirection::Right);

            session.restart();
            assert_eq!(session.cursor(), 0);
            assert_eq!(session.state(), SessionState::Active);
        }

        #[test]
        fn test_restart_on_empty_is_noop() {
            let mut session = SessionController::new();
            session.restart();
            assert_eq!(session.state(), SessionState::Empty);
        }
    }
}
