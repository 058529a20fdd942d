//! User feedback collaborators: haptic-style cues and transient notices.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

/// How long a notice stays on screen
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Strength of a feedback cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    /// Drag crossed the commit threshold
    Light,
    /// Photo kept
    Medium,
    /// Photo marked for deletion
    Heavy,
    /// Batch loaded or pass completed
    Success,
}

/// Fire-and-forget feedback sink
pub trait Haptics: Send {
    fn notify(&self, kind: HapticKind);
}

/// Rings the terminal bell for the strong cues
pub struct TerminalBell<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl TerminalBell<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalBell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn rings_for(kind: HapticKind) -> bool {
        matches!(kind, HapticKind::Heavy | HapticKind::Success)
    }
}

impl<W: Write + Send> Haptics for TerminalBell<W> {
    fn notify(&self, kind: HapticKind) {
        trace!(?kind, "haptic");
        if !Self::rings_for(kind) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentHaptics;

impl Haptics for SilentHaptics {
    fn notify(&self, kind: HapticKind) {
        trace!(?kind, "haptic (silent)");
    }
}

/// Icon shown next to a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeIcon {
    Success,
    /// A photo was marked for deletion
    Delete,
    Error,
}

impl NoticeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            NoticeIcon::Success => "✓",
            NoticeIcon::Delete => "✗",
            NoticeIcon::Error => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub icon: NoticeIcon,
    shown_at: Instant,
}

/// Notices drawn at once; the oldest is dropped when a new one arrives
pub const MAX_STACKED: usize = 3;

/// Stack of short-lived notices, newest on top
#[derive(Debug)]
pub struct NoticeBoard {
    notices: VecDeque<Notice>,
    duration: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, icon: NoticeIcon, now: Instant) {
        let message = message.into();
        trace!(%message, "notice");
        if self.notices.len() >= MAX_STACKED {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            message,
            icon,
            shown_at: now,
        });
    }

    fn is_live(&self, notice: &Notice, now: Instant) -> bool {
        now.saturating_duration_since(notice.shown_at) < self.duration
    }

    /// The newest notice that has not expired yet
    pub fn visible(&self, now: Instant) -> Option<&Notice> {
        self.stack(now).next()
    }

    /// Every live notice, newest first
    pub fn stack(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .rev()
            .filter(move |n| self.is_live(n, now))
    }

    /// Drops expired notices. Returns true when something was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        let duration = self.duration;
        self.notices
            .retain(|n| now.saturating_duration_since(n.shown_at) < duration);
        self.notices.len() != before
    }

    /// Time until the next notice disappears
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.stack(now)
            .map(|n| self.duration.saturating_sub(now.saturating_duration_since(n.shown_at)))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer whose bytes the test can inspect afterwards
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    mod haptics_tests {
        use super::*;

        #[test]
        fn test_bell_rings_only_for_strong_cues() {
            let buf = SharedBuf::default();
            let bell = TerminalBell::with_writer(buf.clone());

            bell.notify(HapticKind::Light);
            bell.notify(HapticKind::Medium);
            assert!(buf.0.lock().unwrap().is_empty());

            bell.notify(HapticKind::Heavy);
            bell.notify(HapticKind::Success);
            assert_eq!(buf.0.lock().unwrap().as_slice(), b"\x07\x07");
        }

        #[test]
        fn test_silent_haptics_is_usable_as_trait_object() {
            let haptics: Box<dyn Haptics> = Box::new(SilentHaptics);
            haptics.notify(HapticKind::Success);
        }
    }

    mod notice_tests {
        use super::*;

        #[test]
        fn test_notice_expires() {
            let start = Instant::now();
            let mut board = NoticeBoard::new(Duration::from_millis(100));

            board.show("Photo saved!", NoticeIcon::Success, start);
            assert_eq!(
                board.visible(start).map(|n| n.message.as_str()),
                Some("Photo saved!")
            );
            assert_eq!(
                board.next_deadline(start + Duration::from_millis(40)),
                Some(Duration::from_millis(60))
            );

            let later = start + Duration::from_millis(100);
            assert!(board.visible(later).is_none());
            assert!(board.expire(later));
            assert!(!board.expire(later));
        }

        #[test]
        fn test_newer_notice_goes_on_top() {
            let start = Instant::now();
            let mut board = NoticeBoard::default();

            board.show("Photo deleted", NoticeIcon::Delete, start);
            board.show("All photos reviewed!", NoticeIcon::Success, start);

            let notice = board.visible(start).unwrap();
            assert_eq!(notice.message, "All photos reviewed!");
            let messages: Vec<_> = board.stack(start).map(|n| n.message.as_str()).collect();
            assert_eq!(messages, vec!["All photos reviewed!", "Photo deleted"]);
        }

        #[test]
        fn test_stack_is_bounded_and_expires_individually() {
            let start = Instant::now();
            let mut board = NoticeBoard::new(Duration::from_millis(100));

            for i in 0..MAX_STACKED + 2 {
                board.show(
                    format!("notice {}", i),
                    NoticeIcon::Success,
                    start + Duration::from_millis(i as u64 * 30),
                );
            }
            // the first two were pushed out, the third has timed out
            let now = start + Duration::from_millis(170);
            assert_eq!(board.stack(now).count(), MAX_STACKED - 1);
            assert_eq!(board.next_deadline(now), Some(Duration::from_millis(20)));

            assert!(board.expire(now));
            assert_eq!(board.visible(now).unwrap().message, "notice 4");
        }
    }
}
