use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Keep the photo on the card
    Keep,
    /// Mark the photo on the card for deletion
    Delete,
    /// Load photos from the photo folder
    LoadPhotos,
    /// Load the built-in demo photos
    LoadDemo,
    /// Review the same photos again
    ReviewAgain,
    /// Return to the start screen
    LoadNew,
    /// Open the current photo in the system viewer
    Open,
    /// Toggle help overlay
    Help,
    /// Close an overlay
    Back,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Back,

        // Keep: Right arrow or k
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Keep,

        // Delete: Left arrow or x
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Delete,
        (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Delete,

        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::LoadPhotos,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::LoadDemo,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::ReviewAgain,
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::LoadNew,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,

        // Help: ? (some terminals report the shift)
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Pointer input in terminal cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release { column: u16, row: u16 },
    None,
}

/// Maps mouse events to pointer actions. Only the left button drags the card.
pub fn handle_mouse_event(mouse: MouseEvent) -> PointerAction {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press { column, row },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag { column, row },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release { column, row },
        _ => PointerAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_quit() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Quit);
    }

    #[test]
    fn test_key_escape_goes_back() {
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Back);
    }

    #[test]
    fn test_key_keep() {
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Keep);

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Keep);
    }

    #[test]
    fn test_key_delete() {
        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Delete);

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Delete);
    }

    #[test]
    fn test_key_screen_actions() {
        let cases = [
            ('l', KeyAction::LoadPhotos),
            ('d', KeyAction::LoadDemo),
            ('r', KeyAction::ReviewAgain),
            ('n', KeyAction::LoadNew),
            ('o', KeyAction::Open),
        ];
        for (c, expected) in cases {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), expected, "key {}", c);
        }
    }

    #[test]
    fn test_key_help() {
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Help);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(key), KeyAction::Help);
    }

    #[test]
    fn test_key_none() {
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::None);
    }

    #[test]
    fn test_mouse_left_button_gesture() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            PointerAction::Press { column: 10, row: 5 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 6)),
            PointerAction::Drag { column: 25, row: 6 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 25, 6)),
            PointerAction::Release { column: 25, row: 6 }
        );
    }

    #[test]
    fn test_mouse_other_events_ignored() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            PointerAction::None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 1, 1)),
            PointerAction::None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 1, 1)),
            PointerAction::None
        );
    }
}
