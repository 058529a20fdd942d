// Small rendering helpers: sizes, color fades and the card transform blit
use crate::domain::CardTransform;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Formats a byte count for display
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}

/// Blends `fg` over `bg`; opacity 0 gives `bg`, 1 gives `fg`
pub fn fade(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (b as f32 + (a as f32 - b as f32) * t).round() as u8;
    Color::Rgb(mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

/// Horizontal shift of one card row so the card appears tilted.
///
/// Terminal cells are about twice as tall as wide, so one row of height
/// counts as two columns. Positive rotation leans the top to the right.
pub fn shear_offset(row: u16, height: u16, rotation_deg: f32) -> i32 {
    if height <= 1 || rotation_deg == 0.0 {
        return 0;
    }
    let mid = (height - 1) as f32 / 2.0;
    let distance = mid - row as f32;
    (distance * 2.0 * rotation_deg.to_radians().tan()).round() as i32
}

/// Where the card's bounding box lands after translation, clipped to `clip`.
/// Shear is ignored so the box stays a rectangle.
pub fn displaced_rect(origin: Rect, transform: CardTransform, clip: Rect) -> Rect {
    let x = origin.x as i32 + transform.dx.round() as i32;
    let y = origin.y as i32 + transform.dy.round() as i32;

    let left = x.max(clip.left() as i32);
    let top = y.max(clip.top() as i32);
    let right = (x + origin.width as i32).min(clip.right() as i32);
    let bottom = (y + origin.height as i32).min(clip.bottom() as i32);

    if right <= left || bottom <= top {
        return Rect::new(clip.x, clip.y, 0, 0);
    }
    Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    )
}

/// Copies a card rendered off-screen into `dst`, displaced by `transform`.
///
/// `src` must start at (0, 0) and have the size of `origin`. Cells that land
/// outside `clip` are dropped.
pub fn blit_card(
    src: &Buffer,
    dst: &mut Buffer,
    origin: Rect,
    clip: Rect,
    transform: CardTransform,
) {
    let clip = clip.intersection(dst.area);
    let dx = transform.dx.round() as i32;
    let dy = transform.dy.round() as i32;

    for y in 0..src.area.height {
        let target_y = origin.y as i32 + y as i32 + dy;
        if target_y < clip.top() as i32 || target_y >= clip.bottom() as i32 {
            continue;
        }
        let shift = dx + shear_offset(y, src.area.height, transform.rotation);

        for x in 0..src.area.width {
            let target_x = origin.x as i32 + x as i32 + shift;
            if target_x < clip.left() as i32 || target_x >= clip.right() as i32 {
                continue;
            }
            let Some(cell) = src.cell((x, y)) else {
                continue;
            };
            if let Some(slot) = dst.cell_mut((target_x as u16, target_y as u16)) {
                *slot = cell.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade((200, 100, 0), (0, 0, 0), 1.0), Color::Rgb(200, 100, 0));
        assert_eq!(fade((200, 100, 0), (0, 0, 0), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade((200, 100, 0), (0, 0, 0), 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(fade((200, 100, 0), (0, 0, 0), 4.0), Color::Rgb(200, 100, 0));
    }

    #[test]
    fn test_shear_offset() {
        assert_eq!(shear_offset(0, 11, 0.0), 0);
        // middle row never moves
        assert_eq!(shear_offset(5, 11, 30.0), 0);
        assert!(shear_offset(0, 11, 30.0) > 0);
        assert!(shear_offset(10, 11, 30.0) < 0);
        assert_eq!(shear_offset(0, 11, 30.0), -shear_offset(0, 11, -30.0));
    }

    #[test]
    fn test_displaced_rect() {
        let origin = Rect::new(10, 2, 20, 8);
        let clip = Rect::new(0, 2, 40, 8);

        assert_eq!(displaced_rect(origin, CardTransform::NEUTRAL, clip), origin);

        let moved = CardTransform {
            dx: 15.0,
            dy: -1.0,
            rotation: 12.0,
        };
        assert_eq!(displaced_rect(origin, moved, clip), Rect::new(25, 2, 15, 7));

        let gone = CardTransform {
            dx: -80.0,
            ..CardTransform::NEUTRAL
        };
        assert_eq!(displaced_rect(origin, gone, clip).area(), 0);
    }

    #[test]
    fn test_blit_card_translates_and_clips() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 2));
        src.set_string(0, 0, "abc", ratatui::style::Style::default());
        src.set_string(0, 1, "def", ratatui::style::Style::default());

        let mut dst = Buffer::empty(Rect::new(0, 0, 10, 4));
        let origin = Rect::new(2, 1, 3, 2);
        let transform = CardTransform {
            dx: 6.0,
            dy: 0.0,
            rotation: 0.0,
        };
        let clip = dst.area;
        blit_card(&src, &mut dst, origin, clip, transform);

        assert_eq!(dst.cell((8, 1)).unwrap().symbol(), "a");
        assert_eq!(dst.cell((9, 2)).unwrap().symbol(), "e");
        // "c" and "f" fall off the right edge
        assert_eq!(dst.cell((2, 1)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_blit_card_negative_offset() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 1));
        src.set_string(0, 0, "xyz", ratatui::style::Style::default());

        let mut dst = Buffer::empty(Rect::new(0, 0, 5, 1));
        let transform = CardTransform {
            dx: -2.0,
            ..CardTransform::NEUTRAL
        };
        let clip = dst.area;
        blit_card(&src, &mut dst, Rect::new(1, 0, 3, 1), clip, transform);

        assert_eq!(dst.cell((0, 0)).unwrap().symbol(), "y");
        assert_eq!(dst.cell((1, 0)).unwrap().symbol(), "z");
        assert_eq!(dst.cell((2, 0)).unwrap().symbol(), " ");
    }
}
