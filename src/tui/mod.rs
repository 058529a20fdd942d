// TUI module for rendering the terminal interface
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{blit_card, displaced_rect, fade, format_file_size, shear_offset};
pub use input::{handle_key_event, handle_mouse_event, KeyAction, PointerAction};

use crate::app::{App, HitTarget, LoadSource, Screen, ViewState};
use crate::async_preview::PreviewState;
use crate::domain::{BadgeKind, PhotoRef};
use crate::feedback::{NoticeBoard, NoticeIcon};
use crate::platform::{PlatformVerdict, MIN_COLUMNS, MIN_ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
    Frame,
};
use std::time::Instant;

/// Rows under the photo used by the name / path overlay
const CARD_OVERLAY_ROWS: u16 = 2;

/// Renders the whole interface for the current screen and overlays
pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    app.clear_hit_targets();

    match app.screen() {
        Screen::Start => render_start(frame, app),
        Screen::Review => render_review(frame, app, now),
        Screen::Completed => render_completed(frame, app),
    }

    match app.view() {
        ViewState::Help => render_help_overlay(frame),
        ViewState::Welcome => render_welcome_overlay(frame),
        ViewState::Browsing => {}
    }

    render_notice(frame, app.notices(), now);
}

/// Renders the start screen with the two load actions
fn render_start(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 80, frame.area());

    let block = Block::default()
        .title(" pswp ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Intro
            Constraint::Length(2), // Loading status
            Constraint::Length(3), // Buttons
        ])
        .split(inner);

    let intro = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Photo Swipe",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Clean up your photos one swipe at a time",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "How it works",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Swipe right to keep"),
        ]),
        Line::from(vec![
            Span::styled("← ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Swipe left to delete"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Photos from: {}", app.device_label()),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(intro)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_PRIMARY))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let loading = app.is_loading();
    if loading {
        let (ratio, label) = app.load_progress().unwrap_or((0.0, String::new()));
        let title = match app.loading_source() {
            Some(LoadSource::Demo) => "Loading Demo Photos...",
            _ => "Loading Photos...",
        };
        let status = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(chunks[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame()),
                    Style::default().fg(ACCENT_HIGHLIGHT),
                ),
                Span::styled(title, Style::default().fg(TEXT_PRIMARY)),
            ]))
            .alignment(Alignment::Center),
            status[0],
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(ACCENT_HIGHLIGHT).bg(BG_DARK))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(label),
            horizontal_inset(status[1], 4),
        );
    }

    let buttons = split_buttons(chunks[2]);
    render_button(
        frame,
        buttons[0],
        "Load My Photos (l)",
        ACCENT_SECONDARY,
        !loading,
    );
    render_button(
        frame,
        buttons[1],
        "Use Demo Photos (d)",
        ACCENT_HIGHLIGHT,
        !loading,
    );
    if !loading {
        app.register_hit_target(buttons[0], HitTarget::LoadPhotosButton);
        app.register_hit_target(buttons[1], HitTarget::LoadDemoButton);
    }
}

/// Renders the review screen: header, card, buttons and footer
fn render_review(frame: &mut Frame, app: &mut App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Card
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header_polished(frame, chunks[0], app);
    render_card(frame, chunks[1], app, now);

    let buttons = split_buttons(chunks[2]);
    render_button(frame, buttons[0], "✗ Delete (←)", ACCENT_PRIMARY, true);
    render_button(frame, buttons[1], "♥ Keep (→)", ACCENT_SECONDARY, true);
    app.register_hit_target(buttons[0], HitTarget::DeleteButton);
    app.register_hit_target(buttons[1], HitTarget::KeepButton);

    render_footer_polished(frame, chunks[3]);
}

/// Renders the polished header with progress bar
fn render_header_polished(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let session = app.session();
    let tally = session.tally();
    let position = (session.cursor() + 1).min(session.len());

    let title_line = Line::from(vec![
        Span::styled(
            format!(" Photo {} / {} ", position, session.len()),
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Saved ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            tally.kept.to_string(),
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Deleted ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled(
            tally.deleted.to_string(),
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(title_line)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(header, chunks[0]);

    let progress = session.progress();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(ACCENT_SECONDARY).bg(BG_DARK))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!(
            "{}% ({}/{})",
            (progress * 100.0) as u16,
            session.cursor(),
            session.len()
        ));

    frame.render_widget(gauge, chunks[1]);
}

/// Resting position of the card inside the content area
pub fn card_rect(content: Rect) -> Rect {
    // Roughly 4:3 once half-block rows are accounted for
    let width = content
        .width
        .saturating_sub(4)
        .min(content.height.saturating_mul(3))
        .max(content.width.min(12));
    Rect {
        x: content.x + content.width.saturating_sub(width) / 2,
        y: content.y,
        width,
        height: content.height,
    }
}

/// Renders the photo card off-screen and blits it with the current transform
fn render_card(frame: &mut Frame, content: Rect, app: &mut App, now: Instant) {
    let Some(photo) = app.session().current_photo().cloned() else {
        return;
    };
    let index = app.session().cursor();
    let next = app.session().photos().get(index + 1).cloned();

    let card = card_rect(content);
    app.surface_mut()
        .set_viewport_width(frame.area().width as f32);

    let mut transform = app.surface().transform(now);
    // Tilt is drawn as a shear; past the exit angle it stops reading as a card
    let max_tilt = app.surface().config().terminal_angle;
    transform.rotation = transform.rotation.clamp(-max_tilt, max_tilt);
    let badge = app.surface().badge(now);

    let mut card_buf = Buffer::empty(Rect::new(0, 0, card.width, card.height));
    let local = card_buf.area;

    let border_color = match badge {
        Some(b) if b.kind == BadgeKind::Keep => fade(KEEP_RGB, BORDER_RGB, b.opacity),
        Some(b) => fade(DELETE_RGB, BORDER_RGB, b.opacity),
        None => BORDER_COLOR,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(BG_CARD));
    let inner = block.inner(local);
    block.render(local, &mut card_buf);

    let photo_area = Rect {
        height: inner.height.saturating_sub(CARD_OVERLAY_ROWS),
        ..inner
    };
    let overlay_area = Rect {
        y: photo_area.bottom(),
        height: inner.height.saturating_sub(photo_area.height),
        ..inner
    };

    let state = app
        .previews_mut()
        .request_preview(&photo, photo_area.width, photo_area.height)
        .clone();
    if let Some(next) = next {
        app.previews_mut()
            .prefetch(&next, photo_area.width, photo_area.height);
    }

    render_photo(&mut card_buf, photo_area, &state);
    render_card_overlay(&mut card_buf, overlay_area, &photo, index);

    if let Some(badge) = badge {
        let (label, rgb, x) = match badge.kind {
            BadgeKind::Keep => (" KEEP ", KEEP_RGB, inner.x + 1),
            BadgeKind::Delete => (
                " DELETE ",
                DELETE_RGB,
                inner.right().saturating_sub(10).max(inner.x),
            ),
        };
        let color = fade(rgb, CARD_RGB, badge.opacity);
        let badge_area = Rect::new(x, inner.y + 1, label.len() as u16 + 2, 3).intersection(inner);
        Paragraph::new(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(BG_CARD)),
        )
        .render(badge_area, &mut card_buf);
    }

    let area = frame.area();
    let clip = Rect {
        x: area.x,
        y: content.y,
        width: area.width,
        height: content.height,
    };
    // Clickable where it is drawn, so a card springing back can be caught
    app.register_hit_target(displaced_rect(card, transform, clip), HitTarget::Card);
    blit_card(&card_buf, frame.buffer_mut(), card, clip, transform);
}

/// Draws the preview (or its loading / error state) centered in `area`
fn render_photo(buf: &mut Buffer, area: Rect, state: &PreviewState) {
    match state {
        PreviewState::Ready(preview) => {
            let rows = preview.lines.len() as u16;
            let top = area.y + area.height.saturating_sub(rows) / 2;
            let photo_area = Rect {
                y: top,
                height: rows.min(area.height),
                ..area
            };
            Paragraph::new(preview.lines.clone())
                .alignment(Alignment::Center)
                .render(photo_area, buf);
        }
        PreviewState::Loading => {
            let middle = Rect {
                y: area.y + area.height / 2,
                height: 1.min(area.height),
                ..area
            };
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame()),
                    Style::default().fg(ACCENT_HIGHLIGHT),
                ),
                Span::styled("Loading photo", Style::default().fg(TEXT_SECONDARY)),
            ]))
            .alignment(Alignment::Center)
            .render(middle, buf);
        }
        PreviewState::Error(e) => {
            let lines = vec![
                Line::from(Span::styled(
                    "[!] Could not show this photo",
                    Style::default()
                        .fg(ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(e.clone(), Style::default().fg(TEXT_SECONDARY))),
            ];
            let middle = Rect {
                y: area.y + area.height.saturating_sub(2) / 2,
                height: 2.min(area.height),
                ..area
            };
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(middle, buf);
        }
    }
}

/// Name and location of the photo along the bottom of the card
fn render_card_overlay(buf: &mut Buffer, area: Rect, photo: &PhotoRef, index: usize) {
    let mut detail = photo.subtitle();
    if !photo.is_demo() && photo.size > 0 {
        detail = format!("{}  ·  {}", detail, format_file_size(photo.size));
    }

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", photo.title(index)),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", detail),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];
    Paragraph::new(lines)
        .style(Style::default().bg(BG_DARK))
        .render(area, buf);
}

/// Renders the completed screen with the tallies and deletion candidates
fn render_completed(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 90, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary
            Constraint::Min(0),    // Candidates
            Constraint::Length(3), // Buttons
        ])
        .split(inner);

    let session = app.session();
    let tally = session.tally();

    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(
            "All Done!",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("✓ ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Photos Saved:   "),
            Span::styled(
                tally.kept.to_string(),
                Style::default()
                    .fg(ACCENT_SECONDARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("✗ ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Photos Deleted: "),
            Span::styled(
                tally.deleted.to_string(),
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_PRIMARY)),
        chunks[0],
    );

    let list_area = chunks[1];
    let mut lines = Vec::new();
    if session.candidate_count() == 0 {
        lines.push(Line::from(Span::styled(
            "Nothing marked for deletion",
            Style::default().fg(TEXT_SECONDARY),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Marked for deletion (remove them in your photo manager):",
            Style::default().fg(TEXT_SECONDARY),
        )));
        let room = list_area.height.saturating_sub(2) as usize;
        let total = session.candidate_count();
        let shown = if total > room { room.saturating_sub(1) } else { total };
        for photo in session.candidates().take(shown) {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(ACCENT_PRIMARY)),
                Span::raw(photo.subtitle()),
            ]));
        }
        if shown < total {
            lines.push(Line::from(Span::styled(
                format!("  …and {} more", total - shown),
                Style::default().fg(TEXT_SECONDARY),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(BORDER_COLOR)))
            .style(Style::default().fg(TEXT_PRIMARY)),
        horizontal_inset(list_area, 2),
    );

    let buttons = split_buttons(chunks[2]);
    render_button(frame, buttons[0], "Review Again (r)", ACCENT_HIGHLIGHT, true);
    render_button(frame, buttons[1], "Load New Photos (n)", ACCENT_SECONDARY, true);
    app.register_hit_target(buttons[0], HitTarget::ReviewAgainButton);
    app.register_hit_target(buttons[1], HitTarget::LoadNewButton);
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let help_area = centered_rect(60, 80, area);

    // Clear background
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_lines = vec![
        Line::from(Span::styled(
            "Mouse",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Drag the card right to keep, left to delete"),
        Line::from("Let go early and it springs back"),
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("→ / k  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Keep photo"),
        ]),
        Line::from(vec![
            Span::styled("← / x  ", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw("Delete photo"),
        ]),
        Line::from(vec![
            Span::styled("l / d  ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Load photos / demo photos"),
        ]),
        Line::from(vec![
            Span::styled("r / n  ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Review again / load new"),
        ]),
        Line::from(vec![
            Span::styled("o      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Open in photo viewer"),
        ]),
        Line::from(vec![
            Span::styled("q      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(85, 85, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "Welcome to pswp!",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![Span::raw(
            "pswp shows your photos one at a time so you can decide quickly what to keep.",
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Load your photos or try the demo set"),
        ]),
        Line::from(vec![
            Span::styled("  2. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Drag the card "),
            Span::styled("right", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw(" to keep or "),
            Span::styled("left", Style::default().fg(ACCENT_PRIMARY)),
            Span::raw(" to delete (arrow keys work too)"),
        ]),
        Line::from(vec![
            Span::styled("  3. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Check the list of photos you marked at the end"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  •  ", Style::default().fg(ACCENT_SECONDARY)),
            Span::raw("Nothing is ever deleted by pswp. "),
            Span::raw("Remove marked photos in your photo manager."),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to start...",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )]),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(Span::styled(
                    " Welcome ",
                    Style::default()
                        .fg(ACCENT_HIGHLIGHT)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}

/// Renders live notices as toasts near the top of the screen, newest first
pub fn render_notice(frame: &mut Frame, notices: &NoticeBoard, now: Instant) {
    let area = frame.area();

    for (slot, notice) in notices.stack(now).enumerate() {
        let y = area.y + 1 + slot as u16 * 3;
        if y + 3 > area.bottom() {
            break;
        }

        let color = match notice.icon {
            NoticeIcon::Success => ACCENT_SECONDARY,
            NoticeIcon::Delete | NoticeIcon::Error => ACCENT_PRIMARY,
        };

        let text_width = notice.message.chars().count() as u16 + 4;
        let width = (text_width + 2).min(area.width);
        let toast = Rect {
            x: area.x + (area.width - width) / 2,
            y,
            width,
            height: 3,
        };

        frame.render_widget(Clear, toast);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", notice.icon.glyph()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(notice.message.clone(), Style::default().fg(TEXT_PRIMARY)),
            ]))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(BG_DARK)),
            ),
            toast,
        );
    }
}

/// Shown instead of the app when the terminal cannot host it
pub fn render_platform_blocked(frame: &mut Frame, verdict: &PlatformVerdict) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(verdict.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Resize to at least {}x{} to continue, or press q to quit.",
                MIN_COLUMNS, MIN_ROWS
            ),
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_PRIMARY).bg(BG_DARK))
            .wrap(Wrap { trim: true }),
        frame.area(),
    );
}

/// Renders the polished footer with styled controls
fn render_footer_polished(frame: &mut Frame, area: Rect) {
    let controls = Line::from(vec![
        Span::styled("drag ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled("card", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "← ",
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Delete", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Keep", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("o ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Open", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    frame.render_widget(Paragraph::new(controls).alignment(Alignment::Center), area);
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, color: Color, enabled: bool) {
    let color = if enabled { color } else { TEXT_SECONDARY };
    let mut label_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if !enabled {
        label_style = label_style.add_modifier(Modifier::DIM);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(label.to_string(), label_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// Splits a row into two button slots with a gap between them
fn split_buttons(area: Rect) -> [Rect; 2] {
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(35),
            Constraint::Percentage(10),
            Constraint::Percentage(35),
            Constraint::Percentage(10),
        ])
        .split(area);
    [slots[1], slots[3]]
}

fn horizontal_inset(area: Rect, margin: u16) -> Rect {
    let margin = margin.min(area.width / 2);
    Rect {
        x: area.x + margin,
        width: area.width - margin * 2,
        ..area
    }
}

fn spinner_frame() -> &'static str {
    const SPINNERS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    SPINNERS[(now / 100) as usize % SPINNERS.len()]
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
