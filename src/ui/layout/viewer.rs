use super::{center_vertically, fit_aspect};
use crate::app::{App, ViewerControl};
use crate::render::TileState;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui_image::StatefulImage;

const CONTROL_WIDTH: u16 = 5;
/// Below this the controls would overlap the frame; only the backdrop is drawn.
const MIN_VIEWER_WIDTH: u16 = CONTROL_WIDTH * 2 + 3;
const MIN_VIEWER_HEIGHT: u16 = 3;

/// Where the viewer pieces go inside the screen.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct ViewerLayout {
    pub frame: Rect,
    pub previous: Rect,
    pub next: Rect,
    pub close: Rect,
    pub caption: Rect,
}

/// Portrait frame (4:5 photo on ~1:2 cells) centered between the side controls.
pub(super) fn viewer_layout(area: Rect) -> ViewerLayout {
    let max_w = area.width.saturating_sub(CONTROL_WIDTH * 2 + 2);
    let max_h = area.height.saturating_sub(4);
    let (w, h) = fit_aspect(max_w, max_h, 8, 5);

    let frame = Rect::new(
        area.x + area.width.saturating_sub(w) / 2,
        area.y + 1 + max_h.saturating_sub(h) / 2,
        w,
        h,
    );
    let mid = area.y + area.height / 2;
    let side_y = mid.saturating_sub(1).max(area.y);
    let side_h = 3.min(area.height);

    ViewerLayout {
        frame: frame.intersection(area),
        previous: Rect::new(area.x + 1, side_y, CONTROL_WIDTH, side_h).intersection(area),
        next: Rect::new(
            area.right().saturating_sub(CONTROL_WIDTH + 1),
            side_y,
            CONTROL_WIDTH,
            side_h,
        )
        .intersection(area),
        close: Rect::new(
            area.right().saturating_sub(CONTROL_WIDTH + 1),
            area.y,
            CONTROL_WIDTH,
            1,
        )
        .intersection(area),
        caption: Rect::new(area.x, frame.bottom().min(area.bottom().saturating_sub(1)), area.width, 1)
            .intersection(area),
    }
}

pub(super) fn draw_viewer(f: &mut Frame, app: &mut App, area: Rect, theme: &GalleryTheme, show_image: bool) {
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(Style::default().bg(theme.backdrop)), area);
    if area.width < MIN_VIEWER_WIDTH || area.height < MIN_VIEWER_HEIGHT {
        return;
    }

    let position = app.gallery.lightbox.cursor();
    let len = app.gallery.active().len();
    let Some(photo) = app.gallery.current_photo() else {
        return;
    };
    let label = photo.label();
    let category = photo.category.clone();
    let file_name = app
        .gallery
        .lightbox
        .source()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let layout = viewer_layout(area);
    let regions = &mut app.ui.regions;
    regions.viewer_frame = Some(layout.frame);
    regions.viewer_controls.extend([
        (layout.previous, ViewerControl::Previous),
        (layout.next, ViewerControl::Next),
        (layout.close, ViewerControl::Close),
    ]);

    let control_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    for (rect, symbol) in [(layout.previous, "❮"), (layout.next, "❯"), (layout.close, "✕")] {
        let control = Paragraph::new(symbol)
            .style(control_style)
            .alignment(Alignment::Center);
        f.render_widget(control, center_vertically(rect, 1));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(layout.frame);
    f.render_widget(block, layout.frame);

    app.request_preview(position);
    let state = app.board.tile(position).map(|t| t.state.clone());
    let drawn = show_image
        && match app.get_preview(position) {
            Some(protocol) => {
                f.render_stateful_widget(StatefulImage::new(None), inner, protocol);
                true
            }
            None => false,
        };

    if !drawn {
        let lines = match state {
            Some(TileState::Failed { fallback_url }) => vec![
                Line::styled("image unavailable", Style::default().fg(theme.warning)),
                Line::styled(fallback_url, Style::default().fg(theme.fg_muted)),
            ],
            _ => vec![Line::styled(
                if show_image { "loading…" } else { label.as_str() },
                Style::default().fg(theme.fg_muted),
            )],
        };
        let text = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(text, center_vertically(inner, 3));
    }

    let caption = Line::from(vec![
        Span::styled(
            label.clone(),
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ", Style::default().fg(theme.fg_muted)),
        Span::styled(category, Style::default().fg(theme.accent_soft)),
        Span::styled(" · ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("{}/{}", position + 1, len),
            Style::default().fg(theme.fg_secondary),
        ),
        Span::styled(" · ", Style::default().fg(theme.fg_muted)),
        Span::styled(file_name, Style::default().fg(theme.fg_muted)),
    ]);
    f.render_widget(Paragraph::new(caption).alignment(Alignment::Center), layout.caption);

    {
        let hint_text = if app.swipe.is_tracking() {
            "release to swipe"
        } else {
            "←/→ navigate · drag to swipe · s share · Esc close"
        };
        let hint = Paragraph::new(hint_text)
            .style(Style::default().fg(theme.fg_primary).add_modifier(Modifier::DIM))
            .alignment(Alignment::Center);
        f.render_widget(hint, Rect::new(area.x, area.bottom() - 1, area.width, 1).intersection(area));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rect_contains;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn controls_sit_outside_the_frame() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = viewer_layout(area);

        assert!(layout.frame.width > 0 && layout.frame.height > 0);
        assert!(layout.previous.right() <= layout.frame.x);
        assert!(layout.next.x >= layout.frame.right());
        assert!(layout.close.right() <= area.right());
        assert_eq!(layout.caption.y, layout.frame.bottom());
    }

    #[test]
    fn layout_stays_inside_tiny_areas() {
        for (w, h) in [(0, 0), (3, 10), (9, 0), (12, 2), (1, 1)] {
            let area = Rect::new(2, 1, w, h);
            let layout = viewer_layout(area);
            for rect in [layout.frame, layout.previous, layout.next, layout.close, layout.caption] {
                assert_eq!(rect.intersection(area), rect, "{w}x{h}: {rect:?}");
            }
        }
    }

    #[test]
    fn viewer_survives_small_terminals() {
        for w in 0..16 {
            for h in 0..16 {
                let mut app = test_app(3, &["a"]);
                app.open_viewer_at(0);
                app.ui.status_message = Some("status".into());
                let mut terminal = Terminal::new(TestBackend::new(w, h)).expect("test terminal");
                terminal
                    .draw(|f| crate::ui::draw(f, &mut app))
                    .expect("draw viewer");

                app.ui.show_help = true;
                terminal
                    .draw(|f| crate::ui::draw(f, &mut app))
                    .expect("draw viewer under help");
            }
        }
    }

    #[test]
    fn drawing_records_frame_and_controls() {
        let mut app = test_app(3, &["a"]);
        app.open_viewer_at(1);
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");
        let theme = app.ui.theme.clone();

        terminal
            .draw(|f| draw_viewer(f, &mut app, Rect::new(0, 0, 80, 30), &theme, true))
            .expect("draw viewer");

        let frame = app.ui.regions.viewer_frame.expect("frame recorded");
        assert_eq!(app.ui.regions.viewer_controls.len(), 3);
        assert!(rect_contains(frame, frame.x + 1, frame.y + 1));

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Photo 2"));
        assert!(text.contains("2/3"));
    }
}
