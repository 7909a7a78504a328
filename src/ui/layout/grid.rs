use super::center_vertically;
use crate::app::App;
use crate::render::TileState;
use crate::ui::theme::GalleryTheme;
use crate::utils::truncate_label;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui_image::StatefulImage;
use std::time::Instant;

const TILE_GAP: u16 = 1;

/// Which slice of the tile list fits on screen.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct GridWindow {
    pub columns: usize,
    /// First and one-past-last tile position drawn.
    pub start: usize,
    pub end: usize,
}

/// Lay out `len` tiles of `tile_w` x `tile_h` cells in `area`, scrolled so the
/// row holding `selected` is visible.
pub(super) fn grid_window(area: Rect, tile_w: u16, tile_h: u16, len: usize, selected: usize) -> GridWindow {
    let columns = (area.width / tile_w.max(1).saturating_add(TILE_GAP)).max(1) as usize;
    let rows = (area.height / tile_h.max(1).saturating_add(TILE_GAP)).max(1) as usize;

    let selected_row = selected.min(len.saturating_sub(1)) / columns;
    let first_row = (selected_row + 1).saturating_sub(rows);

    let start = (first_row * columns).min(len);
    let end = (start + rows * columns).min(len);
    GridWindow {
        columns,
        start,
        end,
    }
}

/// Linear blend between two colors; non-RGB colors switch halfway.
pub(super) fn fade_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

pub(super) fn draw_grid(f: &mut Frame, app: &mut App, area: Rect, theme: &GalleryTheme, show_images: bool) {
    if let Some(message) = app.board.placeholder.clone() {
        let text = Paragraph::new(message)
            .style(Style::default().fg(theme.fg_muted))
            .alignment(Alignment::Center);
        f.render_widget(text, center_vertically(area, 1));
        return;
    }
    if app.board.is_empty() {
        return;
    }

    let tile_w = app.config.gallery.tile_width;
    let tile_h = app.config.gallery.tile_height;
    let total = app.board.len();
    let window = grid_window(area, tile_w, tile_h, total, app.ui.selected);
    app.ui.grid_columns = window.columns;

    // Center the grid horizontally.
    let step_w = tile_w.saturating_add(TILE_GAP);
    let step_h = tile_h.saturating_add(TILE_GAP);
    let used_w = (window.columns as u16).saturating_mul(step_w);
    let start_x = area.x + area.width.saturating_sub(used_w) / 2;

    // Visible tiles first, then the preload rows around them.
    let preload = app.config.gallery.preload_rows * window.columns;
    let preload_start = window.start.saturating_sub(preload);
    let preload_end = (window.end + preload).min(total);
    for position in window.start..window.end {
        app.request_preview(position);
    }
    for position in (preload_start..window.start).chain(window.end..preload_end) {
        app.request_preview(position);
    }

    let now = Instant::now();
    for (i, position) in (window.start..window.end).enumerate() {
        let col = (i % window.columns) as u16;
        let row = (i / window.columns) as u16;
        let tile_rect = Rect::new(
            start_x.saturating_add(col.saturating_mul(step_w)),
            area.y.saturating_add(row.saturating_mul(step_h)),
            tile_w,
            tile_h,
        );
        if tile_rect.right() > area.right() || tile_rect.bottom() > area.bottom() {
            continue;
        }
        app.ui.regions.tiles.push((tile_rect, position));
        draw_tile(f, app, position, tile_rect, theme, show_images, now);
    }
}

fn draw_tile(
    f: &mut Frame,
    app: &mut App,
    position: usize,
    rect: Rect,
    theme: &GalleryTheme,
    show_images: bool,
    now: Instant,
) {
    let Some(tile) = app.board.tile(position) else {
        return;
    };
    let state = tile.state.clone();
    let progress = tile.fade_progress(now);
    let revealed = tile.is_revealed(now);
    let label = app
        .gallery
        .active()
        .get(position)
        .map(|p| (p.label(), p.category.clone()))
        .unwrap_or_default();
    let is_selected = position == app.ui.selected;
    let is_loading = app.is_loading(position);

    // Kitty keeps old images around; clear before redrawing the cell block.
    f.render_widget(Clear, rect);

    let border = if is_selected {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(fade_color(theme.fg_muted, theme.border, progress))
    };
    let title_style = Style::default().fg(fade_color(theme.fg_muted, theme.fg_secondary, progress));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Line::styled(format!(" {} ", label.0), title_style))
        .title_bottom(Line::styled(
            format!(" {} ", label.1),
            Style::default().fg(theme.accent_soft),
        ))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    match state {
        TileState::Loaded { .. } if revealed && show_images => {
            if let Some(protocol) = app.get_preview(position) {
                f.render_stateful_widget(StatefulImage::new(None), inner, protocol);
            }
        }
        TileState::Loaded { .. } => {}
        TileState::Failed { fallback_url } => {
            let lines = vec![
                Line::styled("image unavailable", Style::default().fg(theme.warning)),
                Line::styled(
                    truncate_label(&fallback_url, (inner.width as usize) * 2),
                    Style::default().fg(theme.fg_muted),
                ),
            ];
            let text = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(text, center_vertically(inner, 3));
        }
        TileState::Pending => {
            let text = if is_loading { "..." } else { "" };
            let loading = Paragraph::new(text)
                .style(Style::default().fg(theme.accent))
                .alignment(Alignment::Center);
            f.render_widget(loading, center_vertically(inner, 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn window_scrolls_to_keep_selection_visible() {
        let area = Rect::new(0, 0, 50, 26);
        // 2 columns of 24+1, 2 rows of 12+1.
        let top = grid_window(area, 24, 12, 10, 0);
        assert_eq!((top.columns, top.start, top.end), (2, 0, 4));

        let scrolled = grid_window(area, 24, 12, 10, 7);
        assert_eq!((scrolled.start, scrolled.end), (4, 8));

        let last = grid_window(area, 24, 12, 10, 99);
        assert_eq!((last.start, last.end), (6, 10));
    }

    #[test]
    fn window_always_has_one_column() {
        let window = grid_window(Rect::new(0, 0, 5, 5), 24, 12, 3, 1);
        assert_eq!(window.columns, 1);
        assert_eq!((window.start, window.end), (1, 2));
    }

    #[test]
    fn huge_tiles_fall_back_to_single_column() {
        let window = grid_window(Rect::new(0, 0, 80, 24), u16::MAX, u16::MAX, 5, 2);
        assert_eq!(window.columns, 1);
        assert_eq!((window.start, window.end), (2, 3));

        let mut app = test_app(3, &["a"]);
        app.config.gallery.tile_width = u16::MAX;
        app.config.gallery.tile_height = u16::MAX;
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test terminal");
        let theme = app.ui.theme.clone();

        terminal
            .draw(|f| draw_grid(f, &mut app, Rect::new(0, 0, 40, 10), &theme, true))
            .expect("draw grid");

        assert!(app.ui.regions.tiles.is_empty());
    }

    #[test]
    fn fade_color_blends_rgb() {
        let from = Color::Rgb(0, 0, 0);
        let to = Color::Rgb(200, 100, 50);
        assert_eq!(fade_color(from, to, 0.0), from);
        assert_eq!(fade_color(from, to, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(fade_color(from, to, 3.0), to);
        assert_eq!(fade_color(Color::Reset, Color::Gray, 0.2), Color::Reset);
    }

    #[test]
    fn drawing_records_tile_regions_and_columns() {
        let mut app = test_app(6, &["a"]);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");
        let theme = app.ui.theme.clone();

        terminal
            .draw(|f| draw_grid(f, &mut app, Rect::new(0, 0, 60, 30), &theme, true))
            .expect("draw grid");

        assert_eq!(app.ui.grid_columns, 2);
        let positions: Vec<usize> = app.ui.regions.tiles.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_board_draws_placeholder_only() {
        let mut app = test_app(4, &["a"]);
        app.apply_filter(crate::gallery::Filter::Category("zzz".into()));
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test terminal");
        let theme = app.ui.theme.clone();

        terminal
            .draw(|f| draw_grid(f, &mut app, Rect::new(0, 0, 40, 10), &theme, true))
            .expect("draw grid");

        assert!(app.ui.regions.tiles.is_empty());
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No photos found"));
    }
}
