use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

mod glyphs;
mod grid;
mod header;
mod popups;
mod viewer;

use glyphs::draw_glyphs;
use grid::draw_grid;
use header::{draw_footer, draw_header, draw_status};
use popups::draw_help_popup;
use viewer::draw_viewer;

pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.ui.theme.clone();
    let area = f.area();
    app.ui.regions.clear();

    // ratatui-image writes straight to the terminal, bypassing widget z-order,
    // so no image may be drawn underneath a popup.
    let popup_active = app.ui.show_help || app.ui.command_mode;

    if app.gallery.lightbox.is_open() {
        draw_viewer(f, app, area, &theme, !popup_active);
    } else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().bg(theme.bg));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let has_status = app.ui.status_message.is_some();
        let mut constraints = vec![Constraint::Length(2)];
        if has_status {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(3));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut chunk_idx = 0;
        draw_header(f, app, chunks[chunk_idx], &theme);
        chunk_idx += 1;

        if has_status {
            draw_status(f, app, chunks[chunk_idx], &theme);
            chunk_idx += 1;
        }

        draw_glyphs(f, app, chunks[chunk_idx], &theme);
        draw_grid(f, app, chunks[chunk_idx], &theme, !popup_active);
        chunk_idx += 1;

        draw_footer(f, app, chunks[chunk_idx], &theme);
    }

    if app.ui.show_help {
        draw_help_popup(f, area, &theme);
    }
}

fn center_vertically(area: Rect, height: u16) -> Rect {
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x, y, area.width, height.min(area.height))
}

/// Largest `aspect_w:aspect_h` box that fits inside `max_w` x `max_h` cells.
fn fit_aspect(max_w: u16, max_h: u16, aspect_w: u32, aspect_h: u32) -> (u16, u16) {
    if max_w == 0 || max_h == 0 || aspect_w == 0 || aspect_h == 0 {
        return (0, 0);
    }

    let width_limited_h = ((max_w as u32) * aspect_h / aspect_w) as u16;
    if width_limited_h <= max_h {
        (max_w, width_limited_h.max(1))
    } else {
        let height = max_h;
        let width = ((height as u32) * aspect_w / aspect_h) as u16;
        (width.max(1), height)
    }
}
