use crate::app::App;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

/// Background layer of drifting glyphs; tiles drawn afterwards cover it.
pub(super) fn draw_glyphs(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    let elapsed = app.decoration.started.elapsed();
    for glyph in &app.decoration.glyphs {
        let Some((x, y)) = glyph.position(elapsed, area) else {
            continue;
        };
        let style = if glyph.is_large() {
            Style::default()
                .fg(theme.glyph_large)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.glyph)
        };
        let cell = Paragraph::new(Span::styled(glyph.symbol.to_string(), style));
        f.render_widget(cell, Rect::new(x, y, 1, 1));
    }
}
