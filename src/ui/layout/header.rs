use crate::app::App;
use crate::gallery::Filter;
use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use ratatui_image::picker::ProtocolType;

pub(super) fn draw_status(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    if let Some(message) = &app.ui.status_message {
        let line = Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(theme.warning)),
            Span::styled(message, Style::default().fg(theme.warning)),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

/// Title line plus the clickable filter bar.
pub(super) fn draw_header(f: &mut Frame, app: &mut App, area: Rect, theme: &GalleryTheme) {
    if area.height == 0 {
        return;
    }

    let shown = app.gallery.active().len();
    let total = app.gallery.catalog().len();
    let count_info = if app.gallery.filter() == &Filter::All {
        format!("{} photos", total)
    } else {
        format!("{}/{} photos", shown, total)
    };

    let title = Line::from(vec![
        Span::styled(
            " Keepsake ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme.fg_muted)),
        Span::styled(count_info, Style::default().fg(theme.fg_secondary)),
        Span::styled(" │ ", Style::default().fg(theme.fg_muted)),
        Span::styled(
            format!("[img:{}]", preview_protocol_label(app)),
            Style::default().fg(theme.fg_muted),
        ),
    ]);
    f.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        Rect::new(area.x, area.y, area.width, 1),
    );

    if area.height < 2 {
        return;
    }
    let bar_row = area.y + 1;
    let active_idx = app.active_filter_index();

    let mut spans = Vec::with_capacity(app.filters.len() * 2);
    let mut x = area.x + 1;
    let right = area.right();
    for (idx, filter) in app.filters.iter().enumerate() {
        let label = if idx < 10 {
            format!(" {} {} ", idx, filter.display_name())
        } else {
            format!(" {} ", filter.display_name())
        };
        let style = if idx == active_idx {
            Style::default()
                .fg(theme.on_accent)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };
        let span = Span::styled(label, style);
        let width = span.width() as u16;
        if x + width > right {
            break;
        }
        app.ui
            .regions
            .filter_buttons
            .push((Rect::new(x, bar_row, width, 1), idx));
        spans.push(span);
        spans.push(Span::raw(" "));
        x += width + 1;
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect::new(area.x + 1, bar_row, area.width.saturating_sub(1), 1),
    );
}

pub(super) fn draw_footer(f: &mut Frame, app: &App, area: Rect, theme: &GalleryTheme) {
    if app.ui.command_mode {
        let cmd_line = Line::from(vec![
            Span::styled(
                ":",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&app.ui.command_buffer, Style::default().fg(theme.fg_primary)),
            Span::styled("█", Style::default().fg(theme.accent)),
        ]);
        f.render_widget(Paragraph::new(cmd_line), area);
        return;
    }

    let sep = Span::styled(" │ ", Style::default().fg(theme.fg_muted));
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let what = |w: &'static str| Span::styled(w, Style::default().fg(theme.fg_muted));

    let help = Line::from(vec![
        key("←/→/↑/↓"),
        what(" move"),
        sep.clone(),
        key("Enter"),
        what(" view"),
        sep.clone(),
        key("0-9/Tab"),
        what(" filter"),
        sep.clone(),
        key("s"),
        what(" share"),
        sep.clone(),
        key(":"),
        what(" cmd"),
        sep.clone(),
        key("?"),
        what(" help"),
        sep,
        key("q"),
        what(" quit"),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Center), area);
}

pub(super) fn preview_protocol_label(app: &App) -> &'static str {
    app.previews
        .image_picker
        .as_ref()
        .map(|p| match p.protocol_type {
            ProtocolType::Halfblocks => "HB",
            ProtocolType::Sixel => "SIX",
            ProtocolType::Kitty => "KTY",
            ProtocolType::Iterm2 => "IT2",
        })
        .unwrap_or("N/A")
}
