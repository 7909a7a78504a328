use crate::ui::theme::GalleryTheme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Gallery",
        &[
            ("h/l ←/→", "Previous / next tile"),
            ("j/k ↑/↓", "Row below / above"),
            ("Enter", "Open viewer"),
            ("click", "Open the clicked photo"),
            ("0-9", "Filter (0 = all)"),
            ("Tab", "Cycle filters"),
            ("s", "Share highlighted photo"),
        ],
    ),
    (
        "Viewer",
        &[
            ("←/→", "Previous / next photo"),
            ("drag", "Swipe to navigate"),
            ("Esc", "Close (or click backdrop)"),
        ],
    ),
    (
        "Commands (:)",
        &[
            (":f <tag>", "Filter by category"),
            (":all", "Show everything"),
            (":go <n>", "Open photo at position n"),
            (":share", "Share focused photo"),
            (":reload", "Regenerate from config"),
            (":q", "Quit"),
        ],
    ),
];

pub(super) fn draw_help_popup(f: &mut Frame, area: Rect, theme: &GalleryTheme) {
    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = 24.min(area.height.saturating_sub(2));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" ✧ Keepsake Help ")
        .title_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for (i, (heading, entries)) in HELP_SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::styled(
            *heading,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        for (keys, what) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", keys), Style::default().fg(theme.accent)),
                Span::styled(*what, Style::default().fg(theme.fg_secondary)),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "  q/Esc quits · ? closes this help",
        Style::default().fg(theme.fg_muted),
    ));

    f.render_widget(Paragraph::new(lines), inner);
}
