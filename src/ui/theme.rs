use ratatui::style::Color;

/// Gallery palette: warm ivory and gold accents.
#[derive(Clone, Debug)]
pub struct GalleryTheme {
    pub bg: Color,
    /// Backdrop behind the open viewer.
    pub backdrop: Color,

    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    pub accent: Color,
    pub accent_soft: Color,
    pub highlight: Color,
    /// Text drawn on an accent background.
    pub on_accent: Color,

    pub warning: Color,

    pub border: Color,
    pub border_focused: Color,

    /// Floating glyph colors, small and large.
    pub glyph: Color,
    pub glyph_large: Color,
}

impl GalleryTheme {
    /// For light terminal backgrounds.
    pub fn ivory() -> Self {
        Self {
            bg: Color::Reset,
            backdrop: Color::Rgb(232, 230, 228),

            fg_primary: Color::Rgb(40, 32, 24),
            fg_secondary: Color::Rgb(92, 74, 56),
            fg_muted: Color::Rgb(139, 115, 85), // #8b7355

            accent: Color::Rgb(139, 101, 40),
            accent_soft: Color::Rgb(176, 140, 90),
            highlight: Color::Rgb(170, 60, 80),
            on_accent: Color::Rgb(255, 250, 240),

            warning: Color::Rgb(153, 101, 21),

            border: Color::Rgb(205, 195, 180),
            border_focused: Color::Rgb(139, 101, 40),

            glyph: Color::Rgb(225, 200, 200),
            glyph_large: Color::Rgb(210, 170, 175),
        }
    }

    /// For dark terminal backgrounds.
    pub fn candlelight() -> Self {
        Self {
            bg: Color::Reset,
            backdrop: Color::Rgb(12, 10, 9),

            fg_primary: Color::Rgb(250, 245, 235),
            fg_secondary: Color::Rgb(220, 205, 185),
            fg_muted: Color::Rgb(120, 108, 95),

            accent: Color::Rgb(230, 190, 120),
            accent_soft: Color::Rgb(180, 150, 110),
            highlight: Color::Rgb(240, 130, 150),
            on_accent: Color::Rgb(20, 16, 12),

            warning: Color::Rgb(255, 215, 95),

            border: Color::Rgb(80, 70, 60),
            border_focused: Color::Rgb(230, 190, 120),

            glyph: Color::Rgb(90, 60, 66),
            glyph_large: Color::Rgb(130, 85, 95),
        }
    }
}

impl Default for GalleryTheme {
    fn default() -> Self {
        if is_light_theme() {
            Self::ivory()
        } else {
            Self::candlelight()
        }
    }
}

/// Theme for a configured mode: "light", "dark", anything else auto-detects.
pub fn gallery_theme(mode: &str) -> GalleryTheme {
    match mode.to_ascii_lowercase().as_str() {
        "light" => GalleryTheme::ivory(),
        "dark" => GalleryTheme::candlelight(),
        _ => GalleryTheme::default(),
    }
}

/// Check if the terminal background is light (for auto mode and change detection).
pub fn is_light_theme() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| light_from_colorfgbg(&v))
        .unwrap_or(false)
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;extra;bg`); ANSI 7 and 9..=15 are light backgrounds.
fn light_from_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg == 7 || (9..=15).contains(&bg))
}
