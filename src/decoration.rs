//! Floating glyphs drifting behind the gallery.

use rand::Rng;
use ratatui::layout::Rect;
use std::time::Duration;

pub const DEFAULT_GLYPH_COUNT: usize = 25;
pub const DEFAULT_SYMBOLS: &[char] = &['♥', '❀', '⚜', '✧'];

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingGlyph {
    pub symbol: char,
    /// Relative size, `0.8..2.3`. Large glyphs are drawn bold.
    pub scale: f32,
    /// Horizontal offset as a percentage of the area width.
    pub left_pct: f32,
    /// Time to drift from bottom to top.
    pub duration: Duration,
    /// How far into its loop the glyph already is at spawn time.
    pub offset: Duration,
}

impl FloatingGlyph {
    /// Cell the glyph occupies `elapsed` after spawn, or `None` if `area` is empty.
    pub fn position(&self, elapsed: Duration, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 || self.duration.is_zero() {
            return None;
        }
        let cycle = self.duration.as_secs_f32();
        let t = (elapsed + self.offset).as_secs_f32() % cycle / cycle;

        let x = area.x + ((self.left_pct / 100.0) * area.width as f32) as u16;
        let rise = (t * area.height as f32) as u16;
        let y = area.y + area.height.saturating_sub(1).saturating_sub(rise.min(area.height - 1));
        Some((x.min(area.right().saturating_sub(1)), y))
    }

    pub fn is_large(&self) -> bool {
        self.scale > 1.5
    }
}

/// Spawn `count` glyphs with randomized symbol, size, column and timing.
pub fn spawn_glyphs<R: Rng + ?Sized>(rng: &mut R, count: usize, symbols: &[char]) -> Vec<FloatingGlyph> {
    if symbols.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| FloatingGlyph {
            symbol: symbols[rng.gen_range(0..symbols.len())],
            scale: rng.gen::<f32>() * 1.5 + 0.8,
            left_pct: rng.gen::<f32>() * 100.0,
            duration: Duration::from_secs_f32(rng.gen::<f32>() * 10.0 + 15.0),
            offset: Duration::from_secs_f32(rng.gen::<f32>() * 25.0),
        })
        .collect()
}
