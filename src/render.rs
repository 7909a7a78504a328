//! Tile rendering behind a surface abstraction.
//!
//! The gallery never draws directly: it hands photo lists to a
//! [`GallerySurface`], and preview load results are reported back to the
//! same surface by tile position. The terminal UI draws from [`TileBoard`].

use crate::catalog::Photo;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Delay added per tile position before a loaded tile fades in.
pub const FADE_STAGGER: Duration = Duration::from_millis(30);
/// Length of the fade-in once a tile starts revealing.
pub const FADE_DURATION: Duration = Duration::from_millis(600);

pub const DEFAULT_PLACEHOLDER_URL: &str =
    "https://placehold.co/400x500/e8e6e4/8b7355?text=Photo+{id}";

pub const EMPTY_MESSAGE: &str = "No photos found";

#[derive(Debug, Clone, PartialEq)]
pub enum TileState {
    /// Preview not loaded yet.
    Pending,
    /// Preview loaded; revealed after `delay` has elapsed since `at`.
    Loaded { at: Instant, delay: Duration },
    /// Load failed; the tile shows the substituted placeholder source.
    Failed { fallback_url: String },
}

/// One visual unit for a photo in the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Position within the list this tile was built from.
    pub position: usize,
    pub photo_id: u32,
    pub src: PathBuf,
    pub state: TileState,
}

impl Tile {
    /// Fade progress in `[0, 1]`; `0` while hidden or not loaded.
    pub fn fade_progress(&self, now: Instant) -> f32 {
        match &self.state {
            TileState::Loaded { at, delay } => {
                let reveal = *at + *delay;
                if now < reveal {
                    return 0.0;
                }
                let shown = now.duration_since(reveal).as_secs_f32();
                (shown / FADE_DURATION.as_secs_f32()).min(1.0)
            }
            TileState::Failed { .. } => 1.0,
            TileState::Pending => 0.0,
        }
    }

    pub fn is_revealed(&self, now: Instant) -> bool {
        self.fade_progress(now) > 0.0
    }
}

/// Rendering capability the gallery state drives.
pub trait GallerySurface {
    /// Remove all prior tiles and placeholders.
    fn clear(&mut self);
    fn push_tile(&mut self, tile: Tile);
    fn show_placeholder(&mut self, message: &str);
    fn mark_loaded(&mut self, position: usize, delay: Duration);
    fn mark_failed(&mut self, position: usize, fallback_url: String);
}

/// Render `photos` onto `surface`, one tile per record in order.
pub fn render_photos<S: GallerySurface + ?Sized>(surface: &mut S, photos: &[Photo]) {
    surface.clear();

    if photos.is_empty() {
        surface.show_placeholder(EMPTY_MESSAGE);
        return;
    }

    for (position, photo) in photos.iter().enumerate() {
        surface.push_tile(Tile {
            position,
            photo_id: photo.id,
            src: photo.src.clone(),
            state: TileState::Pending,
        });
    }
}

/// Stagger delay for a tile at `position`.
pub fn fade_delay(position: usize) -> Duration {
    FADE_STAGGER * position as u32
}

/// Report a successful preview load for the tile at `position`.
pub fn on_image_loaded<S: GallerySurface + ?Sized>(surface: &mut S, position: usize) {
    surface.mark_loaded(position, fade_delay(position));
}

/// Report a failed preview load: substitute the placeholder for `photo_id`.
pub fn on_image_failed<S: GallerySurface + ?Sized>(
    surface: &mut S,
    position: usize,
    photo_id: u32,
    template: &str,
) {
    surface.mark_failed(position, fallback_url(template, photo_id));
}

/// Placeholder image URL for a photo id. `{id}` in the template is replaced.
pub fn fallback_url(template: &str, photo_id: u32) -> String {
    template.replace("{id}", &photo_id.to_string())
}

/// In-memory tile model the terminal UI draws from.
#[derive(Debug, Default)]
pub struct TileBoard {
    pub tiles: Vec<Tile>,
    pub placeholder: Option<String>,
    /// Bumped on every clear so late load results can be discarded.
    pub generation: u64,
}

impl TileBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles still waiting on a preview.
    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.state == TileState::Pending)
            .count()
    }
}

impl GallerySurface for TileBoard {
    fn clear(&mut self) {
        self.tiles.clear();
        self.placeholder = None;
        self.generation = self.generation.wrapping_add(1);
    }

    fn push_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    fn show_placeholder(&mut self, message: &str) {
        self.placeholder = Some(message.to_string());
    }

    fn mark_loaded(&mut self, position: usize, delay: Duration) {
        if let Some(tile) = self.tiles.get_mut(position) {
            tile.state = TileState::Loaded {
                at: Instant::now(),
                delay,
            };
        }
    }

    fn mark_failed(&mut self, position: usize, fallback_url: String) {
        if let Some(tile) = self.tiles.get_mut(position) {
            tile.state = TileState::Failed { fallback_url };
        }
    }
}
