use crate::catalog::CatalogSpec;
use crate::decoration::{spawn_glyphs, FloatingGlyph};
use crate::gallery::{Filter, Gallery, Swipe};
use crate::render::TileBoard;
use anyhow::Result;
use crossterm::event;
use ratatui::layout::Rect;
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::SyncSender;
use std::time::Instant;
use tracing::info;

mod actions;
mod commands;
mod config;
mod filters;
mod input;
mod navigation;
mod previews;
mod runtime;

pub use config::Config;
pub use runtime::run_tui;

/// Request to load a photo preview in background
pub struct PreviewRequest {
    pub position: usize,
    pub photo_id: u32,
    pub source_path: PathBuf,
    pub generation: u64,
}

/// Decoded preview for a tile
pub struct PreviewResponse {
    pub position: usize,
    pub image: image::DynamicImage,
    pub generation: u64,
}

/// Preview that could not be loaded
pub struct PreviewFailure {
    pub position: usize,
    pub photo_id: u32,
    pub generation: u64,
}

/// Events from background threads
pub enum AppEvent {
    Key(event::KeyEvent),
    Mouse(event::MouseEvent),
    PreviewReady(PreviewResponse),
    PreviewFailed(PreviewFailure),
    Resize,
    Tick,
}

/// Clickable viewer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerControl {
    Previous,
    Next,
    Close,
}

/// Screen regions recorded while drawing, used for mouse hit-testing.
#[derive(Debug, Default)]
pub struct HitRegions {
    pub filter_buttons: Vec<(Rect, usize)>,
    pub tiles: Vec<(Rect, usize)>,
    pub viewer_frame: Option<Rect>,
    pub viewer_controls: Vec<(Rect, ViewerControl)>,
}

impl HitRegions {
    pub fn clear(&mut self) {
        self.filter_buttons.clear();
        self.tiles.clear();
        self.viewer_frame = None;
        self.viewer_controls.clear();
    }
}

/// Filter bar entries: "all" followed by each distinct category.
fn filter_bar(spec: &CatalogSpec) -> Vec<Filter> {
    std::iter::once(Filter::All)
        .chain(spec.distinct_categories().into_iter().map(Filter::Category))
        .collect()
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// UI-related transient state (popups, command mode, grid cursor).
pub struct UiState {
    pub should_quit: bool,
    pub show_help: bool,
    pub command_mode: bool,
    pub command_buffer: String,
    pub status_message: Option<String>,
    /// Highlighted tile in the grid.
    pub selected: usize,
    /// Columns of the last drawn grid, for vertical movement.
    pub grid_columns: usize,
    pub regions: HitRegions,
    pub theme: crate::ui::theme::GalleryTheme,
}

impl UiState {
    fn new(theme_mode: &str) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            command_mode: false,
            command_buffer: String::new(),
            status_message: None,
            selected: 0,
            grid_columns: 1,
            regions: HitRegions::default(),
            theme: crate::ui::theme::gallery_theme(theme_mode),
        }
    }
}

/// Preview rendering state.
pub struct PreviewState {
    pub image_picker: Option<Picker>,
    pub cache: HashMap<usize, Box<dyn StatefulProtocol>>,
    pub loading: HashSet<usize>,
    request_tx: Option<SyncSender<PreviewRequest>>,
}

/// Floating glyph layer.
pub struct DecorationState {
    pub glyphs: Vec<FloatingGlyph>,
    pub started: Instant,
}

pub struct App {
    pub config: Config,
    pub gallery: Gallery,
    pub board: TileBoard,
    /// Filter bar entries: "all" followed by each category.
    pub filters: Vec<Filter>,
    pub ui: UiState,
    pub previews: PreviewState,
    pub decoration: DecorationState,
    pub swipe: Swipe,
}

impl App {
    /// Create a new App from configuration and render the full catalog.
    pub fn new(config: Config) -> Result<Self> {
        // Query the terminal for font size and graphics protocol (Kitty, Sixel, ...).
        let image_picker = Picker::from_termios()
            .ok()
            .map(|mut p| {
                p.guess_protocol();
                p
            })
            .or_else(|| Some(Picker::new((8, 16))));

        Ok(Self::with_picker(config, image_picker))
    }

    pub(crate) fn with_picker(config: Config, image_picker: Option<Picker>) -> Self {
        let spec = config.catalog_spec();
        let gallery = Gallery::from_spec(&spec);
        let mut board = TileBoard::new();
        gallery.render(&mut board);

        let filters = filter_bar(&spec);

        let glyphs = if config.decoration.enabled {
            spawn_glyphs(
                &mut rand::thread_rng(),
                config.decoration.glyph_count,
                &config.decoration.symbols,
            )
        } else {
            Vec::new()
        };

        info!(
            photos = gallery.catalog().len(),
            folder = %spec.folder.display(),
            "gallery ready"
        );

        let ui = UiState::new(&config.theme.mode);
        Self {
            config,
            gallery,
            board,
            filters,
            ui,
            previews: PreviewState {
                image_picker,
                cache: HashMap::new(),
                loading: HashSet::new(),
                request_tx: None,
            },
            decoration: DecorationState {
                glyphs,
                started: Instant::now(),
            },
            swipe: Swipe::default(),
        }
    }
}
