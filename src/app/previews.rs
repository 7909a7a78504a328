use super::{App, PreviewFailure, PreviewRequest, PreviewResponse};
use crate::render::{on_image_failed, on_image_loaded, TileState};
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use std::sync::mpsc::SyncSender;
use tracing::debug;

/// Cap on terminal image protocols kept alive. Kitty image ids are a u8 and
/// are never released by ratatui-image, so the cache is purged before they wrap.
const MAX_CACHED_PREVIEWS: usize = 200;
const MAX_IN_FLIGHT_PREVIEWS: usize = 12;

impl App {
    /// Request a tile preview to be loaded in background.
    pub fn request_preview(&mut self, position: usize) {
        let Some(tile) = self.board.tile(position) else {
            return;
        };

        // Failed tiles show their placeholder; no retry.
        if matches!(tile.state, TileState::Failed { .. }) {
            return;
        }

        if self.previews.cache.contains_key(&position) || self.previews.loading.contains(&position)
        {
            return;
        }

        if self.previews.loading.len() >= MAX_IN_FLIGHT_PREVIEWS {
            return;
        }

        if let Some(tx) = &self.previews.request_tx {
            let request = PreviewRequest {
                position,
                photo_id: tile.photo_id,
                source_path: tile.src.clone(),
                generation: self.board.generation,
            };
            if tx.try_send(request).is_ok() {
                self.previews.loading.insert(position);
            }
        }
    }

    fn new_preview_picker() -> Picker {
        let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
        picker.guess_protocol();
        picker
    }

    /// Drop all decoded previews, e.g. after the tile list was rebuilt.
    pub(super) fn reset_preview_cache(&mut self) {
        Self::clear_terminal_images();
        self.previews.cache.clear();
        self.previews.loading.clear();
    }

    /// Handle a decoded preview from the worker thread.
    pub fn handle_preview_ready(&mut self, response: PreviewResponse) {
        // Tiles were re-rendered since the request; the old tile is gone.
        if response.generation != self.board.generation {
            return;
        }
        self.previews.loading.remove(&response.position);

        if self.board.tile(response.position).is_none() {
            return;
        }

        if self.previews.cache.len() >= MAX_CACHED_PREVIEWS {
            debug!("preview cache full, purging");
            self.reset_preview_cache();
        }

        if let Some(picker) = &mut self.previews.image_picker {
            let protocol = picker.new_resize_protocol(response.image);
            self.previews.cache.insert(response.position, protocol);
        }

        // A purge can re-request a tile that already faded in; keep its timing.
        if matches!(
            self.board.tile(response.position).map(|t| &t.state),
            Some(TileState::Pending)
        ) {
            on_image_loaded(&mut self.board, response.position);
        }
    }

    /// Handle a preview that failed to load: substitute the placeholder source.
    pub fn handle_preview_failed(&mut self, failure: PreviewFailure) {
        if failure.generation != self.board.generation {
            return;
        }
        self.previews.loading.remove(&failure.position);
        on_image_failed(
            &mut self.board,
            failure.position,
            failure.photo_id,
            &self.config.fallback.placeholder_url,
        );
    }

    /// Purge all Kitty graphics protocol images from the terminal.
    ///
    /// Sends `APC G a=d,d=A ST`, which non-Kitty terminals ignore.
    fn clear_terminal_images() {
        let is_kitty = std::env::var("TERM")
            .map(|t| t.contains("kitty"))
            .unwrap_or(false)
            || std::env::var("KITTY_WINDOW_ID").is_ok();
        if !is_kitty {
            return;
        }
        use std::io::Write;
        let _ = std::io::stdout().write_all(b"\x1b_Ga=d,d=A\x1b\\");
        let _ = std::io::stdout().flush();
    }

    pub fn get_preview(&mut self, position: usize) -> Option<&mut Box<dyn StatefulProtocol>> {
        self.previews.cache.get_mut(&position)
    }

    pub fn is_loading(&self, position: usize) -> bool {
        self.previews.loading.contains(&position)
    }

    pub fn set_preview_channel(&mut self, tx: SyncSender<PreviewRequest>) {
        self.previews.request_tx = Some(tx);
    }

    /// Terminal resized: protocols are sized for the old cell metrics.
    pub fn handle_resize(&mut self) {
        self.reset_preview_cache();
        self.previews.image_picker = Some(Self::new_preview_picker());
    }
}
