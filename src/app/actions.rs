use super::App;
use crate::catalog::Photo;
use crate::share;
use anyhow::{Context, Result};
use tracing::info;

impl App {
    /// Photo the user is looking at: the viewer photo when open, else the grid highlight.
    pub fn focused_photo(&self) -> Option<&Photo> {
        if self.gallery.lightbox.is_open() {
            self.gallery.current_photo()
        } else {
            self.gallery.active().get(self.ui.selected)
        }
    }

    /// Share link for the focused photo.
    pub fn share_link(&self) -> Option<String> {
        let photo = self.focused_photo()?;
        let cfg = &self.config.share;
        let url = share::photo_url(photo, cfg.public_base_url.as_deref());
        Some(share::share_link(&cfg.service_url, &cfg.caption, &url))
    }

    /// Open the share link for the focused photo in the browser.
    pub fn share_focused(&mut self) -> Result<()> {
        let Some(link) = self.share_link() else {
            return Ok(());
        };
        share::open_url(&link).context("Share failed")?;
        let shared = self.focused_photo().map(|p| (p.id, p.label()));
        if let Some((id, label)) = shared {
            info!(id, "shared photo");
            self.ui.status_message = Some(format!("Shared {}", label));
        }
        Ok(())
    }

    /// Toggle help popup.
    pub fn toggle_help(&mut self) {
        self.ui.show_help = !self.ui.show_help;
    }
}
