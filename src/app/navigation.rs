use super::App;
use tracing::debug;

impl App {
    /// Move the grid highlight by `delta` tiles, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.gallery.active().len();
        if len == 0 {
            self.ui.selected = 0;
            return;
        }
        let target = self.ui.selected as isize + delta;
        self.ui.selected = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn select_next_tile(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev_tile(&mut self) {
        self.move_selection(-1);
    }

    pub fn select_tile_below(&mut self) {
        self.move_selection(self.ui.grid_columns.max(1) as isize);
    }

    pub fn select_tile_above(&mut self) {
        self.move_selection(-(self.ui.grid_columns.max(1) as isize));
    }

    /// Open the viewer on a tile position; errors go to the status line.
    pub fn open_viewer_at(&mut self, position: usize) {
        match self.gallery.open_viewer(position) {
            Ok(photo) => {
                debug!(id = photo.id, position, "viewer opened");
                self.ui.selected = position;
                self.ui.status_message = None;
            }
            Err(e) => {
                self.ui.status_message = Some(e.to_string());
            }
        }
    }

    pub fn open_selected(&mut self) {
        self.open_viewer_at(self.ui.selected);
    }

    pub fn viewer_next(&mut self) {
        self.gallery.next_photo();
        self.sync_selection_to_viewer();
    }

    pub fn viewer_prev(&mut self) {
        self.gallery.previous_photo();
        self.sync_selection_to_viewer();
    }

    pub fn close_viewer(&mut self) {
        self.gallery.close_viewer();
        self.sync_selection_to_viewer();
    }

    /// Keep the grid highlight on the photo last shown in the viewer.
    fn sync_selection_to_viewer(&mut self) {
        if self.gallery.current_photo().is_some() {
            self.ui.selected = self.gallery.lightbox.cursor();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::test_app;

    #[test]
    fn selection_is_clamped() {
        let mut app = test_app(5, &["a"]);
        app.select_prev_tile();
        assert_eq!(app.ui.selected, 0);
        app.ui.grid_columns = 3;
        app.select_tile_below();
        app.select_tile_below();
        assert_eq!(app.ui.selected, 4);
        app.select_tile_above();
        assert_eq!(app.ui.selected, 1);
    }

    #[test]
    fn viewer_navigation_moves_grid_highlight() {
        let mut app = test_app(4, &["a"]);
        app.ui.selected = 3;
        app.open_selected();
        assert!(app.gallery.lightbox.is_open());
        app.viewer_next();
        assert_eq!(app.ui.selected, 0);
        app.viewer_prev();
        app.viewer_prev();
        app.close_viewer();
        assert_eq!(app.ui.selected, 2);
        assert!(!app.gallery.lightbox.is_open());
    }

    #[test]
    fn opening_on_empty_list_reports_status() {
        let mut app = test_app(0, &["a"]);
        app.open_selected();
        assert!(!app.gallery.lightbox.is_open());
        assert!(app.ui.status_message.is_some());
    }
}
